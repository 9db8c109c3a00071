/// On-device pixel packing, selected once when a surface is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// In-memory test surface - ARGB kept verbatim in the shadow, no device bytes
    Dummy,
    /// One byte per pixel, low byte of the ARGB value
    Low8,
    /// Two host-endian bytes, 5-6-5 bits
    Rgb565,
    /// Three bytes, R G B in ascending address order
    Rgb888,
}

impl PixelFormat {
    /// Map a device-reported bit depth to a format, `None` if unsupported
    pub fn from_bpp(bpp: u32) -> Option<Self> {
        match bpp {
            0 => Some(PixelFormat::Dummy),
            8 => Some(PixelFormat::Low8),
            16 => Some(PixelFormat::Rgb565),
            24 => Some(PixelFormat::Rgb888),
            _ => None,
        }
    }

    /// Bits per pixel as reported to callers (0 for dummy surfaces)
    pub fn bits_per_pixel(self) -> u32 {
        match self {
            PixelFormat::Dummy => 0,
            PixelFormat::Low8 => 8,
            PixelFormat::Rgb565 => 16,
            PixelFormat::Rgb888 => 24,
        }
    }

    /// Bytes a pixel occupies in device memory, `None` when nothing is packed
    pub fn bytes_per_pixel(self) -> Option<usize> {
        match self {
            PixelFormat::Dummy => None,
            PixelFormat::Low8 => Some(1),
            PixelFormat::Rgb565 => Some(2),
            PixelFormat::Rgb888 => Some(3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bpp_supported() {
        assert_eq!(PixelFormat::from_bpp(0), Some(PixelFormat::Dummy));
        assert_eq!(PixelFormat::from_bpp(8), Some(PixelFormat::Low8));
        assert_eq!(PixelFormat::from_bpp(16), Some(PixelFormat::Rgb565));
        assert_eq!(PixelFormat::from_bpp(24), Some(PixelFormat::Rgb888));
    }

    #[test]
    fn test_from_bpp_unsupported() {
        for bpp in [1, 4, 15, 18, 32, 64] {
            assert_eq!(PixelFormat::from_bpp(bpp), None, "bpp {} should be rejected", bpp);
        }
    }

    #[test]
    fn test_bits_round_trip_through_from_bpp() {
        for format in [
            PixelFormat::Dummy,
            PixelFormat::Low8,
            PixelFormat::Rgb565,
            PixelFormat::Rgb888,
        ] {
            assert_eq!(PixelFormat::from_bpp(format.bits_per_pixel()), Some(format));
        }
    }

    #[test]
    fn test_bytes_per_pixel() {
        assert_eq!(PixelFormat::Dummy.bytes_per_pixel(), None);
        assert_eq!(PixelFormat::Low8.bytes_per_pixel(), Some(1));
        assert_eq!(PixelFormat::Rgb565.bytes_per_pixel(), Some(2));
        assert_eq!(PixelFormat::Rgb888.bytes_per_pixel(), Some(3));
    }
}
