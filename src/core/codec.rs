//! ARGB <-> on-device pixel conversions
//!
//! All conversions assume a format already validated by `PixelFormat::from_bpp`.
//! Channel reduction truncates: 16-bit packing floor-divides each channel and
//! unpacking zero-fills the dropped low bits, so 16-bit and 8-bit do not round trip.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::pixel_format::PixelFormat;

/// Order of color channels in device memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    /// Red in the most significant position (the usual fbdev layout)
    #[default]
    Rgb,
    /// Red and blue swapped
    Bgr,
}

impl ChannelOrder {
    /// Reorder an ARGB value for this channel order. Applying it twice is the identity.
    pub fn swizzle(self, argb: u32) -> u32 {
        match self {
            ChannelOrder::Rgb => argb,
            ChannelOrder::Bgr => {
                let r = (argb >> 16) & 0xFF;
                let b = argb & 0xFF;
                (argb & 0xFF00_FF00) | (b << 16) | r
            }
        }
    }
}

/// Split ARGB into its (r, g, b) channel bytes
pub fn channels(argb: u32) -> (u8, u8, u8) {
    ((argb >> 16) as u8, (argb >> 8) as u8, argb as u8)
}

/// Assemble (r, g, b) into an ARGB value with a zero top byte
pub fn from_channels(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Pack an ARGB value into the format's on-device bits
pub fn pack(format: PixelFormat, argb: u32) -> u32 {
    match format {
        PixelFormat::Dummy => argb,
        PixelFormat::Low8 => argb & 0xFF,
        PixelFormat::Rgb565 => {
            let (r, g, b) = channels(argb);
            ((r as u32 / 8) << 11) | ((g as u32 / 4) << 5) | (b as u32 / 8)
        }
        PixelFormat::Rgb888 => argb & 0x00FF_FFFF,
    }
}

/// Reconstruct an ARGB value from on-device bits
pub fn unpack(format: PixelFormat, bits: u32) -> u32 {
    match format {
        PixelFormat::Dummy => bits,
        PixelFormat::Low8 => bits & 0xFF,
        PixelFormat::Rgb565 => {
            let r = ((bits >> 11) & 0x1F) << 3;
            let g = ((bits >> 5) & 0x3F) << 2;
            let b = (bits & 0x1F) << 3;
            (r << 16) | (g << 8) | b
        }
        PixelFormat::Rgb888 => bits & 0x00FF_FFFF,
    }
}

/// Packed bytes of one pixel, ready to copy into device memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedPixel {
    bytes: [u8; 3],
    len: usize,
}

impl PackedPixel {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

/// Encode an ARGB value into the bytes stored at the pixel's address
pub fn encode(format: PixelFormat, argb: u32) -> PackedPixel {
    let bits = pack(format, argb);
    match format {
        PixelFormat::Dummy => PackedPixel { bytes: [0; 3], len: 0 },
        PixelFormat::Low8 => PackedPixel {
            bytes: [bits as u8, 0, 0],
            len: 1,
        },
        PixelFormat::Rgb565 => {
            let [a, b] = (bits as u16).to_ne_bytes();
            PackedPixel {
                bytes: [a, b, 0],
                len: 2,
            }
        }
        PixelFormat::Rgb888 => {
            let (r, g, b) = channels(bits);
            PackedPixel {
                bytes: [r, g, b],
                len: 3,
            }
        }
    }
}

/// Decode the bytes stored at a pixel's address back into ARGB.
/// Short input decodes as black.
pub fn decode(format: PixelFormat, bytes: &[u8]) -> u32 {
    match (format, bytes) {
        (PixelFormat::Low8, [v, ..]) => unpack(format, *v as u32),
        (PixelFormat::Rgb565, [a, b, ..]) => unpack(format, u16::from_ne_bytes([*a, *b]) as u32),
        (PixelFormat::Rgb888, [r, g, b, ..]) => from_channels(*r, *g, *b),
        _ => 0,
    }
}

/// Byte range of pixel `index` in device memory, `None` for unpacked formats
pub fn byte_range(format: PixelFormat, index: usize) -> Option<Range<usize>> {
    let bpp = format.bytes_per_pixel()?;
    let start = index.checked_mul(bpp)?;
    Some(start..start.checked_add(bpp)?)
}

/// Bytes of device memory needed for a `width` x `height` frame,
/// `None` if that does not fit in `usize`
pub fn frame_bytes(format: PixelFormat, width: u32, height: u32) -> Option<usize> {
    let pixels = (width as usize).checked_mul(height as usize)?;
    pixels.checked_mul(format.bytes_per_pixel().unwrap_or(0))
}
