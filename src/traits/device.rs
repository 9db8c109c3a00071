use std::io;
use std::path::Path;

/// Geometry and depth reported by the variable screen-info query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VariableScreenInfo {
    pub xres: u32,
    pub yres: u32,
    pub bits_per_pixel: u32,
}

/// Memory layout reported by the fixed screen-info query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedScreenInfo {
    /// Length of device memory in bytes
    pub smem_len: u32,
    /// Bytes per scanline
    pub line_length: u32,
}

/// Opens device nodes by path
pub trait DeviceOpener {
    fn open(&self, path: &Path) -> io::Result<Box<dyn FramebufferDevice>>;
}

/// An open framebuffer device. Dropping it releases the descriptor.
pub trait FramebufferDevice {
    fn fixed_info(&self) -> io::Result<FixedScreenInfo>;

    fn variable_info(&self) -> io::Result<VariableScreenInfo>;

    /// Map `len` bytes of device memory. Dropping the result unmaps it.
    fn map(&mut self, len: usize) -> io::Result<Box<dyn DeviceMemory>>;
}

/// Mapped device memory
pub trait DeviceMemory {
    fn as_bytes(&self) -> &[u8];

    fn as_bytes_mut(&mut self) -> &mut [u8];

    /// Mapped length in bytes
    #[allow(clippy::len_without_is_empty)]
    fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Copy `bytes` to `offset`. Returns false, writing nothing, if the range
    /// falls outside the mapping.
    fn write_at(&mut self, offset: usize, bytes: &[u8]) -> bool {
        let Some(end) = offset.checked_add(bytes.len()) else {
            return false;
        };
        match self.as_bytes_mut().get_mut(offset..end) {
            Some(dst) => {
                dst.copy_from_slice(bytes);
                true
            }
            None => false,
        }
    }

    /// Borrow `len` bytes starting at `offset`, `None` outside the mapping
    fn read_at(&self, offset: usize, len: usize) -> Option<&[u8]> {
        self.as_bytes().get(offset..offset.checked_add(len)?)
    }
}

impl DeviceMemory for Vec<u8> {
    fn as_bytes(&self) -> &[u8] {
        self
    }

    fn as_bytes_mut(&mut self) -> &mut [u8] {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_at_in_bounds() {
        let mut mem = vec![0u8; 8];
        assert!(mem.write_at(2, &[1, 2, 3]));
        assert_eq!(mem, vec![0, 0, 1, 2, 3, 0, 0, 0]);
    }

    #[test]
    fn test_write_at_past_end_writes_nothing() {
        let mut mem = vec![0u8; 4];
        assert!(!mem.write_at(3, &[9, 9]));
        assert_eq!(mem, vec![0; 4]);
    }

    #[test]
    fn test_read_at() {
        let mem: Vec<u8> = (0..6).collect();
        assert_eq!(DeviceMemory::read_at(&mem, 4, 2), Some(&[4u8, 5][..]));
        assert_eq!(DeviceMemory::read_at(&mem, 5, 2), None);
    }
}
