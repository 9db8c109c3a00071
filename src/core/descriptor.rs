use std::path::PathBuf;

use super::error::{FramebufferError, Result};

const DUMMY_PREFIX: &str = "dummy_";

/// Parsed device descriptor - either a device node or an in-memory test surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Descriptor {
    /// Absolute path to an fbdev node, e.g. `/dev/fb1`
    Device(PathBuf),
    /// `dummy_<W>x<H>`
    Dummy { width: u32, height: u32 },
}

impl Descriptor {
    pub fn parse(descriptor: &str) -> Result<Self> {
        if descriptor.starts_with('/') {
            return Ok(Descriptor::Device(PathBuf::from(descriptor)));
        }

        let invalid = |reason: &str| FramebufferError::InvalidDescriptor {
            descriptor: descriptor.to_string(),
            reason: reason.to_string(),
        };

        let dims = descriptor
            .strip_prefix(DUMMY_PREFIX)
            .ok_or_else(|| invalid("expected an absolute device path or dummy_<W>x<H>"))?;
        let (w, h) = dims
            .split_once('x')
            .ok_or_else(|| invalid("dummy dimensions must be <W>x<H>"))?;

        let width: u32 = w.parse().map_err(|_| invalid("unparsable dummy width"))?;
        let height: u32 = h.parse().map_err(|_| invalid("unparsable dummy height"))?;
        if width == 0 || height == 0 {
            return Err(invalid("dummy dimensions must be non-zero"));
        }
        let shadow_bytes = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(std::mem::size_of::<u32>()))
            .filter(|&bytes| bytes <= isize::MAX as usize);
        if shadow_bytes.is_none() {
            return Err(invalid("dummy surface has more pixels than fit in memory"));
        }

        Ok(Descriptor::Dummy { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_device_path() {
        assert_eq!(
            Descriptor::parse("/dev/fb1").unwrap(),
            Descriptor::Device(PathBuf::from("/dev/fb1"))
        );
    }

    #[test]
    fn test_parse_dummy() {
        assert_eq!(
            Descriptor::parse("dummy_160x128").unwrap(),
            Descriptor::Dummy {
                width: 160,
                height: 128
            }
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in [
            "",
            "fb0",
            "dev/fb0",
            "dummy_",
            "dummy_160",
            "dummy_axb",
            "dummy_160x",
            "dummy_-1x10",
            "dummy_0x10",
            "dummy_10x0",
            "dummy_160x128x2",
            "dummy_4294967295x4294967295",
        ] {
            let err = Descriptor::parse(bad).unwrap_err();
            assert!(
                matches!(err, FramebufferError::InvalidDescriptor { .. }),
                "{:?} should be invalid, got {:?}",
                bad,
                err
            );
        }
    }
}
