use std::fmt;
use std::io;
use std::path::PathBuf;

/// Which screen-info query failed during device introspection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenQuery {
    Fixed,
    Variable,
}

/// Error kinds without payload, for matching and legacy error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    OpenFailed,
    IntrospectionFailed(ScreenQuery),
    UnsupportedDepth,
    MappingFailed,
    BufferTooSmall,
    InvalidDescriptor,
    OutOfRange,
    LengthMismatch,
    PixelNotMapped,
    Closed,
}

impl ErrorKind {
    /// Numeric code of the device-open failures, as returned by the C driver
    pub fn code(self) -> Option<i64> {
        match self {
            ErrorKind::OpenFailed => Some(1),
            ErrorKind::IntrospectionFailed(ScreenQuery::Fixed) => Some(2),
            ErrorKind::IntrospectionFailed(ScreenQuery::Variable) => Some(3),
            ErrorKind::UnsupportedDepth => Some(4),
            ErrorKind::MappingFailed | ErrorKind::BufferTooSmall => Some(5),
            _ => None,
        }
    }
}

/// Errors returned by surface operations
#[derive(Debug)]
pub enum FramebufferError {
    /// Device node could not be opened
    OpenFailed { path: PathBuf, source: io::Error },
    /// Fixed or variable screen info query failed
    IntrospectionFailed {
        path: PathBuf,
        query: ScreenQuery,
        source: io::Error,
    },
    /// Device reports a bit depth other than 8, 16 or 24
    UnsupportedDepth { path: PathBuf, bpp: u32 },
    /// Mapping device memory failed
    MappingFailed { path: PathBuf, source: io::Error },
    /// Device memory is smaller than one visible frame
    BufferTooSmall {
        path: PathBuf,
        required: usize,
        available: usize,
    },
    /// Descriptor is neither an absolute path nor `dummy_<W>x<H>`
    InvalidDescriptor { descriptor: String, reason: String },
    /// Pixel index outside `[0, width * height)`
    OutOfRange { index: i64, len: usize },
    /// Frame length differs from `width * height`
    LengthMismatch { expected: usize, actual: usize },
    /// Device memory does not cover the pixel's bytes
    PixelNotMapped { index: usize, mapped: usize },
    /// Surface was already closed
    Closed,
}

impl FramebufferError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FramebufferError::OpenFailed { .. } => ErrorKind::OpenFailed,
            FramebufferError::IntrospectionFailed { query, .. } => ErrorKind::IntrospectionFailed(*query),
            FramebufferError::UnsupportedDepth { .. } => ErrorKind::UnsupportedDepth,
            FramebufferError::MappingFailed { .. } => ErrorKind::MappingFailed,
            FramebufferError::BufferTooSmall { .. } => ErrorKind::BufferTooSmall,
            FramebufferError::InvalidDescriptor { .. } => ErrorKind::InvalidDescriptor,
            FramebufferError::OutOfRange { .. } => ErrorKind::OutOfRange,
            FramebufferError::LengthMismatch { .. } => ErrorKind::LengthMismatch,
            FramebufferError::PixelNotMapped { .. } => ErrorKind::PixelNotMapped,
            FramebufferError::Closed => ErrorKind::Closed,
        }
    }
}

impl fmt::Display for FramebufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FramebufferError::OpenFailed { path, .. } => {
                write!(f, "unable to open framebuffer device {}", path.display())
            }
            FramebufferError::IntrospectionFailed { path, query, .. } => {
                let which = match query {
                    ScreenQuery::Fixed => "fixed",
                    ScreenQuery::Variable => "variable",
                };
                write!(f, "error reading {} screen info for {}", which, path.display())
            }
            FramebufferError::UnsupportedDepth { path, bpp } => write!(
                f,
                "invalid color depth {} for {}; 8, 16 and 24 supported",
                bpp,
                path.display()
            ),
            FramebufferError::MappingFailed { path, .. } => {
                write!(f, "unable to mmap {}", path.display())
            }
            FramebufferError::BufferTooSmall {
                path,
                required,
                available,
            } => write!(
                f,
                "{} exposes {} bytes, a frame needs {}",
                path.display(),
                available,
                required
            ),
            FramebufferError::InvalidDescriptor { descriptor, reason } => {
                write!(f, "invalid device descriptor {:?}: {}", descriptor, reason)
            }
            FramebufferError::OutOfRange { index, len } => {
                write!(f, "pixel index {} out of range for {} pixels", index, len)
            }
            FramebufferError::LengthMismatch { expected, actual } => {
                write!(f, "frame has {} pixels, surface has {}", actual, expected)
            }
            FramebufferError::PixelNotMapped { index, mapped } => {
                write!(f, "pixel {} lies outside the {} mapped bytes", index, mapped)
            }
            FramebufferError::Closed => write!(f, "surface is closed"),
        }
    }
}

impl std::error::Error for FramebufferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FramebufferError::OpenFailed { source, .. }
            | FramebufferError::IntrospectionFailed { source, .. }
            | FramebufferError::MappingFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FramebufferError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_legacy_codes() {
        assert_eq!(ErrorKind::OpenFailed.code(), Some(1));
        assert_eq!(ErrorKind::IntrospectionFailed(ScreenQuery::Fixed).code(), Some(2));
        assert_eq!(ErrorKind::IntrospectionFailed(ScreenQuery::Variable).code(), Some(3));
        assert_eq!(ErrorKind::UnsupportedDepth.code(), Some(4));
        assert_eq!(ErrorKind::MappingFailed.code(), Some(5));
        assert_eq!(ErrorKind::OutOfRange.code(), None);
    }

    #[test]
    fn test_source_is_io_error() {
        let err = FramebufferError::OpenFailed {
            path: PathBuf::from("/dev/fb7"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("/dev/fb7"));
        assert_eq!(err.kind(), ErrorKind::OpenFailed);
    }

    #[test]
    fn test_display_out_of_range() {
        let err = FramebufferError::OutOfRange { index: -1, len: 100 };
        assert_eq!(err.to_string(), "pixel index -1 out of range for 100 pixels");
        assert!(err.source().is_none());
    }
}
