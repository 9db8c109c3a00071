use std::fmt;
use std::io;
use std::path::Path;

use log::{debug, trace, warn};

use super::codec::{byte_range, decode, encode, frame_bytes, ChannelOrder};
use super::descriptor::Descriptor;
use super::error::{FramebufferError, Result, ScreenQuery};
use super::linux::LinuxOpener;
use super::pixel_format::PixelFormat;
use super::shadow::ShadowFrame;
use crate::traits::{DeviceMemory, DeviceOpener, FramebufferDevice};

/// Options for opening a [`Surface`]
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenOptions {
    channel_order: ChannelOrder,
}

impl OpenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Channel order of the device memory (RGB unless set)
    pub fn channel_order(&mut self, order: ChannelOrder) -> &mut Self {
        self.channel_order = order;
        self
    }

    /// Open a device path or `dummy_<W>x<H>` using the Linux fbdev backend
    pub fn open(&self, descriptor: &str) -> Result<Surface> {
        self.open_with(descriptor, &LinuxOpener)
    }

    /// Open using a custom device backend
    pub fn open_with(&self, descriptor: &str, opener: &dyn DeviceOpener) -> Result<Surface> {
        match Descriptor::parse(descriptor)? {
            Descriptor::Dummy { width, height } => {
                debug!("Opened dummy surface {}x{}", width, height);
                Ok(Surface {
                    identifier: descriptor.to_string(),
                    width,
                    height,
                    format: PixelFormat::Dummy,
                    byte_size: 0,
                    channel_order: self.channel_order,
                    shadow: ShadowFrame::new(width, height),
                    memory: None,
                    device: None,
                    open: true,
                    warned_unpacked: false,
                })
            }
            Descriptor::Device(path) => self.open_device(descriptor, &path, opener),
        }
    }

    // Every early return drops `device` (and `memory`), releasing what was acquired so far.
    fn open_device(&self, descriptor: &str, path: &Path, opener: &dyn DeviceOpener) -> Result<Surface> {
        let mut device = opener.open(path).map_err(|source| FramebufferError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;

        let fixed = device
            .fixed_info()
            .map_err(|source| FramebufferError::IntrospectionFailed {
                path: path.to_path_buf(),
                query: ScreenQuery::Fixed,
                source,
            })?;
        let var = device
            .variable_info()
            .map_err(|source| FramebufferError::IntrospectionFailed {
                path: path.to_path_buf(),
                query: ScreenQuery::Variable,
                source,
            })?;

        let format = PixelFormat::from_bpp(var.bits_per_pixel)
            .filter(|f| f.bytes_per_pixel().is_some())
            .ok_or_else(|| FramebufferError::UnsupportedDepth {
                path: path.to_path_buf(),
                bpp: var.bits_per_pixel,
            })?;

        let byte_size = fixed.smem_len as usize;
        let required = frame_bytes(format, var.xres, var.yres).ok_or_else(|| {
            FramebufferError::IntrospectionFailed {
                path: path.to_path_buf(),
                query: ScreenQuery::Variable,
                source: io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("{}x{} frame does not fit in memory", var.xres, var.yres),
                ),
            }
        })?;
        if byte_size < required {
            return Err(FramebufferError::BufferTooSmall {
                path: path.to_path_buf(),
                required,
                available: byte_size,
            });
        }

        let memory = device.map(byte_size).map_err(|source| FramebufferError::MappingFailed {
            path: path.to_path_buf(),
            source,
        })?;
        if memory.len() < required {
            return Err(FramebufferError::BufferTooSmall {
                path: path.to_path_buf(),
                required,
                available: memory.len(),
            });
        }

        debug!(
            "Opened {}: {}x{}, {} bpp, {} bytes",
            path.display(),
            var.xres,
            var.yres,
            var.bits_per_pixel,
            byte_size
        );
        let row_bytes = (var.xres as usize).saturating_mul(format.bytes_per_pixel().unwrap_or(0));
        if fixed.line_length as usize != row_bytes {
            debug!(
                "{} has {} byte scanlines for {} bytes of pixels; addressing stays linear",
                path.display(),
                fixed.line_length,
                row_bytes
            );
        }

        Ok(Surface {
            identifier: descriptor.to_string(),
            width: var.xres,
            height: var.yres,
            format,
            byte_size,
            channel_order: self.channel_order,
            shadow: ShadowFrame::new(var.xres, var.yres),
            memory: Some(memory),
            device: Some(device),
            open: true,
            warned_unpacked: false,
        })
    }
}

/// An open display surface: device mapping (if any), geometry and shadow frame.
///
/// Every operation takes `&self`/`&mut self`, so a surface is used from one
/// place at a time. Dropping the surface closes it.
pub struct Surface {
    identifier: String,
    width: u32,
    height: u32,
    format: PixelFormat,
    byte_size: usize,
    channel_order: ChannelOrder,
    shadow: ShadowFrame,
    memory: Option<Box<dyn DeviceMemory>>,
    device: Option<Box<dyn FramebufferDevice>>,
    open: bool,
    warned_unpacked: bool,
}

impl Surface {
    /// Open with default options
    pub fn open(descriptor: &str) -> Result<Self> {
        OpenOptions::new().open(descriptor)
    }

    /// Open with default options and a custom device backend
    pub fn open_with(descriptor: &str, opener: &dyn DeviceOpener) -> Result<Self> {
        OpenOptions::new().open_with(descriptor, opener)
    }

    /// Descriptor the surface was opened with
    pub fn device(&self) -> &str {
        &self.identifier
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// 8, 16 or 24 for devices, 0 for dummy surfaces
    pub fn bits_per_pixel(&self) -> u32 {
        self.format.bits_per_pixel()
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn channel_order(&self) -> ChannelOrder {
        self.channel_order
    }

    /// Mapped device memory in bytes, 0 for dummy surfaces
    pub fn byte_size(&self) -> usize {
        self.byte_size
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_dummy(&self) -> bool {
        self.format == PixelFormat::Dummy
    }

    /// Last applied ARGB frame
    pub fn frame(&self) -> &[u32] {
        self.shadow.as_slice()
    }

    /// Write one pixel. The shadow records the value once the device write succeeds.
    pub fn write_pixel(&mut self, index: i64, argb: u32) -> Result<()> {
        let i = self.checked_index(index)?;
        if let Some(memory) = self.memory.as_deref_mut() {
            if self.format.bytes_per_pixel().is_some() {
                write_device(memory, self.format, self.channel_order, i, argb)?;
            }
        }
        self.shadow.set(i, argb);
        Ok(())
    }

    /// Read one pixel back as ARGB, decoded from device memory when there is any
    pub fn read_pixel(&self, index: i64) -> Result<u32> {
        let i = self.checked_index(index)?;
        let memory = self.memory.as_deref();
        match (memory, byte_range(self.format, i)) {
            (Some(memory), Some(range)) => memory
                .read_at(range.start, range.len())
                .map(|bytes| self.channel_order.swizzle(decode(self.format, bytes)))
                .ok_or(FramebufferError::PixelNotMapped {
                    index: i,
                    mapped: memory.len(),
                }),
            _ => self.shadow.get(i).ok_or(FramebufferError::OutOfRange {
                index,
                len: self.pixel_count(),
            }),
        }
    }

    /// Apply a full frame, writing only pixels that differ from the shadow.
    /// Returns whether anything changed.
    pub fn update_frame(&mut self, frame: &[u32]) -> Result<bool> {
        Ok(self.update_frame_counted(frame)? > 0)
    }

    /// Like [`Surface::update_frame`] but returns the number of changed pixels
    pub fn update_frame_counted(&mut self, frame: &[u32]) -> Result<usize> {
        self.ensure_open()?;

        let Self {
            shadow,
            memory,
            format,
            channel_order,
            identifier,
            warned_unpacked,
            ..
        } = self;
        let (format, order) = (*format, *channel_order);

        if memory.is_some() && format.bytes_per_pixel().is_none() && !*warned_unpacked {
            warn!("{}: format {:?} not supported, tracking frames without device writes", identifier, format);
            *warned_unpacked = true;
        }
        let mut device = memory.as_deref_mut().filter(|_| format.bytes_per_pixel().is_some());

        let changed = shadow.apply(frame, |index, argb| match device.as_deref_mut() {
            Some(memory) => write_device(memory, format, order, index, argb),
            None => Ok(()),
        })?;

        trace!("{}: {} of {} pixels changed", identifier, changed, frame.len());
        Ok(changed)
    }

    /// Unmap device memory, close the descriptor and clear all state.
    /// Closing an already closed surface does nothing.
    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        drop(self.memory.take());
        drop(self.device.take());
        debug!("Closed {}", self.identifier);

        self.shadow.release();
        self.identifier.clear();
        self.width = 0;
        self.height = 0;
        self.byte_size = 0;
        self.open = false;
    }

    fn ensure_open(&self) -> Result<()> {
        if self.open {
            Ok(())
        } else {
            Err(FramebufferError::Closed)
        }
    }

    fn checked_index(&self, index: i64) -> Result<usize> {
        self.ensure_open()?;
        let len = self.pixel_count();
        usize::try_from(index)
            .ok()
            .filter(|&i| i < len)
            .ok_or(FramebufferError::OutOfRange { index, len })
    }
}

/// Store one packed pixel. Fails if the mapping does not cover its bytes.
fn write_device(
    memory: &mut dyn DeviceMemory,
    format: PixelFormat,
    order: ChannelOrder,
    index: usize,
    argb: u32,
) -> Result<()> {
    let packed = encode(format, order.swizzle(argb));
    let written = byte_range(format, index).is_some_and(|range| memory.write_at(range.start, packed.as_bytes()));
    if written {
        Ok(())
    } else {
        Err(FramebufferError::PixelNotMapped {
            index,
            mapped: memory.len(),
        })
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("device", &self.identifier)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .field("byte_size", &self.byte_size)
            .field("channel_order", &self.channel_order)
            .field("open", &self.open)
            .finish()
    }
}
