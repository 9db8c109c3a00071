mod codec;
mod descriptor;
mod error;
mod linux;
mod pixel_format;
mod shadow;
mod surface;

pub use codec::{
    byte_range, channels, decode, encode, frame_bytes, from_channels, pack, unpack, ChannelOrder,
    PackedPixel,
};
pub use descriptor::Descriptor;
pub use error::{ErrorKind, FramebufferError, Result, ScreenQuery};
pub use linux::{LinuxFramebuffer, LinuxOpener};
pub use pixel_format::PixelFormat;
pub use shadow::ShadowFrame;
pub use surface::{OpenOptions, Surface};
