pub mod cli;
pub mod config;
pub mod core;
pub mod demo;
pub mod frame;
pub mod math;
pub mod traits;

pub use crate::core::{
    ChannelOrder, ErrorKind, FramebufferError, OpenOptions, PixelFormat, Surface,
};
