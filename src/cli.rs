// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::core::ChannelOrder;
use crate::demo::Pattern;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "fb-demo")]
#[command(about = "Push animated test patterns to a framebuffer surface", long_about = None)]
pub struct Cli {
    /// Device path (/dev/fb1) or dummy_<W>x<H>
    #[arg(short, long)]
    pub device: Option<String>,

    /// JSON config file; flags given here override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Maximum frame updates per second
    #[arg(long)]
    pub fps: Option<f32>,

    /// Stop after this many frames
    #[arg(long)]
    pub frames: Option<u64>,

    /// Test pattern to render
    #[arg(long, value_enum)]
    pub pattern: Option<Pattern>,

    /// Channel order of the device memory
    #[arg(long = "channel-order", value_enum)]
    pub channel_order: Option<ChannelOrder>,
}
