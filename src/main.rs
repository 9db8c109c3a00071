use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

use framebuffer::cli::Cli;
use framebuffer::config::DisplayConfig;
use framebuffer::frame::FramePacer;
use framebuffer::OpenOptions;

// === Constants ===

const STATS_INTERVAL_FRAMES: u64 = 60;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = DisplayConfig::resolve(&cli)?;

    let mut surface = OpenOptions::new()
        .channel_order(config.channel_order)
        .open(&config.device)
        .with_context(|| format!("Failed to open {}", config.device))?;

    info!(
        "Opened {}: {}x{}, {} bpp, {} bytes mapped",
        surface.device(),
        surface.width(),
        surface.height(),
        surface.bits_per_pixel(),
        surface.byte_size()
    );

    let (width, height) = (surface.width(), surface.height());
    let mut pixels = vec![0u32; surface.pixel_count()];
    let frames = FramePacer::new(config.fps).take(config.frame_limit());

    let mut written = 0usize;
    let mut changed_frames = 0u64;
    for frame in frames {
        config.pattern.render(width, height, frame.number, &mut pixels);
        let changed = surface.update_frame_counted(&pixels)?;
        if changed > 0 {
            changed_frames += 1;
        }
        written += changed;
        debug!("Frame {}: {} pixels written", frame.number, changed);

        if (frame.number + 1) % STATS_INTERVAL_FRAMES == 0 {
            info!(
                "{} frames in {:.1}s, {} changed, {} pixels written",
                frame.number + 1,
                frame.time,
                changed_frames,
                written
            );
        }
    }

    surface.close();
    info!("Closed surface after {} changed frames", changed_frames);
    Ok(())
}
