// demo.rs - Animated ARGB test patterns for exercising a surface
use serde::{Deserialize, Serialize};

use crate::math::{hsv_to_argb, lerp_argb};

const BAR_COLORS: [u32; 8] = [
    0x00FF_FFFF, // white
    0x00FF_FF00, // yellow
    0x0000_FFFF, // cyan
    0x0000_FF00, // green
    0x00FF_00FF, // magenta
    0x00FF_0000, // red
    0x0000_00FF, // blue
    0x0000_0000, // black
];

const CHECKER_SIZE: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Pattern {
    /// Hue sweep scrolling horizontally
    #[default]
    Rainbow,
    /// Static SMPTE-style color bars - only the first frame changes pixels
    Bars,
    /// Checkerboard moving one pixel per frame
    Checker,
    /// Vertical black-to-white gradient pulsing over time
    Gradient,
}

impl Pattern {
    /// Render frame `frame_number` into `out` (row-major, `width * height` cells)
    pub fn render(self, width: u32, height: u32, frame_number: u64, out: &mut [u32]) {
        if width == 0 || height == 0 {
            return;
        }
        for (index, pixel) in out.iter_mut().enumerate().take(width as usize * height as usize) {
            let x = (index % width as usize) as u32;
            let y = (index / width as usize) as u32;
            *pixel = self.pixel(x, y, width, height, frame_number);
        }
    }

    fn pixel(self, x: u32, y: u32, width: u32, height: u32, frame_number: u64) -> u32 {
        match self {
            Pattern::Rainbow => {
                let hue = (x as f32 / width as f32) + frame_number as f32 / 120.0;
                hsv_to_argb(hue, 1.0, 1.0)
            }
            Pattern::Bars => {
                let bar = (x as usize * BAR_COLORS.len()) / width as usize;
                BAR_COLORS[bar.min(BAR_COLORS.len() - 1)]
            }
            Pattern::Checker => {
                let shift = (frame_number % (2 * CHECKER_SIZE as u64)) as u32;
                let cell = ((x + shift) / CHECKER_SIZE + y / CHECKER_SIZE) % 2;
                if cell == 0 {
                    0x00FF_FFFF
                } else {
                    0
                }
            }
            Pattern::Gradient => {
                let pulse = ((frame_number % 120) as f32 / 120.0 * std::f32::consts::TAU).sin() * 0.5 + 0.5;
                let t = y as f32 / height.max(2).saturating_sub(1) as f32;
                lerp_argb(0, 0x00FF_FFFF, t * pulse)
            }
        }
    }
}
