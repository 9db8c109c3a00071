use crate::core::from_channels;

/// HSV (each in 0..=1) to an opaque-less ARGB value
pub fn hsv_to_argb(h: f32, s: f32, v: f32) -> u32 {
    let c = v * s;
    let h_prime = (h.rem_euclid(1.0) * 6.0) % 6.0;
    let x = c * (1.0 - ((h_prime % 2.0) - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match h_prime as i32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    from_channels(to_byte(r + m), to_byte(g + m), to_byte(b + m))
}

/// Linear blend between two ARGB colors, `t` clamped to 0..=1
pub fn lerp_argb(from: u32, to: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |shift: u32| {
        let a = ((from >> shift) & 0xFF) as f32;
        let b = ((to >> shift) & 0xFF) as f32;
        (a + (b - a) * t).round() as u32
    };
    (mix(16) << 16) | (mix(8) << 8) | mix(0)
}

fn to_byte(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsv_to_argb_red() {
        assert_eq!(hsv_to_argb(0.0, 1.0, 1.0), 0x00FF_0000);
    }

    #[test]
    fn test_hsv_to_argb_white() {
        assert_eq!(hsv_to_argb(0.0, 0.0, 1.0), 0x00FF_FFFF);
    }

    #[test]
    fn test_hsv_to_argb_black() {
        assert_eq!(hsv_to_argb(0.0, 1.0, 0.0), 0);
    }

    #[test]
    fn test_hsv_hue_wraps() {
        assert_eq!(hsv_to_argb(1.0, 1.0, 1.0), hsv_to_argb(0.0, 1.0, 1.0));
        assert_eq!(hsv_to_argb(-0.5, 1.0, 1.0), hsv_to_argb(0.5, 1.0, 1.0));
    }

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp_argb(0x0000_0000, 0x00FF_FFFF, 0.0), 0);
        assert_eq!(lerp_argb(0x0000_0000, 0x00FF_FFFF, 1.0), 0x00FF_FFFF);
        assert_eq!(lerp_argb(0x0000_0000, 0x00FF_FFFF, 2.0), 0x00FF_FFFF);
    }
}
