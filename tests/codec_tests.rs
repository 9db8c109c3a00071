use framebuffer::core::{channels, decode, encode, pack, unpack, PixelFormat};

/// Deterministic spread of ARGB values, including channel extremes
fn sample_colors() -> Vec<u32> {
    let mut colors: Vec<u32> = (0..4096u32).map(|i| i.wrapping_mul(0x9E37_79B9)).collect();
    colors.extend([0x0000_0000, 0x00FF_FFFF, 0xFFFF_FFFF, 0x0080_8080, 0x0001_0101, 0x00FE_FDFC]);
    colors
}

// ============================================================================
// 24-bit
// ============================================================================

#[test]
fn test_888_round_trips_with_top_byte_masked() {
    for argb in sample_colors() {
        let rgb = argb & 0x00FF_FFFF;
        assert_eq!(unpack(PixelFormat::Rgb888, pack(PixelFormat::Rgb888, rgb)), rgb);
        assert_eq!(decode(PixelFormat::Rgb888, encode(PixelFormat::Rgb888, rgb).as_bytes()), rgb);
    }
}

#[test]
fn test_888_drops_alpha() {
    assert_eq!(unpack(PixelFormat::Rgb888, pack(PixelFormat::Rgb888, 0xAB12_3456)), 0x0012_3456);
}

// ============================================================================
// 16-bit
// ============================================================================

#[test]
fn test_565_example_from_orange() {
    // R=255, G=128, B=0 -> r5=31, g6=32, b5=0
    let packed = pack(PixelFormat::Rgb565, 0x00FF_8000);
    assert_eq!(packed, (31 << 11) | (32 << 5));
    assert_eq!(packed, 0xFC00);
    assert_eq!(unpack(PixelFormat::Rgb565, packed), 0x00F8_8000);
}

#[test]
fn test_565_lossy_bound() {
    for argb in sample_colors() {
        let (r, g, b) = channels(argb);
        let (r2, g2, b2) = channels(unpack(PixelFormat::Rgb565, pack(PixelFormat::Rgb565, argb)));

        assert!(r2 <= r && r - r2 < 8, "red {} -> {}", r, r2);
        assert!(g2 <= g && g - g2 < 4, "green {} -> {}", g, g2);
        assert!(b2 <= b && b - b2 < 8, "blue {} -> {}", b, b2);
    }
}

#[test]
fn test_565_is_not_identity() {
    let argb = 0x0012_3457;
    assert_ne!(unpack(PixelFormat::Rgb565, pack(PixelFormat::Rgb565, argb)), argb);
}

#[test]
fn test_565_truncates_rather_than_rounds() {
    // 0xFF/8 = 31.875 and 0x07/8 = 0.875; rounding would give 32 (overflow) and 1
    assert_eq!(pack(PixelFormat::Rgb565, 0x0007_0000), 0);
    assert_eq!(pack(PixelFormat::Rgb565, 0x0000_0300), 0);
    assert_eq!(pack(PixelFormat::Rgb565, 0x0000_0007), 0);
    assert_eq!(pack(PixelFormat::Rgb565, 0x000F_0000), 1 << 11);
}

#[test]
fn test_565_packed_value_is_preserved() {
    for bits in [0u32, 0x001F, 0x07E0, 0xF800, 0xFFFF, 0x1234] {
        assert_eq!(pack(PixelFormat::Rgb565, unpack(PixelFormat::Rgb565, bits)), bits);
    }
}

// ============================================================================
// 8-bit
// ============================================================================

#[test]
fn test_low8_is_blue_channel_only() {
    assert_eq!(pack(PixelFormat::Low8, 0x00FF_FF00), 0);
    assert_eq!(pack(PixelFormat::Low8, 0x0000_0080), 0x80);
    assert_eq!(encode(PixelFormat::Low8, 0x0012_34AB).as_bytes(), &[0xAB]);
}

#[test]
fn test_low8_reconstructs_low_byte_only() {
    for argb in sample_colors() {
        let back = unpack(PixelFormat::Low8, pack(PixelFormat::Low8, argb));
        assert_eq!(back, argb & 0xFF);
        assert_eq!(back & 0xFFFF_FF00, 0);
    }
}

// ============================================================================
// Dummy
// ============================================================================

#[test]
fn test_dummy_keeps_full_value() {
    for argb in sample_colors() {
        assert_eq!(unpack(PixelFormat::Dummy, pack(PixelFormat::Dummy, argb)), argb);
    }
}
