use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use framebuffer::core::{encode, pack, unpack, PixelFormat, ShadowFrame};
use framebuffer::demo::Pattern;
use framebuffer::Surface;

const WIDTH: u32 = 320;
const HEIGHT: u32 = 240;

fn pattern_frame(pattern: Pattern, frame_number: u64) -> Vec<u32> {
    let mut pixels = vec![0u32; (WIDTH * HEIGHT) as usize];
    pattern.render(WIDTH, HEIGHT, frame_number, &mut pixels);
    pixels
}

/// Benchmark: packing a single pixel per format
fn bench_pack(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack");
    for format in [PixelFormat::Low8, PixelFormat::Rgb565, PixelFormat::Rgb888] {
        group.bench_with_input(BenchmarkId::new("pack_unpack", format.bits_per_pixel()), &format, |b, &format| {
            b.iter(|| unpack(format, pack(format, black_box(0x00FF_8040))))
        });
        group.bench_with_input(BenchmarkId::new("encode", format.bits_per_pixel()), &format, |b, &format| {
            b.iter(|| encode(format, black_box(0x0012_3456)))
        });
    }
    group.finish();
}

/// Benchmark: shadow diff with no changed pixels
fn bench_unchanged_frame(c: &mut Criterion) {
    let frame = pattern_frame(Pattern::Bars, 0);
    let mut surface = Surface::open("dummy_320x240").unwrap();
    surface.update_frame(&frame).unwrap();

    c.bench_function("update_frame_unchanged", |b| {
        b.iter(|| surface.update_frame(black_box(&frame)).unwrap())
    });
}

/// Benchmark: alternating frames where every pixel changes
fn bench_full_change(c: &mut Criterion) {
    let frames = [pattern_frame(Pattern::Rainbow, 0), pattern_frame(Pattern::Rainbow, 60)];
    let mut surface = Surface::open("dummy_320x240").unwrap();
    let mut toggle = 0;

    c.bench_function("update_frame_full_change", |b| {
        b.iter(|| {
            toggle ^= 1;
            surface.update_frame_counted(black_box(&frames[toggle])).unwrap()
        })
    });
}

/// Benchmark: moving checkerboard, a sparse change set
fn bench_sparse_change(c: &mut Criterion) {
    let frames: Vec<Vec<u32>> = (0..32).map(|n| pattern_frame(Pattern::Checker, n)).collect();
    let mut shadow = ShadowFrame::new(WIDTH, HEIGHT);
    let mut n = 0;

    c.bench_function("shadow_apply_checker", |b| {
        b.iter(|| {
            n = (n + 1) % frames.len();
            shadow.apply(black_box(&frames[n]), |_, _| Ok(())).unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_pack,
    bench_unchanged_frame,
    bench_full_change,
    bench_sparse_change
);
criterion_main!(benches);
