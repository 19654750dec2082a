use bruteforce_sdf::prelude::*;
use criterion::{ Criterion, criterion_group, criterion_main };

fn byte_image_from_function<I>(width: usize, height: usize, image: I) -> Vec<u8>
    where I: Fn(usize, usize) -> bool
{
    let mut image_bytes = vec![0_u8; width * height];

    for y in 0..height {
        for x in 0..width {
            image_bytes[y * width + x] = {
                if image(x, y) { 255 } else { 0 }
            };
        }
    }

    image_bytes
}

fn circle(center_x: usize, center_y: usize, radius: usize)
    -> impl (Fn(usize, usize) -> bool)
{
    move |x, y|{
        let x = x as f32 - center_x as f32;
        let y = y as f32 - center_y as f32;
        (x * x + y * y).sqrt() < radius as f32
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let width = 1024;
    let height = 1024;

    let image = byte_image_from_function(
        width, height, circle(width/2, height/2, 300)
    );

    c.bench_function("mask", |bencher| {
        let source = GraySlice::from_slice(width, height, &image).unwrap();
        bencher.iter(|| build_mask(&source))
    });

    let source = GraySlice::from_slice(width, height, &image).unwrap();
    let mask = build_mask(&source);

    c.bench_function("field, default parameters", |bencher| {
        let params = FieldParams::default();
        bencher.iter(|| compute_field(&mask, &params).unwrap())
    });

    c.bench_function("field, full resolution", |bencher| {
        let params = FieldParams::new(8.0, 1.0);
        bencher.iter(|| compute_field(&mask, &params).unwrap())
    });

    c.bench_function("f16 distances", |bencher| {
        let params = FieldParams::default();
        bencher.iter(|| {
            let sdf: SignedDistanceField<F16DistanceStorage> = compute_signed_distances(&mask, &params).unwrap();
            sdf
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
