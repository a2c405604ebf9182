use criterion::{Criterion, criterion_group, criterion_main};
use halftoner::{prelude::GrayscaleTransform, texture::Texture};

use transform_utils::*;

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("grayscale_transform");

    let rgba = |size: &u32| (random_texture(*size, 4), Texture::<f32>::new(*size, *size, 1));

    bench_transform_by_param(
        &mut group,
        &mut GrayscaleTransform::Seq.build(),
        "seq",
        &BENCH_SIZES,
        rgba,
    );
    bench_transform_by_param(
        &mut group,
        &mut GrayscaleTransform::Par.build(),
        "par",
        &BENCH_SIZES,
        rgba,
    );

    group.finish();
}

criterion_group!(grayscale_transform, criterion_benchmark);
criterion_main!(grayscale_transform);
