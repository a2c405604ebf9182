use criterion::{Criterion, criterion_group, criterion_main};
use halftoner::{
    dithering::{Algorithm, error_diffusion::Traversal},
    texture::Texture,
};

use transform_utils::*;

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("error_diffusion");

    let luma = |size: &u32| (random_texture(*size, 1), Texture::<u8>::new(*size, *size, 1));
    let rgb = |size: &u32| (random_texture(*size, 3), Texture::<u8>::new(*size, *size, 3));

    for algorithm in Algorithm::ALL {
        bench_transform_by_param(
            &mut group,
            &mut algorithm.transform::<u8>(Traversal::Raster),
            &format!("{algorithm}-luma"),
            &BENCH_SIZES,
            luma,
        );
        bench_transform_by_param(
            &mut group,
            &mut algorithm.transform::<u8>(Traversal::Raster),
            &format!("{algorithm}-rgb"),
            &BENCH_SIZES,
            rgb,
        );
        bench_transform_by_param(
            &mut group,
            &mut algorithm.transform::<u8>(Traversal::Serpentine),
            &format!("{algorithm}-luma-serpentine"),
            &BENCH_SIZES,
            luma,
        );
    }

    group.finish();
}

criterion_group!(error_diffusion, criterion_benchmark);
criterion_main!(error_diffusion);
