use rand::Rng;

use crate::texture::{Texture, TextureRef};

pub const TEST_IMAGE_SIZE: u32 = 64;

pub fn gen_random_texture(width: u32, height: u32, planes: u32) -> Texture<u8> {
    let mut rng = rand::rng();
    let samples = (0..width * height * planes)
        .map(|_| rng.random::<u8>())
        .collect();
    Texture::from_vec(width, height, planes, samples)
}

pub fn gen_random_black_white(width: u32, height: u32) -> Texture<u8> {
    let mut rng = rand::rng();
    let samples = (0..width * height)
        .map(|_| if rng.random::<bool>() { 255 } else { 0 })
        .collect();
    Texture::from_vec(width, height, 1, samples)
}

pub fn uniform(width: u32, height: u32, value: u8) -> Texture<u8> {
    Texture::from_vec(width, height, 1, vec![value; (width * height) as usize])
}

pub fn sample_sum<T: TextureRef<Inner = u8>>(texture: &T) -> f64 {
    texture.as_ref().iter().map(|v| f64::from(*v)).sum()
}

pub fn count_white(texture: &Texture<u8>) -> usize {
    texture.as_ref().iter().filter(|v| **v == u8::MAX).count()
}
