//! Small grids worked out by hand.

#[cfg(test)]
mod fixture_tests {
    use pretty_assertions::assert_eq;

    use crate::{
        dithering::{Algorithm, error_diffusion::Traversal},
        texture::Texture,
    };

    fn dither_rows<const W: usize>(
        algorithm: Algorithm,
        traversal: Traversal,
        rows: &[[u8; W]],
    ) -> Vec<Vec<u8>> {
        let texture = Texture::from_rows(rows);
        algorithm.dithered(&texture, traversal).unwrap().rows()
    }

    #[test]
    fn test_floyd_steinberg_2x2() {
        // 100 -> 0 (err 100); right neighbour 143.75 -> 255 (err -111.25)
        let rows = dither_rows(Algorithm::FloydSteinberg, Traversal::Raster, &[[100; 2]; 2]);
        assert_eq!(rows, vec![vec![0, 255], vec![0, 0]]);
    }

    #[test]
    fn test_floyd_steinberg_single_row() {
        let rows = dither_rows(Algorithm::FloydSteinberg, Traversal::Raster, &[[100; 4]]);
        assert_eq!(rows, vec![vec![0, 255, 0, 0]]);
    }

    #[test]
    fn test_atkinson_single_row() {
        // 1/8 per neighbour builds up slower than Floyd-Steinberg's 7/16
        let rows = dither_rows(Algorithm::Atkinson, Traversal::Raster, &[[100; 4]]);
        assert_eq!(rows, vec![vec![0, 0, 0, 255]]);
    }

    #[test]
    fn test_floyd_steinberg_single_column() {
        let texture = Texture::from_rows(&[[100u8], [100]]);
        let mut output = texture.clone();
        let stats = Algorithm::FloydSteinberg.dither(&mut output).unwrap();

        assert_eq!(output.rows(), vec![vec![0], vec![255]]);
        assert_eq!(stats.pixels, 2);
        assert_eq!(stats.diffused, 31.25);
        assert_eq!(stats.dropped, 68.75 - 123.75);
        assert_eq!(stats.quantization_error, 100.0 - 123.75);
    }

    #[test]
    fn test_serpentine_mirrors_odd_rows() {
        let raster = dither_rows(Algorithm::FloydSteinberg, Traversal::Raster, &[[100; 4]; 2]);
        let serpentine = dither_rows(
            Algorithm::FloydSteinberg,
            Traversal::Serpentine,
            &[[100; 4]; 2],
        );

        assert_eq!(raster[0], serpentine[0]);
        assert_eq!(raster[1], vec![0, 255, 0, 255]);
        assert_eq!(serpentine[1], vec![255, 0, 0, 255]);
    }
}
