use num_traits::{AsPrimitive, Zero};

/// A channel sample the engine can dither.
///
/// Samples live in `[0, MAX]`. Error is accumulated in `f32`, outside the
/// sample's own range, so nothing clips while it is being diffused.
pub trait Sample: Copy + Zero + AsPrimitive<f32> + Send + Sync + 'static {
    /// The upper quantization level.
    const MAX: Self;
}

impl Sample for u8 {
    const MAX: Self = u8::MAX;
}

impl Sample for u16 {
    const MAX: Self = u16::MAX;
}

/// Normalized samples, e.g. relative luminance.
impl Sample for f32 {
    const MAX: Self = 1.0;
}

/// Maps an accumulated value onto one of two levels, `0` or `MAX`.
///
/// Values strictly above the midpoint `MAX / 2` become `MAX`, everything else
/// becomes `0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryQuantizer {
    threshold: f32,
    max: f32,
}

impl BinaryQuantizer {
    pub fn midpoint<T: Sample>() -> Self {
        let max: f32 = T::MAX.as_();
        Self {
            threshold: max / 2.0,
            max,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// True when `value` quantizes to the upper level.
    #[inline(always)]
    pub fn is_high(&self, value: f32) -> bool {
        value > self.threshold
    }

    /// Quantize `value`, returning the output sample and the error left over.
    #[inline(always)]
    pub fn quantize_sample<T: Sample>(&self, value: f32) -> (T, f32) {
        if self.is_high(value) {
            (T::MAX, value - self.max)
        } else {
            (T::zero(), value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint_threshold() {
        assert_eq!(BinaryQuantizer::midpoint::<u8>().threshold(), 127.5);
        assert_eq!(BinaryQuantizer::midpoint::<u16>().threshold(), 32767.5);
        assert_eq!(BinaryQuantizer::midpoint::<f32>().threshold(), 0.5);
    }

    #[test]
    fn test_quantize_u8_levels() {
        let quantizer = BinaryQuantizer::midpoint::<u8>();
        assert_eq!(quantizer.quantize_sample::<u8>(100.0), (0, 100.0));
        assert_eq!(quantizer.quantize_sample::<u8>(143.75), (255, -111.25));
        assert_eq!(quantizer.quantize_sample::<u8>(127.0), (0, 127.0));
        assert_eq!(quantizer.quantize_sample::<u8>(128.0), (255, -127.0));
    }

    #[test]
    fn test_threshold_ties_go_low() {
        let quantizer = BinaryQuantizer::midpoint::<f32>();
        assert_eq!(quantizer.quantize_sample::<f32>(0.5), (0.0, 0.5));
    }

    #[test]
    fn test_out_of_range_values_still_pick_a_level() {
        let quantizer = BinaryQuantizer::midpoint::<u8>();
        assert_eq!(quantizer.quantize_sample::<u8>(-40.0), (0, -40.0));
        assert_eq!(quantizer.quantize_sample::<u8>(300.0), (255, 45.0));
    }

    #[test]
    fn test_quantize_normalized_samples() {
        let quantizer = BinaryQuantizer::midpoint::<f32>();
        assert_eq!(quantizer.quantize_sample::<f32>(0.75), (1.0, -0.25));
    }
}
