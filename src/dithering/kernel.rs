//! Error diffusion kernels.
//!
//! A kernel lists the neighbours that receive a share of a pixel's
//! quantization error, relative to the pixel being quantized. Offsets only
//! ever point forward in traversal order: to the right on the current row, or
//! to a row below.

/// An error diffusion kernel.
///
/// Each neighbour at `(dx, dy)` receives `error * weight / divisor`. The
/// weights of a kernel sum to at most `divisor`; anything below that is error
/// the kernel deliberately never assigns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel {
    /// (dx, dy, weight) entries, `dx` relative to the scan direction.
    pub entries: &'static [(i32, i32, u8)],
    /// Denominator shared by every weight.
    pub divisor: u8,
    /// Deepest row the kernel reaches, `max_dy + 1` error rows are kept.
    pub max_dy: usize,
}

impl Kernel {
    /// Sum of all weights, in units of `1 / divisor`.
    pub fn weight_sum(&self) -> u32 {
        self.entries.iter().map(|(_, _, w)| u32::from(*w)).sum()
    }

    /// Fraction of the quantization error handed to neighbours.
    pub fn propagated_fraction(&self) -> f32 {
        self.weight_sum() as f32 / f32::from(self.divisor)
    }

    /// Fraction of the quantization error the kernel throws away.
    pub fn discarded_fraction(&self) -> f32 {
        1.0 - self.propagated_fraction()
    }
}

/// Floyd-Steinberg kernel, 16/16 of the error is diffused.
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
    max_dy: 1,
};

/// Atkinson kernel, only 6/8 of the error is diffused.
///
/// The remaining 2/8 is dropped on purpose, which is what gives Atkinson its
/// higher contrast.
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
pub const ATKINSON: Kernel = Kernel {
    entries: &[
        (1, 0, 1),  // right
        (2, 0, 1),  // two right
        (-1, 1, 1), // bottom-left
        (0, 1, 1),  // bottom
        (1, 1, 1),  // bottom-right
        (0, 2, 1),  // two below
    ],
    divisor: 8,
    max_dy: 2,
};
