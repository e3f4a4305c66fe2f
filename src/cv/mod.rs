// Copyright (c) 2026 kalwalt and AR.js-org contributors
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT
// See https://github.com/AR-js-org/aruco-rs/blob/main/LICENSE
// src/cv/mod.rs

use crate::ImageBuffer;

/// Common trait for the pixel kernels used by region analysis.
/// This ensures identical results between implementations (Scalar, SIMD).
pub trait ComputerVision {
    /// Converts a sub-rectangle of a colour frame to luminance.
    ///
    /// # Arguments
    /// * `src` - The source `ImageBuffer` in any supported `PixelFormat`.
    /// * `rect` - The region to convert. Must lie inside `src`.
    /// * `dst` - Destination buffer of `rect.area()` bytes, row-major.
    fn grayscale(src: &ImageBuffer, rect: &Rect, dst: &mut [u8]);

    /// Binary threshold: `max_value` where the pixel is at or above `threshold`, 0 otherwise.
    ///
    /// # Arguments
    /// * `src` - The source slice of grayscale pixels.
    /// * `dst` - The destination slice where binary pixels will be written.
    /// * `threshold` - The cutoff (0-255).
    /// * `max_value` - Value written for pixels that pass.
    fn threshold(src: &[u8], dst: &mut [u8], threshold: u8, max_value: u8);

    /// Inverse binary threshold: `max_value` where the pixel is strictly below `threshold`.
    fn threshold_inv(src: &[u8], dst: &mut [u8], threshold: u8, max_value: u8);

    /// Counts non-zero pixels.
    fn count_non_zero(src: &[u8]) -> usize;

    /// Minimum and arithmetic mean of a grayscale slice, `(0, 0.0)` when empty.
    fn min_mean(src: &[u8]) -> (u8, f64);

    /// Applies a Gaussian blur to a grayscale image.
    ///
    /// # Arguments
    /// * `src` - The source `ImageBuffer` (Gray8).
    /// * `dst` - The destination buffer array.
    /// * `kernel_size` - Odd size of the Gaussian kernel; sigma is derived from it.
    fn gaussian_blur(src: &ImageBuffer, dst: &mut [u8], kernel_size: usize);
}

/// Defines a rectangular region of interest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Weighted luminance: 0.299R + 0.587G + 0.114B, rounded half up.
///
/// Computed in per-mille integers so that exact halves (e.g. 26.5) always round up.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let y = (299 * r as u32 + 587 * g as u32 + 114 * b as u32 + 500) / 1000;
    // 255 * 1000 + 500 still divides down to 255
    y as u8
}

/// 1D Gaussian weights for an odd `kernel_size`.
///
/// Sizes up to 7 use the fixed binomial tables, larger ones use
/// `sigma = 0.3 * ((k - 1) * 0.5 - 1) + 0.8`.
pub fn gaussian_kernel(kernel_size: usize) -> Vec<f32> {
    match kernel_size {
        1 => vec![1.0],
        3 => vec![0.25, 0.5, 0.25],
        5 => vec![0.0625, 0.25, 0.375, 0.25, 0.0625],
        7 => vec![0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125],
        k => {
            let sigma = 0.3 * ((k as f64 - 1.0) * 0.5 - 1.0) + 0.8;
            let scale = -0.5 / (sigma * sigma);
            let center = (k as f64 - 1.0) * 0.5;
            let weights: Vec<f64> = (0..k)
                .map(|i| {
                    let x = i as f64 - center;
                    (scale * x * x).exp()
                })
                .collect();
            let sum: f64 = weights.iter().sum();
            weights.iter().map(|w| (w / sum) as f32).collect()
        }
    }
}

// Submodules for specific CV algorithms
pub mod draw;
pub mod scalar;
