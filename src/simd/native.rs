// Copyright (c) 2026 kalwalt and AR.js-org contributors
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT
// See https://github.com/AR-js-org/aruco-rs/blob/main/LICENSE
// src/simd/native.rs

use crate::cv::scalar::ScalarCV;
use crate::cv::{ComputerVision, Rect};
use crate::ImageBuffer;

use safe_arch::*;

/// Native SIMD implementation of Computer Vision operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeCV;

/// SSE only compares signed bytes, so both sides are shifted by -128 first.
#[inline]
fn below_mask(data: m128i, adjusted_thresh: m128i, offset: m128i) -> m128i {
    let adjusted_data = add_i8_m128i(data, offset);
    // 0xFF where threshold > data, i.e. data < threshold
    cmp_gt_mask_i8_m128i(adjusted_thresh, adjusted_data)
}

/// Shared body of both threshold variants; `inverse` selects which side keeps `max_value`.
fn threshold_sse(src: &[u8], dst: &mut [u8], threshold: u8, max_value: u8, inverse: bool) {
    let offset = set_splat_i8_m128i(-128i8);
    let adjusted_thresh = add_i8_m128i(set_splat_i8_m128i(threshold as i8), offset);
    let max_vec = set_splat_i8_m128i(max_value as i8);

    let len = src.len().min(dst.len());
    let bulk = len - len % 16;

    for (s, d) in src[..bulk]
        .chunks_exact(16)
        .zip(dst[..bulk].chunks_exact_mut(16))
    {
        if let (Ok(s), Ok(d)) = (<&[u8; 16]>::try_from(s), <&mut [u8; 16]>::try_from(d)) {
            let below = below_mask(load_unaligned_m128i(s), adjusted_thresh, offset);
            let out = if inverse {
                bitand_m128i(below, max_vec)
            } else {
                // !below & max
                bitandnot_m128i(below, max_vec)
            };
            store_unaligned_m128i(d, out);
        }
    }

    // Process remaining pixels
    for i in bulk..len {
        let is_below = src[i] < threshold;
        dst[i] = if is_below == inverse { max_value } else { 0 };
    }
}

impl ComputerVision for NativeCV {
    /// Luminance needs per-format shuffles; the scalar path is kept for exact parity.
    fn grayscale(src: &ImageBuffer, rect: &Rect, dst: &mut [u8]) {
        ScalarCV::grayscale(src, rect, dst)
    }

    fn threshold(src: &[u8], dst: &mut [u8], threshold: u8, max_value: u8) {
        threshold_sse(src, dst, threshold, max_value, false)
    }

    fn threshold_inv(src: &[u8], dst: &mut [u8], threshold: u8, max_value: u8) {
        threshold_sse(src, dst, threshold, max_value, true)
    }

    fn count_non_zero(src: &[u8]) -> usize {
        let zero = zeroed_m128i();
        let bulk = src.len() - src.len() % 16;
        let mut nz = 0usize;

        for chunk in src[..bulk].chunks_exact(16) {
            if let Ok(chunk) = <&[u8; 16]>::try_from(chunk) {
                let eq = cmp_eq_mask_i8_m128i(load_unaligned_m128i(chunk), zero);
                let zeros = (move_mask_i8_m128i(eq) as u32).count_ones() as usize;
                nz += 16 - zeros;
            }
        }

        nz + ScalarCV::count_non_zero(&src[bulk..])
    }

    fn min_mean(src: &[u8]) -> (u8, f64) {
        ScalarCV::min_mean(src)
    }

    fn gaussian_blur(src: &ImageBuffer, dst: &mut [u8], kernel_size: usize) {
        ScalarCV::gaussian_blur(src, dst, kernel_size)
    }
}
