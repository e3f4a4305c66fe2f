// Copyright (c) 2026 kalwalt and AR.js-org contributors
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT
// See https://github.com/AR-js-org/aruco-rs/blob/main/LICENSE
// src/cv/scalar.rs
#![allow(clippy::needless_range_loop)]

use crate::cv::{gaussian_kernel, ComputerVision, Rect};
use crate::ImageBuffer;

/// Scalar (non-SIMD) implementation of Computer Vision operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarCV;

impl ComputerVision for ScalarCV {
    /// Converts a region of a colour frame to luminance, row by row.
    fn grayscale(src: &ImageBuffer, rect: &Rect, dst: &mut [u8]) {
        let src_data = src.data;
        let format = src.format;
        let channels = format.channels();
        let width = src.width as usize;
        let rw = rect.width as usize;
        let mut j = 0;

        for y in rect.y as usize..rect.bottom() as usize {
            let mut i = (y * width + rect.x as usize) * channels;
            for _ in 0..rw {
                dst[j] = format.luma(&src_data[i..i + channels]);
                j += 1;
                i += channels;
            }
        }
    }

    /// Applies a binary threshold (`v >= threshold` passes).
    fn threshold(src: &[u8], dst: &mut [u8], threshold: u8, max_value: u8) {
        let len = src.len();
        let mut tab = [0u8; 256];

        // Build lookup table
        for i in 0..256 {
            tab[i] = if (i as u8) >= threshold { max_value } else { 0 };
        }

        // Apply threshold using lookup
        for i in 0..len {
            dst[i] = tab[src[i] as usize];
        }
    }

    /// Applies an inverse binary threshold (`v < threshold` passes).
    fn threshold_inv(src: &[u8], dst: &mut [u8], threshold: u8, max_value: u8) {
        let len = src.len();
        let mut tab = [0u8; 256];

        for i in 0..256 {
            tab[i] = if (i as u8) < threshold { max_value } else { 0 };
        }

        for i in 0..len {
            dst[i] = tab[src[i] as usize];
        }
    }

    fn count_non_zero(src: &[u8]) -> usize {
        src.iter().filter(|&&v| v != 0).count()
    }

    fn min_mean(src: &[u8]) -> (u8, f64) {
        if src.is_empty() {
            return (0, 0.0);
        }

        let mut min = u8::MAX;
        let mut sum = 0u64;
        for &v in src {
            min = min.min(v);
            sum += v as u64;
        }

        (min, sum as f64 / src.len() as f64)
    }

    /// Separable Gaussian blur with reflected (101) borders.
    fn gaussian_blur(src: &ImageBuffer, dst: &mut [u8], kernel_size: usize) {
        let src_data = src.data;
        let width = src.width as usize;
        let height = src.height as usize;
        if width == 0 || height == 0 {
            return;
        }

        let kernel = gaussian_kernel(kernel_size.max(1));
        let radius = (kernel.len() / 2) as isize;

        // Horizontal pass
        let mut tmp = vec![0f32; width * height];
        for y in 0..height {
            let row = y * width;
            for x in 0..width {
                let mut acc = 0.0;
                for (k, w) in kernel.iter().enumerate() {
                    let sx = reflect_101(x as isize + k as isize - radius, width);
                    acc += w * src_data[row + sx] as f32;
                }
                tmp[row + x] = acc;
            }
        }

        // Vertical pass
        for y in 0..height {
            for x in 0..width {
                let mut acc = 0.0;
                for (k, w) in kernel.iter().enumerate() {
                    let sy = reflect_101(y as isize + k as isize - radius, height);
                    acc += w * tmp[sy * width + x];
                }
                dst[y * width + x] = (acc + 0.5).clamp(0.0, 255.0) as u8;
            }
        }
    }
}

/// Mirrors an out-of-range index back into `0..n` without repeating the edge pixel.
fn reflect_101(i: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let n = n as isize;
    let mut i = i;
    while i < 0 || i >= n {
        if i < 0 {
            i = -i;
        }
        if i >= n {
            i = 2 * n - 2 - i;
        }
    }
    i as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cv::luminance;
    use crate::{ImageBuffer, PixelFormat};

    include!("../../tests/data/sample_8x8.rs");

    fn full_rect(width: u32, height: u32) -> Rect {
        Rect {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    #[test]
    fn test_grayscale_logic() {
        let src = ImageBuffer::new(&SAMPLE_8X8_BGR, 8, 8, PixelFormat::Bgr8);
        let mut dst = [0u8; 64];

        ScalarCV::grayscale(&src, &full_rect(8, 8), &mut dst);

        // Pixel 0: R=100, G=150, B=200 -> 100 * 0.299 + 150 * 0.587 + 200 * 0.114 + 0.5 = 141.25 -> 141
        assert_eq!(dst[0], 141);
        // Pixel 1: 50 * 0.299 + 50 * 0.587 + 50 * 0.114 + 0.5 = 50.5 -> 50
        assert_eq!(dst[1], 50);

        for i in 0..64 {
            if i % 2 == 0 {
                assert_eq!(dst[i], 141);
            } else {
                assert_eq!(dst[i], 50);
            }
        }
    }

    #[test]
    fn test_grayscale_channel_order() {
        // Same colour stored as RGB must give the same luminance as the BGR sample.
        let rgb: Vec<u8> = SAMPLE_8X8_BGR
            .chunks_exact(3)
            .flat_map(|px| [px[2], px[1], px[0]])
            .collect();
        let src = ImageBuffer::new(&rgb, 8, 8, PixelFormat::Rgb8);
        let mut dst = [0u8; 64];

        ScalarCV::grayscale(&src, &full_rect(8, 8), &mut dst);

        assert_eq!(dst[0], 141);
        assert_eq!(dst[1], 50);
    }

    #[test]
    fn test_grayscale_sub_rect() {
        let src = ImageBuffer::new(&SAMPLE_8X8_BGR, 8, 8, PixelFormat::Bgr8);
        let rect = Rect {
            x: 3,
            y: 2,
            width: 2,
            height: 3,
        };
        let mut dst = [0u8; 6];

        ScalarCV::grayscale(&src, &rect, &mut dst);

        // Row-major pixel index 2 * 8 + 3 = 19 is odd, so each row starts with 50.
        assert_eq!(dst, [50, 141, 50, 141, 50, 141]);
    }

    #[test]
    fn test_grayscale_extremes_do_not_wrap() {
        let white = [255u8; 12];
        let src = ImageBuffer::new(&white, 2, 2, PixelFormat::Bgr8);
        let mut dst = [0u8; 4];

        ScalarCV::grayscale(&src, &full_rect(2, 2), &mut dst);

        assert_eq!(dst, [255; 4]);
    }

    #[test]
    fn test_grayscale_rounds_exact_half_up() {
        // R=4, G=40, B=16 weighs exactly 26.5
        assert_eq!(luminance(4, 40, 16), 27);
        assert_eq!(luminance(255, 255, 255), 255);
        assert_eq!(luminance(0, 0, 0), 0);

        let bgr = [16u8, 40, 4].repeat(4);
        let src = ImageBuffer::new(&bgr, 2, 2, PixelFormat::Bgr8);
        let mut dst = [0u8; 4];

        ScalarCV::grayscale(&src, &full_rect(2, 2), &mut dst);

        assert_eq!(dst, [27; 4]);
    }

    #[test]
    fn test_threshold_bounds() {
        let mut gray = [0u8; 64];
        let mut dst = [0u8; 64];
        for i in 0..64 {
            gray[i] = if i % 2 == 0 { 141 } else { 50 };
        }

        // A pixel exactly at the threshold counts as light.
        ScalarCV::threshold(&gray, &mut dst, 50, 225);
        assert!(dst.iter().all(|&v| v == 225));

        ScalarCV::threshold(&gray, &mut dst, 51, 225);
        for i in 0..64 {
            if i % 2 == 0 {
                assert_eq!(dst[i], 225);
            } else {
                assert_eq!(dst[i], 0);
            }
        }
    }

    #[test]
    fn test_threshold_inv_is_complement() {
        let gray: Vec<u8> = (0..=255).collect();
        let mut light = vec![0u8; 256];
        let mut dark = vec![0u8; 256];

        for t in [0u8, 1, 100, 254, 255] {
            ScalarCV::threshold(&gray, &mut light, t, 225);
            ScalarCV::threshold_inv(&gray, &mut dark, t, 225);

            assert_eq!(ScalarCV::count_non_zero(&dark), t as usize);
            assert_eq!(
                ScalarCV::count_non_zero(&light) + ScalarCV::count_non_zero(&dark),
                256
            );
        }
    }

    #[test]
    fn test_min_mean() {
        assert_eq!(ScalarCV::min_mean(&[]), (0, 0.0));
        assert_eq!(ScalarCV::min_mean(&[7; 10]), (7, 7.0));

        let (min, mean) = ScalarCV::min_mean(&[10, 20, 30, 40]);
        assert_eq!(min, 10);
        assert!((mean - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_gaussian_blur_keeps_uniform_image() {
        let gray = [90u8; 35];
        let src = ImageBuffer::new(&gray, 7, 5, PixelFormat::Gray8);
        let mut dst = [0u8; 35];

        ScalarCV::gaussian_blur(&src, &mut dst, 5);

        assert_eq!(dst, gray);
    }

    #[test]
    fn test_gaussian_blur_smooths_impulse() {
        let mut gray = [0u8; 49];
        gray[24] = 255;
        let src = ImageBuffer::new(&gray, 7, 7, PixelFormat::Gray8);
        let mut dst = [0u8; 49];

        ScalarCV::gaussian_blur(&src, &mut dst, 5);

        // Center weight is 0.375 * 0.375
        assert_eq!(dst[24], 36);
        assert!(dst[23] > 0 && dst[23] < dst[24]);
        assert_eq!(dst[23], dst[25]);
        assert_eq!(dst[17], dst[31]);
        assert_eq!(dst[0], 0);
    }

    #[test]
    fn test_reflect_101() {
        assert_eq!(reflect_101(-1, 5), 1);
        assert_eq!(reflect_101(-2, 5), 2);
        assert_eq!(reflect_101(5, 5), 3);
        assert_eq!(reflect_101(6, 5), 2);
        assert_eq!(reflect_101(-2, 2), 0);
        assert_eq!(reflect_101(3, 1), 0);
    }
}
