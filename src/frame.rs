// Copyright (c) 2026 kalwalt and AR.js-org contributors
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT
// See https://github.com/AR-js-org/aruco-rs/blob/main/LICENSE
// src/frame.rs

//! Owned frames produced by the pipeline.

use crate::{ImageBuffer, PixelFormat, Result, RoiError};

/// Owned interleaved colour frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
}

impl ColorImage {
    /// Frame of the given size with every pixel set to `color` (`[B, G, R]`).
    pub fn filled(width: u32, height: u32, format: PixelFormat, color: [u8; 3]) -> Self {
        let channels = format.channels();
        let mut data = vec![0u8; width as usize * height as usize * channels];
        for px in data.chunks_exact_mut(channels) {
            format.write_bgr(px, color);
        }
        ColorImage {
            data,
            width,
            height,
            format,
        }
    }

    /// Wraps raw bytes, rejecting buffers whose length does not match.
    pub fn from_raw(data: Vec<u8>, width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        ImageBuffer::new(&data, width, height, format).validate()?;
        Ok(ColorImage {
            data,
            width,
            height,
            format,
        })
    }

    /// Copies a borrowed buffer.
    pub fn from_buffer(src: &ImageBuffer) -> Self {
        ColorImage {
            data: src.data.to_vec(),
            width: src.width,
            height: src.height,
            format: src.format,
        }
    }

    pub fn as_buffer(&self) -> ImageBuffer<'_> {
        ImageBuffer::new(&self.data, self.width, self.height, self.format)
    }

    /// Raw channels of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let channels = self.format.channels();
        let idx = (y as usize * self.width as usize + x as usize) * channels;
        &self.data[idx..idx + channels]
    }

    /// Sets the pixel at `(x, y)` to a `[B, G, R]` colour. Out-of-bounds writes are ignored.
    pub fn put_pixel(&mut self, x: u32, y: u32, color: [u8; 3]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let channels = self.format.channels();
        let idx = (y as usize * self.width as usize + x as usize) * channels;
        self.format
            .write_bgr(&mut self.data[idx..idx + channels], color);
    }
}

/// Owned 8-bit single channel image (luminance slices, masks, detection frame).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl GrayImage {
    pub fn filled(width: u32, height: u32, value: u8) -> Self {
        GrayImage {
            data: vec![value; width as usize * height as usize],
            width,
            height,
        }
    }

    pub fn from_raw(data: Vec<u8>, width: u32, height: u32) -> Result<Self> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(RoiError::InvalidBuffer {
                expected,
                actual: data.len(),
            });
        }
        Ok(GrayImage {
            data,
            width,
            height,
        })
    }

    pub fn as_buffer(&self) -> ImageBuffer<'_> {
        ImageBuffer::new(&self.data, self.width, self.height, PixelFormat::Gray8)
    }

    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Number of pixels equal to `value`.
    pub fn count_value(&self, value: u8) -> usize {
        self.data.iter().filter(|&&v| v == value).count()
    }

    pub fn area(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_color_respects_channel_order() {
        let bgr = ColorImage::filled(2, 1, PixelFormat::Bgr8, [1, 2, 3]);
        assert_eq!(bgr.data, vec![1, 2, 3, 1, 2, 3]);

        let rgba = ColorImage::filled(1, 1, PixelFormat::Rgba8, [1, 2, 3]);
        assert_eq!(rgba.data, vec![3, 2, 1, 255]);
    }

    #[test]
    fn test_from_raw_rejects_short_buffer() {
        let err = ColorImage::from_raw(vec![0; 10], 2, 2, PixelFormat::Bgr8).unwrap_err();
        match err {
            RoiError::InvalidBuffer { expected, actual } => {
                assert_eq!(expected, 12);
                assert_eq!(actual, 10);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(GrayImage::from_raw(vec![0; 3], 2, 2).is_err());
    }

    #[test]
    fn test_put_pixel_ignores_out_of_bounds() {
        let mut img = ColorImage::filled(2, 2, PixelFormat::Bgr8, [0, 0, 0]);
        let before = img.clone();
        img.put_pixel(2, 0, [255, 255, 255]);
        img.put_pixel(0, 5, [255, 255, 255]);
        assert_eq!(img, before);

        img.put_pixel(1, 1, [0, 255, 0]);
        assert_eq!(img.pixel(1, 1), &[0, 255, 0]);
    }

    #[test]
    fn test_gray_count_value() {
        let mut img = GrayImage::filled(4, 4, 255);
        img.data[0] = 0;
        img.data[5] = 0;
        assert_eq!(img.count_value(255), 14);
        assert_eq!(img.count_value(0), 2);
        assert_eq!(img.area(), 16);
    }
}
