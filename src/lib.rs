// Copyright (c) 2026 kalwalt and AR.js-org contributors
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT
// See https://github.com/AR-js-org/aruco-rs/blob/main/LICENSE
use nalgebra::Vector2;
use thiserror::Error;

/// 2D Point in pixel coordinates
pub type Point2i = Vector2<i32>;

/// Channel layout of an 8-bit interleaved frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelFormat {
    /// Blue, green, red (camera default)
    #[default]
    Bgr8,
    Rgb8,
    Rgba8,
    Gray8,
}

impl PixelFormat {
    /// Bytes per pixel.
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Bgr8 | PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
            PixelFormat::Gray8 => 1,
        }
    }

    /// Luminance of one pixel given in this format.
    #[inline]
    pub fn luma(self, px: &[u8]) -> u8 {
        match self {
            PixelFormat::Bgr8 => cv::luminance(px[2], px[1], px[0]),
            PixelFormat::Rgb8 | PixelFormat::Rgba8 => cv::luminance(px[0], px[1], px[2]),
            PixelFormat::Gray8 => px[0],
        }
    }

    /// Writes a `[B, G, R]` colour into one pixel of this format.
    #[inline]
    pub fn write_bgr(self, px: &mut [u8], color: [u8; 3]) {
        let [b, g, r] = color;
        match self {
            PixelFormat::Bgr8 => px.copy_from_slice(&[b, g, r]),
            PixelFormat::Rgb8 => px.copy_from_slice(&[r, g, b]),
            PixelFormat::Rgba8 => px.copy_from_slice(&[r, g, b, 255]),
            PixelFormat::Gray8 => px[0] = cv::luminance(r, g, b),
        }
    }
}

/// Zero-copy image buffer for JS/Native interop.
/// Designed to map WASM memory or native video buffers without copying.
///
/// # Fields
/// * `data` - A slice representing a 1D contiguous array of interleaved 8-bit pixels.
/// * `width` - The logical width of the frame in pixels.
/// * `height` - The logical height of the frame in pixels.
/// * `format` - Channel layout of `data`.
#[derive(Debug, Clone, Copy)]
pub struct ImageBuffer<'a> {
    pub data: &'a [u8],
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
}

impl<'a> ImageBuffer<'a> {
    pub fn new(data: &'a [u8], width: u32, height: u32, format: PixelFormat) -> Self {
        ImageBuffer {
            data,
            width,
            height,
            format,
        }
    }

    /// Number of bytes `data` must hold.
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * self.format.channels()
    }

    /// Checks that the slice length matches the declared geometry.
    pub fn validate(&self) -> Result<()> {
        let expected = self.expected_len();
        if self.data.len() != expected {
            return Err(RoiError::InvalidBuffer {
                expected,
                actual: self.data.len(),
            });
        }
        Ok(())
    }
}

/// Errors surfaced at the crate boundary.
///
/// Problems with a single region are not errors; see [`crate::core::analyzer::RegionOutcome`].
#[derive(Debug, Error)]
pub enum RoiError {
    #[error("frame buffer holds {actual} bytes, expected {expected}")]
    InvalidBuffer { expected: usize, actual: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, RoiError>;

pub mod config;
pub mod core;
pub mod cv;
pub mod frame;
pub mod simd;

#[cfg(feature = "wasm")]
pub mod wasm_bridge;

pub use crate::core::analyzer::{
    AnalyzerOptions, RegionAnalyzer, RegionOutcome, RegionResult, SkipReason,
};
pub use crate::core::compositor::{FrameCompositor, FrameOutputs, TextLabel};
pub use crate::core::pipeline::{AnalysisPipeline, FrameReport, FrameSource};
pub use crate::core::region::{RegionDraft, RegionError, RegionField, RegionFields, RegionSpec};
pub use config::{LiveRegions, RegionConfig, RegionProvider};
pub use frame::{ColorImage, GrayImage};
