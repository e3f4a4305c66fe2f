// Copyright (c) 2026 kalwalt and AR.js-org contributors
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT
// See https://github.com/AR-js-org/aruco-rs/blob/main/LICENSE
// src/core/compositor.rs

use crate::core::analyzer::RegionResult;
use crate::cv::draw::{blit_gray, draw_rectangle};
use crate::frame::{ColorImage, GrayImage};
use crate::{ImageBuffer, Point2i, Result};

/// Initial value of every detection frame pixel.
pub const DETECTION_BACKGROUND: u8 = 255;

/// A text overlay for the external renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLabel {
    pub text: String,
    /// Bottom-left corner of the text baseline, in frame pixels.
    pub anchor: Point2i,
    /// `[B, G, R]`
    pub color: [u8; 3],
}

/// Whole-frame products of one analysis pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutputs {
    /// Source frame with region outlines drawn, in the source's pixel format.
    pub annotated: ColorImage,
    /// Frame-sized canvas holding each region's display mask over a 255 background.
    pub detection: GrayImage,
    /// `min`, `mean` and `detected` labels below each analyzed region.
    pub labels: Vec<TextLabel>,
}

/// Merges per-region results into the annotated and detection frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameCompositor {
    pub rect_color: [u8; 3],
    pub rect_thickness: u32,
    pub text_color: [u8; 3],
    /// Vertical distance of the three labels from the region's bottom edge.
    pub label_offsets: [i32; 3],
}

impl Default for FrameCompositor {
    fn default() -> Self {
        FrameCompositor {
            rect_color: [0, 255, 0],
            rect_thickness: 2,
            text_color: [0, 255, 120],
            label_offsets: [20, 40, 60],
        }
    }
}

impl FrameCompositor {
    /// Regions are drawn in slice order; where they overlap, the later one wins.
    ///
    /// Fails with [`crate::RoiError::InvalidBuffer`] when `source` is shorter or longer than its
    /// dimensions imply.
    pub fn compose(
        &self,
        source: &ImageBuffer,
        results: &[RegionResult],
    ) -> Result<FrameOutputs> {
        source.validate()?;

        let mut annotated = ColorImage::from_buffer(source);
        let mut detection = GrayImage::filled(source.width, source.height, DETECTION_BACKGROUND);
        let mut labels = Vec::with_capacity(results.len() * 3);

        for result in results {
            let spec = &result.spec;
            draw_rectangle(
                &mut annotated,
                spec.left,
                spec.up,
                spec.right,
                spec.down,
                self.rect_color,
                self.rect_thickness,
            );

            blit_gray(&mut detection, &result.rect, &result.display_mask);

            labels.extend(self.labels_for(result));
        }

        Ok(FrameOutputs {
            annotated,
            detection,
            labels,
        })
    }

    fn labels_for(&self, result: &RegionResult) -> [TextLabel; 3] {
        let spec = &result.spec;
        let [below_min, below_mean, below_detected] = self.label_offsets;
        [
            (format!("min: {}", result.min_luminance), below_min),
            (
                format!("mean: {}", result.mean_luminance.trunc() as i64),
                below_mean,
            ),
            (format!("detected: {}", result.detected_count), below_detected),
        ]
        .map(|(text, offset)| TextLabel {
            text,
            anchor: Point2i::new(spec.left, spec.down.saturating_add(offset)),
            color: self.text_color,
        })
    }
}
