// Copyright (c) 2026 kalwalt and AR.js-org contributors
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT
// See https://github.com/AR-js-org/aruco-rs/blob/main/LICENSE
// src/core/analyzer.rs

use thiserror::Error;
use tracing::trace;

use crate::core::region::{RegionDraft, RegionError, RegionSpec};
use crate::cv::{ComputerVision, Rect};
use crate::frame::GrayImage;
use crate::{ImageBuffer, PixelFormat};

/// Intensity written into both masks for passing pixels.
pub const MASK_VALUE: u8 = 225;

/// Kernel size of the optional smoothed copy.
pub const SMOOTHING_KERNEL: usize = 5;

/// Tunables for [`RegionAnalyzer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzerOptions {
    /// Value of "set" pixels in `inverse_mask` and `display_mask`.
    pub mask_value: u8,
    /// Also keep a 5x5 Gaussian-smoothed copy of the luminance slice.
    /// It is never used for thresholds or statistics.
    pub keep_smoothed: bool,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        AnalyzerOptions {
            mask_value: MASK_VALUE,
            keep_smoothed: false,
        }
    }
}

/// Why a region produced no result this frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("invalid region: {0}")]
    Invalid(#[from] RegionError),

    #[error("region lies outside the frame")]
    EmptyAfterClamp,

    #[error("frame buffer does not match its dimensions")]
    MalformedFrame,
}

/// Statistics and masks of one region for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionResult {
    pub spec: RegionSpec,
    /// `spec` clamped to the frame; the shape of every mask below.
    pub rect: Rect,
    pub min_luminance: u8,
    pub mean_luminance: f64,
    /// `mask_value` where luminance < threshold.
    pub inverse_mask: GrayImage,
    /// `mask_value` where luminance >= threshold; this is what lands in the detection frame.
    pub display_mask: GrayImage,
    /// Dark pixels, i.e. non-zero pixels of `inverse_mask`.
    pub detected_count: usize,
    pub smoothed: Option<GrayImage>,
}

impl RegionResult {
    pub fn area(&self) -> usize {
        self.rect.area()
    }

    /// Light pixels, i.e. non-zero pixels of `display_mask`.
    pub fn display_count(&self) -> usize {
        self.display_mask.data.iter().filter(|&&v| v != 0).count()
    }
}

/// Result of analyzing one region: either numbers or a documented no-op.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionOutcome {
    Analyzed(RegionResult),
    Skipped(SkipReason),
}

impl RegionOutcome {
    pub fn result(&self) -> Option<&RegionResult> {
        match self {
            RegionOutcome::Analyzed(result) => Some(result),
            RegionOutcome::Skipped(_) => None,
        }
    }

    pub fn into_result(self) -> Option<RegionResult> {
        match self {
            RegionOutcome::Analyzed(result) => Some(result),
            RegionOutcome::Skipped(_) => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, RegionOutcome::Skipped(_))
    }
}

/// Per-region luminance analysis. Holds no frame state, so calls are independent.
#[derive(Debug, Clone, Default)]
pub struct RegionAnalyzer<CV: ComputerVision> {
    pub cv: CV,
    pub options: AnalyzerOptions,
}

impl<CV: ComputerVision> RegionAnalyzer<CV> {
    pub fn new(cv: CV, options: AnalyzerOptions) -> Self {
        RegionAnalyzer { cv, options }
    }

    /// Grayscale -> Min/Mean -> Threshold (both polarities) -> Count
    pub fn analyze(&self, frame: &ImageBuffer, spec: &RegionSpec) -> RegionOutcome {
        if let Err(err) = spec.validate() {
            return RegionOutcome::Skipped(SkipReason::Invalid(err));
        }
        if frame.validate().is_err() {
            return RegionOutcome::Skipped(SkipReason::MalformedFrame);
        }
        let Some(rect) = spec.clamped(frame.width, frame.height) else {
            return RegionOutcome::Skipped(SkipReason::EmptyAfterClamp);
        };

        let area = rect.area();
        let mask_value = self.options.mask_value;

        // 1. Luminance of the region
        let mut luma = vec![0u8; area];
        CV::grayscale(frame, &rect, &mut luma);

        // 2. Statistics
        let (min_luminance, mean_luminance) = CV::min_mean(&luma);

        // 3. Optional smoothed copy
        let smoothed = self.options.keep_smoothed.then(|| {
            let mut blurred = vec![0u8; area];
            let buf = ImageBuffer::new(&luma, rect.width, rect.height, PixelFormat::Gray8);
            CV::gaussian_blur(&buf, &mut blurred, SMOOTHING_KERNEL);
            GrayImage {
                data: blurred,
                width: rect.width,
                height: rect.height,
            }
        });

        // 4. Masks from the unsmoothed luminance
        let mut inverse = vec![0u8; area];
        CV::threshold_inv(&luma, &mut inverse, spec.threshold, mask_value);
        let mut display = vec![0u8; area];
        CV::threshold(&luma, &mut display, spec.threshold, mask_value);

        // 5. Dark pixel count
        let detected_count = CV::count_non_zero(&inverse);

        trace!(
            "region {}: min={} mean={:.2} detected={}/{}",
            spec.name,
            min_luminance,
            mean_luminance,
            detected_count,
            area
        );

        RegionOutcome::Analyzed(RegionResult {
            spec: spec.clone(),
            rect,
            min_luminance,
            mean_luminance,
            inverse_mask: GrayImage {
                data: inverse,
                width: rect.width,
                height: rect.height,
            },
            display_mask: GrayImage {
                data: display,
                width: rect.width,
                height: rect.height,
            },
            detected_count,
            smoothed,
        })
    }

    /// Parses the draft first; unparsable text is skipped like any other invalid region.
    pub fn analyze_draft(&self, frame: &ImageBuffer, draft: &RegionDraft) -> RegionOutcome {
        match draft.parse() {
            Ok(spec) => self.analyze(frame, &spec),
            Err(err) => RegionOutcome::Skipped(SkipReason::Invalid(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::region::RegionFields;
    use crate::cv::scalar::ScalarCV;
    use crate::frame::ColorImage;

    include!("../../tests/data/sample_8x8.rs");

    fn analyzer() -> RegionAnalyzer<ScalarCV> {
        RegionAnalyzer::new(ScalarCV, AnalyzerOptions::default())
    }

    fn gray_frame(width: u32, height: u32, v: u8) -> ColorImage {
        ColorImage::filled(width, height, PixelFormat::Bgr8, [v, v, v])
    }

    fn spec(left: i32, right: i32, up: i32, down: i32, threshold: u8) -> RegionSpec {
        RegionSpec {
            name: "area1".into(),
            left,
            right,
            up,
            down,
            threshold,
        }
    }

    #[test]
    fn test_uniform_region_stats() {
        let frame = gray_frame(20, 20, 100);
        let buf = frame.as_buffer();

        for (threshold, expected) in [(150u8, 48usize), (100, 0), (101, 48), (50, 0)] {
            let outcome = analyzer().analyze(&buf, &spec(2, 10, 4, 10, threshold));
            let result = outcome.into_result().unwrap();
            assert_eq!(result.min_luminance, 100);
            assert_eq!(result.mean_luminance, 100.0);
            assert_eq!(result.area(), 48);
            assert_eq!(result.detected_count, expected, "threshold {threshold}");
        }
    }

    #[test]
    fn test_masks_partition_region() {
        let buf = ImageBuffer::new(&SAMPLE_8X8_BGR, 8, 8, PixelFormat::Bgr8);

        for threshold in [0u8, 50, 51, 100, 141, 142, 255] {
            let result = analyzer()
                .analyze(&buf, &spec(0, 8, 0, 8, threshold))
                .into_result()
                .unwrap();
            assert_eq!(result.detected_count + result.display_count(), 64);
            for (inv, disp) in result
                .inverse_mask
                .data
                .iter()
                .zip(result.display_mask.data.iter())
            {
                assert!((*inv == MASK_VALUE) ^ (*disp == MASK_VALUE));
                assert!(*inv == 0 || *inv == MASK_VALUE);
            }
        }
    }

    #[test]
    fn test_mixed_region_stats() {
        let buf = ImageBuffer::new(&SAMPLE_8X8_BGR, 8, 8, PixelFormat::Bgr8);
        let result = analyzer()
            .analyze(&buf, &spec(0, 8, 0, 8, 100))
            .into_result()
            .unwrap();

        assert_eq!(result.min_luminance, 50);
        assert!((result.mean_luminance - 95.5).abs() < 1e-9);
        assert_eq!(result.detected_count, 32);
        assert!(result.smoothed.is_none());
    }

    #[test]
    fn test_invalid_spec_is_skipped() {
        let frame = gray_frame(10, 10, 100);
        let outcome = analyzer().analyze(&frame.as_buffer(), &spec(100, 50, 0, 10, 80));
        assert_eq!(
            outcome,
            RegionOutcome::Skipped(SkipReason::Invalid(RegionError::EmptyWidth {
                left: 100,
                right: 50
            }))
        );
    }

    #[test]
    fn test_region_outside_frame_is_skipped() {
        let frame = gray_frame(10, 10, 100);
        let outcome = analyzer().analyze(&frame.as_buffer(), &spec(20, 30, 0, 10, 80));
        assert_eq!(outcome, RegionOutcome::Skipped(SkipReason::EmptyAfterClamp));
    }

    #[test]
    fn test_region_is_clamped() {
        let frame = gray_frame(10, 10, 30);
        let result = analyzer()
            .analyze(&frame.as_buffer(), &spec(-5, 4, 6, 50, 80))
            .into_result()
            .unwrap();

        assert_eq!(
            result.rect,
            Rect {
                x: 0,
                y: 6,
                width: 4,
                height: 4
            }
        );
        assert_eq!(result.detected_count, 16);
        assert_eq!(result.inverse_mask.area(), 16);
    }

    #[test]
    fn test_malformed_frame_is_skipped() {
        let data = [0u8; 10];
        let buf = ImageBuffer::new(&data, 4, 4, PixelFormat::Bgr8);
        let outcome = analyzer().analyze(&buf, &spec(0, 2, 0, 2, 80));
        assert_eq!(outcome, RegionOutcome::Skipped(SkipReason::MalformedFrame));
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let buf = ImageBuffer::new(&SAMPLE_8X8_BGR, 8, 8, PixelFormat::Bgr8);
        let analyzer = analyzer();
        let region = spec(1, 7, 2, 6, 120);

        let first = analyzer.analyze(&buf, &region);
        let second = analyzer.analyze(&buf, &region);
        assert_eq!(first, second);
    }

    #[test]
    fn test_analyze_draft_non_numeric() {
        let frame = gray_frame(10, 10, 100);
        let draft = RegionDraft::new(
            "area3",
            RegionFields {
                left: "0".into(),
                right: "1O".into(),
                up: "0".into(),
                down: "10".into(),
                threshold: "80".into(),
            },
        );

        let outcome = analyzer().analyze_draft(&frame.as_buffer(), &draft);
        assert!(matches!(
            outcome,
            RegionOutcome::Skipped(SkipReason::Invalid(RegionError::NotNumeric { .. }))
        ));
    }

    #[test]
    fn test_keep_smoothed_does_not_change_results() {
        let buf = ImageBuffer::new(&SAMPLE_8X8_BGR, 8, 8, PixelFormat::Bgr8);
        let region = spec(0, 8, 0, 8, 100);
        let plain = analyzer().analyze(&buf, &region).into_result().unwrap();

        let smoothing = RegionAnalyzer::new(
            ScalarCV,
            AnalyzerOptions {
                keep_smoothed: true,
                ..Default::default()
            },
        );
        let smoothed = smoothing.analyze(&buf, &region).into_result().unwrap();

        let blurred = smoothed.smoothed.as_ref().unwrap();
        assert_eq!(blurred.area(), 64);
        // Blurring an alternating pattern pulls every pixel between the two levels.
        assert!(blurred.data.iter().all(|&v| v > 50 && v < 141));
        assert_eq!(smoothed.detected_count, plain.detected_count);
        assert_eq!(smoothed.display_mask, plain.display_mask);
        assert_eq!(smoothed.min_luminance, plain.min_luminance);
    }
}
