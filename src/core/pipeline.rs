// Copyright (c) 2026 kalwalt and AR.js-org contributors
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT
// See https://github.com/AR-js-org/aruco-rs/blob/main/LICENSE
// src/core/pipeline.rs

use tracing::{debug, trace, warn};

use crate::config::RegionProvider;
use crate::core::analyzer::{
    AnalyzerOptions, RegionAnalyzer, RegionOutcome, RegionResult, SkipReason,
};
use crate::core::compositor::{FrameCompositor, FrameOutputs};
use crate::core::region::RegionDraft;
use crate::cv::ComputerVision;
use crate::frame::ColorImage;
use crate::simd::DispatchCV;
use crate::{ImageBuffer, Result};

/// Source of successive frames. `None` means no frame is available this tick.
///
/// Any `FnMut() -> Option<ColorImage>` closure is a source.
pub trait FrameSource {
    fn next_frame(&mut self) -> Option<ColorImage>;
}

impl<F> FrameSource for F
where
    F: FnMut() -> Option<ColorImage>,
{
    fn next_frame(&mut self) -> Option<ColorImage> {
        self()
    }
}

/// Everything one frame produced.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub outputs: FrameOutputs,
    /// Analyzed regions in definition order.
    pub results: Vec<RegionResult>,
    /// Regions left out this frame, with the reason.
    pub skipped: Vec<(String, SkipReason)>,
}

impl FrameReport {
    pub fn result(&self, name: &str) -> Option<&RegionResult> {
        self.results.iter().find(|r| r.spec.name == name)
    }

    pub fn skip_reason(&self, name: &str) -> Option<&SkipReason> {
        self.skipped
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, reason)| reason)
    }
}

/// Runs every configured region over a frame and composes the outputs.
///
/// Carries no state between frames; each call reads the regions it is given.
#[derive(Debug, Clone, Default)]
pub struct AnalysisPipeline<CV: ComputerVision = DispatchCV> {
    pub analyzer: RegionAnalyzer<CV>,
    pub compositor: FrameCompositor,
}

impl AnalysisPipeline<DispatchCV> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<CV: ComputerVision> AnalysisPipeline<CV> {
    pub fn with_parts(analyzer: RegionAnalyzer<CV>, compositor: FrameCompositor) -> Self {
        AnalysisPipeline {
            analyzer,
            compositor,
        }
    }

    pub fn options(&self) -> &AnalyzerOptions {
        &self.analyzer.options
    }

    /// Analyzes `regions` in order over `frame`.
    ///
    /// Only a malformed frame buffer is an error; bad regions are skipped and reported.
    pub fn run_frame(&self, frame: &ImageBuffer, regions: &[RegionDraft]) -> Result<FrameReport> {
        frame.validate()?;

        let mut results = Vec::with_capacity(regions.len());
        let mut skipped = Vec::new();

        for draft in regions {
            match self.analyzer.analyze_draft(frame, draft) {
                RegionOutcome::Analyzed(result) => results.push(result),
                RegionOutcome::Skipped(reason) => {
                    debug!("skipping region {}: {}", draft.name, reason);
                    skipped.push((draft.name.clone(), reason));
                }
            }
        }

        let outputs = self.compositor.compose(frame, &results)?;
        trace!(
            "frame {}x{}: {} region(s) analyzed, {} skipped",
            frame.width,
            frame.height,
            results.len(),
            skipped.len()
        );

        Ok(FrameReport {
            outputs,
            results,
            skipped,
        })
    }

    /// One tick of the frame loop: pull a frame, read the current regions, analyze.
    ///
    /// Returns `None` when the source has no frame or the frame is malformed;
    /// the caller keeps showing its previous outputs.
    pub fn tick<S, P>(&self, source: &mut S, provider: &P) -> Option<FrameReport>
    where
        S: FrameSource + ?Sized,
        P: RegionProvider + ?Sized,
    {
        let Some(frame) = source.next_frame() else {
            trace!("no frame available");
            return None;
        };

        let regions = provider.current_regions();
        match self.run_frame(&frame.as_buffer(), &regions) {
            Ok(report) => Some(report),
            Err(e) => {
                warn!("dropping frame: {}", e);
                None
            }
        }
    }
}
