// Copyright (c) 2026 kalwalt and AR.js-org contributors
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT
// See https://github.com/AR-js-org/aruco-rs/blob/main/LICENSE
#![cfg(target_arch = "wasm32")]
#![cfg(feature = "wasm")]

use crate::config::RegionConfig;
use crate::core::pipeline::{AnalysisPipeline, FrameReport};
use crate::core::region::RegionField;
use crate::cv::scalar::ScalarCV;
use crate::{ImageBuffer, PixelFormat};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
pub struct WasmLabel {
    pub text: String,
    pub x: i32,
    pub y: i32,
}

#[derive(Serialize)]
pub struct WasmRegion {
    pub name: String,
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
    pub min: u8,
    pub mean: f64,
    pub detected: usize,
}

#[derive(Serialize)]
pub struct WasmSkipped {
    pub name: String,
    pub reason: String,
}

#[derive(Serialize)]
pub struct WasmFrame {
    pub regions: Vec<WasmRegion>,
    pub skipped: Vec<WasmSkipped>,
    pub labels: Vec<WasmLabel>,
}

impl From<&FrameReport> for WasmFrame {
    fn from(report: &FrameReport) -> Self {
        WasmFrame {
            regions: report
                .results
                .iter()
                .map(|r| WasmRegion {
                    name: r.spec.name.clone(),
                    left: r.rect.x,
                    top: r.rect.y,
                    width: r.rect.width,
                    height: r.rect.height,
                    min: r.min_luminance,
                    mean: r.mean_luminance,
                    detected: r.detected_count,
                })
                .collect(),
            skipped: report
                .skipped
                .iter()
                .map(|(name, reason)| WasmSkipped {
                    name: name.clone(),
                    reason: reason.to_string(),
                })
                .collect(),
            labels: report
                .outputs
                .labels
                .iter()
                .map(|l| WasmLabel {
                    text: l.text.clone(),
                    x: l.anchor.x,
                    y: l.anchor.y,
                })
                .collect(),
        }
    }
}

/// JS-facing region analyzer
#[wasm_bindgen]
pub struct RoiAnalyzer {
    pipeline: AnalysisPipeline<ScalarCV>,
    config: RegionConfig,
}

#[wasm_bindgen]
impl RoiAnalyzer {
    /// `config_json` uses the same layout as the configuration file.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<RoiAnalyzer, JsValue> {
        let config = RegionConfig::from_json_str(config_json)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(RoiAnalyzer {
            pipeline: AnalysisPipeline::default(),
            config,
        })
    }

    /// Mirrors a form edit; the next frame picks it up.
    pub fn update_region(&mut self, name: &str, field: &str, value: &str) -> Result<(), JsValue> {
        let field: RegionField = field.parse().map_err(|e: String| JsValue::from_str(&e))?;
        self.config
            .set_field(name, field, value)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Current configuration as JSON, for persisting from JS.
    pub fn config_json(&self) -> Result<String, JsValue> {
        self.config
            .to_json_string()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Per-region statistics of one RGBA canvas frame.
    pub fn analyze_frame(
        &self,
        width: u32,
        height: u32,
        image_data: &[u8],
    ) -> Result<JsValue, JsValue> {
        let report = self.run(width, height, image_data)?;
        serde_wasm_bindgen::to_value(&WasmFrame::from(&report))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Detection frame bytes (one per pixel) of one RGBA canvas frame.
    pub fn detection_mask(
        &self,
        width: u32,
        height: u32,
        image_data: &[u8],
    ) -> Result<Vec<u8>, JsValue> {
        let report = self.run(width, height, image_data)?;
        Ok(report.outputs.detection.data)
    }
}

impl RoiAnalyzer {
    fn run(&self, width: u32, height: u32, image_data: &[u8]) -> Result<FrameReport, JsValue> {
        let buffer = ImageBuffer::new(image_data, width, height, PixelFormat::Rgba8);
        self.pipeline
            .run_frame(&buffer, self.config.regions())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
