// Copyright (c) 2026 kalwalt and AR.js-org contributors
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT
// See https://github.com/AR-js-org/aruco-rs/blob/main/LICENSE
// src/config.rs

//! Region configuration: the ordered set of editable region records, its JSON file
//! format, and the read-on-demand provider the pipeline pulls from each frame.
//!
//! The file is a JSON object keyed by region name, each value holding the five
//! fields as numbers or strings:
//!
//! ```json
//! {
//!     "area1": { "left": 10, "right": 110, "up": 20, "down": 80, "threshold": 60 }
//! }
//! ```

use std::fs;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::core::region::{RegionDraft, RegionField, RegionFields, RegionSpec};
use crate::{Result, RoiError};

/// Supplies the regions to analyze, read once per frame.
pub trait RegionProvider {
    /// Current regions in definition order.
    fn current_regions(&self) -> Vec<RegionDraft>;
}

impl RegionProvider for [RegionSpec] {
    fn current_regions(&self) -> Vec<RegionDraft> {
        self.iter().map(RegionDraft::from).collect()
    }
}

impl RegionProvider for Vec<RegionSpec> {
    fn current_regions(&self) -> Vec<RegionDraft> {
        self.as_slice().current_regions()
    }
}

/// Ordered collection of region records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionConfig {
    regions: Vec<RegionDraft>,
}

impl RegionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Three stacked areas on a 640x480 frame.
    pub fn default_areas() -> Self {
        let mut config = RegionConfig::new();
        for (i, (up, down)) in [(40, 140), (190, 290), (340, 440)].into_iter().enumerate() {
            let spec = RegionSpec {
                name: format!("area{}", i + 1),
                left: 220,
                right: 420,
                up,
                down,
                threshold: 60,
            };
            config.insert(RegionDraft::from(&spec));
        }
        config
    }

    /// Adds a region, replacing one with the same name in place.
    pub fn insert(&mut self, draft: RegionDraft) {
        match self.regions.iter_mut().find(|r| r.name == draft.name) {
            Some(existing) => *existing = draft,
            None => self.regions.push(draft),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<RegionDraft> {
        let idx = self.regions.iter().position(|r| r.name == name)?;
        Some(self.regions.remove(idx))
    }

    pub fn get(&self, name: &str) -> Option<&RegionDraft> {
        self.regions.iter().find(|r| r.name == name)
    }

    pub fn regions(&self) -> &[RegionDraft] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Replaces the text of one field, as a form edit would.
    pub fn set_field(&mut self, region: &str, field: RegionField, value: &str) -> Result<()> {
        let draft = self
            .regions
            .iter_mut()
            .find(|r| r.name == region)
            .ok_or_else(|| RoiError::Config(format!("unknown region `{region}`")))?;
        draft.fields.set(field, value);
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let root: Map<String, Value> = serde_json::from_str(json)?;
        let mut config = RegionConfig::new();

        for (name, record) in root {
            let Value::Object(record) = record else {
                return Err(RoiError::Config(format!(
                    "region `{name}` must be an object"
                )));
            };

            for field in RegionField::ALL {
                if !record.contains_key(field.as_str()) {
                    // Left empty; the region is skipped until the field is filled in.
                    warn!("region `{}` has no `{}` field", name, field);
                }
            }
            let fields: RegionFields = serde_json::from_value(Value::Object(record))
                .map_err(|e| RoiError::Config(format!("region `{name}`: {e}")))?;
            config.insert(RegionDraft::new(name, fields));
        }

        Ok(config)
    }

    /// Pretty JSON with four-space indentation, values kept as the text the user typed.
    pub fn to_json_string(&self) -> Result<String> {
        let mut root = Map::new();
        for draft in &self.regions {
            root.insert(draft.name.clone(), serde_json::to_value(&draft.fields)?);
        }

        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
        serde::Serialize::serialize(&Value::Object(root), &mut ser)?;
        String::from_utf8(out).map_err(|e| RoiError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = Self::from_json_str(&fs::read_to_string(path)?)?;
        info!(
            "Loaded {} region(s) from {}",
            config.len(),
            path.display()
        );
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json_string()?)?;
        info!("Saved {} region(s) to {}", self.len(), path.display());
        Ok(())
    }
}

impl RegionProvider for RegionConfig {
    fn current_regions(&self) -> Vec<RegionDraft> {
        self.regions.clone()
    }
}

/// Shared, editable configuration. Clones point at the same regions, so an editor
/// can hold one handle while the frame loop reads through another.
#[derive(Debug, Clone, Default)]
pub struct LiveRegions {
    inner: Arc<RwLock<RegionConfig>>,
}

impl LiveRegions {
    pub fn new(config: RegionConfig) -> Self {
        LiveRegions {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    pub fn set_field(&self, region: &str, field: RegionField, value: &str) -> Result<()> {
        self.inner.write().set_field(region, field, value)
    }

    pub fn replace(&self, config: RegionConfig) {
        *self.inner.write() = config;
    }

    pub fn snapshot(&self) -> RegionConfig {
        self.inner.read().clone()
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.inner.read().save(path)
    }
}

impl RegionProvider for LiveRegions {
    fn current_regions(&self) -> Vec<RegionDraft> {
        self.inner.read().current_regions()
    }
}
