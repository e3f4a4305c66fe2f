// Copyright (c) 2026 kalwalt and AR.js-org contributors
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT
// See https://github.com/AR-js-org/aruco-rs/blob/main/LICENSE
// src/core/region.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::cv::Rect;

/// One of the five editable values describing a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionField {
    Left,
    Right,
    Up,
    Down,
    Threshold,
}

impl RegionField {
    /// Field order as stored in the configuration file.
    pub const ALL: [RegionField; 5] = [
        RegionField::Left,
        RegionField::Right,
        RegionField::Up,
        RegionField::Down,
        RegionField::Threshold,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RegionField::Left => "left",
            RegionField::Right => "right",
            RegionField::Up => "up",
            RegionField::Down => "down",
            RegionField::Threshold => "threshold",
        }
    }
}

impl fmt::Display for RegionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegionField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RegionField::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| format!("unknown region field `{s}`"))
    }
}

/// Why a region cannot be analyzed this frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegionError {
    #[error("{field} is not an integer: {value:?}")]
    NotNumeric { field: RegionField, value: String },

    #[error("right ({right}) must be greater than left ({left})")]
    EmptyWidth { left: i32, right: i32 },

    #[error("down ({down}) must be greater than up ({up})")]
    EmptyHeight { up: i32, down: i32 },

    #[error("threshold {0} is outside 0..=255")]
    ThresholdOutOfRange(i64),
}

/// Raw text of a region as the user typed it. Any field may be garbage.
///
/// Deserializes from numbers or strings; a missing field is left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionFields {
    #[serde(default, deserialize_with = "field_text")]
    pub left: String,
    #[serde(default, deserialize_with = "field_text")]
    pub right: String,
    #[serde(default, deserialize_with = "field_text")]
    pub up: String,
    #[serde(default, deserialize_with = "field_text")]
    pub down: String,
    #[serde(default, deserialize_with = "field_text")]
    pub threshold: String,
}

fn field_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FieldText {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match FieldText::deserialize(deserializer)? {
        FieldText::Text(text) => text,
        FieldText::Number(n) => n.to_string(),
    })
}

impl RegionFields {
    pub fn get(&self, field: RegionField) -> &str {
        match field {
            RegionField::Left => &self.left,
            RegionField::Right => &self.right,
            RegionField::Up => &self.up,
            RegionField::Down => &self.down,
            RegionField::Threshold => &self.threshold,
        }
    }

    pub fn set(&mut self, field: RegionField, value: impl Into<String>) {
        let slot = match field {
            RegionField::Left => &mut self.left,
            RegionField::Right => &mut self.right,
            RegionField::Up => &mut self.up,
            RegionField::Down => &mut self.down,
            RegionField::Threshold => &mut self.threshold,
        };
        *slot = value.into();
    }

    fn parse_int(&self, field: RegionField) -> Result<i64, RegionError> {
        let raw = self.get(field);
        raw.trim()
            .parse::<i64>()
            .map_err(|_| RegionError::NotNumeric {
                field,
                value: raw.to_string(),
            })
    }

    fn parse_coord(&self, field: RegionField) -> Result<i32, RegionError> {
        let value = self.parse_int(field)?;
        i32::try_from(value).map_err(|_| RegionError::NotNumeric {
            field,
            value: self.get(field).to_string(),
        })
    }
}

impl From<&RegionSpec> for RegionFields {
    fn from(spec: &RegionSpec) -> Self {
        RegionFields {
            left: spec.left.to_string(),
            right: spec.right.to_string(),
            up: spec.up.to_string(),
            down: spec.down.to_string(),
            threshold: spec.threshold.to_string(),
        }
    }
}

/// A named region as read from configuration, not yet parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionDraft {
    pub name: String,
    pub fields: RegionFields,
}

impl RegionDraft {
    pub fn new(name: impl Into<String>, fields: RegionFields) -> Self {
        RegionDraft {
            name: name.into(),
            fields,
        }
    }

    pub fn parse(&self) -> Result<RegionSpec, RegionError> {
        RegionSpec::parse(&self.name, &self.fields)
    }
}

impl From<&RegionSpec> for RegionDraft {
    fn from(spec: &RegionSpec) -> Self {
        RegionDraft::new(spec.name.clone(), RegionFields::from(spec))
    }
}

/// A validated rectangle plus detection threshold.
///
/// Bounds are frame-relative and may reach outside the frame; they are clamped at analysis time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionSpec {
    pub name: String,
    pub left: i32,
    pub right: i32,
    pub up: i32,
    pub down: i32,
    pub threshold: u8,
}

impl RegionSpec {
    /// Builds a spec, rejecting rectangles with no width or height.
    pub fn new(
        name: impl Into<String>,
        left: i32,
        right: i32,
        up: i32,
        down: i32,
        threshold: u8,
    ) -> Result<Self, RegionError> {
        let spec = RegionSpec {
            name: name.into(),
            left,
            right,
            up,
            down,
            threshold,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Parses the editable text of a region.
    pub fn parse(name: &str, fields: &RegionFields) -> Result<Self, RegionError> {
        let left = fields.parse_coord(RegionField::Left)?;
        let right = fields.parse_coord(RegionField::Right)?;
        let up = fields.parse_coord(RegionField::Up)?;
        let down = fields.parse_coord(RegionField::Down)?;
        let threshold = fields.parse_int(RegionField::Threshold)?;
        let threshold =
            u8::try_from(threshold).map_err(|_| RegionError::ThresholdOutOfRange(threshold))?;

        RegionSpec::new(name, left, right, up, down, threshold)
    }

    /// `right > left` and `down > up`.
    pub fn validate(&self) -> Result<(), RegionError> {
        if self.right <= self.left {
            return Err(RegionError::EmptyWidth {
                left: self.left,
                right: self.right,
            });
        }
        if self.down <= self.up {
            return Err(RegionError::EmptyHeight {
                up: self.up,
                down: self.down,
            });
        }
        Ok(())
    }

    /// The part of the region inside a `width` x `height` frame, or `None` if nothing is left.
    pub fn clamped(&self, width: u32, height: u32) -> Option<Rect> {
        let w = width.min(i32::MAX as u32) as i32;
        let h = height.min(i32::MAX as u32) as i32;
        let left = self.left.clamp(0, w);
        let right = self.right.clamp(0, w);
        let up = self.up.clamp(0, h);
        let down = self.down.clamp(0, h);

        if right <= left || down <= up {
            return None;
        }

        Some(Rect {
            x: left as u32,
            y: up as u32,
            width: (right - left) as u32,
            height: (down - up) as u32,
        })
    }
}
