// Copyright 2019-2022 Tauri Programme within The Commons Conservancy
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Runtime-wide settings, loadable from TOML.

use std::path::Path;

use serde::Deserialize;

use crate::{
  definitions::{GAP, MARGIN, ROW_HEIGHT, TRANSITION_MS},
  error::Result,
};

/// Settings shared by every toast of one [`Toaster`](crate::Toaster).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ToasterConfig {
  /// Append new toasts after the existing ones instead of inserting them first,
  /// so the oldest toast stays on the edge.
  pub oldest_first: bool,
  /// Length of the exit fade in milliseconds.
  pub transition_ms: u64,
  /// Distance to the container edges in pixels.
  pub margin: f32,
  /// Space between stacked toasts in pixels.
  pub gap: f32,
  /// Height of a toast that has not been measured.
  pub row_height: f32,
}

impl Default for ToasterConfig {
  fn default() -> Self {
    ToasterConfig {
      oldest_first: false,
      transition_ms: TRANSITION_MS,
      margin: MARGIN,
      gap: GAP,
      row_height: ROW_HEIGHT,
    }
  }
}

impl ToasterConfig {
  pub fn from_toml_str(source: &str) -> Result<Self> {
    Ok(toml::from_str(source)?)
  }

  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let source = std::fs::read_to_string(path.as_ref())?;
    log::debug!("loaded toaster config from {}", path.as_ref().display());
    Self::from_toml_str(&source)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::Error;

  #[test]
  fn partial_table_keeps_defaults() {
    let config = ToasterConfig::from_toml_str("oldest_first = true\ngap = 4.0\n").unwrap();
    assert!(config.oldest_first);
    assert_eq!(config.gap, 4.0);
    assert_eq!(config.transition_ms, TRANSITION_MS);
    assert_eq!(config.margin, MARGIN);
  }

  #[test]
  fn bad_types_are_parse_errors() {
    let err = ToasterConfig::from_toml_str("margin = \"wide\"").unwrap_err();
    assert!(matches!(err, Error::ConfigParse(_)));
  }

  #[test]
  fn missing_file_is_a_read_error() {
    let err = ToasterConfig::load("/nonexistent/toasty.toml").unwrap_err();
    assert!(matches!(err, Error::ConfigRead(_)));
  }
}
