// Copyright 2019-2022 Tauri Programme within The Commons Conservancy
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::util::Color;

/// dark toast background
const DARK_BG: Color = Color(50, 57, 69);
/// dark toast text
const DARK_FG: Color = Color(255, 255, 255);
/// light toast background
const LIGHT_BG: Color = Color(255, 255, 255);
/// light toast text
const LIGHT_FG: Color = Color(50, 57, 69);

static BASE_STYLE: Lazy<Style> = Lazy::new(|| Style {
  background: None,
  color: None,
  padding: "12px 20px".to_owned(),
  border_radius: "4px".to_owned(),
  font_size: "14px".to_owned(),
});

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Theme {
  Light,
  Dark,
}

impl Theme {
  /// Case-insensitive lookup. Unknown names yield `None`.
  pub fn parse(name: &str) -> Option<Theme> {
    match name.trim().to_lowercase().as_str() {
      "light" => Some(Theme::Light),
      "dark" => Some(Theme::Dark),
      _ => None,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Theme::Light => "light",
      Theme::Dark => "dark",
    }
  }

  /// (background, text) colors
  pub fn colors(self) -> (Color, Color) {
    match self {
      Theme::Light => (LIGHT_BG, LIGHT_FG),
      Theme::Dark => (DARK_BG, DARK_FG),
    }
  }

  pub fn class_name(self) -> String {
    format!("{}--{}", crate::definitions::MARKER_CLASS, self.as_str())
  }
}

impl From<Theme> for String {
  fn from(theme: Theme) -> Self {
    theme.as_str().to_owned()
  }
}

/// Caller supplied style properties. Each set field wins over the theme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct StyleOverrides {
  pub background: Option<String>,
  pub color: Option<String>,
  pub padding: Option<String>,
  pub border_radius: Option<String>,
  pub font_size: Option<String>,
}

impl StyleOverrides {
  /// Field-wise merge, `other` wins where it is set.
  pub fn merge(&mut self, other: &StyleOverrides) {
    fn take(slot: &mut Option<String>, value: &Option<String>) {
      if value.is_some() {
        slot.clone_from(value);
      }
    }
    take(&mut self.background, &other.background);
    take(&mut self.color, &other.color);
    take(&mut self.padding, &other.padding);
    take(&mut self.border_radius, &other.border_radius);
    take(&mut self.font_size, &other.font_size);
  }
}

/// The fully resolved visual style of a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
  pub background: Option<String>,
  pub color: Option<String>,
  pub padding: String,
  pub border_radius: String,
  pub font_size: String,
}

impl Style {
  /// Layers the base style, then the theme colors, then `overrides`.
  pub fn resolve(theme: Option<Theme>, overrides: &StyleOverrides) -> Style {
    let mut style = BASE_STYLE.clone();
    if let Some(theme) = theme {
      let (background, color) = theme.colors();
      style.background = Some(background.to_css());
      style.color = Some(color.to_css());
    }
    if let Some(background) = &overrides.background {
      style.background = Some(background.clone());
    }
    if let Some(color) = &overrides.color {
      style.color = Some(color.clone());
    }
    if let Some(padding) = &overrides.padding {
      style.padding.clone_from(padding);
    }
    if let Some(border_radius) = &overrides.border_radius {
      style.border_radius.clone_from(border_radius);
    }
    if let Some(font_size) = &overrides.font_size {
      style.font_size.clone_from(font_size);
    }
    style
  }

  /// Inline style declarations, colors first. Unset colors are omitted.
  pub fn declarations(&self) -> Vec<(&'static str, &str)> {
    let mut decls = Vec::with_capacity(5);
    if let Some(background) = &self.background {
      decls.push(("background", background.as_str()));
    }
    if let Some(color) = &self.color {
      decls.push(("color", color.as_str()));
    }
    decls.push(("padding", self.padding.as_str()));
    decls.push(("border-radius", self.border_radius.as_str()));
    decls.push(("font-size", self.font_size.as_str()));
    decls
  }
}
