// Copyright 2019-2022 Tauri Programme within The Commons Conservancy
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
  /// convert Color to a css hex color
  pub fn to_css(self) -> String {
    format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
  }
}

/// Formats a pixel length the way inline styles expect it, dropping a zero fraction.
pub fn px(value: f32) -> String {
  if value.fract() == 0.0 {
    format!("{}px", value as i64)
  } else {
    format!("{value}px")
  }
}

/// Splits a space separated class list, ignoring empty tokens.
pub fn class_tokens(classes: &str) -> impl Iterator<Item = &str> {
  classes.split_whitespace()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn color_renders_as_hex() {
    assert_eq!(Color(50, 57, 69).to_css(), "#323945");
    assert_eq!(Color(255, 255, 255).to_css(), "#ffffff");
  }

  #[test]
  fn px_drops_zero_fraction() {
    assert_eq!(px(15.0), "15px");
    assert_eq!(px(12.5), "12.5px");
    assert_eq!(px(-3.0), "-3px");
  }

  #[test]
  fn class_tokens_skip_blank_runs() {
    let tokens: Vec<_> = class_tokens("  a  b\tc ").collect();
    assert_eq!(tokens, ["a", "b", "c"]);
  }
}
