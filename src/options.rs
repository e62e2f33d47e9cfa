// Copyright 2019-2022 Tauri Programme within The Commons Conservancy
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use std::{fmt, rc::Rc};

use serde::{Deserialize, Deserializer};

use crate::{
  dom::{Document, NodeId},
  error::{Error, Result},
  position::Position,
  theme::{Style, StyleOverrides, Theme},
  timeout::Timeout,
};

/// Invoked with the document and the toast node. For the removal callback the
/// node is already detached when this runs.
pub type Callback = Rc<dyn Fn(&Document, NodeId)>;

/// Where a toast is inserted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ContainerRef {
  /// The document body.
  #[default]
  Body,
  /// An element id, looked up when the toast is shown.
  Id(String),
  /// An element or shadow root.
  Node(NodeId),
}

impl ContainerRef {
  pub fn resolve(&self, doc: &Document) -> Result<NodeId> {
    match self {
      ContainerRef::Body => Ok(doc.body()),
      ContainerRef::Id(id) => doc
        .get_element_by_id(id)
        .ok_or_else(|| Error::ContainerNotFound(format!("#{id}"))),
      ContainerRef::Node(node) if doc.contains(*node) => Ok(*node),
      ContainerRef::Node(node) => Err(Error::ContainerNotFound(node.to_string())),
    }
  }
}

impl From<NodeId> for ContainerRef {
  fn from(node: NodeId) -> Self {
    ContainerRef::Node(node)
  }
}

impl From<&str> for ContainerRef {
  fn from(selector: &str) -> Self {
    match selector.trim() {
      "" | "body" => ContainerRef::Body,
      id => ContainerRef::Id(id.trim_start_matches('#').to_owned()),
    }
  }
}

impl<'de> Deserialize<'de> for ContainerRef {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
    String::deserialize(deserializer).map(|s| ContainerRef::from(s.as_str()))
  }
}

/// Everything a toast is built from.
///
/// Any field left out of a TOML table keeps its default, `style` is merged
/// field by field over the theme.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ToastOptions {
  pub text: String,
  pub duration: Timeout,
  /// One of the six corner names, e.g. `"bottom-right"`. Takes precedence over `x`/`y`.
  pub position: Option<String>,
  /// Vertical axis: `top`, `bottom` or `center`.
  pub x: Option<String>,
  /// Horizontal axis: `left`, `right` or `center`.
  pub y: Option<String>,
  pub theme: Option<String>,
  pub style: StyleOverrides,
  /// Render a close control.
  pub close: bool,
  /// Pause the countdown while the pointer is over the toast.
  pub keep_on_hover: bool,
  /// Extra space separated classes.
  pub class_name: String,
  pub container: ContainerRef,
  /// Runs once the toast node has been removed.
  #[serde(skip)]
  pub callback: Option<Callback>,
  /// Runs when the toast body is clicked.
  #[serde(skip)]
  pub on_click: Option<Callback>,
}

impl Default for ToastOptions {
  fn default() -> ToastOptions {
    ToastOptions {
      text: String::new(),
      duration: Timeout::Default,
      position: None,
      x: Some("bottom".to_owned()),
      y: Some("right".to_owned()),
      theme: Some(Theme::Dark.into()),
      style: StyleOverrides::default(),
      close: false,
      keep_on_hover: false,
      class_name: String::new(),
      container: ContainerRef::Body,
      callback: None,
      on_click: None,
    }
  }
}

impl fmt::Debug for ToastOptions {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ToastOptions")
      .field("text", &self.text)
      .field("duration", &self.duration)
      .field("position", &self.position)
      .field("x", &self.x)
      .field("y", &self.y)
      .field("theme", &self.theme)
      .field("style", &self.style)
      .field("close", &self.close)
      .field("keep_on_hover", &self.keep_on_hover)
      .field("class_name", &self.class_name)
      .field("container", &self.container)
      .field("callback", &self.callback.is_some())
      .field("on_click", &self.on_click.is_some())
      .finish()
  }
}

impl ToastOptions {
  pub fn new() -> ToastOptions {
    ToastOptions::default()
  }

  pub fn from_toml_str(source: &str) -> Result<ToastOptions> {
    Ok(toml::from_str(source)?)
  }

  pub fn text(&mut self, text: &str) -> &mut ToastOptions {
    self.text = text.to_owned();
    self
  }

  /// Auto-hide delay in milliseconds, `0` keeps the toast until it is hidden.
  pub fn duration(&mut self, ms: u32) -> &mut ToastOptions {
    self.duration = Timeout::from(ms);
    self
  }

  pub fn timeout(&mut self, timeout: Timeout) -> &mut ToastOptions {
    self.duration = timeout;
    self
  }

  pub fn position(&mut self, position: impl Into<String>) -> &mut ToastOptions {
    self.position = Some(position.into());
    self
  }

  /// Sets the vertical axis and drops any corner set with [`position`](Self::position).
  pub fn x(&mut self, x: &str) -> &mut ToastOptions {
    self.position = None;
    self.x = Some(x.to_owned());
    self
  }

  /// Sets the horizontal axis and drops any corner set with [`position`](Self::position).
  pub fn y(&mut self, y: &str) -> &mut ToastOptions {
    self.position = None;
    self.y = Some(y.to_owned());
    self
  }

  pub fn theme(&mut self, theme: impl Into<String>) -> &mut ToastOptions {
    self.theme = Some(theme.into());
    self
  }

  /// Merges `style` into the current overrides.
  pub fn style(&mut self, style: StyleOverrides) -> &mut ToastOptions {
    self.style.merge(&style);
    self
  }

  pub fn close(&mut self, close: bool) -> &mut ToastOptions {
    self.close = close;
    self
  }

  pub fn keep_on_hover(&mut self, keep_on_hover: bool) -> &mut ToastOptions {
    self.keep_on_hover = keep_on_hover;
    self
  }

  pub fn class_name(&mut self, class_name: &str) -> &mut ToastOptions {
    self.class_name = class_name.to_owned();
    self
  }

  pub fn container(&mut self, container: impl Into<ContainerRef>) -> &mut ToastOptions {
    self.container = container.into();
    self
  }

  pub fn callback(&mut self, callback: impl Fn(&Document, NodeId) + 'static) -> &mut ToastOptions {
    self.callback = Some(Rc::new(callback));
    self
  }

  pub fn on_click(&mut self, on_click: impl Fn(&Document, NodeId) + 'static) -> &mut ToastOptions {
    self.on_click = Some(Rc::new(on_click));
    self
  }

  pub fn resolved_position(&self) -> Position {
    Position::resolve(self.position.as_deref(), self.x.as_deref(), self.y.as_deref())
  }

  /// The parsed theme. An unrecognized name is logged and yields `None`.
  pub fn resolved_theme(&self) -> Option<Theme> {
    let name = self.theme.as_deref()?;
    let theme = Theme::parse(name);
    if theme.is_none() {
      log::warn!("unrecognized toast theme {name:?}, no colors applied");
    }
    theme
  }

  pub fn resolved_style(&self) -> Style {
    Style::resolve(self.resolved_theme(), &self.style)
  }
}

impl From<&mut ToastOptions> for ToastOptions {
  fn from(options: &mut ToastOptions) -> Self {
    options.clone()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::position::{Corner, Horizontal, Vertical};
  use pretty_assertions::assert_eq;

  #[test]
  fn toml_fields_merge_over_defaults() {
    let options = ToastOptions::from_toml_str(
      r##"
        text = "Saved"
        duration = 2000
        position = "top-left"
        container = "#app"

        [style]
        font_size = "18px"
      "##,
    )
    .unwrap();

    assert_eq!(options.text, "Saved");
    assert_eq!(options.duration, Timeout::Milliseconds(2000));
    assert_eq!(options.resolved_position(), Position::from(Corner::TopLeft));
    assert_eq!(options.container, ContainerRef::Id("app".into()));
    assert_eq!(options.theme.as_deref(), Some("dark"));

    let style = options.resolved_style();
    assert_eq!(style.font_size, "18px");
    assert_eq!(style.padding, "12px 20px");
    assert_eq!(style.background.as_deref(), Some("#323945"));
  }

  #[test]
  fn zero_duration_never_expires() {
    let options = ToastOptions::from_toml_str("duration = 0").unwrap();
    assert_eq!(options.duration, Timeout::Never);
  }

  #[test]
  fn axes_replace_corner() {
    let mut options = ToastOptions::new();
    options.position(Corner::TopRight).x("center").y("left");
    let position = options.resolved_position();
    assert_eq!(position.vertical, Some(Vertical::Center));
    assert_eq!(position.horizontal, Some(Horizontal::Left));
  }

  #[test]
  fn unknown_theme_applies_no_colors() {
    let mut options = ToastOptions::new();
    options.theme("neon");
    assert_eq!(options.resolved_theme(), None);
    assert_eq!(options.resolved_style().background, None);
  }

  #[test]
  fn builder_style_merges_nested_fields() {
    let mut options = ToastOptions::new();
    options
      .style(StyleOverrides {
        background: Some("teal".into()),
        ..StyleOverrides::default()
      })
      .style(StyleOverrides {
        padding: Some("2px".into()),
        ..StyleOverrides::default()
      });
    assert_eq!(options.style.background.as_deref(), Some("teal"));
    assert_eq!(options.style.padding.as_deref(), Some("2px"));
  }

  #[test]
  fn unresolved_containers_are_errors() {
    let doc = Document::new();
    assert_eq!(ContainerRef::Body.resolve(&doc).unwrap(), doc.body());
    assert!(matches!(
      ContainerRef::from("#missing").resolve(&doc),
      Err(Error::ContainerNotFound(name)) if name == "#missing"
    ));
    assert_eq!(ContainerRef::from("body"), ContainerRef::Body);
  }
}
