// Copyright 2019-2022 Tauri Programme within The Commons Conservancy
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Builds the node tree of a single toast.
//!
//! ```text
//! <div class="toasty toasty--dark {class_name} toasty--bottom toasty--right" style="...">
//!   <span class="toasty__text">{text}</span>
//!   <span class="toasty__close">✖</span>
//! </div>
//! ```

use crate::{
  definitions::{CLOSE_CLASS, MARKER_CLASS, TEXT_CLASS},
  dom::{Action, Document, EventKind, Listener, NodeId},
  error::Result,
  options::ToastOptions,
  position::Positioner,
  toast::ToastId,
};

const CLOSE_GLYPH: &str = "\u{2716}";

/// Nodes of a built toast.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ToastNodes {
  pub root: NodeId,
  pub text: NodeId,
  pub close: Option<NodeId>,
}

#[derive(Debug, Copy, Clone)]
pub struct ToastFactory {
  positioner: Positioner,
}

impl ToastFactory {
  pub fn new(positioner: Positioner) -> Self {
    ToastFactory { positioner }
  }

  /// Creates a detached toast for `toast`. `fixed` tells whether it will be
  /// placed against the viewport or against its container.
  pub fn build(
    &self,
    doc: &mut Document,
    toast: ToastId,
    options: &ToastOptions,
    fixed: bool,
  ) -> Result<ToastNodes> {
    let root = doc.create_element("div");
    doc.add_class(root, MARKER_CLASS)?;
    self.apply_theme(doc, root, options)?;
    doc.add_class(root, &options.class_name)?;

    let placement = self
      .positioner
      .placement(options.resolved_position(), 0.0, fixed);
    self.positioner.apply(doc, root, &placement)?;

    let text = doc.create_element("span");
    doc.add_class(text, TEXT_CLASS)?;
    doc.set_text(text, &options.text)?;
    doc.append_child(root, text)?;

    let close = if options.close {
      let close = doc.create_element("span");
      doc.add_class(close, CLOSE_CLASS)?;
      doc.set_text(close, CLOSE_GLYPH)?;
      doc.add_listener(
        close,
        Listener {
          event: EventKind::Click,
          action: Action::Close(toast),
          stop_propagation: true,
        },
      )?;
      doc.append_child(root, close)?;
      Some(close)
    } else {
      None
    };

    if options.keep_on_hover && options.duration.delay_ms().is_some() {
      for (event, action) in [
        (EventKind::MouseEnter, Action::PauseTimer(toast)),
        (EventKind::MouseLeave, Action::RestartTimer(toast)),
      ] {
        doc.add_listener(
          root,
          Listener {
            event,
            action,
            stop_propagation: false,
          },
        )?;
      }
    }

    if options.on_click.is_some() {
      doc.add_listener(
        root,
        Listener {
          event: EventKind::Click,
          action: Action::Clicked(toast),
          stop_propagation: false,
        },
      )?;
    }

    Ok(ToastNodes { root, text, close })
  }

  /// Writes theme class and resolved inline style onto `root`, replacing the
  /// previous ones.
  pub fn apply_theme(&self, doc: &mut Document, root: NodeId, options: &ToastOptions) -> Result<()> {
    for name in ["--light", "--dark"] {
      doc.remove_class(root, &format!("{MARKER_CLASS}{name}"))?;
    }
    if let Some(theme) = options.resolved_theme() {
      doc.add_class(root, &theme.class_name())?;
    }
    for property in ["background", "color"] {
      doc.remove_style(root, property)?;
    }
    for (property, value) in options.resolved_style().declarations() {
      doc.set_style(root, property, value)?;
    }
    Ok(())
  }
}
