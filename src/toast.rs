// Copyright 2019-2022 Tauri Programme within The Commons Conservancy
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Lifecycle of a single toast.
//!
//! ```text
//! Idle --show--> Visible --hide--> Removing --transition--> Idle
//!   ^               |                  |
//!   +---- show / dispose / clear_all --+  (forced, no callback)
//! ```

use std::fmt;

use crate::{
  definitions::{HIDING_CLASS, MARKER_CLASS},
  dom::NodeId,
  error::{Error, Result},
  factory::ToastNodes,
  options::ToastOptions,
  position::Position,
  theme::StyleOverrides,
  timer::TimerId,
  toaster::{Task, Toaster},
  util,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl ToastId {
  pub(crate) fn from_raw(raw: u64) -> Self {
    ToastId(raw)
  }
}

impl fmt::Display for ToastId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "toast#{}", self.0)
  }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ToastState {
  /// No node exists.
  Idle,
  /// The node is in the document and the countdown may be running.
  Visible,
  /// The exit transition runs; the node is still in the document.
  Removing,
}

/// A toast and the resources it exclusively owns while shown.
#[derive(Debug)]
pub(crate) struct ToastInstance {
  pub(crate) options: ToastOptions,
  pub(crate) position: Position,
  pub(crate) state: ToastState,
  pub(crate) nodes: Option<ToastNodes>,
  pub(crate) timer: Option<TimerId>,
  pub(crate) removal: Option<TimerId>,
}

impl ToastInstance {
  pub(crate) fn new(options: ToastOptions) -> Self {
    ToastInstance {
      position: options.resolved_position(),
      options,
      state: ToastState::Idle,
      nodes: None,
      timer: None,
      removal: None,
    }
  }
}

impl Toaster {
  fn instance(&self, id: ToastId) -> Result<&ToastInstance> {
    self.toasts.get(&id).ok_or(Error::UnknownToast(id))
  }

  fn instance_mut(&mut self, id: ToastId) -> Result<&mut ToastInstance> {
    self.toasts.get_mut(&id).ok_or(Error::UnknownToast(id))
  }

  /// The root node of a toast that is currently visible.
  fn visible_root(&self, id: ToastId) -> Result<Option<NodeId>> {
    let instance = self.instance(id)?;
    Ok(match (instance.state, instance.nodes) {
      (ToastState::Visible, Some(nodes)) => Some(nodes.root),
      _ => None,
    })
  }

  pub(crate) fn show_toast(&mut self, id: ToastId) -> Result<()> {
    let container = self.instance(id)?.options.container.resolve(&self.doc)?;
    self.doc.can_hold_children(container)?;
    if self.instance(id)?.nodes.is_some() {
      self.force_remove(id)?;
    }

    let instance = self.toasts.get(&id).ok_or(Error::UnknownToast(id))?;
    let fixed = container == self.doc.body();
    let nodes = self
      .factory
      .build(&mut self.doc, id, &instance.options, fixed)?;
    let inserted = if self.config.oldest_first {
      self.doc.append_child(container, nodes.root)
    } else {
      self.doc.prepend_child(container, nodes.root)
    };
    if let Err(err) = inserted {
      self.doc.free(nodes.root)?;
      self.reposition()?;
      return Err(err);
    }

    let instance = self.instance_mut(id)?;
    instance.nodes = Some(nodes);
    instance.state = ToastState::Visible;
    log::debug!("{id} shown in {container} as {}", nodes.root);

    self.restart_countdown(id)?;
    self.reposition()
  }

  /// Starts the exit transition. Hiding a toast that is not visible does nothing.
  pub(crate) fn hide_toast(&mut self, id: ToastId) -> Result<()> {
    let Some(root) = self.visible_root(id)? else {
      return Ok(());
    };
    self.cancel_countdown(id)?;

    let transition_ms = self.config.transition_ms;
    if self.doc.contains(root) {
      self.doc.set_style(root, "transition", &format!("opacity {transition_ms}ms"))?;
      self.doc.set_style(root, "opacity", "0")?;
      self.doc.add_class(root, HIDING_CLASS)?;
    }
    self.instance_mut(id)?.state = ToastState::Removing;
    log::debug!("{id} hiding");

    if transition_ms == 0 {
      return self.finish_removal(id);
    }
    let removal = self.timers.schedule(transition_ms, Task::FinishRemoval(id));
    self.instance_mut(id)?.removal = Some(removal);
    Ok(())
  }

  /// Ends the exit transition: detaches the node, runs the callback, releases
  /// the node and lays out the remaining toasts.
  pub(crate) fn finish_removal(&mut self, id: ToastId) -> Result<()> {
    let instance = self.instance_mut(id)?;
    if instance.state != ToastState::Removing {
      return Ok(());
    }
    let nodes = instance.nodes.take();
    instance.removal = None;
    instance.state = ToastState::Idle;
    let callback = instance.options.callback.clone();

    if let Some(nodes) = nodes {
      if self.doc.parent(nodes.root).is_some() {
        self.doc.detach(nodes.root)?;
      } else {
        log::debug!("{id} was already detached");
      }
      if let Some(callback) = callback {
        callback(&self.doc, nodes.root);
      }
      if self.doc.contains(nodes.root) {
        self.doc.free(nodes.root)?;
      }
    }
    log::debug!("{id} removed");
    self.reposition()
  }

  /// Drops the node right away, skipping the transition and the callback.
  pub(crate) fn force_remove(&mut self, id: ToastId) -> Result<()> {
    let instance = self.instance_mut(id)?;
    let timers = [instance.timer.take(), instance.removal.take()];
    let nodes = instance.nodes.take();
    instance.state = ToastState::Idle;
    for timer in timers.into_iter().flatten() {
      self.timers.cancel(timer);
    }
    if let Some(nodes) = nodes {
      if self.doc.contains(nodes.root) {
        self.doc.free(nodes.root)?;
      }
      log::debug!("{id} force removed");
    }
    Ok(())
  }

  fn cancel_countdown(&mut self, id: ToastId) -> Result<()> {
    if let Some(timer) = self.instance_mut(id)?.timer.take() {
      self.timers.cancel(timer);
    }
    Ok(())
  }

  /// (Re)schedules the auto-hide for the full configured duration.
  fn restart_countdown(&mut self, id: ToastId) -> Result<()> {
    self.cancel_countdown(id)?;
    let Some(delay) = self.instance(id)?.options.duration.delay_ms() else {
      return Ok(());
    };
    let timer = self.timers.schedule(delay, Task::AutoHide(id));
    self.instance_mut(id)?.timer = Some(timer);
    Ok(())
  }

  pub(crate) fn pause_hover(&mut self, id: ToastId) -> Result<()> {
    if self.visible_root(id)?.is_some() && self.instance(id)?.options.keep_on_hover {
      log::trace!("{id} countdown paused");
      self.cancel_countdown(id)?;
    }
    Ok(())
  }

  pub(crate) fn resume_hover(&mut self, id: ToastId) -> Result<()> {
    if self.visible_root(id)?.is_some() && self.instance(id)?.options.keep_on_hover {
      log::trace!("{id} countdown restarted");
      self.restart_countdown(id)?;
    }
    Ok(())
  }

  pub(crate) fn auto_hide(&mut self, id: ToastId, timer: TimerId) -> Result<()> {
    let instance = self.instance_mut(id)?;
    if instance.timer != Some(timer) {
      return Ok(());
    }
    instance.timer = None;
    self.hide_toast(id)
  }

  pub(crate) fn set_toast_text(&mut self, id: ToastId, text: &str) -> Result<()> {
    self.instance_mut(id)?.options.text = text.to_owned();
    if self.visible_root(id)?.is_some() {
      if let Some(nodes) = self.instance(id)?.nodes {
        self.doc.set_text(nodes.text, text)?;
      }
    }
    Ok(())
  }

  pub(crate) fn set_toast_style(&mut self, id: ToastId, style: &StyleOverrides) -> Result<()> {
    self.instance_mut(id)?.options.style.merge(style);
    if let Some(root) = self.visible_root(id)? {
      let instance = self.toasts.get(&id).ok_or(Error::UnknownToast(id))?;
      self.factory.apply_theme(&mut self.doc, root, &instance.options)?;
    }
    Ok(())
  }

  pub(crate) fn set_toast_position(&mut self, id: ToastId, position: String) -> Result<()> {
    let instance = self.instance_mut(id)?;
    instance.options.position = Some(position);
    instance.position = instance.options.resolved_position();
    if self.visible_root(id)?.is_some() {
      self.reposition()?;
    }
    Ok(())
  }

  /// Replaces the stored options. A visible toast picks up the new text, theme,
  /// style, classes, position and duration; the close control, hover
  /// behaviour, click handler and container are wired when the toast is built
  /// and change on the next `show`.
  pub(crate) fn update_toast(&mut self, id: ToastId, options: ToastOptions) -> Result<()> {
    let instance = self.instance_mut(id)?;
    let old_classes = std::mem::take(&mut instance.options.class_name);
    let duration_changed = instance.options.duration != options.duration;
    instance.position = options.resolved_position();
    instance.options = options;

    let Some(root) = self.visible_root(id)? else {
      return Ok(());
    };
    if duration_changed {
      self.restart_countdown(id)?;
    }
    let instance = self.toasts.get(&id).ok_or(Error::UnknownToast(id))?;
    for class in util::class_tokens(&old_classes) {
      if class != MARKER_CLASS {
        self.doc.remove_class(root, class)?;
      }
    }
    self.doc.add_class(root, &instance.options.class_name)?;
    self.factory.apply_theme(&mut self.doc, root, &instance.options)?;
    if let Some(nodes) = instance.nodes {
      self.doc.set_text(nodes.text, &instance.options.text)?;
    }
    self.reposition()
  }

  pub(crate) fn toast_clicked(&mut self, id: ToastId) -> Result<()> {
    let Some(root) = self.visible_root(id)? else {
      return Ok(());
    };
    if let Some(on_click) = self.instance(id)?.options.on_click.clone() {
      on_click(&self.doc, root);
    }
    Ok(())
  }
}

/// Chainable access to one toast of a [`Toaster`].
///
/// ```
/// # use toasty::*;
/// let mut toaster = Toaster::default();
/// let id = toaster.create(ToastOptions::new().text("Saved").duration(2000));
/// toaster.toast(id)?.show()?.set_text("Saved!")?;
/// # Ok::<(), Error>(())
/// ```
pub struct ToastHandle<'a> {
  pub(crate) toaster: &'a mut Toaster,
  pub(crate) id: ToastId,
}

impl<'a> ToastHandle<'a> {
  pub fn id(&self) -> ToastId {
    self.id
  }

  pub fn state(&self) -> ToastState {
    self
      .toaster
      .state(self.id)
      .unwrap_or(ToastState::Idle)
  }

  /// Root node of the toast while it is in the document.
  pub fn element(&self) -> Option<NodeId> {
    self.toaster.element(self.id)
  }

  /// Builds and inserts the node, replacing a node this toast still owns.
  pub fn show(&mut self) -> Result<&mut Self> {
    self.toaster.show_toast(self.id)?;
    Ok(self)
  }

  pub fn hide(&mut self) -> Result<&mut Self> {
    self.toaster.hide_toast(self.id)?;
    Ok(self)
  }

  pub fn set_text(&mut self, text: &str) -> Result<&mut Self> {
    self.toaster.set_toast_text(self.id, text)?;
    Ok(self)
  }

  /// Merges `style` into the toast's style overrides.
  pub fn set_style(&mut self, style: StyleOverrides) -> Result<&mut Self> {
    self.toaster.set_toast_style(self.id, &style)?;
    Ok(self)
  }

  pub fn set_position(&mut self, position: impl Into<String>) -> Result<&mut Self> {
    self.toaster.set_toast_position(self.id, position.into())?;
    Ok(self)
  }

  pub fn update(&mut self, options: impl Into<ToastOptions>) -> Result<&mut Self> {
    self.toaster.update_toast(self.id, options.into())?;
    Ok(self)
  }
}
