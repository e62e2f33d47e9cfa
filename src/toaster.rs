// Copyright 2019-2022 Tauri Programme within The Commons Conservancy
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use crate::{
  config::ToasterConfig,
  definitions::MARKER_CLASS,
  dom::{Action, Document, EventKind, NodeId},
  error::{Error, Result},
  factory::ToastFactory,
  options::ToastOptions,
  position::{Positioner, Slot},
  timer::{TimerId, Timers},
  toast::{ToastHandle, ToastId, ToastInstance, ToastState},
};

/// Deferred work driven by the virtual clock.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Task {
  /// the countdown of a visible toast ran out
  AutoHide(ToastId),
  /// the exit transition of a toast is over
  FinishRemoval(ToastId),
}

/// Owns the document, the clock and every toast created through it.
///
/// The host forwards pointer events with [`dispatch`](Toaster::dispatch) and
/// moves time with [`advance`](Toaster::advance); all deferred work (auto-hide,
/// end of the exit transition) runs from there, on the caller's thread.
#[derive(Debug)]
pub struct Toaster {
  pub(crate) doc: Document,
  pub(crate) timers: Timers<Task>,
  pub(crate) config: ToasterConfig,
  pub(crate) positioner: Positioner,
  pub(crate) factory: ToastFactory,
  pub(crate) toasts: BTreeMap<ToastId, ToastInstance>,
  next_id: u64,
}

impl Default for Toaster {
  fn default() -> Self {
    Self::new(ToasterConfig::default())
  }
}

impl Toaster {
  pub fn new(config: ToasterConfig) -> Self {
    Self::with_document(Document::new(), config)
  }

  /// Renders into an existing document.
  pub fn with_document(doc: Document, config: ToasterConfig) -> Self {
    let positioner = Positioner::new(&config);
    Toaster {
      doc,
      timers: Timers::new(),
      factory: ToastFactory::new(positioner),
      positioner,
      config,
      toasts: BTreeMap::new(),
      next_id: 1,
    }
  }

  pub fn config(&self) -> &ToasterConfig {
    &self.config
  }

  pub fn document(&self) -> &Document {
    &self.doc
  }

  /// Mutable access for the host, e.g. to record measured heights or build
  /// containers. Call [`reposition`](Toaster::reposition) after changing layout.
  pub fn document_mut(&mut self) -> &mut Document {
    &mut self.doc
  }

  /// Current virtual time in milliseconds.
  pub fn now(&self) -> u64 {
    self.timers.now()
  }

  pub fn timers(&self) -> &Timers<Task> {
    &self.timers
  }

  /// Registers a toast in the `Idle` state.
  pub fn create(&mut self, options: impl Into<ToastOptions>) -> ToastId {
    let id = ToastId::from_raw(self.next_id);
    self.next_id += 1;
    self.toasts.insert(id, ToastInstance::new(options.into()));
    log::debug!("{id} created");
    id
  }

  /// Creates a toast and shows it right away.
  pub fn show(&mut self, options: impl Into<ToastOptions>) -> Result<ToastId> {
    let id = self.create(options);
    self.show_toast(id)?;
    Ok(id)
  }

  pub fn toast(&mut self, id: ToastId) -> Result<ToastHandle<'_>> {
    if !self.toasts.contains_key(&id) {
      return Err(Error::UnknownToast(id));
    }
    Ok(ToastHandle { toaster: self, id })
  }

  pub fn state(&self, id: ToastId) -> Option<ToastState> {
    self.toasts.get(&id).map(|toast| toast.state)
  }

  pub fn element(&self, id: ToastId) -> Option<NodeId> {
    self.toasts.get(&id)?.nodes.map(|nodes| nodes.root)
  }

  pub fn options(&self, id: ToastId) -> Option<&ToastOptions> {
    self.toasts.get(&id).map(|toast| &toast.options)
  }

  /// Toasts whose node is in the document, removing ones included.
  pub fn visible(&self) -> Vec<ToastId> {
    self
      .toasts
      .iter()
      .filter(|(_, toast)| toast.nodes.is_some())
      .map(|(id, _)| *id)
      .collect()
  }

  /// Forgets a toast, dropping its node without running the callback.
  pub fn dispose(&mut self, id: ToastId) -> Result<()> {
    self.force_remove(id)?;
    self.toasts.remove(&id);
    log::debug!("{id} disposed");
    self.reposition()
  }

  /// Delivers a pointer event to `target` and runs whatever the reached
  /// listeners ask for.
  pub fn dispatch(&mut self, target: NodeId, event: EventKind) -> Result<()> {
    for action in self.doc.dispatch(target, event)? {
      let id = match action {
        Action::Close(id)
        | Action::Clicked(id)
        | Action::PauseTimer(id)
        | Action::RestartTimer(id) => id,
      };
      if !self.toasts.contains_key(&id) {
        continue;
      }
      match action {
        Action::Close(id) => self.hide_toast(id)?,
        Action::Clicked(id) => self.toast_clicked(id)?,
        Action::PauseTimer(id) => self.pause_hover(id)?,
        Action::RestartTimer(id) => self.resume_hover(id)?,
      }
    }
    Ok(())
  }

  /// Moves the clock forward by `ms`, running every task that falls due on the way.
  pub fn advance(&mut self, ms: u64) -> Result<()> {
    let target = self.timers.now().saturating_add(ms);
    while let Some((timer, task)) = self.timers.pop_due(target) {
      self.run_task(timer, task)?;
    }
    self.timers.set_now(target);
    Ok(())
  }

  /// Runs every pending task, moving the clock as far as needed.
  pub fn run_until_idle(&mut self) -> Result<()> {
    while let Some((timer, task)) = self.timers.pop_due(u64::MAX) {
      self.run_task(timer, task)?;
    }
    Ok(())
  }

  fn run_task(&mut self, timer: TimerId, task: Task) -> Result<()> {
    match task {
      Task::AutoHide(id) if self.toasts.contains_key(&id) => self.auto_hide(id, timer),
      Task::FinishRemoval(id) if self.toasts.contains_key(&id) => self.finish_removal(id),
      _ => Ok(()),
    }
  }

  /// Immediately removes every toast node in the document, whoever created
  /// it. No transition runs and no callback fires; the owning toasts go back
  /// to `Idle`. Returns the number of nodes removed, counting toasts whose
  /// container was no longer in the document.
  pub fn clear_all(&mut self) -> Result<usize> {
    let mut removed = clear_all(&mut self.doc)?;
    for (id, toast) in self.toasts.iter_mut() {
      let Some(nodes) = toast.nodes else {
        continue;
      };
      if self.doc.contains(nodes.root) && self.doc.is_connected(nodes.root) {
        continue;
      }
      for timer in [toast.timer.take(), toast.removal.take()].into_iter().flatten() {
        self.timers.cancel(timer);
      }
      if self.doc.contains(nodes.root) {
        self.doc.free(nodes.root)?;
        removed += 1;
      }
      toast.nodes = None;
      toast.state = ToastState::Idle;
      log::debug!("{id} cleared");
    }
    self.reposition()?;
    Ok(removed)
  }

  /// Recomputes stacking offsets and placement of every toast in the document.
  pub fn reposition(&mut self) -> Result<()> {
    let slots: Vec<Slot> = self
      .toasts
      .values()
      .filter_map(|toast| {
        toast.nodes.map(|nodes| Slot {
          node: nodes.root,
          position: toast.position,
        })
      })
      .collect();
    self.positioner.reposition(&mut self.doc, &slots)
  }
}

/// Removes every connected node carrying the toast marker class from `doc`,
/// bypassing any exit transition. Returns the number of nodes removed.
pub fn clear_all(doc: &mut Document) -> Result<usize> {
  let mut removed = 0;
  for node in doc.elements_with_class(MARKER_CLASS) {
    // a marked node nested in another one is gone already
    if doc.contains(node) {
      doc.free(node)?;
      removed += 1;
    }
  }
  log::debug!("cleared {removed} toasts");
  Ok(removed)
}
