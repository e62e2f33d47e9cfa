// Copyright 2019-2022 Tauri Programme within The Commons Conservancy
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! A virtual clock with cancellable one-shot tasks.
//!
//! Nothing here sleeps: time only moves when the owner asks for it, which
//! keeps every deferred toast transition deterministic under test.

use std::fmt;

/// Handle to a scheduled task, used to cancel it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl fmt::Display for TimerId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{}", self.0)
  }
}

#[derive(Debug, Clone)]
struct Scheduled<T> {
  id: TimerId,
  due_at: u64,
  order: u64,
  payload: T,
}

/// A snapshot of a task that has not fired yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTimer<T> {
  pub id: TimerId,
  pub due_at: u64,
  pub payload: T,
}

#[derive(Debug, Clone)]
pub struct Timers<T> {
  now_ms: u64,
  next_id: u64,
  next_order: u64,
  queue: Vec<Scheduled<T>>,
}

impl<T> Default for Timers<T> {
  fn default() -> Self {
    Timers {
      now_ms: 0,
      next_id: 1,
      next_order: 0,
      queue: Vec::new(),
    }
  }
}

impl<T> Timers<T> {
  pub fn new() -> Self {
    Self::default()
  }

  /// Current virtual time in milliseconds.
  pub fn now(&self) -> u64 {
    self.now_ms
  }

  pub fn schedule(&mut self, delay_ms: u64, payload: T) -> TimerId {
    let id = TimerId(self.next_id);
    self.next_id += 1;
    let due_at = self.now_ms.saturating_add(delay_ms);
    log::trace!("[timer] schedule {id} due_at={due_at} now={}", self.now_ms);
    self.queue.push(Scheduled {
      id,
      due_at,
      order: self.next_order,
      payload,
    });
    self.next_order += 1;
    id
  }

  /// Cancels a pending task. Returns false if it already fired or was cancelled.
  pub fn cancel(&mut self, id: TimerId) -> bool {
    let before = self.queue.len();
    self.queue.retain(|task| task.id != id);
    let cancelled = self.queue.len() != before;
    if cancelled {
      log::trace!("[timer] cancel {id}");
    }
    cancelled
  }

  pub fn is_pending(&self, id: TimerId) -> bool {
    self.queue.iter().any(|task| task.id == id)
  }

  pub fn len(&self) -> usize {
    self.queue.len()
  }

  pub fn is_empty(&self) -> bool {
    self.queue.is_empty()
  }

  /// Due time of the earliest pending task.
  pub fn next_due(&self) -> Option<u64> {
    self.next_index(None).map(|idx| self.queue[idx].due_at)
  }

  /// Removes the earliest task due at or before `limit` and moves the clock to
  /// its due time. Tasks due at the same instant fire in scheduling order.
  pub fn pop_due(&mut self, limit: u64) -> Option<(TimerId, T)> {
    let idx = self.next_index(Some(limit))?;
    let task = self.queue.remove(idx);
    if task.due_at > self.now_ms {
      self.now_ms = task.due_at;
    }
    log::trace!("[timer] run {} due_at={}", task.id, task.due_at);
    Some((task.id, task.payload))
  }

  /// Moves the clock forward without running anything. Never moves backwards.
  pub fn set_now(&mut self, now_ms: u64) {
    self.now_ms = self.now_ms.max(now_ms);
  }

  fn next_index(&self, limit: Option<u64>) -> Option<usize> {
    self
      .queue
      .iter()
      .enumerate()
      .filter(|(_, task)| limit.map_or(true, |limit| task.due_at <= limit))
      .min_by_key(|(_, task)| (task.due_at, task.order))
      .map(|(idx, _)| idx)
  }
}

impl<T: Clone> Timers<T> {
  pub fn pending(&self) -> Vec<PendingTimer<T>> {
    let mut tasks: Vec<_> = self.queue.iter().collect();
    tasks.sort_by_key(|task| (task.due_at, task.order));
    tasks
      .into_iter()
      .map(|task| PendingTimer {
        id: task.id,
        due_at: task.due_at,
        payload: task.payload.clone(),
      })
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn pops_in_due_then_schedule_order() {
    let mut timers = Timers::new();
    timers.schedule(10, "a");
    timers.schedule(0, "b");
    timers.schedule(10, "c");

    let mut fired = Vec::new();
    while let Some((_, payload)) = timers.pop_due(u64::MAX) {
      fired.push((timers.now(), payload));
    }
    assert_eq!(fired, [(0, "b"), (10, "a"), (10, "c")]);
  }

  #[test]
  fn pop_due_respects_limit() {
    let mut timers = Timers::new();
    timers.schedule(100, ());
    assert!(timers.pop_due(99).is_none());
    assert_eq!(timers.now(), 0);
    assert!(timers.pop_due(100).is_some());
    assert_eq!(timers.now(), 100);
  }

  #[test]
  fn cancel_only_succeeds_once() {
    let mut timers = Timers::new();
    let id = timers.schedule(5, ());
    assert!(timers.is_pending(id));
    assert!(timers.cancel(id));
    assert!(!timers.cancel(id));
    assert!(timers.is_empty());
  }

  #[test]
  fn schedule_is_relative_to_current_time() {
    let mut timers = Timers::new();
    timers.set_now(40);
    timers.set_now(10);
    let id = timers.schedule(20, 'x');
    assert_eq!(
      timers.pending(),
      [PendingTimer {
        id,
        due_at: 60,
        payload: 'x'
      }]
    );
  }
}
