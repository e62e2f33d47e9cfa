// Copyright 2019-2022 Tauri Programme within The Commons Conservancy
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Short-lived, positionable toast notifications.
//!
//! Toasts are rendered into an in-memory [`Document`] owned by a [`Toaster`],
//! which also owns a virtual clock. The host forwards pointer events with
//! [`Toaster::dispatch`] and drives time with [`Toaster::advance`]; nothing in
//! this crate sleeps or spawns threads.
//!
//! # Examples
//!
//! # Example 1: Auto-hiding toast
//!
//! ```
//! # use toasty::*;
//! let mut toaster = Toaster::default();
//! let id = toaster.show(
//!   ToastOptions::new()
//!     .text("Saved")
//!     .duration(2000)
//!     .position(Corner::BottomRight),
//! )?;
//! let node = toaster.element(id).unwrap();
//! assert_eq!(toaster.document().style(node, "bottom"), Some("15px"));
//!
//! // 2000ms countdown, then the 400ms fade
//! toaster.advance(2400)?;
//! assert_eq!(toaster.state(id), Some(ToastState::Idle));
//! # Ok::<(), Error>(())
//! ```
//!
//! # Example 2: Persistent toast with a close control
//!
//! ```
//! # use toasty::*;
//! let mut toaster = Toaster::default();
//! let id = toaster.create(
//!   ToastOptions::new()
//!     .text("Connection lost")
//!     .timeout(Timeout::Never)
//!     .close(true)
//!     .theme(Theme::Light),
//! );
//! toaster.toast(id)?.show()?;
//! toaster.advance(60_000)?;
//! assert_eq!(toaster.state(id), Some(ToastState::Visible));
//! # Ok::<(), Error>(())
//! ```
//!

mod config;
mod definitions;
mod dom;
mod error;
mod factory;
mod options;
mod position;
mod theme;
mod timeout;
mod timer;
mod toast;
mod toaster;
mod util;

pub use crate::{
  config::ToasterConfig,
  definitions::{CLOSE_CLASS, HIDING_CLASS, MARKER_CLASS, TEXT_CLASS},
  dom::{Action, Document, Element, EventKind, Listener, NodeId},
  error::{Error, Result},
  options::{Callback, ContainerRef, ToastOptions},
  position::{Corner, Horizontal, Position, Vertical},
  theme::{StyleOverrides, Theme},
  timeout::Timeout,
  timer::{PendingTimer, TimerId, Timers},
  toast::{ToastHandle, ToastId, ToastState},
  toaster::{clear_all, Task, Toaster},
  util::Color,
};
