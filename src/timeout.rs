// Copyright 2019-2022 Tauri Programme within The Commons Conservancy
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Deserializer};

use crate::definitions::DEFAULT_DURATION_MS;

/// Describes how long a toast stays on screen before it hides itself.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Timeout {
  /// Hide after the crate default of 5000 milliseconds.
  #[default]
  Default,

  /// Do not expire, the toast stays until it is hidden explicitly or closed.
  Never,

  /// Expire after n milliseconds.
  Milliseconds(u32),
}

impl Timeout {
  /// Returns the auto-hide delay, or `None` when the toast never expires.
  pub fn delay_ms(self) -> Option<u64> {
    match u64::from(self) {
      0 => None,
      ms => Some(ms),
    }
  }
}

impl From<Timeout> for u64 {
  fn from(timeout: Timeout) -> Self {
    match timeout {
      Timeout::Default => DEFAULT_DURATION_MS,
      Timeout::Never => 0,
      Timeout::Milliseconds(ms) => ms as _,
    }
  }
}

/// `0` means the toast is never auto-hidden.
impl From<u32> for Timeout {
  fn from(ms: u32) -> Self {
    match ms {
      0 => Timeout::Never,
      ms => Timeout::Milliseconds(ms),
    }
  }
}

impl<'de> Deserialize<'de> for Timeout {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    u32::deserialize(deserializer).map(Timeout::from)
  }
}
