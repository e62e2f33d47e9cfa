// Copyright 2019-2022 Tauri Programme within The Commons Conservancy
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Class names and layout constants shared by the factory and the positioner.

/// marker class carried by every toast node
pub const MARKER_CLASS: &str = "toasty";
/// class of the close control inside a toast
pub const CLOSE_CLASS: &str = "toasty__close";
/// class of the text span inside a toast
pub const TEXT_CLASS: &str = "toasty__text";
/// added while the exit transition runs
pub const HIDING_CLASS: &str = "toasty--hiding";

/// auto-hide delay used by `Timeout::Default`
pub const DEFAULT_DURATION_MS: u64 = 5000;
/// delay between the start of the fade and the node being detached
pub const TRANSITION_MS: u64 = 400;
/// distance between a toast and the container edge
pub const MARGIN: f32 = 15.0;
/// space between two stacked toasts
pub const GAP: f32 = 10.0;
/// height assumed for a toast that was never measured
pub const ROW_HEIGHT: f32 = 48.0;
