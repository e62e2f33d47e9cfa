// Copyright 2019-2022 Tauri Programme within The Commons Conservancy
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use thiserror::Error;

use crate::{dom::NodeId, toast::ToastId};

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the toast runtime.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
  /// The handle refers to a toast that was never created or has been disposed.
  #[error("toast {0} is not initialized")]
  UnknownToast(ToastId),

  /// The configured container could not be resolved to a live node.
  #[error("container {0} is not defined")]
  ContainerNotFound(String),

  /// A document operation referenced a node that has been freed.
  #[error("node {0} does not exist")]
  NodeNotFound(NodeId),

  /// Inserting the node would put it inside itself or under a text node.
  #[error("node {child} cannot be inserted into {parent}")]
  HierarchyRequest { parent: NodeId, child: NodeId },

  #[error("failed to parse configuration: {0}")]
  ConfigParse(#[from] toml::de::Error),

  #[error("failed to read configuration: {0}")]
  ConfigRead(#[from] std::io::Error),
}
