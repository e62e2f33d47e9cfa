// Copyright 2019-2022 Tauri Programme within The Commons Conservancy
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! A small arena document the toasts are rendered into.
//!
//! Nodes are addressed by [`NodeId`]. Freed slots are never reused, so a stale
//! id keeps failing with [`Error::NodeNotFound`] instead of aliasing a newer node.

use std::fmt;

use crate::{
  error::{Error, Result},
  toast::ToastId,
  util,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "node#{}", self.0)
  }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
  Click,
  MouseEnter,
  MouseLeave,
}

/// What a listener asks the runtime to do when its event fires.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Action {
  /// close control clicked
  Close(ToastId),
  /// toast body clicked
  Clicked(ToastId),
  PauseTimer(ToastId),
  RestartTimer(ToastId),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Listener {
  pub event: EventKind,
  pub action: Action,
  pub stop_propagation: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Element {
  tag_name: String,
  id: Option<String>,
  classes: Vec<String>,
  style: Vec<(String, String)>,
  height: Option<f32>,
  listeners: Vec<Listener>,
  shadow_root: Option<NodeId>,
}

impl Element {
  pub fn tag_name(&self) -> &str {
    &self.tag_name
  }

  pub fn id(&self) -> Option<&str> {
    self.id.as_deref()
  }

  pub fn classes(&self) -> &[String] {
    &self.classes
  }

  pub fn has_class(&self, class_name: &str) -> bool {
    self.classes.iter().any(|c| c == class_name)
  }

  pub fn style(&self, property: &str) -> Option<&str> {
    self
      .style
      .iter()
      .find(|(name, _)| name == property)
      .map(|(_, value)| value.as_str())
  }

  pub fn height(&self) -> Option<f32> {
    self.height
  }
}

#[derive(Debug, Clone)]
enum NodeKind {
  Document,
  Element(Element),
  Text(String),
  ShadowRoot { host: NodeId },
}

#[derive(Debug, Clone)]
struct Node {
  parent: Option<NodeId>,
  children: Vec<NodeId>,
  kind: NodeKind,
}

#[derive(Debug, Clone)]
pub struct Document {
  nodes: Vec<Option<Node>>,
  root: NodeId,
  body: NodeId,
}

impl Default for Document {
  fn default() -> Self {
    Self::new()
  }
}

impl Document {
  pub fn new() -> Self {
    let mut doc = Document {
      nodes: Vec::new(),
      root: NodeId(0),
      body: NodeId(0),
    };
    let root = doc.insert(NodeKind::Document);
    let body = doc.create_element("body");
    if let Some(node) = doc.nodes[root.0].as_mut() {
      node.children.push(body);
    }
    if let Some(node) = doc.nodes[body.0].as_mut() {
      node.parent = Some(root);
    }
    doc.root = root;
    doc.body = body;
    doc
  }

  pub fn root(&self) -> NodeId {
    self.root
  }

  pub fn body(&self) -> NodeId {
    self.body
  }

  fn insert(&mut self, kind: NodeKind) -> NodeId {
    let id = NodeId(self.nodes.len());
    self.nodes.push(Some(Node {
      parent: None,
      children: Vec::new(),
      kind,
    }));
    id
  }

  fn node(&self, id: NodeId) -> Result<&Node> {
    self
      .nodes
      .get(id.0)
      .and_then(Option::as_ref)
      .ok_or(Error::NodeNotFound(id))
  }

  fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
    self
      .nodes
      .get_mut(id.0)
      .and_then(Option::as_mut)
      .ok_or(Error::NodeNotFound(id))
  }

  pub fn contains(&self, id: NodeId) -> bool {
    self.node(id).is_ok()
  }

  /// Creates a detached element.
  pub fn create_element(&mut self, tag_name: &str) -> NodeId {
    self.insert(NodeKind::Element(Element {
      tag_name: tag_name.to_owned(),
      ..Element::default()
    }))
  }

  /// Creates a detached text node.
  pub fn create_text(&mut self, text: &str) -> NodeId {
    self.insert(NodeKind::Text(text.to_owned()))
  }

  pub fn element(&self, id: NodeId) -> Option<&Element> {
    match &self.node(id).ok()?.kind {
      NodeKind::Element(element) => Some(element),
      _ => None,
    }
  }

  fn element_mut(&mut self, id: NodeId) -> Result<&mut Element> {
    match &mut self.node_mut(id)?.kind {
      NodeKind::Element(element) => Ok(element),
      _ => Err(Error::NodeNotFound(id)),
    }
  }

  pub fn parent(&self, id: NodeId) -> Option<NodeId> {
    self.node(id).ok()?.parent
  }

  pub fn children(&self, id: NodeId) -> &[NodeId] {
    self
      .node(id)
      .map(|node| node.children.as_slice())
      .unwrap_or(&[])
  }

  /// Fails unless `id` is a live node that can take children.
  pub(crate) fn can_hold_children(&self, id: NodeId) -> Result<()> {
    match self.node(id)?.kind {
      NodeKind::Text(_) => Err(Error::HierarchyRequest {
        parent: id,
        child: id,
      }),
      _ => Ok(()),
    }
  }

  /// Rejects an insertion that would make `child` an ancestor of itself.
  fn check_insert(&self, parent: NodeId, child: NodeId) -> Result<()> {
    if let NodeKind::Text(_) = self.node(parent)?.kind {
      return Err(Error::HierarchyRequest { parent, child });
    }
    self.node(child)?;
    let mut cursor = Some(parent);
    while let Some(current) = cursor {
      if current == child {
        return Err(Error::HierarchyRequest { parent, child });
      }
      cursor = match self.node(current)?.kind {
        NodeKind::ShadowRoot { host } => Some(host),
        _ => self.parent(current),
      };
    }
    Ok(())
  }

  pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
    self.check_insert(parent, child)?;
    self.detach(child)?;
    self.node_mut(parent)?.children.push(child);
    self.node_mut(child)?.parent = Some(parent);
    Ok(())
  }

  pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
    self.check_insert(parent, child)?;
    self.detach(child)?;
    self.node_mut(parent)?.children.insert(0, child);
    self.node_mut(child)?.parent = Some(parent);
    Ok(())
  }

  /// Removes `id` from its parent. Detaching a detached node is a no-op.
  pub fn detach(&mut self, id: NodeId) -> Result<()> {
    let Some(parent) = self.node(id)?.parent else {
      return Ok(());
    };
    if let Ok(parent) = self.node_mut(parent) {
      parent.children.retain(|child| *child != id);
    }
    self.node_mut(id)?.parent = None;
    Ok(())
  }

  /// Detaches `id` and releases it together with its subtree and shadow tree.
  pub fn free(&mut self, id: NodeId) -> Result<()> {
    self.detach(id)?;
    let mut stack = vec![id];
    while let Some(current) = stack.pop() {
      let Some(node) = self.nodes.get_mut(current.0).and_then(Option::take) else {
        continue;
      };
      stack.extend(node.children);
      if let NodeKind::Element(Element {
        shadow_root: Some(shadow),
        ..
      }) = node.kind
      {
        stack.push(shadow);
      }
    }
    Ok(())
  }

  /// Whether the node is reachable from the document root, crossing shadow
  /// boundaries through their host.
  pub fn is_connected(&self, id: NodeId) -> bool {
    let mut cursor = Some(id);
    while let Some(current) = cursor {
      if current == self.root {
        return true;
      }
      let Ok(node) = self.node(current) else {
        return false;
      };
      cursor = match node.kind {
        NodeKind::ShadowRoot { host } => Some(host),
        _ => node.parent,
      };
    }
    false
  }

  /// Attaches a shadow root to `host`, returning the existing one if present.
  pub fn attach_shadow(&mut self, host: NodeId) -> Result<NodeId> {
    if let Some(shadow) = self.element_mut(host)?.shadow_root {
      return Ok(shadow);
    }
    let shadow = self.insert(NodeKind::ShadowRoot { host });
    self.element_mut(host)?.shadow_root = Some(shadow);
    Ok(shadow)
  }

  pub fn set_id(&mut self, id: NodeId, value: &str) -> Result<()> {
    self.element_mut(id)?.id = Some(value.to_owned());
    Ok(())
  }

  /// Finds the first connected element with this id. Shadow trees are not searched.
  pub fn get_element_by_id(&self, value: &str) -> Option<NodeId> {
    let mut stack = vec![self.root];
    while let Some(current) = stack.pop() {
      if self.element(current).and_then(Element::id) == Some(value) {
        return Some(current);
      }
      stack.extend(self.children(current).iter().rev());
    }
    None
  }

  pub fn add_class(&mut self, id: NodeId, classes: &str) -> Result<()> {
    let element = self.element_mut(id)?;
    for class in util::class_tokens(classes) {
      if !element.has_class(class) {
        element.classes.push(class.to_owned());
      }
    }
    Ok(())
  }

  pub fn remove_class(&mut self, id: NodeId, class_name: &str) -> Result<()> {
    self.element_mut(id)?.classes.retain(|c| c != class_name);
    Ok(())
  }

  pub fn has_class(&self, id: NodeId, class_name: &str) -> bool {
    self
      .element(id)
      .map_or(false, |element| element.has_class(class_name))
  }

  /// Removes every class starting with `prefix`.
  pub fn remove_classes_with_prefix(&mut self, id: NodeId, prefix: &str) -> Result<()> {
    self
      .element_mut(id)?
      .classes
      .retain(|c| !c.starts_with(prefix));
    Ok(())
  }

  /// Sets an inline style property, keeping declaration order stable.
  pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) -> Result<()> {
    let style = &mut self.element_mut(id)?.style;
    match style.iter_mut().find(|(name, _)| name == property) {
      Some((_, existing)) => *existing = value.to_owned(),
      None => style.push((property.to_owned(), value.to_owned())),
    }
    Ok(())
  }

  pub fn remove_style(&mut self, id: NodeId, property: &str) -> Result<()> {
    self
      .element_mut(id)?
      .style
      .retain(|(name, _)| name != property);
    Ok(())
  }

  pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
    self.element(id)?.style(property)
  }

  /// Records the laid-out height of an element, as a host renderer measures it.
  pub fn set_height(&mut self, id: NodeId, height: f32) -> Result<()> {
    self.element_mut(id)?.height = Some(height);
    Ok(())
  }

  pub fn height(&self, id: NodeId) -> Option<f32> {
    self.element(id)?.height
  }

  /// Replaces the children of `id` with a single text node.
  pub fn set_text(&mut self, id: NodeId, text: &str) -> Result<()> {
    let children = self.node(id)?.children.clone();
    for child in children {
      self.free(child)?;
    }
    let text = self.create_text(text);
    self.append_child(id, text)
  }

  pub fn text_content(&self, id: NodeId) -> String {
    let mut out = String::new();
    self.collect_text(id, &mut out);
    out
  }

  fn collect_text(&self, id: NodeId, out: &mut String) {
    let Ok(node) = self.node(id) else {
      return;
    };
    match &node.kind {
      NodeKind::Text(text) => out.push_str(text),
      _ => {
        for child in &node.children {
          self.collect_text(*child, out);
        }
      }
    }
  }

  pub fn add_listener(&mut self, id: NodeId, listener: Listener) -> Result<()> {
    self.element_mut(id)?.listeners.push(listener);
    Ok(())
  }

  /// Fires `event` at `target` and bubbles it up through its ancestors,
  /// returning the actions of every listener reached. A listener with
  /// `stop_propagation` ends the walk after its own node.
  pub fn dispatch(&self, target: NodeId, event: EventKind) -> Result<Vec<Action>> {
    self.node(target)?;
    let mut actions = Vec::new();
    let mut cursor = Some(target);
    while let Some(current) = cursor {
      let mut stopped = false;
      if let Some(element) = self.element(current) {
        for listener in element.listeners.iter().filter(|l| l.event == event) {
          actions.push(listener.action);
          stopped |= listener.stop_propagation;
        }
      }
      if stopped {
        break;
      }
      cursor = match self.node(current)?.kind {
        NodeKind::ShadowRoot { host } => Some(host),
        _ => self.parent(current),
      };
    }
    Ok(actions)
  }

  /// Every connected element carrying `class_name`, in tree order, including
  /// elements inside shadow trees.
  pub fn elements_with_class(&self, class_name: &str) -> Vec<NodeId> {
    let mut found = Vec::new();
    let mut stack = vec![self.root];
    while let Some(current) = stack.pop() {
      if let Some(element) = self.element(current) {
        if element.has_class(class_name) {
          found.push(current);
        }
        if let Some(shadow) = element.shadow_root {
          stack.push(shadow);
        }
      }
      stack.extend(self.children(current).iter().rev());
    }
    found
  }

  /// Serializes a node and its subtree as markup, mostly for debugging and demos.
  pub fn outer_html(&self, id: NodeId) -> String {
    let mut out = String::new();
    self.write_html(id, &mut out);
    out
  }

  fn write_html(&self, id: NodeId, out: &mut String) {
    let Ok(node) = self.node(id) else {
      return;
    };
    match &node.kind {
      NodeKind::Text(text) => out.push_str(&escape(text)),
      NodeKind::Document => self.write_children(node, out),
      NodeKind::ShadowRoot { .. } => {
        out.push_str("<#shadow-root>");
        self.write_children(node, out);
        out.push_str("</#shadow-root>");
      }
      NodeKind::Element(element) => {
        out.push('<');
        out.push_str(&element.tag_name);
        if let Some(id) = &element.id {
          out.push_str(&format!(" id=\"{}\"", escape(id)));
        }
        if !element.classes.is_empty() {
          out.push_str(&format!(" class=\"{}\"", escape(&element.classes.join(" "))));
        }
        if !element.style.is_empty() {
          let decls: Vec<_> = element
            .style
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect();
          out.push_str(&format!(" style=\"{};\"", escape(&decls.join("; "))));
        }
        out.push('>');
        if let Some(shadow) = element.shadow_root {
          self.write_html(shadow, out);
        }
        self.write_children(node, out);
        out.push_str(&format!("</{}>", element.tag_name));
      }
    }
  }

  fn write_children(&self, node: &Node, out: &mut String) {
    for child in &node.children {
      self.write_html(*child, out);
    }
  }
}

fn escape(raw: &str) -> String {
  let mut out = String::with_capacity(raw.len());
  for c in raw.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      c => out.push(c),
    }
  }
  out
}
