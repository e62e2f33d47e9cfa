// Copyright 2019-2022 Tauri Programme within The Commons Conservancy
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Placement of toasts against the edges of their container.
//!
//! Toasts sharing a container and an anchor form a stack. The stack follows
//! the container's child order: the first child sits on the edge and every
//! following toast is pushed away from it by the height of the ones before it
//! plus a fixed gap. Toasts without a measured height count as one row.

use std::{collections::BTreeMap, fmt};

use crate::{
  config::ToasterConfig,
  definitions::MARKER_CLASS,
  dom::{Document, NodeId},
  error::Result,
  util::px,
};

const PLACEMENT_PROPERTIES: [&str; 6] = ["position", "top", "bottom", "left", "right", "transform"];

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Vertical {
  Top,
  Bottom,
  Center,
}

impl Vertical {
  pub fn parse(name: &str) -> Option<Vertical> {
    match name.trim().to_lowercase().as_str() {
      "top" => Some(Vertical::Top),
      "bottom" => Some(Vertical::Bottom),
      "center" => Some(Vertical::Center),
      _ => None,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Vertical::Top => "top",
      Vertical::Bottom => "bottom",
      Vertical::Center => "center",
    }
  }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Horizontal {
  Left,
  Right,
  Center,
}

impl Horizontal {
  pub fn parse(name: &str) -> Option<Horizontal> {
    match name.trim().to_lowercase().as_str() {
      "left" => Some(Horizontal::Left),
      "right" => Some(Horizontal::Right),
      "center" => Some(Horizontal::Center),
      _ => None,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Horizontal::Left => "left",
      Horizontal::Right => "right",
      Horizontal::Center => "center",
    }
  }
}

/// The six named corners accepted by the `position` option.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Corner {
  TopLeft,
  TopCenter,
  TopRight,
  BottomLeft,
  BottomCenter,
  BottomRight,
}

impl Corner {
  pub fn as_str(self) -> &'static str {
    match self {
      Corner::TopLeft => "top-left",
      Corner::TopCenter => "top-center",
      Corner::TopRight => "top-right",
      Corner::BottomLeft => "bottom-left",
      Corner::BottomCenter => "bottom-center",
      Corner::BottomRight => "bottom-right",
    }
  }
}

impl fmt::Display for Corner {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl From<Corner> for String {
  fn from(corner: Corner) -> Self {
    corner.as_str().to_owned()
  }
}

/// A resolved anchor. An axis is `None` when its name was not recognized, in
/// which case nothing is placed along that axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
  pub vertical: Option<Vertical>,
  pub horizontal: Option<Horizontal>,
}

impl Position {
  /// Resolves the `position` option, falling back to the separate `x`
  /// (vertical) and `y` (horizontal) axis options when it is absent.
  ///
  /// A corner name is matched as a whole: `"top-middle"` places nothing.
  pub fn resolve(position: Option<&str>, x: Option<&str>, y: Option<&str>) -> Position {
    match position {
      Some(name) => Self::parse_corner(name).unwrap_or_else(|| {
        log::warn!("unrecognized toast position {name:?}, no placement applied");
        Position::default()
      }),
      None => {
        let vertical = x.and_then(|name| {
          let axis = Vertical::parse(name);
          if axis.is_none() {
            log::warn!("unrecognized toast x axis {name:?}");
          }
          axis
        });
        let horizontal = y.and_then(|name| {
          let axis = Horizontal::parse(name);
          if axis.is_none() {
            log::warn!("unrecognized toast y axis {name:?}");
          }
          axis
        });
        Position {
          vertical,
          horizontal,
        }
      }
    }
  }

  fn parse_corner(name: &str) -> Option<Position> {
    let (vertical, horizontal) = name.trim().split_once('-')?;
    Some(Position {
      vertical: Some(Vertical::parse(vertical)?),
      horizontal: Some(Horizontal::parse(horizontal)?),
    })
  }

  pub fn is_placed(&self) -> bool {
    self.vertical.is_some() || self.horizontal.is_some()
  }
}

impl From<Corner> for Position {
  fn from(corner: Corner) -> Self {
    let (vertical, horizontal) = match corner {
      Corner::TopLeft => (Vertical::Top, Horizontal::Left),
      Corner::TopCenter => (Vertical::Top, Horizontal::Center),
      Corner::TopRight => (Vertical::Top, Horizontal::Right),
      Corner::BottomLeft => (Vertical::Bottom, Horizontal::Left),
      Corner::BottomCenter => (Vertical::Bottom, Horizontal::Center),
      Corner::BottomRight => (Vertical::Bottom, Horizontal::Right),
    };
    Position {
      vertical: Some(vertical),
      horizontal: Some(horizontal),
    }
  }
}

/// Inline declarations and classes that put one toast in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Placement {
  pub declarations: Vec<(&'static str, String)>,
  pub classes: Vec<String>,
}

/// A toast taking part in a layout pass.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Slot {
  pub node: NodeId,
  pub position: Position,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Positioner {
  pub margin: f32,
  pub gap: f32,
  pub row_height: f32,
}

impl Positioner {
  pub fn new(config: &ToasterConfig) -> Self {
    Positioner {
      margin: config.margin,
      gap: config.gap,
      row_height: config.row_height,
    }
  }

  /// Computes the placement of a toast pushed `offset` pixels away from its edge.
  /// `fixed` selects viewport positioning, otherwise the toast is placed
  /// relative to its container.
  pub fn placement(&self, position: Position, offset: f32, fixed: bool) -> Placement {
    let mut placement = Placement::default();
    if !position.is_placed() {
      return placement;
    }
    let decls = &mut placement.declarations;
    decls.push((
      "position",
      if fixed { "fixed" } else { "absolute" }.to_owned(),
    ));

    match position.vertical {
      Some(Vertical::Top) => decls.push(("top", px(self.margin + offset))),
      Some(Vertical::Bottom) => decls.push(("bottom", px(self.margin + offset))),
      Some(Vertical::Center) if offset > 0.0 => {
        decls.push(("top", format!("calc(50% + {})", px(offset))))
      }
      Some(Vertical::Center) => decls.push(("top", "50%".to_owned())),
      None => {}
    }
    match position.horizontal {
      Some(Horizontal::Left) => decls.push(("left", px(self.margin))),
      Some(Horizontal::Right) => decls.push(("right", px(self.margin))),
      Some(Horizontal::Center) => decls.push(("left", "50%".to_owned())),
      None => {}
    }

    let transform = match (position.vertical, position.horizontal) {
      (Some(Vertical::Center), Some(Horizontal::Center)) => Some("translate(-50%, -50%)"),
      (Some(Vertical::Center), _) => Some("translateY(-50%)"),
      (_, Some(Horizontal::Center)) => Some("translateX(-50%)"),
      _ => None,
    };
    if let Some(transform) = transform {
      decls.push(("transform", transform.to_owned()));
    }

    if let Some(vertical) = position.vertical {
      placement.classes.push(match vertical {
        Vertical::Center => format!("{MARKER_CLASS}--center-v"),
        _ => format!("{MARKER_CLASS}--{}", vertical.as_str()),
      });
    }
    if let Some(horizontal) = position.horizontal {
      placement.classes.push(match horizontal {
        Horizontal::Center => format!("{MARKER_CLASS}--center-h"),
        _ => format!("{MARKER_CLASS}--{}", horizontal.as_str()),
      });
    }
    placement
  }

  /// Replaces whatever placement `node` had with `placement`.
  pub fn apply(&self, doc: &mut Document, node: NodeId, placement: &Placement) -> Result<()> {
    for property in PLACEMENT_PROPERTIES {
      doc.remove_style(node, property)?;
    }
    for prefix in ["--top", "--bottom", "--center-v", "--left", "--right", "--center-h"] {
      doc.remove_class(node, &format!("{MARKER_CLASS}{prefix}"))?;
    }
    for (property, value) in &placement.declarations {
      doc.set_style(node, property, value)?;
    }
    for class in &placement.classes {
      doc.add_class(node, class)?;
    }
    Ok(())
  }

  /// Computes the stacking offset of every attached slot.
  ///
  /// Slots are grouped by container and anchor and ordered by their index in
  /// the container. Detached slots are skipped.
  pub fn stack(&self, doc: &Document, slots: &[Slot]) -> Vec<(NodeId, f32)> {
    let mut groups: BTreeMap<(NodeId, Position), Vec<(usize, NodeId)>> = BTreeMap::new();
    for slot in slots {
      let Some(container) = doc.parent(slot.node) else {
        continue;
      };
      let Some(index) = doc.children(container).iter().position(|c| *c == slot.node) else {
        continue;
      };
      groups
        .entry((container, slot.position))
        .or_default()
        .push((index, slot.node));
    }

    let mut offsets = Vec::with_capacity(slots.len());
    for ((_, position), mut members) in groups {
      members.sort_unstable();
      let mut offset = 0.0;
      for (_, node) in members {
        offsets.push((node, offset));
        if position.vertical.is_some() {
          offset += doc.height(node).unwrap_or(self.row_height) + self.gap;
        }
      }
    }
    log::trace!("stacked {} toasts", offsets.len());
    offsets
  }

  /// Runs a full layout pass: stacks every slot and applies its placement.
  pub fn reposition(&self, doc: &mut Document, slots: &[Slot]) -> Result<()> {
    let body = doc.body();
    let position_of = |node: NodeId| {
      slots
        .iter()
        .find(|slot| slot.node == node)
        .map(|slot| slot.position)
        .unwrap_or_default()
    };
    for (node, offset) in self.stack(doc, slots) {
      let fixed = doc.parent(node) == Some(body);
      let placement = self.placement(position_of(node), offset, fixed);
      self.apply(doc, node, &placement)?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  fn positioner() -> Positioner {
    Positioner::new(&ToasterConfig::default())
  }

  fn decl(placement: &Placement, property: &str) -> Option<String> {
    placement
      .declarations
      .iter()
      .find(|(name, _)| *name == property)
      .map(|(_, value)| value.clone())
  }

  #[test]
  fn corners_resolve_both_axes() {
    assert_eq!(
      Position::resolve(Some("Bottom-Right"), None, None),
      Position::from(Corner::BottomRight)
    );
    assert_eq!(
      Position::resolve(Some("top-center"), Some("bottom"), None),
      Position::from(Corner::TopCenter)
    );
  }

  #[test]
  fn unknown_corner_places_nothing() {
    let position = Position::resolve(Some("top-middle"), Some("top"), Some("left"));
    assert!(!position.is_placed());
    assert_eq!(positioner().placement(position, 0.0, true), Placement::default());
  }

  #[test]
  fn axes_fall_back_independently() {
    let position = Position::resolve(None, Some("bottom"), Some("sideways"));
    assert_eq!(position.vertical, Some(Vertical::Bottom));
    assert_eq!(position.horizontal, None);
  }

  #[test]
  fn bottom_right_uses_margins() {
    let placement = positioner().placement(Corner::BottomRight.into(), 0.0, true);
    assert_eq!(
      placement.declarations,
      [
        ("position", "fixed".to_owned()),
        ("bottom", "15px".to_owned()),
        ("right", "15px".to_owned()),
      ]
    );
    assert_eq!(placement.classes, ["toasty--bottom", "toasty--right"]);
  }

  #[test]
  fn center_axes_translate() {
    let p = positioner();
    let top_center = p.placement(Corner::TopCenter.into(), 0.0, false);
    assert_eq!(decl(&top_center, "position").as_deref(), Some("absolute"));
    assert_eq!(decl(&top_center, "left").as_deref(), Some("50%"));
    assert_eq!(decl(&top_center, "transform").as_deref(), Some("translateX(-50%)"));

    let middle = Position::resolve(None, Some("center"), Some("center"));
    let placement = p.placement(middle, 0.0, true);
    assert_eq!(decl(&placement, "top").as_deref(), Some("50%"));
    assert_eq!(decl(&placement, "left").as_deref(), Some("50%"));
    assert_eq!(
      decl(&placement, "transform").as_deref(),
      Some("translate(-50%, -50%)")
    );

    let stacked = p.placement(middle, 58.0, true);
    assert_eq!(decl(&stacked, "top").as_deref(), Some("calc(50% + 58px)"));
  }

  #[test]
  fn stack_accumulates_heights_per_anchor() {
    let mut doc = Document::new();
    let body = doc.body();
    let nodes: Vec<_> = (0..3).map(|_| doc.create_element("div")).collect();
    let other = doc.create_element("div");
    for node in nodes.iter().chain([&other]) {
      doc.append_child(body, *node).unwrap();
    }
    doc.set_height(nodes[0], 30.0).unwrap();

    let bottom_right: Position = Corner::BottomRight.into();
    let mut slots: Vec<_> = nodes
      .iter()
      .rev()
      .map(|node| Slot {
        node: *node,
        position: bottom_right,
      })
      .collect();
    slots.push(Slot {
      node: other,
      position: Corner::TopLeft.into(),
    });

    let mut offsets = positioner().stack(&doc, &slots);
    offsets.sort_by_key(|(node, _)| *node);
    assert_eq!(
      offsets,
      [(nodes[0], 0.0), (nodes[1], 40.0), (nodes[2], 98.0), (other, 0.0)]
    );
  }

  #[test]
  fn reposition_rewrites_previous_placement() {
    let mut doc = Document::new();
    let node = doc.create_element("div");
    doc.append_child(doc.body(), node).unwrap();
    let p = positioner();
    p.reposition(
      &mut doc,
      &[Slot {
        node,
        position: Corner::TopLeft.into(),
      }],
    )
    .unwrap();
    p.reposition(
      &mut doc,
      &[Slot {
        node,
        position: Corner::BottomCenter.into(),
      }],
    )
    .unwrap();

    assert_eq!(doc.style(node, "top"), None);
    assert_eq!(doc.style(node, "bottom"), Some("15px"));
    assert_eq!(doc.style(node, "left"), Some("50%"));
    assert!(!doc.has_class(node, "toasty--top"));
    assert!(doc.has_class(node, "toasty--center-h"));
  }
}
