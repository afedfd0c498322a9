//! Structural movement between syntax nodes.
//!
//! Movement is driven purely by span inequality, never by node kinds, so the
//! same rules work for every grammar. A parent whose span equals its child's
//! (a single-child wrapper production) is tunnelled through by looking at the
//! wrapper's siblings instead of its own parent.
//!
//! Every operation is total. When no movement is possible the input node is
//! returned unchanged.

use crate::domain::spans_equal;
use crate::syntax::Node;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which way to move from the current node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationOp {
    /// Previous sibling block, or out when there is none.
    Up,
    /// Next sibling block, or out when there is none.
    Down,
    /// Enclosing block.
    Out,
}

impl NavigationOp {
    pub const ALL: [NavigationOp; 3] = [NavigationOp::Up, NavigationOp::Down, NavigationOp::Out];

    /// Apply this movement to `node`.
    pub fn apply<'t>(self, node: Node<'t>) -> Node<'t> {
        let target = match self {
            NavigationOp::Up => jump_up(node),
            NavigationOp::Down => jump_down(node),
            NavigationOp::Out => jump_out(node),
        };
        log::debug!(
            target: "jumpblock::navigation",
            "{}: {:?} -> {:?}",
            self,
            node,
            target
        );
        target
    }

    /// Name of the call-boundary entry point for this movement.
    pub fn method_name(self) -> &'static str {
        match self {
            NavigationOp::Up => "jumpUp",
            NavigationOp::Down => "jumpDown",
            NavigationOp::Out => "jumpOut",
        }
    }

    pub fn from_method_name(method: &str) -> Option<NavigationOp> {
        Self::ALL.into_iter().find(|op| op.method_name() == method)
    }
}

impl fmt::Display for NavigationOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method_name())
    }
}

/// Move to the enclosing block.
///
/// Returns the parent when its span differs from `node`'s. When the parent is
/// a degenerate wrapper with the same span, climbs past it through the
/// parent's previous sibling, then its next sibling. At the root, or when
/// neither sibling has distinct bounds, `node` is returned.
pub fn jump_out(node: Node<'_>) -> Node<'_> {
    let Some(parent) = node.parent() else {
        return node;
    };

    if !spans_equal(&parent.span(), &node.span()) {
        return parent;
    }

    if let Some(prev) = parent.prev_sibling()
        && !spans_equal(&prev.span(), &parent.span())
        && let Some(enclosing) = prev.parent()
    {
        return enclosing;
    }

    if let Some(next) = parent.next_sibling()
        && !spans_equal(&next.span(), &parent.span())
        && let Some(enclosing) = next.parent()
    {
        return enclosing;
    }

    node
}

/// Move to the previous sibling, or out if it is absent or shares `node`'s span.
pub fn jump_up(node: Node<'_>) -> Node<'_> {
    match node.prev_sibling() {
        Some(prev) if !spans_equal(&prev.span(), &node.span()) => prev,
        _ => jump_out(node),
    }
}

/// Move to the next sibling, or out if it is absent or shares `node`'s span.
pub fn jump_down(node: Node<'_>) -> Node<'_> {
    match node.next_sibling() {
        Some(next) if !spans_equal(&next.span(), &node.span()) => next,
        _ => jump_out(node),
    }
}
