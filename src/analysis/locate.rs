//! Finding the node a selection refers to.

use crate::domain::{Point, Selection, Span};
use crate::error::{JumpError, JumpResult};
use crate::syntax::Node;

/// Find the smallest node whose span covers the selection.
///
/// Active and anchor are ordered first, so either orientation selects the same
/// node.
pub fn locate<'t>(root: Node<'t>, selection: &Selection) -> JumpResult<Node<'t>> {
    locate_range(root, selection.range())
}

/// Find the smallest node under `root` covering `range`.
///
/// Descends one level at a time into the first child that covers the range and
/// stops when no child does. A collapsed range sitting on the boundary between
/// two tokens resolves to the token that starts there. The root also covers
/// any padding before its first token, so only ranges past the end fail.
pub fn locate_range<'t>(root: Node<'t>, range: Span) -> JumpResult<Node<'t>> {
    let source = Span::new(Point::new(0, 0), root.end());
    if !source.contains(&range) {
        return Err(JumpError::locate(format!(
            "selection {} lies outside the parsed source {}",
            range, source
        )));
    }

    let mut node = root;
    while let Some(child) = node.children().find(|child| covers(child.span(), range)) {
        node = child;
    }
    Ok(node)
}

fn covers(span: Span, range: Span) -> bool {
    // A node that merely ends where the range starts does not cover it, unless
    // the node is itself zero-width.
    span.contains(&range) && (range.start < span.end || span.is_empty())
}
