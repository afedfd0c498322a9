use crate::domain::SelectionRange;
use crate::syntax::Node;

/// Turn a node back into an editor selection covering exactly its span.
///
/// The result is always ordered start-before-end; the input selection's
/// orientation is not carried over.
pub fn project(node: Node<'_>) -> SelectionRange {
    let span = node.span();
    SelectionRange::new(span.start, span.end)
}
