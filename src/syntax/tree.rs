//! Arena-backed concrete syntax tree.
//!
//! A [`SyntaxTree`] owns every node of one parse in a flat `Vec`. Parent and
//! sibling links are indices into that arena, so a [`Node`] handle is just a
//! borrowed tree plus a [`NodeId`]. Trees are immutable once built.

use crate::domain::position::{Point, Span};
use std::fmt;

/// Index of a node inside its [`SyntaxTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
struct NodeData {
    kind: String,
    named: bool,
    span: Span,
    parent: Option<NodeId>,
    prev_sibling: Option<NodeId>,
    next_sibling: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An immutable syntax tree. The node at index 0 is the root.
#[derive(Clone, Debug)]
pub struct SyntaxTree {
    nodes: Vec<NodeData>,
}

impl SyntaxTree {
    /// Copy a tree-sitter tree into the arena.
    ///
    /// Anonymous tokens and extras are kept, so sibling links match
    /// tree-sitter's `prev_sibling`/`next_sibling`.
    pub fn from_tree_sitter(tree: &tree_sitter::Tree) -> Self {
        let mut cursor = tree.walk();
        let root = cursor.node();
        let mut builder =
            SyntaxTreeBuilder::with_named(root.kind(), root.is_named(), node_span(root));
        // Arena ids of the nodes the cursor has descended through.
        let mut ancestors = vec![builder.root()];

        if !cursor.goto_first_child() {
            return builder.finish();
        }
        loop {
            let node = cursor.node();
            let parent = ancestors.last().copied().unwrap_or(NodeId(0));
            let id = builder.push_named(parent, node.kind(), node.is_named(), node_span(node));

            if cursor.goto_first_child() {
                ancestors.push(id);
                continue;
            }
            while !cursor.goto_next_sibling() {
                if !cursor.goto_parent() {
                    return builder.finish();
                }
                ancestors.pop();
                if ancestors.is_empty() {
                    return builder.finish();
                }
            }
        }
    }

    /// The root node.
    pub fn root(&self) -> Node<'_> {
        Node {
            tree: self,
            id: NodeId(0),
        }
    }

    /// Resolve an id produced by this tree; `None` for ids out of range.
    pub fn node(&self, id: NodeId) -> Option<Node<'_>> {
        (id.0 < self.nodes.len()).then_some(Node { tree: self, id })
    }

    /// Every node, in pre-order.
    pub fn nodes(&self) -> impl Iterator<Item = Node<'_>> + '_ {
        (0..self.nodes.len()).map(move |index| Node {
            tree: self,
            id: NodeId(index),
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }
}

/// A handle to one node of a [`SyntaxTree`].
///
/// Two handles are equal only if they refer to the same node of the same tree;
/// distinct nodes can share an identical span.
#[derive(Clone, Copy)]
pub struct Node<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl<'t> Node<'t> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> &'t str {
        &self.tree.data(self.id).kind
    }

    pub fn is_named(&self) -> bool {
        self.tree.data(self.id).named
    }

    pub fn span(&self) -> Span {
        self.tree.data(self.id).span
    }

    pub fn start(&self) -> Point {
        self.span().start
    }

    pub fn end(&self) -> Point {
        self.span().end
    }

    pub fn parent(&self) -> Option<Node<'t>> {
        self.tree.data(self.id).parent.map(|id| self.with_id(id))
    }

    pub fn prev_sibling(&self) -> Option<Node<'t>> {
        self.tree.data(self.id).prev_sibling.map(|id| self.with_id(id))
    }

    pub fn next_sibling(&self) -> Option<Node<'t>> {
        self.tree.data(self.id).next_sibling.map(|id| self.with_id(id))
    }

    pub fn children(&self) -> impl Iterator<Item = Node<'t>> + use<'t> {
        let tree = self.tree;
        tree.data(self.id)
            .children
            .iter()
            .map(move |&id| Node { tree, id })
    }

    pub fn child_count(&self) -> usize {
        self.tree.data(self.id).children.len()
    }

    fn with_id(&self, id: NodeId) -> Node<'t> {
        Node {
            tree: self.tree,
            id,
        }
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{} {}", self.kind(), self.id.0, self.span())
    }
}

/// Incrementally builds a [`SyntaxTree`], root first.
///
/// Children must be pushed in source order; each push links the new node to
/// the previously pushed child of the same parent.
pub struct SyntaxTreeBuilder {
    nodes: Vec<NodeData>,
}

impl SyntaxTreeBuilder {
    pub fn new(kind: &str, span: Span) -> Self {
        Self::with_named(kind, true, span)
    }

    pub fn with_named(kind: &str, named: bool, span: Span) -> Self {
        Self {
            nodes: vec![NodeData {
                kind: kind.to_string(),
                named,
                span,
                parent: None,
                prev_sibling: None,
                next_sibling: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a named child to `parent`.
    pub fn push(&mut self, parent: NodeId, kind: &str, span: Span) -> NodeId {
        self.push_named(parent, kind, true, span)
    }

    pub fn push_named(&mut self, parent: NodeId, kind: &str, named: bool, span: Span) -> NodeId {
        let id = NodeId(self.nodes.len());
        let prev_sibling = self.nodes[parent.0].children.last().copied();
        if let Some(prev) = prev_sibling {
            self.nodes[prev.0].next_sibling = Some(id);
        }
        self.nodes[parent.0].children.push(id);
        self.nodes.push(NodeData {
            kind: kind.to_string(),
            named,
            span,
            parent: Some(parent),
            prev_sibling,
            next_sibling: None,
            children: Vec::new(),
        });
        id
    }

    pub fn finish(self) -> SyntaxTree {
        SyntaxTree { nodes: self.nodes }
    }
}

fn node_span(node: tree_sitter::Node<'_>) -> Span {
    Span::new(node.start_position().into(), node.end_position().into())
}
