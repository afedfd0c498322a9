pub mod tree;

pub use tree::{Node, NodeId, SyntaxTree, SyntaxTreeBuilder};
