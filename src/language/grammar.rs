use crate::error::{JumpError, JumpResult};
use crate::syntax::SyntaxTree;
use tree_sitter::{Language, Parser};

/// Something that can turn source text into a [`SyntaxTree`].
pub trait GrammarProvider {
    /// Canonical language id, as reported to callers.
    fn id(&self) -> &'static str;

    /// The tree-sitter language backing this grammar.
    fn language(&self) -> Language;

    /// Parse `source` into a fresh tree owned by the caller.
    fn parse(&self, source: &str) -> JumpResult<SyntaxTree> {
        let mut parser = Parser::new();
        parser.set_language(&self.language()).map_err(|e| {
            log::warn!(
                target: "jumpblock::language",
                "Failed to load grammar {}: {}",
                self.id(),
                e
            );
            JumpError::parse(self.id())
        })?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| JumpError::parse(self.id()))?;
        Ok(SyntaxTree::from_tree_sitter(&tree))
    }
}

/// The compiled-in grammars. Adding a language means adding a variant here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Grammar {
    Cpp,
    Python,
}

impl Grammar {
    pub const ALL: [Grammar; 2] = [Grammar::Cpp, Grammar::Python];

    /// Look up a grammar by its canonical id.
    pub fn from_id(id: &str) -> Option<Grammar> {
        Self::ALL.into_iter().find(|grammar| grammar.id() == id)
    }
}

impl GrammarProvider for Grammar {
    fn id(&self) -> &'static str {
        match self {
            Grammar::Cpp => "cpp",
            Grammar::Python => "python",
        }
    }

    fn language(&self) -> Language {
        match self {
            Grammar::Cpp => tree_sitter_cpp::LANGUAGE.into(),
            Grammar::Python => tree_sitter_python::LANGUAGE.into(),
        }
    }
}
