use crate::error::{JumpError, JumpResult};
use crate::language::alias::normalize_alias;
use crate::language::grammar::{Grammar, GrammarProvider};
use std::collections::HashMap;

/// Closed registry of the grammars a request may name.
///
/// Configured aliases map extra language ids onto registered grammars; they
/// never add a grammar.
#[derive(Clone, Debug, Default)]
pub struct GrammarRegistry {
    aliases: HashMap<String, Grammar>,
}

impl GrammarRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry with extra `alias -> canonical id` mappings.
    ///
    /// Fails if an alias targets an id that is not a registered grammar.
    pub fn with_aliases(aliases: &HashMap<String, String>) -> JumpResult<Self> {
        let mut resolved = HashMap::with_capacity(aliases.len());
        for (alias, target) in aliases {
            let grammar = Grammar::from_id(target).ok_or_else(|| {
                JumpError::config(format!(
                    "language alias '{}' targets unsupported language '{}'",
                    alias, target
                ))
            })?;
            resolved.insert(alias.clone(), grammar);
        }
        Ok(Self { aliases: resolved })
    }

    /// Resolve a language id to its grammar.
    pub fn resolve(&self, language_id: &str) -> JumpResult<Grammar> {
        Grammar::from_id(language_id)
            .or_else(|| normalize_alias(language_id).and_then(Grammar::from_id))
            .or_else(|| self.aliases.get(language_id).copied())
            .ok_or_else(|| JumpError::unsupported_language(language_id))
    }

    /// Canonical ids of every registered grammar
    pub fn language_ids(&self) -> Vec<&'static str> {
        Grammar::ALL.iter().map(|grammar| grammar.id()).collect()
    }
}
