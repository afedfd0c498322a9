pub mod alias;
pub mod grammar;
pub mod registry;

// Re-export key types
pub use alias::normalize_alias;
pub use grammar::{Grammar, GrammarProvider};
pub use registry::GrammarRegistry;
