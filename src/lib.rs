pub mod analysis;
pub mod config;
pub mod domain;
pub mod error;
pub mod language;
pub mod request;
pub mod server;
pub mod syntax;
pub mod text;

// Re-export the main entry points
pub use analysis::NavigationOp;
pub use domain::{Point, Selection, SelectionRange, Span};
pub use error::{JumpError, JumpResult};
pub use request::{JumpRequest, JumpService};
