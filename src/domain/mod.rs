pub mod position;
pub mod selection;

pub use position::{Point, Span, spans_equal};
pub use selection::{Selection, SelectionRange};
