pub mod position;

pub use position::{PositionEncoding, PositionMapper};
