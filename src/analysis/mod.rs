pub mod locate;
pub mod navigation;
pub mod projection;

pub use locate::{locate, locate_range};
pub use navigation::{NavigationOp, jump_down, jump_out, jump_up};
pub use projection::project;
