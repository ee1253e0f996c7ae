pub mod catalog;
pub mod panel;

pub use catalog::*;
pub use panel::*;
