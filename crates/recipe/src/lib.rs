mod catalog;
mod filter;
mod input;

pub use catalog::*;
pub use filter::*;
pub use input::*;

pub use matplan_shared::recipe::*;
