mod aggregation;
mod categorization;
mod list;

pub use aggregation::*;
pub use categorization::*;
pub use list::*;
