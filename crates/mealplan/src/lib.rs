mod ranking;
mod store;
mod week;

pub use ranking::*;
pub use store::*;
pub use week::*;

pub use matplan_shared::mealplan::Day;
