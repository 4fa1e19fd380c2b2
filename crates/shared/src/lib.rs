mod error;
pub mod mealplan;
pub mod recipe;
pub mod text;

pub use error::*;
