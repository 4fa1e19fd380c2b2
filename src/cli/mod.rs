pub mod catalog;
pub mod onboarding;
pub mod pantry;
pub mod plan;
