pub mod config;
pub mod observability;
pub mod search;
pub mod session;
pub mod storage;

pub use config::Config;
pub use search::{CatalogSearch, Debouncer, SearchResult};
pub use session::Session;
pub use storage::{FileStorage, LocalStorage, MemoryStorage, ONBOARDING_KEY, Onboarding};
