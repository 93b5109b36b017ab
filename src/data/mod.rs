mod loader;
mod repository;

pub use loader::{normalize_records, parse_bank};
pub use repository::{DEFAULT_FETCH_TIMEOUT, QuestionRepository, QuestionSource};
