//! Application use cases (business logic orchestration).

mod content;

pub use content::ContentService;
