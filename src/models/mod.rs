pub mod query;
pub mod session;

pub use query::{total_pages, ListQuery, SortField, SortOrder, DEFAULT_PAGE_SIZE, PAGE_SIZES};
pub use session::{Session, SessionPage, SessionPayload, SystemTone};
