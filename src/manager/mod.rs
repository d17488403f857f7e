pub mod controller;
pub mod state;


pub use controller::{FetchOutcome, SessionManager, ViewError};
pub use state::{DetailModal, Notice, NoticeLevel, ViewSnapshot};
