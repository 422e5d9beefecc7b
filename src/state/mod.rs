//! State management for the paste-to-folder application.
//!
//! Plain data with pure transitions; the router owns the only instances.

pub mod history;
pub mod image_list;
pub mod session;

pub use history::{HistoryItem, HistoryList};
pub use image_list::ImageListViewModel;
pub use session::{ActiveSession, BackendNotice, SessionUpdate, StoreOp};
