//! GitHub notification feed.
//!
//! Fetches unread notification threads, looks up comment bodies, and marks
//! threads as read.

mod client;
mod types;

pub use client::GitHubClient;
pub use types::{Comment, NotificationRecord, Repository, Subject};
