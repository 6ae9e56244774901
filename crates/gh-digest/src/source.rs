//! Interfaces to the remote notification feed.

use async_trait::async_trait;

use crate::error::SourceError;
use crate::github::NotificationRecord;

/// Best-effort lookup of a comment body by its API URL.
#[async_trait]
pub trait CommentLookup: Send + Sync {
    /// Fetch the body of the comment at `url`.
    ///
    /// `Ok(None)` means the comment exists but has no body.
    async fn comment_body(&self, url: &str) -> Result<Option<String>, SourceError>;
}

/// The notification feed of the authenticated user.
#[async_trait]
pub trait NotificationSource: CommentLookup {
    /// Fetch the current unread notifications.
    async fn fetch_notifications(&self) -> Result<Vec<NotificationRecord>, SourceError>;

    /// Mark a single thread as read.
    async fn mark_read(&self, thread_id: &str) -> Result<(), SourceError>;
}
