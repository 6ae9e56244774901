//! GitHub notification digest.
//!
//! This crate provides:
//! - A GitHub notifications client (fetch, comment lookup, mark read)
//! - A digest builder that groups notifications per repository
//! - Plain-text and HTML rendering of the digest
//! - SMTP delivery via lettre
//! - A pipeline that only marks threads read after a successful send

pub mod config;
pub mod digest;
pub mod error;
pub mod github;
pub mod mail;
pub mod pipeline;
pub mod source;

// Re-export main types
pub use config::DigestConfig;
pub use digest::{Digest, DigestBuilder, DigestEntry, DigestMessage, RepositoryGroup};
pub use error::{MailError, PipelineError, SourceError};
pub use github::{GitHubClient, NotificationRecord};
pub use mail::{EmailSender, MailTransport};
pub use pipeline::{Pipeline, RunReport};
pub use source::{CommentLookup, NotificationSource};
