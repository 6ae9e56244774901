//! Digest pipeline - orchestrates the fetch-build-send-acknowledge flow.

use tracing::{info, warn};

use crate::digest::{Digest, DigestBuilder, DigestMessage};
use crate::error::PipelineError;
use crate::github::NotificationRecord;
use crate::mail::MailTransport;
use crate::source::NotificationSource;

/// Result of a single digest run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Number of notifications fetched.
    pub fetched: usize,
    /// Number of repository groups in the digest.
    pub groups: usize,
    /// Whether the digest email was accepted by the mail server.
    pub sent: bool,
    /// Threads successfully marked as read.
    pub acknowledged: usize,
    /// Threads whose mark-read request failed.
    pub failed_acknowledgements: Vec<String>,
}

/// Digest pipeline orchestrator.
pub struct Pipeline<S, M> {
    source: S,
    mailer: M,
    mark_read: bool,
}

impl<S, M> Pipeline<S, M>
where
    S: NotificationSource,
    M: MailTransport,
{
    /// Create a new pipeline that marks threads read after sending.
    pub fn new(source: S, mailer: M) -> Self {
        Self {
            source,
            mailer,
            mark_read: true,
        }
    }

    /// Enable or disable marking threads as read after a successful send.
    #[must_use]
    pub fn with_mark_read(mut self, mark_read: bool) -> Self {
        self.mark_read = mark_read;
        self
    }

    /// The notification source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The mail transport.
    pub fn mailer(&self) -> &M {
        &self.mailer
    }

    /// Fetch notifications and build the digest without sending anything.
    pub async fn preview(&self) -> Result<(Vec<NotificationRecord>, Digest), PipelineError> {
        info!("Fetching notifications");
        let records = self.source.fetch_notifications().await?;

        info!(count = records.len(), "Building digest");
        let digest = DigestBuilder::build(&records, &self.source).await;
        Ok((records, digest))
    }

    /// Run a full cycle: fetch, build, send, then mark threads read.
    ///
    /// Nothing is sent when there are no notifications. Threads are only
    /// marked read once the mail server accepted the digest.
    pub async fn run(&self) -> Result<RunReport, PipelineError> {
        let mut report = RunReport::default();

        let (records, digest) = self.preview().await?;
        report.fetched = records.len();

        if digest.is_empty() {
            info!("No unread notifications");
            return Ok(report);
        }
        report.groups = digest.groups.len();

        info!(
            notifications = digest.entry_count(),
            groups = report.groups,
            "Sending digest email"
        );
        let message = DigestMessage::from_digest(&digest);
        self.mailer.send(&message).await?;
        report.sent = true;

        if self.mark_read {
            self.acknowledge(&records, &mut report).await;
        } else {
            info!("Skipping mark-read");
        }

        info!(
            fetched = report.fetched,
            groups = report.groups,
            acknowledged = report.acknowledged,
            failed = report.failed_acknowledgements.len(),
            "Digest run complete"
        );

        Ok(report)
    }

    /// Mark every unread thread as read, one request per thread.
    async fn acknowledge(&self, records: &[NotificationRecord], report: &mut RunReport) {
        let unread: Vec<&str> = records
            .iter()
            .filter(|r| r.unread)
            .map(|r| r.id.as_str())
            .collect();

        info!(count = unread.len(), "Marking notifications as read");

        for thread_id in unread {
            match self.source.mark_read(thread_id).await {
                Ok(()) => report.acknowledged += 1,
                Err(e) => {
                    warn!(thread_id, error = %e, "Failed to mark thread as read");
                    report.failed_acknowledgements.push(thread_id.to_string());
                }
            }
        }
    }
}
