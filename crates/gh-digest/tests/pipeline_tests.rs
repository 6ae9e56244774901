//! Integration tests for the digest pipeline.
//!
//! The notification source and the mail transport are replaced by in-memory
//! stubs that record every call.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use gh_digest::digest::DIGEST_SUBJECT;
use gh_digest::github::{Repository, Subject};
use gh_digest::{
    CommentLookup, DigestMessage, MailError, MailTransport, NotificationRecord,
    NotificationSource, Pipeline, PipelineError, SourceError,
};

// =============================================================================
// Stubs
// =============================================================================

#[derive(Default)]
struct StubSource {
    records: Vec<NotificationRecord>,
    fetch_error: Option<fn() -> SourceError>,
    failing_threads: Vec<String>,
    marked: Mutex<Vec<String>>,
}

impl StubSource {
    fn with_records(records: Vec<NotificationRecord>) -> Self {
        Self {
            records,
            ..Default::default()
        }
    }

    fn marked(&self) -> Vec<String> {
        self.marked.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommentLookup for StubSource {
    async fn comment_body(&self, _url: &str) -> Result<Option<String>, SourceError> {
        Ok(Some("stub comment".to_string()))
    }
}

#[async_trait]
impl NotificationSource for StubSource {
    async fn fetch_notifications(&self) -> Result<Vec<NotificationRecord>, SourceError> {
        match self.fetch_error {
            Some(make_error) => Err(make_error()),
            None => Ok(self.records.clone()),
        }
    }

    async fn mark_read(&self, thread_id: &str) -> Result<(), SourceError> {
        self.marked.lock().unwrap().push(thread_id.to_string());
        if self.failing_threads.iter().any(|t| t == thread_id) {
            return Err(SourceError::Unavailable);
        }
        Ok(())
    }
}

#[derive(Default)]
struct StubMailer {
    fail: bool,
    sent: Mutex<Vec<DigestMessage>>,
}

impl StubMailer {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    fn sent(&self) -> Vec<DigestMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for StubMailer {
    async fn send(&self, message: &DigestMessage) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(message.clone());
        if self.fail {
            let address_error = "not an address"
                .parse::<lettre::Address>()
                .unwrap_err();
            return Err(MailError::Address(address_error));
        }
        Ok(())
    }
}

fn record(id: &str, repo: &str, minute: u32) -> NotificationRecord {
    NotificationRecord {
        id: id.to_string(),
        unread: true,
        reason: "review_requested".to_string(),
        updated_at: Some(Utc.with_ymd_and_hms(2024, 5, 1, 9, minute, 0).unwrap()),
        subject: Subject {
            title: format!("Change {id}"),
            url: Some(format!("https://api.github.com/repos/{repo}/pulls/{id}")),
            latest_comment_url: None,
            kind: "PullRequest".to_string(),
        },
        repository: Repository {
            full_name: repo.to_string(),
            html_url: Some(format!("https://github.com/{repo}")),
        },
    }
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_empty_feed_skips_send_and_mark_read() {
    let pipeline = Pipeline::new(StubSource::default(), StubMailer::default());

    let report = pipeline.run().await.unwrap();

    assert_eq!(report.fetched, 0);
    assert!(!report.sent);
    assert!(pipeline.mailer().sent().is_empty());
    assert!(pipeline.source().marked().is_empty());
}

#[tokio::test]
async fn test_successful_run_marks_each_unread_thread() {
    let mut already_read = record("3", "acme/widget", 3);
    already_read.unread = false;

    let source = StubSource::with_records(vec![
        record("1", "acme/widget", 1),
        record("2", "beta/lib", 2),
        already_read,
    ]);
    let pipeline = Pipeline::new(source, StubMailer::default());

    let report = pipeline.run().await.unwrap();

    assert_eq!(report.fetched, 3);
    assert_eq!(report.groups, 2);
    assert!(report.sent);
    assert_eq!(report.acknowledged, 2);
    assert!(report.failed_acknowledgements.is_empty());
    assert_eq!(pipeline.source().marked(), vec!["1", "2"]);

    let sent = pipeline.mailer().sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, DIGEST_SUBJECT);
    assert!(sent[0].text_body.contains("## acme/widget"));
    assert!(sent[0].text_body.contains("## beta/lib"));
    assert!(sent[0]
        .html_body
        .contains(r#"<a href="https://github.com/acme/widget/pull/1">"#));
}

#[tokio::test]
async fn test_failed_send_skips_mark_read() {
    let source = StubSource::with_records(vec![record("1", "acme/widget", 1)]);
    let pipeline = Pipeline::new(source, StubMailer::failing());

    let err = pipeline.run().await.unwrap_err();

    assert!(matches!(err, PipelineError::Send(_)));
    assert_eq!(pipeline.mailer().sent().len(), 1);
    assert!(pipeline.source().marked().is_empty());
}

#[tokio::test]
async fn test_fetch_error_is_fatal() {
    let source = StubSource {
        fetch_error: Some(|| SourceError::Unauthorized),
        ..Default::default()
    };
    let pipeline = Pipeline::new(source, StubMailer::default());

    let err = pipeline.run().await.unwrap_err();

    assert!(matches!(err, PipelineError::Fetch(SourceError::Unauthorized)));
    assert!(pipeline.mailer().sent().is_empty());
    assert!(pipeline.source().marked().is_empty());
}

#[tokio::test]
async fn test_mark_read_failure_is_reported_not_fatal() {
    let mut source = StubSource::with_records(vec![
        record("1", "acme/widget", 1),
        record("2", "acme/widget", 2),
    ]);
    source.failing_threads = vec!["1".to_string()];
    let pipeline = Pipeline::new(source, StubMailer::default());

    let report = pipeline.run().await.unwrap();

    assert_eq!(report.acknowledged, 1);
    assert_eq!(report.failed_acknowledgements, vec!["1"]);
    assert_eq!(pipeline.source().marked(), vec!["1", "2"]);
}

#[tokio::test]
async fn test_mark_read_can_be_disabled() {
    let source = StubSource::with_records(vec![record("1", "acme/widget", 1)]);
    let pipeline = Pipeline::new(source, StubMailer::default()).with_mark_read(false);

    let report = pipeline.run().await.unwrap();

    assert!(report.sent);
    assert_eq!(report.acknowledged, 0);
    assert!(pipeline.source().marked().is_empty());
}

#[tokio::test]
async fn test_preview_never_sends() {
    let source = StubSource::with_records(vec![record("1", "acme/widget", 1)]);
    let pipeline = Pipeline::new(source, StubMailer::default());

    let (records, digest) = pipeline.preview().await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(digest.entry_count(), 1);
    assert!(pipeline.mailer().sent().is_empty());
    assert!(pipeline.source().marked().is_empty());
}
