//! Digest construction: sort, group, annotate.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::labels::{reason_label, subject_label};
use super::links::resolve_link;
use crate::github::NotificationRecord;
use crate::source::CommentLookup;

/// Subject types whose latest comment is shown as a snippet.
pub const SNIPPET_TYPES: &[&str] = &["Issue", "IssueComment", "PullRequestReviewComment"];

/// Snippets longer than this many characters are cut.
pub const MAX_SNIPPET_CHARS: usize = 1000;

/// Block placed after each repository group.
pub const GROUP_SEPARATOR: &str = "---";

/// One notification, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestEntry {
    pub thread_id: String,
    pub kind: String,
    pub reason: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub title: String,
    pub link: String,
    pub explanation: String,
    pub snippet: Option<String>,
}

impl DigestEntry {
    /// Render the entry as a markdown block.
    pub fn to_markdown(&self) -> String {
        let emoji = subject_label(&self.kind).emoji;
        let mut block = format!(
            "### [{emoji} {title}]({link})\n_{explanation}_\n",
            title = escape_link_text(&self.title),
            link = self.link,
            explanation = self.explanation,
        );

        if let Some(snippet) = &self.snippet {
            block.push_str("\n\n");
            block.push_str(snippet);
            block.push('\n');
        }

        block
    }
}

/// Notifications of a single repository, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryGroup {
    /// `owner/name`.
    pub name: String,
    /// Browser URL of the repository.
    pub url: String,
    pub entries: Vec<DigestEntry>,
}

impl RepositoryGroup {
    /// Markdown heading for the group.
    pub fn header(&self) -> String {
        format!("## {} ([web]({}))\n", self.name, self.url)
    }
}

/// A built digest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Digest {
    /// Groups in ascending repository name order.
    pub groups: Vec<RepositoryGroup>,
    /// Markdown blocks: per group a header, its entries, a separator.
    pub blocks: Vec<String>,
    /// All blocks joined into one plain-text document.
    pub text: String,
}

impl Digest {
    /// True when there was nothing to report.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of notifications covered.
    pub fn entry_count(&self) -> usize {
        self.groups.iter().map(|g| g.entries.len()).sum()
    }
}

/// Builds digests from notification records.
pub struct DigestBuilder;

impl DigestBuilder {
    /// Sort records newest first and group them by repository.
    ///
    /// Groups come out in ascending name order. The sort is stable, so
    /// records with equal timestamps keep their source order. Records
    /// without a timestamp go last.
    pub fn group(records: &[NotificationRecord]) -> Vec<(String, Vec<&NotificationRecord>)> {
        let mut sorted: Vec<&NotificationRecord> = records.iter().collect();
        sorted.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        let mut grouped: BTreeMap<String, Vec<&NotificationRecord>> = BTreeMap::new();
        for record in sorted {
            grouped
                .entry(record.repository.full_name.clone())
                .or_default()
                .push(record);
        }

        grouped.into_iter().collect()
    }

    /// Build the digest, looking up comment snippets through `lookup`.
    ///
    /// Returns an empty digest for an empty input. Snippet lookups that fail
    /// are logged and leave the entry without a snippet.
    pub async fn build<L>(records: &[NotificationRecord], lookup: &L) -> Digest
    where
        L: CommentLookup + ?Sized,
    {
        if records.is_empty() {
            return Digest::default();
        }

        let mut groups = Vec::new();
        let mut blocks = Vec::new();

        for (name, repo_records) in Self::group(records) {
            let url = repo_records[0].repository.web_url();

            let mut entries = Vec::with_capacity(repo_records.len());
            for record in repo_records {
                let snippet = Self::fetch_snippet(record, lookup).await;
                entries.push(Self::entry(record, &url, snippet));
            }

            let group = RepositoryGroup { name, url, entries };
            blocks.push(group.header());
            blocks.extend(group.entries.iter().map(DigestEntry::to_markdown));
            blocks.push(GROUP_SEPARATOR.to_string());
            groups.push(group);
        }

        let text = blocks.join("\n\n");
        debug!(
            groups = groups.len(),
            blocks = blocks.len(),
            "Built notification digest"
        );

        Digest {
            groups,
            blocks,
            text,
        }
    }

    fn entry(record: &NotificationRecord, repo_url: &str, snippet: Option<String>) -> DigestEntry {
        DigestEntry {
            thread_id: record.id.clone(),
            kind: record.subject.kind.clone(),
            reason: record.reason.clone(),
            updated_at: record.updated_at,
            title: record.subject.title.clone(),
            link: resolve_link(record, repo_url),
            explanation: explanation(&record.subject.kind, &record.reason),
            snippet,
        }
    }

    async fn fetch_snippet<L>(record: &NotificationRecord, lookup: &L) -> Option<String>
    where
        L: CommentLookup + ?Sized,
    {
        if !SNIPPET_TYPES.contains(&record.subject.kind.as_str()) {
            return None;
        }
        let url = record.subject.comment_url()?;

        match lookup.comment_body(url).await {
            Ok(body) => body.as_deref().map(str::trim).and_then(truncate_snippet),
            Err(e) => {
                warn!(
                    thread_id = %record.id,
                    url,
                    error = %e,
                    "Comment lookup failed, continuing without snippet"
                );
                None
            }
        }
    }
}

/// Sentence explaining what the notification is and why it arrived.
pub fn explanation(kind: &str, reason: &str) -> String {
    let subject = subject_label(kind);
    let reason = reason_label(reason);
    format!(
        "you have received this notification about the {} {} because {} {}.",
        subject.emoji, subject.text, reason.emoji, reason.text
    )
}

/// Cut a snippet to [`MAX_SNIPPET_CHARS`], respecting UTF-8 boundaries.
fn truncate_snippet(text: &str) -> Option<String> {
    if text.is_empty() {
        return None;
    }

    if text.chars().count() <= MAX_SNIPPET_CHARS {
        Some(text.to_string())
    } else {
        let truncated: String = text.chars().take(MAX_SNIPPET_CHARS).collect();
        Some(format!("{}...", truncated.trim_end()))
    }
}

/// Escape characters that would end or break the link text.
fn escape_link_text(title: &str) -> String {
    let mut escaped = String::with_capacity(title.len());
    for c in title.chars() {
        if matches!(c, '\\' | '[' | ']') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
