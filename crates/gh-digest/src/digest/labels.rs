//! Emoji and wording for notification types and reasons.

/// An emoji and a short human-readable phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label {
    pub emoji: &'static str,
    pub text: &'static str,
}

impl Label {
    const fn new(emoji: &'static str, text: &'static str) -> Self {
        Self { emoji, text }
    }
}

/// Label for subject types missing from [`SUBJECT_LABELS`].
pub const FALLBACK_SUBJECT: Label = Label::new("🔔", "notification");

/// Label for reasons missing from [`REASON_LABELS`].
pub const FALLBACK_REASON: Label = Label::new("", "you received a notification about this thread");

const SUBJECT_LABELS: &[(&str, Label)] = &[
    ("Issue", Label::new("🐞", "issue")),
    ("PullRequest", Label::new("🔀", "pull request")),
    ("Commit", Label::new("💾", "commit")),
    ("Release", Label::new("🏷️", "release")),
    ("Discussion", Label::new("💬", "discussion")),
    ("IssueComment", Label::new("💬", "issue comment")),
    (
        "PullRequestReviewComment",
        Label::new("📝", "pull request review comment"),
    ),
    ("PullRequestReview", Label::new("👀", "pull request review")),
    ("CheckSuite", Label::new("✅", "check suite")),
    ("CheckRun", Label::new("✅", "check run")),
    (
        "RepositoryVulnerabilityAlert",
        Label::new("🚨", "repository vulnerability alert"),
    ),
    ("Deployment", Label::new("🚀", "deployment")),
    ("DeploymentStatus", Label::new("🚦", "deployment status")),
    ("SecurityAlert", Label::new("🔒", "security alert")),
    ("WorkflowRun", Label::new("⚙️", "workflow run")),
    ("WorkflowJob", Label::new("🛠️", "workflow job")),
    ("CommitComment", Label::new("🗒️", "commit comment")),
];

const REASON_LABELS: &[(&str, Label)] = &[
    (
        "approval_requested",
        Label::new("👀", "you were requested to review and approve a deployment"),
    ),
    ("assign", Label::new("👤", "you were assigned to the issue")),
    ("author", Label::new("✍️", "you created the thread")),
    ("comment", Label::new("💬", "you commented on the thread")),
    (
        "ci_activity",
        Label::new(
            "🔄",
            "a GitHub Actions workflow run that you triggered was completed",
        ),
    ),
    (
        "invitation",
        Label::new(
            "📩",
            "you accepted an invitation to contribute to the repository",
        ),
    ),
    (
        "manual",
        Label::new(
            "🔔",
            "you subscribed to the thread (via an issue or pull request)",
        ),
    ),
    (
        "member_feature_requested",
        Label::new(
            "🛠️",
            "organization members have requested to enable a feature such as Copilot",
        ),
    ),
    (
        "mention",
        Label::new("🔔", "you were specifically @mentioned in the content"),
    ),
    (
        "review_requested",
        Label::new(
            "👀",
            "you, or a team you're a member of, were requested to review a pull request",
        ),
    ),
    (
        "security_alert",
        Label::new(
            "🚨",
            "GitHub discovered a security vulnerability in your repository",
        ),
    ),
    (
        "security_advisory_credit",
        Label::new(
            "🛡️",
            "you were credited for contributing to a security advisory",
        ),
    ),
    (
        "state_change",
        Label::new(
            "🔄",
            "you changed the thread state (for example, closing an issue or merging a pull request)",
        ),
    ),
    ("subscribed", Label::new("🔔", "you're watching the repository")),
    ("team_mention", Label::new("👥", "you were on a team that was mentioned")),
];

fn lookup(table: &[(&str, Label)], key: &str, fallback: Label) -> Label {
    table
        .iter()
        .find(|(k, _)| *k == key)
        .map_or(fallback, |(_, label)| *label)
}

/// Label for a subject type tag such as `PullRequest`.
pub fn subject_label(kind: &str) -> Label {
    lookup(SUBJECT_LABELS, kind, FALLBACK_SUBJECT)
}

/// Label for a reason code such as `review_requested`.
pub fn reason_label(reason: &str) -> Label {
    lookup(REASON_LABELS, reason, FALLBACK_REASON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_subject() {
        let label = subject_label("PullRequest");
        assert_eq!(label.emoji, "🔀");
        assert_eq!(label.text, "pull request");
    }

    #[test]
    fn test_unknown_subject_falls_back() {
        assert_eq!(subject_label("SomethingNew"), FALLBACK_SUBJECT);
        assert_eq!(subject_label(""), FALLBACK_SUBJECT);
    }

    #[test]
    fn test_known_reason() {
        let label = reason_label("mention");
        assert_eq!(label.text, "you were specifically @mentioned in the content");
    }

    #[test]
    fn test_unknown_reason_falls_back() {
        let label = reason_label("carrier_pigeon");
        assert_eq!(label, FALLBACK_REASON);
        assert_eq!(label.emoji, "");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(subject_label("issue"), FALLBACK_SUBJECT);
    }
}
