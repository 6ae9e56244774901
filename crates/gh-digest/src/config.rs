//! Configuration for the digest job.

use std::fmt;

use anyhow::{bail, Context, Result};

/// Default GitHub REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default display name used in the `From` header.
pub const DEFAULT_FROM_NAME: &str = "gh-digest";

/// Default page size for the notification fetch.
pub const DEFAULT_PER_PAGE: u32 = 50;

/// Largest page size GitHub accepts.
const MAX_PER_PAGE: u32 = 100;

/// Placeholder printed instead of secrets.
const REDACTED: &str = "[redacted]";

/// How the SMTP connection is encrypted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmtpSecurity {
    /// TLS from the first byte (SMTPS, usually port 465).
    #[default]
    Tls,
    /// Plain connection upgraded with STARTTLS (usually port 587).
    StartTls,
}

impl SmtpSecurity {
    /// Parse a security mode name (`tls` or `starttls`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "tls" | "ssl" | "smtps" => Some(Self::Tls),
            "starttls" => Some(Self::StartTls),
            _ => None,
        }
    }
}

/// GitHub API settings.
#[derive(Clone)]
pub struct GitHubConfig {
    /// Personal access token with `notifications` scope.
    pub token: String,
    /// REST API base URL, without trailing slash.
    pub api_url: String,
    /// Page size for `GET /notifications`.
    pub per_page: u32,
}

/// SMTP and addressing settings.
#[derive(Clone)]
pub struct MailConfig {
    /// SMTP server hostname.
    pub smtp_host: String,
    /// SMTP server port.
    pub smtp_port: u16,
    /// SMTP username; also the sender address.
    pub smtp_username: String,
    /// SMTP password.
    pub smtp_password: String,
    /// Connection security mode.
    pub security: SmtpSecurity,
    /// Display name for the sender.
    pub from_name: String,
    /// Recipient address.
    pub to_email: String,
}

impl fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("token", &REDACTED)
            .field("api_url", &self.api_url)
            .field("per_page", &self.per_page)
            .finish()
    }
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &REDACTED)
            .field("security", &self.security)
            .field("from_name", &self.from_name)
            .field("to_email", &self.to_email)
            .finish()
    }
}

/// Full configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct DigestConfig {
    pub github: GitHubConfig,
    pub mail: MailConfig,
}

impl DigestConfig {
    /// Create configuration from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    ///
    /// # Required Environment Variables
    /// - `GH_TOKEN`: GitHub token
    /// - `SMTP_HOST`, `SMTP_PORT`, `SMTP_USER`, `SMTP_PASS`: mail server
    /// - `MAIL_TO`: recipient
    ///
    /// # Optional Environment Variables
    /// - `MAIL_FROM_NAME`: sender display name (default: gh-digest)
    /// - `SMTP_SECURITY`: `tls` or `starttls` (default: tls)
    /// - `GITHUB_API_URL`: API base URL (default: https://api.github.com)
    /// - `GH_DIGEST_PER_PAGE`: notifications per fetch, 1-100 (default: 50)
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).with_context(|| format!("{key} environment variable not set"))
        };

        let github = GitHubConfig::from_lookup(&lookup, &required)?;

        let smtp_port = required("SMTP_PORT")?
            .trim()
            .parse::<u16>()
            .context("SMTP_PORT must be a valid port number")?;

        let security = match lookup("SMTP_SECURITY") {
            Some(value) => match SmtpSecurity::parse(&value) {
                Some(security) => security,
                None => bail!("SMTP_SECURITY must be 'tls' or 'starttls', got '{value}'"),
            },
            None => SmtpSecurity::default(),
        };

        let mail = MailConfig {
            smtp_host: required("SMTP_HOST")?,
            smtp_port,
            smtp_username: required("SMTP_USER")?,
            smtp_password: required("SMTP_PASS")?,
            security,
            from_name: lookup("MAIL_FROM_NAME").unwrap_or_else(|| DEFAULT_FROM_NAME.to_string()),
            to_email: required("MAIL_TO")?,
        };

        Ok(Self { github, mail })
    }
}

impl GitHubConfig {
    fn from_lookup<F, R>(lookup: &F, required: &R) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
        R: Fn(&str) -> Result<String>,
    {
        let api_url = lookup("GITHUB_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let per_page = lookup("GH_DIGEST_PER_PAGE")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE);

        Ok(Self {
            token: required("GH_TOKEN")?,
            api_url,
            per_page,
        })
    }
}
