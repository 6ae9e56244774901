//! Email rendering of a built digest.

use pulldown_cmark::{html, Parser};

use super::builder::Digest;

/// Subject line of the digest email.
pub const DIGEST_SUBJECT: &str = "📬 Your GitHub Notification Digest";

/// Heading prepended to the plain-text body.
const TEXT_HEADING: &str = "### GitHub Notification Digest";

/// A rendered email, ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestMessage {
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

impl DigestMessage {
    /// Render a digest into subject, plain-text and HTML bodies.
    pub fn from_digest(digest: &Digest) -> Self {
        Self {
            subject: DIGEST_SUBJECT.to_string(),
            text_body: format!("{TEXT_HEADING}\n\n{}", digest.text),
            html_body: render_html(&digest.blocks),
        }
    }
}

/// Convert each markdown block to HTML on its own and concatenate.
pub fn render_html(blocks: &[String]) -> String {
    let mut out = String::new();
    for block in blocks {
        html::push_html(&mut out, Parser::new(block));
    }
    out
}
