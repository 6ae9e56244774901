//! Notification digest construction and rendering.
//!
//! Records are sorted newest first, grouped per repository (groups in name
//! order), annotated with type and reason labels, and rendered as markdown
//! blocks. The blocks feed both the plain-text mail body and, converted one
//! by one, the HTML alternative.

mod builder;
mod labels;
mod links;
mod render;

pub use builder::{
    explanation, Digest, DigestBuilder, DigestEntry, RepositoryGroup, GROUP_SEPARATOR,
    MAX_SNIPPET_CHARS, SNIPPET_TYPES,
};
pub use labels::{reason_label, subject_label, Label, FALLBACK_REASON, FALLBACK_SUBJECT};
pub use links::{resolve_link, to_web_url};
pub use render::{render_html, DigestMessage, DIGEST_SUBJECT};
