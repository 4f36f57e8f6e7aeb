//! Parser module for content documents
//!
//! Turns blog post JSON, rendered HTML pages and markdown with front matter
//! into [`AnalysisInput`](crate::AnalysisInput)s.

pub mod document;
pub mod error;
pub mod front_matter;
pub mod html;

pub use document::{is_document, Document, DocumentKind, DEFAULT_DOCUMENT_PATTERNS};
pub use error::{DocumentError, Result};
pub use html::{contains_ignore_case, strip_tags, word_count};
