//! Local validation of content files before any upload

pub mod content_checker;

pub use content_checker::{CheckReport, ContentChecker, ContentIssue};
