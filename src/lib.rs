pub mod content;
pub mod core;
pub mod publish;
pub mod remote;
pub mod validation;

pub use self::core::*;
pub use publish::{ContentPublisher, EVENTS_CATALOG};
pub use remote::{AdminApi, HttpAdminApi};
pub use validation::{CheckReport, ContentChecker, ContentIssue};
