//! Publishing pipeline: orchestration, economy ordering, CDN assets

pub mod cdn_publisher;
pub mod economy_publisher;
pub mod plan;
pub mod publisher;

pub use plan::EconomyPlan;
pub use publisher::{ContentPublisher, EVENTS_CATALOG};
