//! Remote admin API: the trait seam and its reqwest implementation

pub mod api;
pub mod http_admin;

#[cfg(test)]
pub mod mock;

pub use api::AdminApi;
pub use http_admin::HttpAdminApi;
