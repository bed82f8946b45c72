//! Admin API seam
//!
//! One trait method per backend RPC the pipeline issues. The pipeline only
//! ever talks to this trait, so tests drive it with a recording mock and the
//! binary plugs in the reqwest implementation.

use crate::content::{
    CatalogItem, CloudScriptFile, DropTable, PermissionStatement, StatisticDefinition, Store,
    TitleNewsItem, VirtualCurrency,
};
use crate::core::error::ApiResult;
use async_trait::async_trait;

/// Remote admin API for one title
///
/// Every call is issued and awaited to completion before the caller moves
/// on; there is no batching and no automatic retry at this layer.
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// Acquire and cache the entity token. Must succeed before any other
    /// call; the run aborts if it fails.
    async fn authenticate(&self) -> ApiResult<()>;

    async fn set_title_data(&self, key: &str, value: &str) -> ApiResult<()>;

    async fn add_virtual_currency_types(&self, currencies: &[VirtualCurrency]) -> ApiResult<()>;

    async fn update_catalog_items(
        &self,
        catalog_version: &str,
        items: &[CatalogItem],
        set_as_default: bool,
    ) -> ApiResult<()>;

    async fn update_random_result_tables(
        &self,
        catalog_version: &str,
        tables: &[DropTable],
    ) -> ApiResult<()>;

    async fn set_store_items(&self, catalog_version: &str, store: &Store) -> ApiResult<()>;

    async fn update_cloud_script(&self, files: &[CloudScriptFile], publish: bool) -> ApiResult<()>;

    async fn add_news(&self, item: &TitleNewsItem) -> ApiResult<()>;

    async fn create_statistic_definition(&self, definition: &StatisticDefinition)
    -> ApiResult<()>;

    async fn update_statistic_definition(&self, definition: &StatisticDefinition)
    -> ApiResult<()>;

    async fn set_global_policy(&self, permissions: &[PermissionStatement]) -> ApiResult<()>;

    /// Request a one-time upload URL for one CDN content key
    async fn get_content_upload_url(&self, key: &str, content_type: &str) -> ApiResult<String>;

    /// Raw PUT of the asset bytes to a previously acquired upload URL
    async fn put_content(&self, url: &str, content_type: &str, payload: &[u8]) -> ApiResult<()>;
}
