//! Recording mock for [`AdminApi`], used by the pipeline tests
//!
//! Records every call in order and lets a test script a failure for a named
//! operation. Scripted failures are persistent: every call to that operation
//! fails for the rest of the test.

use crate::content::{
    CatalogItem, CloudScriptFile, DropTable, PermissionStatement, StatisticDefinition, Store,
    TitleNewsItem, VirtualCurrency,
};
use crate::core::error::{ApiError, ApiResult, RemoteError};
use crate::remote::api::AdminApi;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// One recorded call, with enough detail for order and payload assertions
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Authenticate,
    SetTitleData {
        key: String,
        value: String,
    },
    AddVirtualCurrencyTypes {
        codes: Vec<String>,
    },
    UpdateCatalogItems {
        catalog_version: String,
        items: Vec<CatalogItem>,
        set_as_default: bool,
    },
    UpdateRandomResultTables {
        catalog_version: String,
        table_ids: Vec<String>,
    },
    SetStoreItems {
        catalog_version: String,
        store_id: String,
    },
    UpdateCloudScript {
        publish: bool,
        filenames: Vec<String>,
    },
    AddNews {
        title: String,
    },
    CreateStatisticDefinition {
        name: String,
    },
    UpdateStatisticDefinition {
        name: String,
    },
    SetGlobalPolicy {
        statement_count: usize,
    },
    GetContentUploadUrl {
        key: String,
    },
    PutContent {
        url: String,
        payload_len: usize,
    },
}

#[derive(Default)]
pub struct MockAdminApi {
    calls: Mutex<Vec<ApiCall>>,
    failures: Mutex<HashMap<&'static str, ApiError>>,
}

impl MockAdminApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a failure for an operation name (e.g. "update_catalog_items")
    pub fn fail(&self, operation: &'static str, error: ApiError) {
        self.failures.lock().unwrap().insert(operation, error);
    }

    /// Script a remote (non-fatal) failure with the given error code
    pub fn fail_remote(&self, operation: &'static str, code: &str) {
        self.fail(
            operation,
            ApiError::Remote(RemoteError::new(code, format!("{} failed", operation))),
        );
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn scripted(&self, operation: &str) -> ApiResult<()> {
        match self.failures.lock().unwrap().get(operation) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AdminApi for MockAdminApi {
    async fn authenticate(&self) -> ApiResult<()> {
        self.record(ApiCall::Authenticate);
        self.scripted("authenticate")
    }

    async fn set_title_data(&self, key: &str, value: &str) -> ApiResult<()> {
        self.record(ApiCall::SetTitleData {
            key: key.to_string(),
            value: value.to_string(),
        });
        self.scripted("set_title_data")
    }

    async fn add_virtual_currency_types(&self, currencies: &[VirtualCurrency]) -> ApiResult<()> {
        self.record(ApiCall::AddVirtualCurrencyTypes {
            codes: currencies.iter().map(|c| c.currency_code.clone()).collect(),
        });
        self.scripted("add_virtual_currency_types")
    }

    async fn update_catalog_items(
        &self,
        catalog_version: &str,
        items: &[CatalogItem],
        set_as_default: bool,
    ) -> ApiResult<()> {
        self.record(ApiCall::UpdateCatalogItems {
            catalog_version: catalog_version.to_string(),
            items: items.to_vec(),
            set_as_default,
        });
        self.scripted("update_catalog_items")
    }

    async fn update_random_result_tables(
        &self,
        catalog_version: &str,
        tables: &[DropTable],
    ) -> ApiResult<()> {
        self.record(ApiCall::UpdateRandomResultTables {
            catalog_version: catalog_version.to_string(),
            table_ids: tables.iter().map(|t| t.table_id.clone()).collect(),
        });
        self.scripted("update_random_result_tables")
    }

    async fn set_store_items(&self, catalog_version: &str, store: &Store) -> ApiResult<()> {
        self.record(ApiCall::SetStoreItems {
            catalog_version: catalog_version.to_string(),
            store_id: store.store_id.clone(),
        });
        self.scripted("set_store_items")
    }

    async fn update_cloud_script(&self, files: &[CloudScriptFile], publish: bool) -> ApiResult<()> {
        self.record(ApiCall::UpdateCloudScript {
            publish,
            filenames: files.iter().map(|f| f.filename.clone()).collect(),
        });
        self.scripted("update_cloud_script")
    }

    async fn add_news(&self, item: &TitleNewsItem) -> ApiResult<()> {
        self.record(ApiCall::AddNews {
            title: item.title.clone(),
        });
        self.scripted("add_news")
    }

    async fn create_statistic_definition(
        &self,
        definition: &StatisticDefinition,
    ) -> ApiResult<()> {
        self.record(ApiCall::CreateStatisticDefinition {
            name: definition.statistic_name.clone(),
        });
        self.scripted("create_statistic_definition")
    }

    async fn update_statistic_definition(
        &self,
        definition: &StatisticDefinition,
    ) -> ApiResult<()> {
        self.record(ApiCall::UpdateStatisticDefinition {
            name: definition.statistic_name.clone(),
        });
        self.scripted("update_statistic_definition")
    }

    async fn set_global_policy(&self, permissions: &[PermissionStatement]) -> ApiResult<()> {
        self.record(ApiCall::SetGlobalPolicy {
            statement_count: permissions.len(),
        });
        self.scripted("set_global_policy")
    }

    async fn get_content_upload_url(&self, key: &str, _content_type: &str) -> ApiResult<String> {
        self.record(ApiCall::GetContentUploadUrl {
            key: key.to_string(),
        });
        self.scripted("get_content_upload_url")?;
        Ok(format!("https://cdn.example/upload/{}", key))
    }

    async fn put_content(&self, url: &str, _content_type: &str, payload: &[u8]) -> ApiResult<()> {
        self.record(ApiCall::PutContent {
            url: url.to_string(),
            payload_len: payload.len(),
        });
        self.scripted("put_content")
    }
}
