//! reqwest-backed implementation of [`AdminApi`]
//!
//! Every RPC is a JSON POST against `https://{title_id}.playfabapi.com`.
//! Admin endpoints authenticate with the `X-SecretKey` header; the profile
//! policy endpoint uses the entity token acquired by `authenticate`. CDN
//! payloads go out as raw HTTP PUTs to the one-time URL the backend hands
//! back.

use crate::content::{
    CatalogItem, CloudScriptFile, DropTable, PermissionStatement, StatisticDefinition, Store,
    TitleNewsItem, VirtualCurrency,
};
use crate::core::error::{ApiError, ApiResult, RemoteError};
use crate::core::settings::TitleSettings;
use crate::remote::api::AdminApi;
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// Which credential a call carries
enum Auth {
    SecretKey,
    EntityToken,
}

/// Admin API client for one title
pub struct HttpAdminApi {
    client: reqwest::Client,
    base_url: String,
    secret_key: SecretString,
    entity_token: RwLock<Option<String>>,
}

impl HttpAdminApi {
    pub fn new(settings: &TitleSettings) -> Self {
        Self::with_base_url(
            format!("https://{}.playfabapi.com", settings.title_id),
            settings.developer_secret_key.clone(),
        )
    }

    /// Point the client at an explicit base URL (sandbox endpoints, tests)
    pub fn with_base_url(base_url: String, secret_key: SecretString) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            secret_key,
            entity_token: RwLock::new(None),
        }
    }

    async fn post<B, T>(&self, path: &str, body: &B, auth: Auth) -> ApiResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        self.post_opt(path, body, auth)
            .await?
            .ok_or_else(|| ApiError::Transport("response body was missing data".to_string()))
    }

    async fn post_opt<B, T>(&self, path: &str, body: &B, auth: Auth) -> ApiResult<Option<T>>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.post(&url).json(body);

        request = match auth {
            Auth::SecretKey => request.header("X-SecretKey", self.secret_key.expose_secret()),
            Auth::EntityToken => {
                let token = self.entity_token.read().await;
                let token = token.as_deref().ok_or_else(|| {
                    ApiError::Transport("entity token not acquired before call".to_string())
                })?;
                request.header("X-EntityToken", token)
            }
        };

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Remote(remote_error_from_body(
                status.as_u16(),
                &text,
            )));
        }

        let envelope: ApiEnvelope<T> = serde_json::from_str(&text)
            .map_err(|e| ApiError::Transport(format!("malformed response body: {}", e)))?;

        Ok(envelope.data)
    }

    /// POST for calls whose response payload the pipeline discards
    async fn post_unit<B: Serialize + Sync>(&self, path: &str, body: &B, auth: Auth) -> ApiResult<()> {
        let _: Option<serde_json::Value> = self.post_opt(path, body, auth).await?;
        Ok(())
    }
}

/// Map a non-2xx response body to a structured error. Falls back to the
/// HTTP status when the body is not the backend's error shape.
fn remote_error_from_body(status: u16, body: &str) -> RemoteError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => RemoteError {
            code: parsed.error.unwrap_or_else(|| format!("HTTP-{}", status)),
            message: parsed
                .error_message
                .unwrap_or_else(|| "no error message".to_string()),
            details: parsed.error_details.unwrap_or_default(),
        },
        Err(_) => RemoteError::new(format!("HTTP-{}", status), body.trim().to_string()),
    }
}

#[derive(Deserialize)]
struct ApiEnvelope<T> {
    data: Option<T>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
    #[serde(rename = "errorMessage")]
    error_message: Option<String>,
    #[serde(rename = "errorDetails")]
    error_details: Option<BTreeMap<String, Vec<String>>>,
}

// Request/response wire shapes, PascalCase like the rest of the API.

#[derive(Serialize)]
struct GetEntityTokenRequest {}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GetEntityTokenResponse {
    entity_token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SetTitleDataRequest<'a> {
    key: &'a str,
    value: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct AddVirtualCurrencyTypesRequest<'a> {
    virtual_currencies: &'a [VirtualCurrency],
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct UpdateCatalogItemsRequest<'a> {
    catalog_version: &'a str,
    catalog: &'a [CatalogItem],
    set_as_default_catalog: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct UpdateRandomResultTablesRequest<'a> {
    catalog_version: &'a str,
    tables: &'a [DropTable],
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct UpdateStoreItemsRequest<'a> {
    catalog_version: &'a str,
    store_id: &'a str,
    store: &'a [crate::content::StoreItem],
    #[serde(skip_serializing_if = "Option::is_none")]
    marketing_data: Option<&'a crate::content::StoreMarketing>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct UpdateCloudScriptRequest<'a> {
    files: &'a [CloudScriptFile],
    publish: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct AddNewsRequest<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct StatisticDefinitionRequest<'a> {
    statistic_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    version_change_interval: Option<crate::content::VersionChangeInterval>,
    #[serde(skip_serializing_if = "Option::is_none")]
    aggregation_method: Option<crate::content::AggregationMethod>,
}

impl<'a> StatisticDefinitionRequest<'a> {
    fn from(definition: &'a StatisticDefinition) -> Self {
        Self {
            statistic_name: &definition.statistic_name,
            version_change_interval: definition.version_change_interval,
            aggregation_method: definition.aggregation_method,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SetGlobalPolicyRequest<'a> {
    permissions: &'a [PermissionStatement],
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct GetContentUploadUrlRequest<'a> {
    key: &'a str,
    content_type: &'a str,
}

#[derive(Deserialize)]
struct GetContentUploadUrlResponse {
    #[serde(rename = "URL")]
    url: String,
}

#[async_trait]
impl AdminApi for HttpAdminApi {
    async fn authenticate(&self) -> ApiResult<()> {
        let response: GetEntityTokenResponse = self
            .post(
                "/Authentication/GetEntityToken",
                &GetEntityTokenRequest {},
                Auth::SecretKey,
            )
            .await?;

        *self.entity_token.write().await = Some(response.entity_token);
        Ok(())
    }

    async fn set_title_data(&self, key: &str, value: &str) -> ApiResult<()> {
        self.post_unit(
            "/Admin/SetTitleData",
            &SetTitleDataRequest { key, value },
            Auth::SecretKey,
        )
        .await
    }

    async fn add_virtual_currency_types(&self, currencies: &[VirtualCurrency]) -> ApiResult<()> {
        self.post_unit(
            "/Admin/AddVirtualCurrencyTypes",
            &AddVirtualCurrencyTypesRequest {
                virtual_currencies: currencies,
            },
            Auth::SecretKey,
        )
        .await
    }

    async fn update_catalog_items(
        &self,
        catalog_version: &str,
        items: &[CatalogItem],
        set_as_default: bool,
    ) -> ApiResult<()> {
        self.post_unit(
            "/Admin/UpdateCatalogItems",
            &UpdateCatalogItemsRequest {
                catalog_version,
                catalog: items,
                set_as_default_catalog: set_as_default,
            },
            Auth::SecretKey,
        )
        .await
    }

    async fn update_random_result_tables(
        &self,
        catalog_version: &str,
        tables: &[DropTable],
    ) -> ApiResult<()> {
        self.post_unit(
            "/Admin/UpdateRandomResultTables",
            &UpdateRandomResultTablesRequest {
                catalog_version,
                tables,
            },
            Auth::SecretKey,
        )
        .await
    }

    async fn set_store_items(&self, catalog_version: &str, store: &Store) -> ApiResult<()> {
        self.post_unit(
            "/Admin/SetStoreItems",
            &UpdateStoreItemsRequest {
                catalog_version,
                store_id: &store.store_id,
                store: &store.store,
                marketing_data: store.marketing_data.as_ref(),
            },
            Auth::SecretKey,
        )
        .await
    }

    async fn update_cloud_script(&self, files: &[CloudScriptFile], publish: bool) -> ApiResult<()> {
        self.post_unit(
            "/Admin/UpdateCloudScript",
            &UpdateCloudScriptRequest { files, publish },
            Auth::SecretKey,
        )
        .await
    }

    async fn add_news(&self, item: &TitleNewsItem) -> ApiResult<()> {
        self.post_unit(
            "/Admin/AddNews",
            &AddNewsRequest {
                title: &item.title,
                body: &item.body,
            },
            Auth::SecretKey,
        )
        .await
    }

    async fn create_statistic_definition(
        &self,
        definition: &StatisticDefinition,
    ) -> ApiResult<()> {
        self.post_unit(
            "/Admin/CreatePlayerStatisticDefinition",
            &StatisticDefinitionRequest::from(definition),
            Auth::SecretKey,
        )
        .await
    }

    async fn update_statistic_definition(
        &self,
        definition: &StatisticDefinition,
    ) -> ApiResult<()> {
        self.post_unit(
            "/Admin/UpdatePlayerStatisticDefinition",
            &StatisticDefinitionRequest::from(definition),
            Auth::SecretKey,
        )
        .await
    }

    async fn set_global_policy(&self, permissions: &[PermissionStatement]) -> ApiResult<()> {
        self.post_unit(
            "/Profile/SetGlobalPolicy",
            &SetGlobalPolicyRequest { permissions },
            Auth::EntityToken,
        )
        .await
    }

    async fn get_content_upload_url(&self, key: &str, content_type: &str) -> ApiResult<String> {
        let response: GetContentUploadUrlResponse = self
            .post(
                "/Admin/GetContentUploadUrl",
                &GetContentUploadUrlRequest { key, content_type },
                Auth::SecretKey,
            )
            .await?;
        Ok(response.url)
    }

    async fn put_content(&self, url: &str, content_type: &str, payload: &[u8]) -> ApiResult<()> {
        let response = self
            .client
            .put(url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(payload.to_vec())
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ApiError::Remote(RemoteError::new(
                format!("HTTP-{}", status.as_u16()),
                format!("content PUT to {} failed", url),
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_maps_to_remote_error() {
        let body = r#"{
            "code": 400,
            "status": "BadRequest",
            "error": "StatisticNameConflict",
            "errorCode": 1234,
            "errorMessage": "Statistic already exists",
            "errorDetails": {"StatisticName": ["name already in use"]}
        }"#;

        let error = remote_error_from_body(400, body);
        assert_eq!(error.code, "StatisticNameConflict");
        assert_eq!(error.message, "Statistic already exists");
        assert_eq!(
            error.details["StatisticName"],
            vec!["name already in use".to_string()]
        );
        assert!(error.is_statistic_name_conflict());
    }

    #[test]
    fn test_unparseable_error_body_falls_back_to_status() {
        let error = remote_error_from_body(502, "<html>bad gateway</html>");
        assert_eq!(error.code, "HTTP-502");
        assert!(error.message.contains("bad gateway"));
    }

    #[test]
    fn test_envelope_extracts_data() {
        let body = r#"{"code": 200, "status": "OK", "data": {"EntityToken": "tok-123"}}"#;
        let envelope: ApiEnvelope<GetEntityTokenResponse> = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.data.unwrap().entity_token, "tok-123");
    }

    // GetEntityTokenResponse has no Default impl, so this also pins that the
    // envelope only requires Deserialize of its payload.
    #[test]
    fn test_envelope_without_data_is_none() {
        let body = r#"{"code": 200, "status": "OK"}"#;
        let envelope: ApiEnvelope<GetEntityTokenResponse> = serde_json::from_str(body).unwrap();
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_upload_url_response_uses_upper_case_url_key() {
        let body = r#"{"URL": "https://cdn.example/upload/abc"}"#;
        let parsed: GetContentUploadUrlResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.url, "https://cdn.example/upload/abc");
    }

    #[test]
    fn test_catalog_request_wire_shape() {
        let request = UpdateCatalogItemsRequest {
            catalog_version: "CharacterClasses",
            catalog: &[],
            set_as_default_catalog: true,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["CatalogVersion"], "CharacterClasses");
        assert_eq!(json["SetAsDefaultCatalog"], true);
        assert!(json["Catalog"].is_array());
    }
}
