//! Content publisher - main orchestrator for one upload run
//!
//! Runs the publishing phases strictly in sequence, one remote call at a
//! time: auth gate, title data, economy, events catalog, cloud script, title
//! news, statistics definitions, CDN assets, permission policy. A failure in
//! a non-gate phase is recorded in the run context and the remaining phases
//! still execute; transport errors abort the rest of the run.

use crate::content::{
    CloudScriptFile, PermissionStatement, StatisticDefinition, TitleDataMap, TitleNewsItem,
};
use crate::core::error::{ApiError, ApiResult, PublishError};
use crate::core::paths::ContentPaths;
use crate::core::run_context::RunContext;
use crate::remote::api::AdminApi;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;

/// Fixed name of the secondary, never-default events catalog
pub const EVENTS_CATALOG: &str = "Events";

/// Resolve one remote call against the run context.
///
/// Remote errors are recorded (failure flag set, loop may continue) and
/// reported as `Ok(false)`; transport errors become a fatal `PublishError`.
pub(crate) fn record_outcome(
    ctx: &mut RunContext,
    context: &str,
    result: ApiResult<()>,
) -> Result<bool, PublishError> {
    match result {
        Ok(()) => Ok(true),
        Err(ApiError::Remote(error)) => {
            ctx.remote_failure(context, &error);
            Ok(false)
        }
        Err(ApiError::Transport(message)) => Err(PublishError::Transport(message)),
    }
}

/// Orchestrator for one title's content upload
pub struct ContentPublisher {
    pub(crate) api: Arc<dyn AdminApi>,
    pub(crate) paths: ContentPaths,
    pub(crate) default_catalog: String,
}

impl ContentPublisher {
    pub fn new(
        api: Arc<dyn AdminApi>,
        paths: ContentPaths,
        default_catalog: impl Into<String>,
    ) -> Self {
        Self {
            api,
            paths,
            default_catalog: default_catalog.into(),
        }
    }

    /// Run every publishing phase in order.
    ///
    /// Returns `Err` only for run-fatal conditions (auth gate, transport);
    /// per-phase and per-item failures live in the run context.
    pub async fn run(&self, ctx: &mut RunContext) -> Result<(), PublishError> {
        ctx.info("Retrieving auth token...");
        match self.api.authenticate().await {
            Ok(()) => ctx.success("Auth token retrieved."),
            Err(ApiError::Remote(error)) => {
                ctx.remote_failure("auth token retrieval", &error);
                return Err(PublishError::AuthFailed);
            }
            Err(ApiError::Transport(message)) => return Err(PublishError::Transport(message)),
        }

        self.upload_title_data(ctx).await?;
        self.publish_economy(ctx).await?;
        self.publish_event_catalog(ctx).await?;
        self.upload_cloud_script(ctx).await?;
        self.upload_title_news(ctx).await?;
        self.upload_statistic_definitions(ctx).await?;
        self.upload_cdn_assets(ctx).await?;
        self.upload_policy(ctx).await?;

        Ok(())
    }

    /// Read and deserialize one JSON content file. Missing, empty, or
    /// malformed files are recorded as local failures for the phase.
    pub(crate) async fn load_json<T: DeserializeOwned>(
        &self,
        ctx: &mut RunContext,
        path: &Path,
    ) -> Option<T> {
        let contents = self.load_text(ctx, path).await?;
        match serde_json::from_str(&contents) {
            Ok(parsed) => Some(parsed),
            Err(error) => {
                ctx.local_failure(format!(
                    "An error occurred deserializing {}: {}",
                    path.display(),
                    error
                ));
                None
            }
        }
    }

    /// Read one content file as text, treating an empty file as a failure
    pub(crate) async fn load_text(&self, ctx: &mut RunContext, path: &Path) -> Option<String> {
        match fs::read_to_string(path).await {
            Ok(contents) if contents.trim().is_empty() => {
                ctx.local_failure(format!("{} is empty", path.display()));
                None
            }
            Ok(contents) => Some(contents),
            Err(error) => {
                ctx.local_failure(format!("Failed to read {}: {}", path.display(), error));
                None
            }
        }
    }

    async fn upload_title_data(&self, ctx: &mut RunContext) -> Result<(), PublishError> {
        ctx.info("Uploading title data keys & values...");
        let Some(title_data) = self
            .load_json::<TitleDataMap>(ctx, &self.paths.title_data())
            .await
        else {
            return Ok(());
        };

        for (key, value) in &title_data {
            ctx.info(format!("Uploading: {}", key));
            let result = self.api.set_title_data(key, value).await;
            if record_outcome(ctx, &format!("TitleData upload: {}", key), result)? {
                ctx.success(format!("{} uploaded.", key));
            }
        }
        Ok(())
    }

    async fn upload_cloud_script(&self, ctx: &mut RunContext) -> Result<(), PublishError> {
        ctx.info("Uploading CloudScript...");
        let path = self.paths.cloud_script();
        let Some(source) = self.load_text(ctx, &path).await else {
            return Ok(());
        };

        let files = [CloudScriptFile {
            filename: "CloudScript.js".to_string(),
            file_contents: source,
        }];

        let result = self.api.update_cloud_script(&files, true).await;
        if record_outcome(ctx, "CloudScript upload", result)? {
            ctx.success("Uploaded CloudScript!");
        }
        Ok(())
    }

    async fn upload_title_news(&self, ctx: &mut RunContext) -> Result<(), PublishError> {
        ctx.info("Uploading TitleNews...");
        let Some(items) = self
            .load_json::<Vec<TitleNewsItem>>(ctx, &self.paths.title_news())
            .await
        else {
            return Ok(());
        };

        for item in &items {
            ctx.info(format!("Uploading: {}", item.title));
            let result = self.api.add_news(item).await;
            if record_outcome(ctx, &format!("TitleNews upload: {}", item.title), result)? {
                ctx.success(format!("{} uploaded.", item.title));
            }
        }
        Ok(())
    }

    /// Create each statistic definition; a name conflict switches to a
    /// single update call for that definition instead of failing it.
    async fn upload_statistic_definitions(&self, ctx: &mut RunContext) -> Result<(), PublishError> {
        ctx.info("Updating player statistics definitions...");
        let Some(definitions) = self
            .load_json::<Vec<StatisticDefinition>>(ctx, &self.paths.statistics_definitions())
            .await
        else {
            return Ok(());
        };

        for definition in &definitions {
            let name = &definition.statistic_name;
            ctx.info(format!("Uploading: {}", name));

            match self.api.create_statistic_definition(definition).await {
                Ok(()) => ctx.success(format!("Statistics definition: {} created", name)),
                Err(ApiError::Remote(error)) if error.is_statistic_name_conflict() => {
                    ctx.warn(format!("Statistic already exists, updating values: {}", name));
                    let result = self.api.update_statistic_definition(definition).await;
                    let context = format!("Statistics definition update: {}", name);
                    if record_outcome(ctx, &context, result)? {
                        ctx.success(format!("Statistics definition: {} updated", name));
                    }
                }
                Err(ApiError::Remote(error)) => {
                    ctx.remote_failure(&format!("Statistics definition: {}", name), &error);
                }
                Err(ApiError::Transport(message)) => {
                    return Err(PublishError::Transport(message));
                }
            }
        }
        Ok(())
    }

    async fn upload_policy(&self, ctx: &mut RunContext) -> Result<(), PublishError> {
        ctx.info("Uploading permission policy...");
        let Some(permissions) = self
            .load_json::<Vec<PermissionStatement>>(ctx, &self.paths.permissions())
            .await
        else {
            return Ok(());
        };

        let result = self.api.set_global_policy(&permissions).await;
        if record_outcome(ctx, "Set permissions", result)? {
            ctx.success("Permissions uploaded.");
        }
        Ok(())
    }
}
