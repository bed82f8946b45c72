//! Economy and events-catalog phases
//!
//! The economy phase must run in this order so the backend accepts every
//! reference: virtual currencies → catalog first pass → drop tables → stores
//! → catalog second pass (composite items with their bundle/container
//! references restored). Each step short-circuits the phase on failure;
//! nothing is rolled back, so a partially published economy is a possible
//! terminal state the log records.

use crate::content::{CatalogFile, DropTableFile, Store, VirtualCurrency};
use crate::core::error::PublishError;
use crate::core::run_context::RunContext;
use crate::publish::plan::EconomyPlan;
use crate::publish::publisher::{ContentPublisher, EVENTS_CATALOG, record_outcome};
use std::path::PathBuf;

impl ContentPublisher {
    /// Dependency-ordered economy publish against the default catalog
    pub async fn publish_economy(&self, ctx: &mut RunContext) -> Result<(), PublishError> {
        if !self.publish_currencies(ctx).await? {
            return Ok(());
        }

        ctx.info("Uploading catalog items...");
        let Some(catalog) = self
            .load_json::<CatalogFile>(ctx, &self.paths.catalog())
            .await
        else {
            return Ok(());
        };

        let plan = EconomyPlan::build(catalog.catalog);

        if !self
            .update_catalog(ctx, &plan.first_pass, &self.default_catalog, true)
            .await?
        {
            return Ok(());
        }

        if !self.publish_drop_tables(ctx).await? {
            return Ok(());
        }

        if !self
            .publish_stores(ctx, self.paths.stores(), &self.default_catalog)
            .await?
        {
            return Ok(());
        }

        if plan.needs_second_pass() {
            ctx.info(format!(
                "Re-uploading [{}] catalog items due to drop table references...",
                plan.second_pass.len()
            ));
            self.update_catalog(ctx, &plan.second_pass, &self.default_catalog, true)
                .await?;
        }

        Ok(())
    }

    /// Events catalog: published directly (never default, no second pass),
    /// then its stores.
    pub async fn publish_event_catalog(&self, ctx: &mut RunContext) -> Result<(), PublishError> {
        ctx.info("Uploading event items...");
        let Some(catalog) = self
            .load_json::<CatalogFile>(ctx, &self.paths.catalog_events())
            .await
        else {
            return Ok(());
        };

        if !self
            .update_catalog(ctx, &catalog.catalog, EVENTS_CATALOG, false)
            .await?
        {
            return Ok(());
        }
        ctx.success("Uploaded event catalog!");

        self.publish_stores(ctx, self.paths.stores_events(), EVENTS_CATALOG)
            .await?;
        Ok(())
    }

    async fn publish_currencies(&self, ctx: &mut RunContext) -> Result<bool, PublishError> {
        ctx.info("Uploading virtual currency settings...");
        let Some(currencies) = self
            .load_json::<Vec<VirtualCurrency>>(ctx, &self.paths.currency())
            .await
        else {
            return Ok(false);
        };

        let result = self.api.add_virtual_currency_types(&currencies).await;
        if record_outcome(ctx, "VC upload", result)? {
            ctx.success("Uploaded VC!");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn update_catalog(
        &self,
        ctx: &mut RunContext,
        items: &[crate::content::CatalogItem],
        catalog_version: &str,
        set_as_default: bool,
    ) -> Result<bool, PublishError> {
        let result = self
            .api
            .update_catalog_items(catalog_version, items, set_as_default)
            .await;
        if record_outcome(ctx, "Catalog upload", result)? {
            ctx.success("Uploaded catalog!");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn publish_drop_tables(&self, ctx: &mut RunContext) -> Result<bool, PublishError> {
        ctx.info("Uploading drop tables...");
        let Some(tables) = self
            .load_json::<DropTableFile>(ctx, &self.paths.drop_tables())
            .await
        else {
            return Ok(false);
        };

        let tables: Vec<_> = tables.into_values().collect();
        let result = self
            .api
            .update_random_result_tables(&self.default_catalog, &tables)
            .await;
        if record_outcome(ctx, "DropTable upload", result)? {
            ctx.success("Uploaded drop tables!");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Upload every store in the file. Per-store remote failures are
    /// recorded and the loop continues; only a file problem fails the step.
    async fn publish_stores(
        &self,
        ctx: &mut RunContext,
        path: PathBuf,
        catalog_version: &str,
    ) -> Result<bool, PublishError> {
        ctx.info("Uploading stores...");
        let Some(stores) = self.load_json::<Vec<Store>>(ctx, &path).await else {
            return Ok(false);
        };

        for store in &stores {
            ctx.info(format!("Uploading: {}", store.store_id));
            let result = self.api.set_store_items(catalog_version, store).await;
            if record_outcome(ctx, &format!("Store upload: {}", store.store_id), result)? {
                ctx.success(format!("Store: {} uploaded.", store.store_id));
            }
        }
        Ok(true)
    }
}
