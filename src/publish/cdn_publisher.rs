//! CDN asset bundle phase
//!
//! Gated on the `UseCDN` title-data key: anything other than the integer 1
//! skips the phase. Each bundle is uploaded once per platform under a
//! platform-prefixed content key, and every bundle/platform pair fails
//! independently.

use crate::content::{CdnBundleList, TitleDataMap};
use crate::core::error::PublishError;
use crate::core::run_context::RunContext;
use crate::publish::publisher::{ContentPublisher, record_outcome};
use tokio::fs;

const CDN_CONTENT_TYPE: &str = "application/x-gzip";

/// Content-key prefix per target platform. The desktop build uses bare keys.
const PLATFORM_PREFIXES: [(&str, &str); 3] =
    [("", "Desktop"), ("iOS/", "iOS"), ("Android/", "Android")];

impl ContentPublisher {
    pub async fn upload_cdn_assets(&self, ctx: &mut RunContext) -> Result<(), PublishError> {
        ctx.info("Uploading CDN asset bundles...");
        let Some(title_data) = self
            .load_json::<TitleDataMap>(ctx, &self.paths.title_data())
            .await
        else {
            return Ok(());
        };

        if !cdn_enabled(&title_data) {
            ctx.info("UseCDN is not set to 1, skipping CDN upload.");
            return Ok(());
        }

        let Some(bundles) = self
            .load_json::<CdnBundleList>(ctx, &self.paths.cdn_bundles())
            .await
        else {
            return Ok(());
        };

        for bundle in &bundles {
            for (prefix, platform) in PLATFORM_PREFIXES {
                let key = format!("{}{}", prefix, bundle);
                self.upload_one_bundle(ctx, &key, platform).await?;
            }
        }
        Ok(())
    }

    async fn upload_one_bundle(
        &self,
        ctx: &mut RunContext,
        key: &str,
        platform: &str,
    ) -> Result<(), PublishError> {
        ctx.info(format!("Uploading: {} ({})", key, platform));

        let url = match self.api.get_content_upload_url(key, CDN_CONTENT_TYPE).await {
            Ok(url) => url,
            Err(error) => {
                let context = format!("CDN URL request: {}", key);
                record_outcome(ctx, &context, Err(error))?;
                return Ok(());
            }
        };

        let path = self.paths.asset_bundles_dir().join(key);
        let payload = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(error) => {
                ctx.local_failure(format!("Failed to read {}: {}", path.display(), error));
                return Ok(());
            }
        };

        let result = self.api.put_content(&url, CDN_CONTENT_TYPE, &payload).await;
        if record_outcome(ctx, &format!("CDN upload: {}", key), result)? {
            ctx.success(format!("{} uploaded.", key));
        }
        Ok(())
    }
}

fn cdn_enabled(title_data: &TitleDataMap) -> bool {
    title_data
        .get("UseCDN")
        .and_then(|value| value.trim().parse::<i32>().ok())
        == Some(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::publish::publisher::tests::{publisher_with, write_data_dir};
    use crate::remote::mock::ApiCall;
    use std::path::Path;
    use tempfile::TempDir;

    fn enable_cdn(dir: &Path, bundles: &[&str]) {
        std::fs::write(
            dir.join("TitleData.json"),
            r#"{"MinimumInterstitialWait": "30", "UseCDN": "1"}"#,
        )
        .unwrap();
        let list = serde_json::to_string(bundles).unwrap();
        std::fs::write(dir.join("CdnData.json"), list).unwrap();

        let base = dir.join("AssetBundles");
        std::fs::create_dir_all(base.join("iOS")).unwrap();
        std::fs::create_dir_all(base.join("Android")).unwrap();
        for bundle in bundles {
            std::fs::write(base.join(bundle), b"desktop bytes").unwrap();
            std::fs::write(base.join("iOS").join(bundle), b"ios bytes").unwrap();
            std::fs::write(base.join("Android").join(bundle), b"android bytes").unwrap();
        }
    }

    #[tokio::test]
    async fn test_cdn_disabled_makes_no_upload_calls() {
        let temp_dir = TempDir::new().unwrap();
        write_data_dir(temp_dir.path());
        let (publisher, api, mut ctx) = publisher_with(temp_dir.path());

        publisher.upload_cdn_assets(&mut ctx).await.unwrap();

        assert!(api.calls().is_empty());
        assert!(!ctx.hit_errors());
    }

    #[tokio::test]
    async fn test_each_bundle_uploads_for_all_three_platforms() {
        let temp_dir = TempDir::new().unwrap();
        write_data_dir(temp_dir.path());
        enable_cdn(temp_dir.path(), &["mainbundle", "extrabundle"]);
        let (publisher, api, mut ctx) = publisher_with(temp_dir.path());

        publisher.upload_cdn_assets(&mut ctx).await.unwrap();

        let calls = api.calls();
        let urls: Vec<String> = calls
            .iter()
            .filter_map(|c| match c {
                ApiCall::GetContentUploadUrl { key } => Some(key.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(
            urls,
            vec![
                "mainbundle",
                "iOS/mainbundle",
                "Android/mainbundle",
                "extrabundle",
                "iOS/extrabundle",
                "Android/extrabundle",
            ]
        );
        let puts = calls
            .iter()
            .filter(|c| matches!(c, ApiCall::PutContent { .. }))
            .count();
        assert_eq!(puts, 6);
        assert!(!ctx.hit_errors());
    }

    #[tokio::test]
    async fn test_missing_bundle_file_fails_that_pair_only() {
        let temp_dir = TempDir::new().unwrap();
        write_data_dir(temp_dir.path());
        enable_cdn(temp_dir.path(), &["mainbundle"]);
        std::fs::remove_file(temp_dir.path().join("AssetBundles/iOS/mainbundle")).unwrap();
        let (publisher, api, mut ctx) = publisher_with(temp_dir.path());

        publisher.upload_cdn_assets(&mut ctx).await.unwrap();

        assert!(ctx.hit_errors());
        let puts = api
            .calls()
            .iter()
            .filter(|c| matches!(c, ApiCall::PutContent { .. }))
            .count();
        assert_eq!(puts, 2, "desktop and Android pairs still upload");
    }

    #[tokio::test]
    async fn test_url_request_failure_skips_put_for_that_pair() {
        let temp_dir = TempDir::new().unwrap();
        write_data_dir(temp_dir.path());
        enable_cdn(temp_dir.path(), &["mainbundle"]);
        let (publisher, api, mut ctx) = publisher_with(temp_dir.path());
        api.fail_remote("get_content_upload_url", "ServiceUnavailable");

        publisher.upload_cdn_assets(&mut ctx).await.unwrap();

        assert!(ctx.hit_errors());
        assert!(!api.calls().iter().any(|c| matches!(c, ApiCall::PutContent { .. })));
    }

    #[test]
    fn test_use_cdn_gate_requires_the_integer_one() {
        let mut data = TitleDataMap::new();
        assert!(!cdn_enabled(&data));

        data.insert("UseCDN".to_string(), "true".to_string());
        assert!(!cdn_enabled(&data));
        data.insert("UseCDN".to_string(), "0".to_string());
        assert!(!cdn_enabled(&data));
        data.insert("UseCDN".to_string(), " 1 ".to_string());
        assert!(cdn_enabled(&data));
        data.insert("UseCDN".to_string(), "1".to_string());
        assert!(cdn_enabled(&data));
    }
}
