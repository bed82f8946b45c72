//! Fixed content file layout
//!
//! All content lives under one data directory with well-known file names.

use std::path::{Path, PathBuf};

/// Default data directory, relative to the working directory
pub const DEFAULT_DATA_DIR: &str = "PlayFabData";

/// Resolves the fixed set of content files under one data directory
#[derive(Debug, Clone)]
pub struct ContentPaths {
    data_dir: PathBuf,
}

impl ContentPaths {
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn title_settings(&self) -> PathBuf {
        self.data_dir.join("TitleSettings.json")
    }

    pub fn currency(&self) -> PathBuf {
        self.data_dir.join("Currency.json")
    }

    pub fn title_data(&self) -> PathBuf {
        self.data_dir.join("TitleData.json")
    }

    pub fn catalog(&self) -> PathBuf {
        self.data_dir.join("Catalog.json")
    }

    pub fn catalog_events(&self) -> PathBuf {
        self.data_dir.join("CatalogEvents.json")
    }

    pub fn drop_tables(&self) -> PathBuf {
        self.data_dir.join("DropTables.json")
    }

    pub fn cloud_script(&self) -> PathBuf {
        self.data_dir.join("CloudScript.js")
    }

    pub fn title_news(&self) -> PathBuf {
        self.data_dir.join("TitleNews.json")
    }

    pub fn statistics_definitions(&self) -> PathBuf {
        self.data_dir.join("StatisticsDefinitions.json")
    }

    pub fn stores(&self) -> PathBuf {
        self.data_dir.join("Stores.json")
    }

    pub fn stores_events(&self) -> PathBuf {
        self.data_dir.join("StoresEvents.json")
    }

    pub fn cdn_bundles(&self) -> PathBuf {
        self.data_dir.join("CdnData.json")
    }

    pub fn permissions(&self) -> PathBuf {
        self.data_dir.join("Permissions.json")
    }

    /// Root of the CDN asset bundle tree; platform subfolders live below it
    pub fn asset_bundles_dir(&self) -> PathBuf {
        self.data_dir.join("AssetBundles")
    }
}
