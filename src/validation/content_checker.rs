//! Offline content validation
//!
//! Backs the `check` subcommand and `publish --dry-run`: parses every content
//! file locally and cross-references the ids that the backend would otherwise
//! reject mid-upload, without making a single remote call.

use crate::content::{
    CatalogFile, DropTableFile, ResultItemType, StatisticDefinition, Store, VirtualCurrency,
};
use crate::core::paths::ContentPaths;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

lazy_static! {
    static ref CURRENCY_CODE: Regex = Regex::new(r"^[A-Z]{2}$").unwrap();
    static ref ITEM_ID: Regex = Regex::new(r"^[A-Za-z0-9_\-\.]+$").unwrap();
}

/// One problem found in the content files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentIssue {
    pub file: String,
    pub field: String,
    pub message: String,
}

impl fmt::Display for ContentIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.file, self.field, self.message)
    }
}

/// Everything found by one checker pass
#[derive(Debug, Default)]
pub struct CheckReport {
    pub issues: Vec<ContentIssue>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }

    fn push(&mut self, file: &Path, field: impl Into<String>, message: impl Into<String>) {
        self.issues.push(ContentIssue {
            file: file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.display().to_string()),
            field: field.into(),
            message: message.into(),
        });
    }
}

/// Validates the content directory without touching the network
pub struct ContentChecker {
    paths: ContentPaths,
}

impl ContentChecker {
    pub fn new(paths: ContentPaths) -> Self {
        Self { paths }
    }

    pub fn check(&self) -> CheckReport {
        let mut report = CheckReport::default();

        self.check_currencies(&mut report);

        let catalog_path = self.paths.catalog();
        let catalog = load::<CatalogFile>(&mut report, &catalog_path);
        let catalog_ids = check_catalog_items(&mut report, &catalog_path, catalog.as_ref());
        let events_path = self.paths.catalog_events();
        let events = load::<CatalogFile>(&mut report, &events_path);
        let event_ids = check_catalog_items(&mut report, &events_path, events.as_ref());

        let table_ids = self.check_drop_tables(&mut report, &catalog_ids);

        if let Some(catalog) = &catalog {
            check_table_references(&mut report, &catalog_path, catalog, &table_ids);
        }
        self.check_stores(&mut report, &self.paths.stores(), &catalog_ids);
        self.check_stores(&mut report, &self.paths.stores_events(), &event_ids);
        self.check_statistics(&mut report);

        report
    }

    fn check_currencies(&self, report: &mut CheckReport) {
        let path = self.paths.currency();
        let Some(currencies) = load::<Vec<VirtualCurrency>>(report, &path) else {
            return;
        };

        let mut seen = BTreeSet::new();
        for currency in &currencies {
            let code = &currency.currency_code;
            if !CURRENCY_CODE.is_match(code) {
                report.push(
                    &path,
                    format!("CurrencyCode: {}", code),
                    "通貨コードは大文字2文字で指定してください",
                );
            }
            if !seen.insert(code.clone()) {
                report.push(
                    &path,
                    format!("CurrencyCode: {}", code),
                    "通貨コードが重複しています",
                );
            }
        }
    }

    /// Validate drop tables against the catalog and return their key set
    fn check_drop_tables(
        &self,
        report: &mut CheckReport,
        catalog_ids: &BTreeSet<String>,
    ) -> BTreeSet<String> {
        let path = self.paths.drop_tables();
        let Some(tables) = load::<DropTableFile>(report, &path) else {
            return BTreeSet::new();
        };

        let keys: BTreeSet<String> = tables.keys().cloned().collect();
        for (key, table) in &tables {
            if key != &table.table_id {
                report.push(
                    &path,
                    format!("TableId: {}", table.table_id),
                    format!("キー {} と TableId が一致していません", key),
                );
            }
            for node in &table.nodes {
                match node.result_item_type {
                    ResultItemType::ItemId if !catalog_ids.contains(&node.result_item) => {
                        report.push(
                            &path,
                            format!("{} -> {}", key, node.result_item),
                            "カタログに存在しない ItemId を参照しています",
                        );
                    }
                    ResultItemType::ResultTableId if !keys.contains(&node.result_item) => {
                        report.push(
                            &path,
                            format!("{} -> {}", key, node.result_item),
                            "存在しないドロップテーブルを参照しています",
                        );
                    }
                    _ => {}
                }
            }
        }
        keys
    }

    fn check_stores(
        &self,
        report: &mut CheckReport,
        path: &Path,
        catalog_ids: &BTreeSet<String>,
    ) {
        let Some(stores) = load::<Vec<Store>>(report, path) else {
            return;
        };

        let mut seen = BTreeSet::new();
        for store in &stores {
            if store.store_id.is_empty() {
                report.push(path, "StoreId", "StoreId が空です");
            }
            if !seen.insert(store.store_id.clone()) {
                report.push(
                    path,
                    format!("StoreId: {}", store.store_id),
                    "StoreId が重複しています",
                );
            }
            for entry in &store.store {
                if !catalog_ids.contains(&entry.item_id) {
                    report.push(
                        path,
                        format!("{} -> {}", store.store_id, entry.item_id),
                        "カタログに存在しない ItemId を参照しています",
                    );
                }
            }
        }
    }

    fn check_statistics(&self, report: &mut CheckReport) {
        let path = self.paths.statistics_definitions();
        let Some(definitions) = load::<Vec<StatisticDefinition>>(report, &path) else {
            return;
        };

        let mut seen = BTreeSet::new();
        for definition in &definitions {
            let name = &definition.statistic_name;
            if name.is_empty() {
                report.push(&path, "StatisticName", "StatisticName が空です");
                continue;
            }
            if !seen.insert(name.clone()) {
                report.push(
                    &path,
                    format!("StatisticName: {}", name),
                    "StatisticName が重複しています",
                );
            }
        }
    }
}

/// Validate item ids in one catalog file and return the set of ids
fn check_catalog_items(
    report: &mut CheckReport,
    path: &Path,
    file: Option<&CatalogFile>,
) -> BTreeSet<String> {
    let Some(file) = file else {
        return BTreeSet::new();
    };

    let mut ids = BTreeSet::new();
    for item in &file.catalog {
        if item.item_id.is_empty() {
            report.push(path, "ItemId", "ItemId が空です");
            continue;
        }
        if !ITEM_ID.is_match(&item.item_id) {
            report.push(
                path,
                format!("ItemId: {}", item.item_id),
                "ItemId に使用できない文字が含まれています",
            );
        }
        if !ids.insert(item.item_id.clone()) {
            report.push(
                path,
                format!("ItemId: {}", item.item_id),
                "ItemId が重複しています",
            );
        }
    }
    ids
}

/// Composite items must only name drop tables the table file defines
fn check_table_references(
    report: &mut CheckReport,
    path: &Path,
    file: &CatalogFile,
    table_ids: &BTreeSet<String>,
) {
    for item in &file.catalog {
        let mut referenced: Vec<&String> = Vec::new();
        if let Some(bundle) = &item.bundle {
            referenced.extend(bundle.bundled_result_tables.iter().flatten());
        }
        if let Some(container) = &item.container {
            referenced.extend(container.result_table_contents.iter().flatten());
        }
        for table in referenced {
            if !table_ids.contains(table) {
                report.push(
                    path,
                    format!("{} -> {}", item.item_id, table),
                    "DropTables に定義されていないテーブルを参照しています",
                );
            }
        }
    }
}

fn load<T: serde::de::DeserializeOwned>(report: &mut CheckReport, path: &Path) -> Option<T> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(error) => {
            report.push(path, "-", format!("ファイルを読み込めません: {}", error));
            return None;
        }
    };
    match serde_json::from_str(&contents) {
        Ok(parsed) => Some(parsed),
        Err(error) => {
            report.push(path, "-", format!("JSON の解析に失敗しました: {}", error));
            None
        }
    }
}
