//! Economy model: virtual currencies, drop tables, stores

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Virtual currency definition from `Currency.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VirtualCurrency {
    /// Two-letter uppercase code, e.g. "GM"
    pub currency_code: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_deposit: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recharge_rate: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub recharge_max: Option<i32>,
}

/// What a drop table node resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultItemType {
    ItemId,
    ResultTableId,
}

/// One weighted entry in a drop table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DropTableNode {
    pub result_item: String,
    pub result_item_type: ResultItemType,
    pub weight: u32,
}

/// Named weighted-random reward listing
///
/// `DropTables.json` is a map of table name to this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DropTable {
    pub table_id: String,
    pub nodes: Vec<DropTableNode>,
}

/// Keyed drop table file; BTreeMap keeps upload order deterministic
pub type DropTableFile = BTreeMap<String, DropTable>;

/// Per-item price override inside a store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StoreItem {
    pub item_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_currency_prices: Option<BTreeMap<String, u32>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub real_currency_prices: Option<BTreeMap<String, u32>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StoreMarketing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// One store listing from `Stores.json` / `StoresEvents.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Store {
    pub store_id: String,

    pub store: Vec<StoreItem>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub marketing_data: Option<StoreMarketing>,
}
