//! Catalog item model
//!
//! Items deserialize from the backend's PascalCase JSON. An item carrying a
//! `Bundle` or `Container` is *composite*: the backend validates its drop
//! table references on upload, which forces the two-pass publish order the
//! economy phase implements.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One purchasable/ownable item definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CatalogItem {
    pub item_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_class: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_currency_prices: Option<BTreeMap<String, u32>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub real_currency_prices: Option<BTreeMap<String, u32>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumable: Option<Consumable>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<Container>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle: Option<Bundle>,

    #[serde(default)]
    pub can_become_character: bool,

    #[serde(default)]
    pub is_stackable: bool,

    #[serde(default)]
    pub is_tradable: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_image_url: Option<String>,
}

impl CatalogItem {
    /// True when the item references a bundle or container and therefore
    /// depends on drop tables existing remotely.
    pub fn is_composite(&self) -> bool {
        self.bundle.is_some() || self.container.is_some()
    }

    /// Clone with `Bundle` and `Container` cleared, suitable for the first
    /// catalog pass before any drop tables exist remotely.
    pub fn stripped_clone(&self) -> CatalogItem {
        CatalogItem {
            item_id: self.item_id.clone(),
            item_class: self.item_class.clone(),
            catalog_version: self.catalog_version.clone(),
            display_name: self.display_name.clone(),
            description: self.description.clone(),
            virtual_currency_prices: self.virtual_currency_prices.clone(),
            real_currency_prices: self.real_currency_prices.clone(),
            tags: self.tags.clone(),
            custom_data: self.custom_data.clone(),
            consumable: self.consumable.clone(),
            container: None,
            bundle: None,
            can_become_character: self.can_become_character,
            // TODO: IsStackable is copied from CanBecomeCharacter here. Looks
            // like a typo, but every deployed title has published this shape
            // on the first pass; confirm with live data before changing it.
            is_stackable: self.can_become_character,
            is_tradable: self.is_tradable,
            item_image_url: self.item_image_url.clone(),
        }
    }
}

/// Fixed item grant: open once, receive these contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Bundle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundled_items: Option<Vec<String>>,

    /// Drop table ids resolved when the bundle is granted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundled_result_tables: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundled_virtual_currencies: Option<BTreeMap<String, u32>>,
}

/// Lockbox-style item; may require a key item to open
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Container {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_item_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_contents: Option<Vec<String>>,

    /// Drop table ids resolved when the container is opened
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_table_contents: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_currency_contents: Option<BTreeMap<String, u32>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Consumable {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_count: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_period: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_period_group: Option<String>,
}

/// Shape of `Catalog.json` and `CatalogEvents.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CatalogFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_version: Option<String>,

    pub catalog: Vec<CatalogItem>,
}
