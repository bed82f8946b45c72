//! Serde data model for the content files and the admin API wire shapes
//!
//! All types round-trip the backend's PascalCase JSON.

pub mod catalog;
pub mod economy;
pub mod title;

pub use catalog::{Bundle, CatalogFile, CatalogItem, Consumable, Container};
pub use economy::{
    DropTable, DropTableFile, DropTableNode, ResultItemType, Store, StoreItem, StoreMarketing,
    VirtualCurrency,
};
pub use title::{
    AggregationMethod, CdnBundleList, CloudScriptFile, PermissionEffect, PermissionStatement,
    StatisticDefinition, TitleDataMap, TitleNewsItem, VersionChangeInterval,
};
