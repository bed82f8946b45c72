//! Title-level content: key/value data, news, statistics, permissions,
//! cloud script, CDN bundle list

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `TitleData.json`: arbitrary key/value configuration for the title
pub type TitleDataMap = BTreeMap<String, String>;

/// `CdnData.json`: names of asset bundles to push to the CDN
pub type CdnBundleList = Vec<String>;

/// One news entry from `TitleNews.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TitleNewsItem {
    pub title: String,
    pub body: String,
}

/// How often a statistic's version rolls over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VersionChangeInterval {
    Never,
    Hour,
    Day,
    Week,
    Month,
}

/// How repeated submissions to a statistic combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregationMethod {
    Last,
    Min,
    Max,
    Sum,
}

/// One entry from `StatisticsDefinitions.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatisticDefinition {
    pub statistic_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_change_interval: Option<VersionChangeInterval>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation_method: Option<AggregationMethod>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionEffect {
    Allow,
    Deny,
}

/// One statement from `Permissions.json`, applied as the global policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PermissionStatement {
    pub action: String,
    pub effect: PermissionEffect,
    pub resource: String,

    /// Principal selector, passed through untouched
    pub principal: serde_json::Value,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<serde_json::Value>,
}

/// One server script file for the cloud script upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CloudScriptFile {
    pub filename: String,
    pub file_contents: String,
}
