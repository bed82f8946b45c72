//! Two-pass economy publish plan
//!
//! Catalog items and drop tables reference each other: the backend rejects a
//! catalog update whose bundles/containers point at drop tables it has never
//! seen, and drop tables are keyed against a catalog version. The plan breaks
//! the cycle explicitly:
//!
//! 1. first pass: simple items plus *stripped clones* of composite items
//!    (bundle/container cleared), safe to upload before any drop table exists
//! 2. drop tables, then stores, against that catalog version
//! 3. second pass: the original composite items, references intact
//!
//! No composites means no second pass.

use crate::content::CatalogItem;

/// Ordered catalog passes for one economy publish
#[derive(Debug, Clone)]
pub struct EconomyPlan {
    /// Simple items in file order, followed by the stripped clones
    pub first_pass: Vec<CatalogItem>,

    /// Original composite items, re-published once drop tables exist
    pub second_pass: Vec<CatalogItem>,
}

impl EconomyPlan {
    pub fn build(items: Vec<CatalogItem>) -> Self {
        let mut first_pass = Vec::with_capacity(items.len());
        let mut clones = Vec::new();
        let mut second_pass = Vec::new();

        for item in items {
            if item.is_composite() {
                clones.push(item.stripped_clone());
                second_pass.push(item);
            } else {
                first_pass.push(item);
            }
        }

        first_pass.extend(clones);

        Self {
            first_pass,
            second_pass,
        }
    }

    pub fn needs_second_pass(&self) -> bool {
        !self.second_pass.is_empty()
    }
}
