//! Persistent GL code lookup table: item → account (+ PWC flag) and
//! site → site id.
//!
//! The registry is loaded once per run, mutated at most once (placeholder
//! registration of unmapped keys), and handed back to the external store
//! for persistence. Column labels on the persisted rows are load-bearing
//! and must not change.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::types::PLACEHOLDER_CODE;

/// Registry entry for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemEntry {
    /// GL account code; [`PLACEHOLDER_CODE`] until an operator supplies one.
    pub account: String,
    /// PWC cost-recovery flag ("x" marks eligible items).
    pub flag: Option<String>,
}

/// Persisted row of the item table.
///
/// The serde names are the exact column labels of the on-disk table;
/// external compatibility depends on them byte for byte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRow {
    #[serde(rename = "(Item) Name")]
    pub item_name: String,
    #[serde(rename = "GL Account #")]
    pub account: Option<String>,
    #[serde(rename = "PWC")]
    pub flag: Option<String>,
}

/// Persisted row of the site table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteRow {
    #[serde(rename = "Site")]
    pub site: String,
    #[serde(rename = "Site_ID")]
    pub site_id: Option<String>,
}

/// Item→account and site→site-id mappings with miss registration.
///
/// Keys are exact raw strings from the input — two spellings of the same
/// item are two keys. Ordered maps keep persistence and diagnostics
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct GlRegistry {
    items: BTreeMap<String, ItemEntry>,
    sites: BTreeMap<String, String>,
    dirty: bool,
}

impl GlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from persisted rows.
    ///
    /// Duplicate keys keep the first-seen row; blank codes become the
    /// placeholder so a half-filled table does not re-register its keys
    /// every run.
    pub fn from_rows(items: Vec<ItemRow>, sites: Vec<SiteRow>) -> Self {
        let mut registry = Self::new();
        for row in items {
            registry
                .items
                .entry(row.item_name)
                .or_insert_with(|| ItemEntry {
                    account: non_blank(row.account),
                    flag: row.flag.filter(|f| !f.trim().is_empty()),
                });
        }
        for row in sites {
            registry
                .sites
                .entry(row.site)
                .or_insert_with(|| non_blank(row.site_id));
        }
        registry
    }

    /// Item table in persistable row form.
    pub fn item_rows(&self) -> Vec<ItemRow> {
        self.items
            .iter()
            .map(|(name, entry)| ItemRow {
                item_name: name.clone(),
                account: Some(entry.account.clone()),
                flag: entry.flag.clone(),
            })
            .collect()
    }

    /// Site table in persistable row form.
    pub fn site_rows(&self) -> Vec<SiteRow> {
        self.sites
            .iter()
            .map(|(site, id)| SiteRow {
                site: site.clone(),
                site_id: Some(id.clone()),
            })
            .collect()
    }

    /// Insert or overwrite an item mapping. `None` code means placeholder.
    pub fn insert_item(&mut self, name: impl Into<String>, account: Option<&str>, flag: Option<&str>) {
        self.items.insert(
            name.into(),
            ItemEntry {
                account: account.unwrap_or(PLACEHOLDER_CODE).to_string(),
                flag: flag.map(str::to_string),
            },
        );
    }

    /// Insert or overwrite a site mapping. `None` id means placeholder.
    pub fn insert_site(&mut self, site: impl Into<String>, site_id: Option<&str>) {
        self.sites
            .insert(site.into(), site_id.unwrap_or(PLACEHOLDER_CODE).to_string());
    }

    /// Look up an item entry by its exact raw name.
    pub fn lookup_account(&self, item_name: &str) -> Option<&ItemEntry> {
        self.items.get(item_name)
    }

    /// Look up a site id by its exact raw site name.
    pub fn lookup_site(&self, site: &str) -> Option<&str> {
        self.sites.get(site).map(String::as_str)
    }

    /// Register placeholder entries for every item name not already present.
    ///
    /// First-write-wins: an existing key (including one inserted earlier in
    /// the same batch) is never overwritten. Returns the names actually
    /// added, in order.
    pub fn register_missing_items(&mut self, names: &BTreeSet<String>) -> Vec<String> {
        let mut added = Vec::new();
        for name in names {
            if !self.items.contains_key(name) {
                self.items.insert(
                    name.clone(),
                    ItemEntry {
                        account: PLACEHOLDER_CODE.to_string(),
                        flag: None,
                    },
                );
                added.push(name.clone());
            }
        }
        if !added.is_empty() {
            self.dirty = true;
        }
        added
    }

    /// Register placeholder entries for every site not already present.
    /// Same first-write-wins contract as [`register_missing_items`](Self::register_missing_items).
    pub fn register_missing_sites(&mut self, names: &BTreeSet<String>) -> Vec<String> {
        let mut added = Vec::new();
        for name in names {
            if !self.sites.contains_key(name) {
                self.sites.insert(name.clone(), PLACEHOLDER_CODE.to_string());
                added.push(name.clone());
            }
        }
        if !added.is_empty() {
            self.dirty = true;
        }
        added
    }

    /// True once any registration has happened; the caller persists the
    /// registry before normalization proceeds.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty marker after a successful persist.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn site_count(&self) -> usize {
        self.sites.len()
    }
}

fn non_blank(code: Option<String>) -> String {
    match code {
        Some(c) if !c.trim().is_empty() => c,
        _ => PLACEHOLDER_CODE.to_string(),
    }
}
