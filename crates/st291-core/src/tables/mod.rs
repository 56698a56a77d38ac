//! Code -> description lookups.
//!
//! Tables are plain data injected into decode and the display view; nothing
//! here is process-global. `StaticTable::builtin()` carries the common
//! ST 291 registrations; callers can build their own table or implement
//! `DescriptionTable` directly.

mod builtin;

use std::collections::BTreeMap;

/// Description registered for a DID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DidEntry {
    /// One description for every SDID (type 1 packets, or single-use DIDs).
    Description(String),
    /// Descriptions keyed by SDID.
    BySdid(BTreeMap<u8, String>),
}

pub trait DescriptionTable {
    fn lookup_did(&self, did: u8) -> Option<&DidEntry>;

    /// Description of a raw value for a named view field (e.g. "Line Number").
    fn lookup_value(&self, field: &str, raw: u64) -> Option<&str>;
}

/// Resolve the packet description for a DID/SDID pair.
///
/// An SDID-keyed entry only matches its exact SDID; a plain DID entry matches
/// every SDID. Anything else yields an empty string.
///
/// # Examples
/// ```
/// use st291_core::{StaticTable, packet_info};
///
/// let table = StaticTable::new()
///     .with_sdid(0x41, 0x07, "SCTE-104")
///     .with_did(0x60, "Ancillary Time Code");
/// assert_eq!(packet_info(&table, 0x41, 0x07), "SCTE-104");
/// assert_eq!(packet_info(&table, 0x41, 0x99), "");
/// assert_eq!(packet_info(&table, 0x60, 0x12), "Ancillary Time Code");
/// assert_eq!(packet_info(&table, 0x99, 0x00), "");
/// ```
pub fn packet_info<T: DescriptionTable + ?Sized>(table: &T, did: u8, sdid: u8) -> String {
    match table.lookup_did(did) {
        Some(DidEntry::Description(text)) => text.clone(),
        Some(DidEntry::BySdid(by_sdid)) => by_sdid.get(&sdid).cloned().unwrap_or_default(),
        None => String::new(),
    }
}

/// Owned, builder-style `DescriptionTable`.
#[derive(Debug, Clone, Default)]
pub struct StaticTable {
    dids: BTreeMap<u8, DidEntry>,
    values: BTreeMap<String, BTreeMap<u64, String>>,
}

impl StaticTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registrations shipped with the crate.
    pub fn builtin() -> Self {
        builtin::table()
    }

    /// Describe every SDID of `did` with one text (replaces any SDID map).
    pub fn with_did(mut self, did: u8, description: impl Into<String>) -> Self {
        self.dids
            .insert(did, DidEntry::Description(description.into()));
        self
    }

    /// Describe one DID/SDID pair (replaces a plain DID description).
    pub fn with_sdid(mut self, did: u8, sdid: u8, description: impl Into<String>) -> Self {
        let entry = self
            .dids
            .entry(did)
            .or_insert_with(|| DidEntry::BySdid(BTreeMap::new()));
        if !matches!(entry, DidEntry::BySdid(_)) {
            *entry = DidEntry::BySdid(BTreeMap::new());
        }
        if let DidEntry::BySdid(by_sdid) = entry {
            by_sdid.insert(sdid, description.into());
        }
        self
    }

    pub fn with_value(
        mut self,
        field: impl Into<String>,
        raw: u64,
        description: impl Into<String>,
    ) -> Self {
        self.values
            .entry(field.into())
            .or_default()
            .insert(raw, description.into());
        self
    }
}

impl DescriptionTable for StaticTable {
    fn lookup_did(&self, did: u8) -> Option<&DidEntry> {
        self.dids.get(&did)
    }

    fn lookup_value(&self, field: &str, raw: u64) -> Option<&str> {
        self.values
            .get(field)
            .and_then(|by_value| by_value.get(&raw))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::{DescriptionTable, DidEntry, StaticTable, packet_info};

    fn table() -> StaticTable {
        StaticTable::new()
            .with_sdid(0x41, 0x07, "SCTE-104")
            .with_did(0x60, "Ancillary Time Code")
    }

    #[test]
    fn exact_pair_wins() {
        assert_eq!(packet_info(&table(), 0x41, 0x07), "SCTE-104");
    }

    #[test]
    fn unknown_sdid_under_sdid_map_is_empty() {
        assert_eq!(packet_info(&table(), 0x41, 0x99), "");
    }

    #[test]
    fn did_description_covers_any_sdid() {
        assert_eq!(packet_info(&table(), 0x60, 0x00), "Ancillary Time Code");
        assert_eq!(packet_info(&table(), 0x60, 0xFF), "Ancillary Time Code");
    }

    #[test]
    fn unknown_did_is_empty() {
        assert_eq!(packet_info(&table(), 0x99, 0x00), "");
    }

    #[test]
    fn sdid_replaces_plain_description() {
        let table = StaticTable::new()
            .with_did(0x62, "Old")
            .with_sdid(0x62, 0x01, "Program Description");
        assert!(matches!(
            table.lookup_did(0x62),
            Some(DidEntry::BySdid(map)) if map.len() == 1
        ));
    }

    #[test]
    fn value_lookup_by_field() {
        let table = StaticTable::new().with_value("C", 1, "Color-difference");
        assert_eq!(table.lookup_value("C", 1), Some("Color-difference"));
        assert_eq!(table.lookup_value("C", 0), None);
        assert_eq!(table.lookup_value("S", 1), None);
    }

    #[test]
    fn builtin_knows_scte104() {
        let table = StaticTable::builtin();
        assert_eq!(packet_info(&table, 0x41, 0x07), "ANSI/SCTE 104 messages");
        assert_eq!(
            table.lookup_value("Line Number", 0x7FF),
            Some("Without specific line location")
        );
    }
}
