//! Path segment data model
//!
//! These types mirror the parts of a beaconed path segment that the static info
//! pipeline reads: the ordered AS entries, their hop fields, and the optional
//! static info extension each AS attached while the segment was built.
//!
//! Segments and their entries are produced elsewhere (beaconing, segment
//! storage); this crate only reads them.

pub mod ia;
pub mod staticinfo;

pub use ia::{IfId, IsdAsn};
pub use staticinfo::{
    BandwidthInfo, BandwidthPair, GeoCoordinates, GeoInfo, HopPair, HopsInfo, LatencyChild,
    LatencyInfo, LatencyPeer, LinkType, LinkTypeInfo, LinkTypePeer, Location,
    StaticInfoExtension,
};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Segment type as declared by the segment itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegType {
    Up,
    Core,
    Down,
}

impl fmt::Display for SegType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegType::Up => write!(f, "up"),
            SegType::Core => write!(f, "core"),
            SegType::Down => write!(f, "down"),
        }
    }
}

/// Interfaces in construction direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HopField {
    #[serde(default)]
    pub cons_ingress: IfId,
    #[serde(default)]
    pub cons_egress: IfId,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HopEntry {
    pub hop_field: HopField,
}

/// One AS entry of a path segment.
///
/// `hop_entries[0]` is the regular hop; further entries describe peering hops.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AsEntry {
    pub ia: IsdAsn,
    #[serde(default)]
    pub hop_entries: Vec<HopEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_info: Option<StaticInfoExtension>,
}

impl AsEntry {
    pub fn new(ia: IsdAsn, hop_field: HopField) -> Self {
        Self {
            ia,
            hop_entries: vec![HopEntry { hop_field }],
            static_info: None,
        }
    }

    pub fn with_static_info(mut self, ext: StaticInfoExtension) -> Self {
        self.static_info = Some(ext);
        self
    }

    pub fn with_peer_hop(mut self, hop_field: HopField) -> Self {
        self.hop_entries.push(HopEntry { hop_field });
        self
    }

    /// Hop field of the regular (non-peering) hop
    pub fn hop_field(&self) -> Option<&HopField> {
        self.hop_entries.first().map(|entry| &entry.hop_field)
    }

    pub fn peer_hop_field(&self, index: usize) -> Option<&HopField> {
        self.hop_entries.get(index).map(|entry| &entry.hop_field)
    }
}

/// A path segment as far as static info processing is concerned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSegment {
    pub seg_type: SegType,
    #[serde(default)]
    pub as_entries: Vec<AsEntry>,
}

impl PathSegment {
    pub fn new(seg_type: SegType, as_entries: Vec<AsEntry>) -> Self {
        Self {
            seg_type,
            as_entries,
        }
    }
}
