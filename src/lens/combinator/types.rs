//! Combinator lens types
//!
//! [`RawPathMetadata`] is the per-AS breakdown built while stitching segments;
//! [`PathMetadata`] is the condensed record handed to path lookup clients.

use crate::segment::{GeoCoordinates, IsdAsn, LinkType};
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Latency contribution of one AS, in milliseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsLatency {
    pub intra: u16,
    pub inter: u16,
    /// Inter-AS latency of the link folded in at a crossover or peering hop
    pub peer: u16,
}

impl AsLatency {
    pub fn total(&self) -> u32 {
        self.intra as u32 + self.inter as u32 + self.peer as u32
    }
}

/// Bandwidth contribution of one AS, in Kbit/s. Zero means not reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsBandwidth {
    pub intra: u32,
    pub inter: u32,
}

impl AsBandwidth {
    /// Smallest reported side, ignoring unreported (zero) sides
    pub fn local_min(&self) -> Option<u32> {
        [self.intra, self.inter]
            .into_iter()
            .filter(|bw| *bw > 0)
            .min()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsLink {
    pub inter: LinkType,
    pub peer: LinkType,
}

/// Everything one AS contributes to a path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AsMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency: Option<AsLatency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bandwidth: Option<AsBandwidth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hops: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<AsLink>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub geo: Vec<GeoCoordinates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl AsMetadata {
    /// Record carrying only the AS locations
    pub fn geo_only(geo: Vec<GeoCoordinates>) -> Self {
        Self {
            geo,
            ..Default::default()
        }
    }
}

/// Per-AS metadata of one path, keyed by AS identifier.
///
/// Paths are assumed loop-free. Should an AS appear twice, the later record
/// replaces the earlier one (last write wins).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPathMetadata {
    ases: BTreeMap<IsdAsn, AsMetadata>,
}

impl RawPathMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the record of an AS, replacing any earlier record of the same AS
    pub fn insert(&mut self, ia: IsdAsn, record: AsMetadata) {
        if self.ases.insert(ia, record).is_some() {
            debug!("AS {} visited twice on path, keeping the later record", ia);
        }
    }

    pub fn get(&self, ia: &IsdAsn) -> Option<&AsMetadata> {
        self.ases.get(ia)
    }

    pub fn len(&self) -> usize {
        self.ases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ases.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, IsdAsn, AsMetadata> {
        self.ases.iter()
    }

    /// One display row per AS
    pub fn rows(&self) -> Vec<AsMetadataRow> {
        self.iter().map(|(ia, md)| AsMetadataRow::new(ia, md)).collect()
    }
}

impl<'a> IntoIterator for &'a RawPathMetadata {
    type Item = (&'a IsdAsn, &'a AsMetadata);
    type IntoIter = btree_map::Iter<'a, IsdAsn, AsMetadata>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Table row for the per-AS breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "display", derive(tabled::Tabled))]
pub struct AsMetadataRow {
    pub ia: String,
    pub latency_ms: String,
    pub bandwidth_kbps: String,
    pub hops: String,
    pub link: String,
    pub locations: String,
    pub note: String,
}

impl AsMetadataRow {
    fn new(ia: &IsdAsn, md: &AsMetadata) -> Self {
        let dash = || "-".to_string();
        Self {
            ia: ia.to_string(),
            latency_ms: md
                .latency
                .map(|l| format!("{} ({}+{}+{})", l.total(), l.intra, l.inter, l.peer))
                .unwrap_or_else(dash),
            bandwidth_kbps: md
                .bandwidth
                .and_then(|bw| bw.local_min())
                .map(|bw| bw.to_string())
                .unwrap_or_else(dash),
            hops: md.hops.map(|h| h.to_string()).unwrap_or_else(dash),
            link: md
                .link
                .map(|l| match l.peer {
                    LinkType::Unset => l.inter.to_string(),
                    peer => format!("{}/{}", l.inter, peer),
                })
                .unwrap_or_else(dash),
            locations: md
                .geo
                .iter()
                .map(|g| g.to_string())
                .collect::<Vec<_>>()
                .join("; "),
            note: md.note.clone().unwrap_or_default(),
        }
    }
}

/// Link types of one AS, tagged with the AS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenseLinkType {
    pub ia: IsdAsn,
    pub inter: LinkType,
    pub peer: LinkType,
}

/// Router locations of one AS
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseGeo {
    pub ia: IsdAsn,
    pub router_locations: Vec<GeoCoordinates>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenseNote {
    pub ia: IsdAsn,
    pub note: String,
}

/// Condensed path metadata sent to path lookup clients
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathMetadata {
    /// Sum of all latency contributions, in milliseconds
    pub total_latency: u32,
    /// Sum of internal hop counts
    pub total_hops: u16,
    /// Smallest bandwidth along the path in Kbit/s, 0 if nothing was reported
    pub bandwidth_bottleneck: u32,
    pub link_types: Vec<DenseLinkType>,
    pub locations: Vec<DenseGeo>,
    pub notes: Vec<DenseNote>,
}

impl PathMetadata {
    /// One display row for this path, numbered `path`
    pub fn summary_row(&self, path: usize) -> PathSummaryRow {
        PathSummaryRow {
            path,
            latency_ms: self.total_latency,
            hops: self.total_hops,
            bottleneck_kbps: self.bandwidth_bottleneck,
            notes: self
                .notes
                .iter()
                .map(|n| format!("{}: {}", n.ia, n.note))
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}

/// Table row for the condensed metadata of several paths
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "display", derive(tabled::Tabled))]
pub struct PathSummaryRow {
    pub path: usize,
    pub latency_ms: u32,
    pub hops: u16,
    pub bottleneck_kbps: u32,
    pub notes: String,
}

impl fmt::Display for PathMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total latency:        {} ms", self.total_latency)?;
        writeln!(f, "Total hops:           {}", self.total_hops)?;
        writeln!(f, "Bandwidth bottleneck: {} Kbit/s", self.bandwidth_bottleneck)?;
        writeln!(f, "Link types:")?;
        for lt in &self.link_types {
            writeln!(f, "  {}: inter={} peer={}", lt.ia, lt.inter, lt.peer)?;
        }
        writeln!(f, "Locations:")?;
        for geo in &self.locations {
            let locs: Vec<String> = geo.router_locations.iter().map(|g| g.to_string()).collect();
            writeln!(f, "  {}: {}", geo.ia, locs.join("; "))?;
        }
        writeln!(f, "Notes:")?;
        for note in &self.notes {
            writeln!(f, "  {}: {}", note.ia, note.note)?;
        }
        Ok(())
    }
}
