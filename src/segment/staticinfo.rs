//! Static info extension attached to one AS entry.
//!
//! The record is scoped to the egress interface of the AS entry it belongs to.
//! Non-peering sibling values are only stored when the sibling IFID is larger
//! than the egress IFID, so every symmetric intra-AS pair appears once across
//! all extensions of an AS. Peering siblings are always stored, on both sides.

use super::IfId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Intra-AS value between the egress interface and a non-peering sibling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyChild {
    pub ifid: IfId,
    pub intra: u16,
}

/// Peering sibling: its own inter-AS latency plus the intra-AS latency to egress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyPeer {
    pub ifid: IfId,
    pub inter: u16,
    pub intra: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyInfo {
    /// Latency of the inter-AS link behind the egress interface
    pub egress: u16,
    pub ingress_to_egress: u16,
    #[serde(default)]
    pub children: Vec<LatencyChild>,
    #[serde(default)]
    pub peers: Vec<LatencyPeer>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandwidthPair {
    pub ifid: IfId,
    pub bandwidth: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandwidthInfo {
    pub egress: u32,
    pub ingress_to_egress: u32,
    #[serde(default)]
    pub children: Vec<BandwidthPair>,
    /// Bottleneck across the peering link: min(intra, peer inter)
    #[serde(default)]
    pub peers: Vec<BandwidthPair>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HopPair {
    pub ifid: IfId,
    pub hops: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HopsInfo {
    pub ingress_to_egress: u8,
    #[serde(default)]
    pub children: Vec<HopPair>,
    #[serde(default)]
    pub peers: Vec<HopPair>,
}

/// Kind of the physical link behind an interface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum LinkType {
    #[default]
    Unset,
    Direct,
    MultiHop,
    OpenNet,
}

impl From<&str> for LinkType {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "direct" => LinkType::Direct,
            "multihop" | "multi-hop" => LinkType::MultiHop,
            "opennet" | "open-net" => LinkType::OpenNet,
            _ => LinkType::Unset,
        }
    }
}

impl From<String> for LinkType {
    fn from(value: String) -> Self {
        LinkType::from(value.as_str())
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkType::Unset => write!(f, "unset"),
            LinkType::Direct => write!(f, "direct"),
            LinkType::MultiHop => write!(f, "multihop"),
            LinkType::OpenNet => write!(f, "opennet"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkTypePeer {
    pub ifid: IfId,
    pub link_type: LinkType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkTypeInfo {
    pub egress: LinkType,
    #[serde(default)]
    pub peers: Vec<LinkTypePeer>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinates {
    pub latitude: f32,
    pub longitude: f32,
    pub address: String,
}

impl fmt::Display for GeoCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4},{:.4}", self.latitude, self.longitude)?;
        if !self.address.is_empty() {
            write!(f, " ({})", self.address)?;
        }
        Ok(())
    }
}

/// One site of an AS together with every interface located there
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub coordinates: GeoCoordinates,
    pub ifids: Vec<IfId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoInfo {
    #[serde(default)]
    pub locations: Vec<Location>,
}

impl GeoInfo {
    /// Site coordinates without the interface grouping
    pub fn coordinates(&self) -> Vec<GeoCoordinates> {
        self.locations
            .iter()
            .map(|loc| loc.coordinates.clone())
            .collect()
    }
}

/// The static info extension of one AS entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticInfoExtension {
    #[serde(default)]
    pub latency: LatencyInfo,
    #[serde(default)]
    pub bandwidth: BandwidthInfo,
    #[serde(default)]
    pub link_type: LinkTypeInfo,
    #[serde(default)]
    pub geo: GeoInfo,
    #[serde(default)]
    pub hops: HopsInfo,
    #[serde(default)]
    pub note: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_type_from_str() {
        assert_eq!(LinkType::from("direct"), LinkType::Direct);
        assert_eq!(LinkType::from("MultiHop"), LinkType::MultiHop);
        assert_eq!(LinkType::from("multi-hop"), LinkType::MultiHop);
        assert_eq!(LinkType::from("opennet"), LinkType::OpenNet);
        assert_eq!(LinkType::from("carrier pigeon"), LinkType::Unset);
    }

    #[test]
    fn test_link_type_serde() {
        assert_eq!(
            serde_json::to_string(&LinkType::MultiHop).unwrap(),
            "\"multihop\""
        );
        let lt: LinkType = serde_json::from_str("\"Open-Net\"").unwrap();
        assert_eq!(lt, LinkType::OpenNet);
    }

    #[test]
    fn test_extension_defaults_from_empty_json() {
        let ext: StaticInfoExtension = serde_json::from_str("{}").unwrap();
        assert_eq!(ext, StaticInfoExtension::default());
    }

    #[test]
    fn test_geo_coordinates_display() {
        let coords = GeoCoordinates {
            latitude: 47.0,
            longitude: 8.0,
            address: "Zurich".to_string(),
        };
        assert_eq!(coords.to_string(), "47.0000,8.0000 (Zurich)");
    }
}
