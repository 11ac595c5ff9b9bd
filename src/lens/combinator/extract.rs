//! Per-AS extraction of the fields an AS entry contributes to a path.
//!
//! Which fields are relevant depends on where the entry sits in the path:
//! interior entries report ingress-to-egress values, while entries at a
//! segment crossover or peering hop report the value between the interfaces
//! actually used, looked up among the sibling arrays of the extension.
//! A failed lookup leaves that one field empty.

use super::types::{AsBandwidth, AsLatency, AsLink, AsMetadata};
use crate::segment::{
    AsEntry, BandwidthPair, HopPair, IfId, LatencyChild, LatencyPeer, LinkType, LinkTypePeer,
    StaticInfoExtension,
};
use tracing::debug;

/// Extraction rule for one AS entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExtractionMode<'a> {
    /// Interior AS: ingress-to-egress values
    Normal,
    /// AS at a peering hop, entered or left through `peer_ifid`.
    ///
    /// Only the originating side sets `include_peer`, so the peering link itself
    /// is counted once.
    Peering { peer_ifid: IfId, include_peer: bool },
    /// AS where an up segment meets a core segment, or a down segment via a
    /// shortcut. `old` is the up segment's entry for the same AS.
    UpCrossover { old: &'a AsEntry },
    /// AS where a core segment meets a down segment. `old` is the core
    /// segment's entry for the same AS.
    CoreCrossover { old: &'a AsEntry },
}

/// Sibling records that can be looked up by interface
trait Sibling {
    fn ifid(&self) -> IfId;
}

macro_rules! impl_sibling {
    ($($ty:ty),*) => {
        $(impl Sibling for $ty {
            fn ifid(&self) -> IfId {
                self.ifid
            }
        })*
    };
}

impl_sibling!(LatencyChild, LatencyPeer, BandwidthPair, HopPair, LinkTypePeer);

fn lookup<T: Sibling>(siblings: &[T], ifid: IfId) -> Option<&T> {
    siblings.iter().find(|s| s.ifid() == ifid)
}

/// Lookup of the intra-AS values between two interfaces of a crossover AS
struct CrossoverLookup<'a> {
    ext: &'a StaticInfoExtension,
    key: IfId,
    /// Record of the same AS scoped to `key`, searched for the other interface
    fallback: Option<(&'a StaticInfoExtension, IfId)>,
}

impl CrossoverLookup<'_> {
    fn latency(&self) -> Option<u16> {
        lookup(&self.ext.latency.children, self.key)
            .map(|c| c.intra)
            .or_else(|| {
                self.fallback
                    .and_then(|(ext, ifid)| lookup(&ext.latency.children, ifid))
                    .map(|c| c.intra)
            })
    }

    fn bandwidth(&self) -> Option<u32> {
        lookup(&self.ext.bandwidth.children, self.key)
            .map(|c| c.bandwidth)
            .or_else(|| {
                self.fallback
                    .and_then(|(ext, ifid)| lookup(&ext.bandwidth.children, ifid))
                    .map(|c| c.bandwidth)
            })
    }

    fn hops(&self) -> Option<u8> {
        lookup(&self.ext.hops.children, self.key)
            .map(|c| c.hops)
            .or_else(|| {
                self.fallback
                    .and_then(|(ext, ifid)| lookup(&ext.hops.children, ifid))
                    .map(|c| c.hops)
            })
    }
}

/// Extract the contribution of `entry` under the given mode.
///
/// Returns `None` if the entry carries no extension.
pub fn extract(entry: &AsEntry, mode: ExtractionMode<'_>) -> Option<AsMetadata> {
    let Some(ext) = entry.static_info.as_ref() else {
        debug!("AS {} carries no static info, skipping", entry.ia);
        return None;
    };

    let mut md = match mode {
        ExtractionMode::Normal => extract_normal(ext),
        ExtractionMode::Peering {
            peer_ifid,
            include_peer,
        } => extract_peering(entry, ext, peer_ifid, include_peer),
        ExtractionMode::UpCrossover { old } => extract_up_crossover(entry, ext, old),
        ExtractionMode::CoreCrossover { old } => extract_core_crossover(entry, ext, old),
    };

    // geo and note always describe the AS itself
    md.geo = ext.geo.coordinates();
    md.note = Some(ext.note.clone());
    Some(md)
}

/// Locations of an AS entry, nothing else
pub fn extract_geo(entry: &AsEntry) -> Option<AsMetadata> {
    entry
        .static_info
        .as_ref()
        .map(|ext| AsMetadata::geo_only(ext.geo.coordinates()))
}

fn extract_normal(ext: &StaticInfoExtension) -> AsMetadata {
    AsMetadata {
        latency: Some(AsLatency {
            intra: ext.latency.ingress_to_egress,
            inter: ext.latency.egress,
            peer: 0,
        }),
        bandwidth: Some(AsBandwidth {
            intra: ext.bandwidth.ingress_to_egress,
            inter: ext.bandwidth.egress,
        }),
        hops: Some(ext.hops.ingress_to_egress),
        link: Some(AsLink {
            inter: ext.link_type.egress,
            peer: LinkType::Unset,
        }),
        ..Default::default()
    }
}

fn extract_peering(
    entry: &AsEntry,
    ext: &StaticInfoExtension,
    peer_ifid: IfId,
    include_peer: bool,
) -> AsMetadata {
    let latency = lookup(&ext.latency.peers, peer_ifid).map(|p| AsLatency {
        intra: p.intra,
        inter: ext.latency.egress,
        peer: if include_peer { p.inter } else { 0 },
    });
    if latency.is_none() {
        debug!(
            "AS {}: no peering latency for interface {}",
            entry.ia, peer_ifid
        );
    }

    let peer_link = if include_peer {
        lookup(&ext.link_type.peers, peer_ifid)
            .map(|p| p.link_type)
            .unwrap_or_default()
    } else {
        LinkType::Unset
    };

    AsMetadata {
        latency,
        bandwidth: lookup(&ext.bandwidth.peers, peer_ifid).map(|p| AsBandwidth {
            intra: p.bandwidth,
            inter: ext.bandwidth.egress,
        }),
        hops: lookup(&ext.hops.peers, peer_ifid).map(|p| p.hops),
        link: Some(AsLink {
            inter: ext.link_type.egress,
            peer: peer_link,
        }),
        ..Default::default()
    }
}

fn extract_up_crossover(entry: &AsEntry, ext: &StaticInfoExtension, old: &AsEntry) -> AsMetadata {
    let old_ext = old.static_info.as_ref();
    let Some(old_egress) = old.hop_field().map(|hf| hf.cons_egress) else {
        debug!("AS {}: up crossover source has no hop field", entry.ia);
        return AsMetadata::default();
    };

    // a non-peering pair is stored under the lower IFID only, so the pair may
    // sit in the old record (scoped to old_egress) instead of the new one
    let fallback = match (old_ext, entry.hop_field()) {
        (Some(old_ext), Some(hf)) => Some((old_ext, hf.cons_egress)),
        _ => None,
    };
    let sibling = CrossoverLookup {
        ext,
        key: old_egress,
        fallback,
    };

    let latency = sibling.latency().map(|intra| AsLatency {
        intra,
        inter: ext.latency.egress,
        peer: old_ext.map(|o| o.latency.egress).unwrap_or_default(),
    });
    if latency.is_none() {
        debug!(
            "AS {}: no intra-AS latency towards interface {}",
            entry.ia, old_egress
        );
    }

    AsMetadata {
        latency,
        bandwidth: sibling.bandwidth().map(|intra| AsBandwidth {
            intra,
            inter: ext.bandwidth.egress,
        }),
        hops: sibling.hops(),
        link: Some(AsLink {
            inter: ext.link_type.egress,
            peer: old_ext.map(|o| o.link_type.egress).unwrap_or_default(),
        }),
        ..Default::default()
    }
}

fn extract_core_crossover(
    entry: &AsEntry,
    ext: &StaticInfoExtension,
    old: &AsEntry,
) -> AsMetadata {
    let Some(old_ingress) = old.hop_field().map(|hf| hf.cons_ingress) else {
        debug!("AS {}: core crossover source has no hop field", entry.ia);
        return AsMetadata::default();
    };
    let sibling = CrossoverLookup {
        ext,
        key: old_ingress,
        fallback: None,
    };

    let latency = sibling.latency().map(|intra| AsLatency {
        intra,
        inter: ext.latency.egress,
        peer: 0,
    });
    if latency.is_none() {
        debug!(
            "AS {}: no intra-AS latency towards interface {}",
            entry.ia, old_ingress
        );
    }

    AsMetadata {
        latency,
        bandwidth: sibling.bandwidth().map(|intra| AsBandwidth {
            intra,
            inter: ext.bandwidth.egress,
        }),
        hops: sibling.hops(),
        link: Some(AsLink {
            inter: ext.link_type.egress,
            peer: LinkType::Unset,
        }),
        ..Default::default()
    }
}
