//! Extraction of the egress-scoped extension from the operator configuration.
//!
//! Deduplication rule for non-peering interface pairs: the interface with the
//! lower IFID owns the pair. When building the record for egress interface `E`,
//! a non-peering sibling `S` is emitted only if `S > E`; the pair is therefore
//! stored once, in the record whose egress is the smaller of the two.
//! Peering siblings are emitted regardless of ordering, because each side of a
//! peering link is traversed from a different segment and needs its own copy.

use super::config::StaticInfoCfg;
use crate::segment::{
    BandwidthInfo, BandwidthPair, GeoCoordinates, GeoInfo, HopPair, HopsInfo, IfId, LatencyChild,
    LatencyInfo, LatencyPeer, LinkTypeInfo, LinkTypePeer, Location, StaticInfoExtension,
};
use std::collections::HashSet;

/// Whether the record of `egress` stores the non-peering pair (`egress`, `sibling`)
pub(crate) fn owns_pair(egress: IfId, sibling: IfId) -> bool {
    sibling > egress
}

/// Minimum of two bandwidth values where zero means "not configured"
fn min_configured(a: u32, b: u32) -> u32 {
    match (a, b) {
        (0, other) | (other, 0) => other,
        (a, b) => a.min(b),
    }
}

pub(crate) fn gather_latency(
    cfg: &StaticInfoCfg,
    peers: &HashSet<IfId>,
    egress: IfId,
    ingress: IfId,
) -> LatencyInfo {
    let Some(egress_cfg) = cfg.latency.get(&egress) else {
        return LatencyInfo::default();
    };

    let mut info = LatencyInfo {
        egress: egress_cfg.inter,
        ingress_to_egress: egress_cfg.intra.get(&ingress).copied().unwrap_or_default(),
        ..Default::default()
    };

    for (&sibling, &intra) in &egress_cfg.intra {
        if sibling == egress {
            continue;
        }
        if peers.contains(&sibling) {
            info.peers.push(LatencyPeer {
                ifid: sibling,
                inter: cfg
                    .latency
                    .get(&sibling)
                    .map(|c| c.inter)
                    .unwrap_or_default(),
                intra,
            });
        } else if owns_pair(egress, sibling) {
            info.children.push(LatencyChild {
                ifid: sibling,
                intra,
            });
        }
    }
    info
}

pub(crate) fn gather_bandwidth(
    cfg: &StaticInfoCfg,
    peers: &HashSet<IfId>,
    egress: IfId,
    ingress: IfId,
) -> BandwidthInfo {
    let Some(egress_cfg) = cfg.bandwidth.get(&egress) else {
        return BandwidthInfo::default();
    };

    let mut info = BandwidthInfo {
        egress: egress_cfg.inter,
        ingress_to_egress: egress_cfg.intra.get(&ingress).copied().unwrap_or_default(),
        ..Default::default()
    };

    for (&sibling, &intra) in &egress_cfg.intra {
        if sibling == egress {
            continue;
        }
        if peers.contains(&sibling) {
            // achievable rate across the peering link is bounded by both hops
            let peer_inter = cfg
                .bandwidth
                .get(&sibling)
                .map(|c| c.inter)
                .unwrap_or_default();
            info.peers.push(BandwidthPair {
                ifid: sibling,
                bandwidth: min_configured(intra, peer_inter),
            });
        } else if owns_pair(egress, sibling) {
            info.children.push(BandwidthPair {
                ifid: sibling,
                bandwidth: intra,
            });
        }
    }
    info
}

pub(crate) fn gather_link_type(
    cfg: &StaticInfoCfg,
    peers: &HashSet<IfId>,
    egress: IfId,
) -> LinkTypeInfo {
    LinkTypeInfo {
        egress: cfg.link_type.get(&egress).copied().unwrap_or_default(),
        peers: cfg
            .link_type
            .iter()
            .filter(|(ifid, _)| peers.contains(ifid))
            .map(|(&ifid, &link_type)| LinkTypePeer { ifid, link_type })
            .collect(),
    }
}

pub(crate) fn gather_hops(
    cfg: &StaticInfoCfg,
    peers: &HashSet<IfId>,
    egress: IfId,
    ingress: IfId,
) -> HopsInfo {
    let Some(egress_cfg) = cfg.hops.get(&egress) else {
        return HopsInfo::default();
    };

    let mut info = HopsInfo {
        ingress_to_egress: egress_cfg.intra.get(&ingress).copied().unwrap_or_default(),
        ..Default::default()
    };

    for (&sibling, &hops) in &egress_cfg.intra {
        if sibling == egress {
            continue;
        }
        if peers.contains(&sibling) {
            info.peers.push(HopPair {
                ifid: sibling,
                hops,
            });
        } else if owns_pair(egress, sibling) {
            info.children.push(HopPair {
                ifid: sibling,
                hops,
            });
        }
    }
    info
}

/// Group interface locations by exact (latitude, longitude, address) equality
pub(crate) fn gather_geo(cfg: &StaticInfoCfg) -> GeoInfo {
    let mut locations: Vec<Location> = Vec::new();
    for (&ifid, geo) in &cfg.geo {
        let coordinates = GeoCoordinates {
            latitude: geo.latitude,
            longitude: geo.longitude,
            address: geo.address.clone(),
        };
        match locations
            .iter_mut()
            .find(|loc| loc.coordinates == coordinates)
        {
            Some(loc) => loc.ifids.push(ifid),
            None => locations.push(Location {
                coordinates,
                ifids: vec![ifid],
            }),
        }
    }
    GeoInfo { locations }
}

/// Build the extension for one AS entry with the given egress and ingress
pub fn generate_static_info(
    cfg: &StaticInfoCfg,
    peers: &HashSet<IfId>,
    egress: IfId,
    ingress: IfId,
) -> StaticInfoExtension {
    StaticInfoExtension {
        latency: gather_latency(cfg, peers, egress, ingress),
        bandwidth: gather_bandwidth(cfg, peers, egress, ingress),
        link_type: gather_link_type(cfg, peers, egress),
        geo: gather_geo(cfg),
        hops: gather_hops(cfg, peers, egress, ingress),
        note: cfg.note.clone(),
    }
}
