//! Reduction of the per-AS breakdown to one path-level record.

use super::types::{DenseGeo, DenseLinkType, DenseNote, PathMetadata, RawPathMetadata};

impl RawPathMetadata {
    /// Condense the per-AS records into path totals and dense per-AS lists.
    ///
    /// Sums saturate instead of wrapping. The bandwidth bottleneck only
    /// considers reported (non-zero) values and is 0 if there are none.
    /// Lists are ordered by [`IsdAsn`](crate::segment::IsdAsn), not by path
    /// position. An AS only gets a list entry for data it actually reported:
    /// no link type, no locations or an empty note leave it out of that list.
    pub fn condense(&self) -> PathMetadata {
        let mut res = PathMetadata::default();
        let mut bottleneck: Option<u32> = None;

        for (ia, md) in self {
            if let Some(latency) = md.latency {
                res.total_latency = res.total_latency.saturating_add(latency.total());
            }
            if let Some(hops) = md.hops {
                res.total_hops = res.total_hops.saturating_add(hops as u16);
            }
            if let Some(local) = md.bandwidth.and_then(|bw| bw.local_min()) {
                bottleneck = Some(bottleneck.map_or(local, |b| b.min(local)));
            }
            if let Some(link) = md.link {
                res.link_types.push(DenseLinkType {
                    ia: *ia,
                    inter: link.inter,
                    peer: link.peer,
                });
            }
            if !md.geo.is_empty() {
                res.locations.push(DenseGeo {
                    ia: *ia,
                    router_locations: md.geo.clone(),
                });
            }
            match md.note.as_deref() {
                Some(note) if !note.is_empty() => res.notes.push(DenseNote {
                    ia: *ia,
                    note: note.to_string(),
                }),
                _ => {}
            }
        }

        res.bandwidth_bottleneck = bottleneck.unwrap_or_default();
        res
    }
}
