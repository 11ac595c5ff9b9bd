//! Stitching of the up, core and down AS entry lists into per-AS records.
//!
//! Each list is walked from index 0 (the far end of its segment). Entries at the
//! junction between two segments appear once in each segment; the entry of the
//! earlier segment is held back in [`PendingCrossover`] and merged into the
//! record of the later segment's entry for the same AS.
//!
//! | list  | index 0                     | interior | last index                            |
//! |-------|-----------------------------|----------|---------------------------------------|
//! | up    | geo only (path origin)      | normal   | peering if the up segment peers, else held as `last_up` |
//! | core  | held as `last_core` (+ geo if it is the only entry) | normal | up crossover with `last_up` |
//! | down  | geo only (path destination) | normal   | peering, else core crossover with `last_core`, else up crossover with `last_up` |

use super::collect::AsEntryList;
use super::extract::{extract, extract_geo, ExtractionMode};
use super::types::RawPathMetadata;
use crate::segment::AsEntry;
use tracing::debug;

/// Entries held back at a segment boundary until the next segment is processed
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PendingCrossover<'a> {
    /// Junction entry of the up segment, unless the up segment peers out
    pub last_up: Option<&'a AsEntry>,
    /// Junction entry of the core segment towards the down segment
    pub last_core: Option<&'a AsEntry>,
}

/// Combine the gathered AS entries of one path into per-AS records
pub fn combine_segments(list: &AsEntryList<'_>) -> RawPathMetadata {
    let mut res = RawPathMetadata::new();

    let last_up = combine_up(&list.ups, list.up_peer, &mut res);
    let last_core = combine_core(&list.cores, last_up, &mut res);
    let pending = PendingCrossover { last_up, last_core };

    if list.downs.is_empty() {
        // path ends in the core: the held-back core entry is the destination
        if let Some(entry) = pending.last_core {
            if list.cores.len() > 1 {
                store_geo(entry, &mut res);
            }
        }
    }
    combine_down(&list.downs, list.down_peer, &pending, &mut res);

    res
}

/// Walk the up list. Returns the entry held back for a crossover, if any.
pub(crate) fn combine_up<'a>(
    ups: &[&'a AsEntry],
    up_peer: Option<usize>,
    res: &mut RawPathMetadata,
) -> Option<&'a AsEntry> {
    let mut last_up = None;
    let last = ups.len().saturating_sub(1);

    for (idx, &entry) in ups.iter().enumerate() {
        if idx == 0 {
            store_geo(entry, res);
            continue;
        }
        if idx < last {
            store(entry, Some(ExtractionMode::Normal), res);
        } else if let Some(peer_idx) = up_peer {
            store(entry, peering_mode(entry, peer_idx, true), res);
        } else {
            last_up = Some(entry);
        }
    }
    last_up
}

/// Walk the core list. Returns the entry held back for the down crossover.
pub(crate) fn combine_core<'a>(
    cores: &[&'a AsEntry],
    last_up: Option<&'a AsEntry>,
    res: &mut RawPathMetadata,
) -> Option<&'a AsEntry> {
    let mut last_core = None;
    let last = cores.len().saturating_sub(1);

    for (idx, &entry) in cores.iter().enumerate() {
        if idx == 0 {
            last_core = Some(entry);
            if cores.len() == 1 {
                store_geo(entry, res);
            }
            continue;
        }
        if idx < last {
            store(entry, Some(ExtractionMode::Normal), res);
        } else {
            // without an up segment this entry is the path origin
            store(entry, last_up.map(|old| ExtractionMode::UpCrossover { old }), res);
        }
    }
    last_core
}

/// Walk the down list, resolving its junction entry against the held-back entries
pub(crate) fn combine_down<'a>(
    downs: &[&'a AsEntry],
    down_peer: Option<usize>,
    pending: &PendingCrossover<'a>,
    res: &mut RawPathMetadata,
) {
    let last = downs.len().saturating_sub(1);

    for (idx, &entry) in downs.iter().enumerate() {
        if idx == 0 {
            store_geo(entry, res);
            continue;
        }
        if idx < last {
            store(entry, Some(ExtractionMode::Normal), res);
        } else {
            store(entry, resolve_down_junction(entry, down_peer, pending), res);
        }
    }
}

/// Extraction rule for the down segment's junction entry
pub(crate) fn resolve_down_junction<'a>(
    entry: &AsEntry,
    down_peer: Option<usize>,
    pending: &PendingCrossover<'a>,
) -> Option<ExtractionMode<'a>> {
    if let Some(peer_idx) = down_peer {
        return peering_mode(entry, peer_idx, false);
    }
    if let Some(old) = pending.last_core {
        return Some(ExtractionMode::CoreCrossover { old });
    }
    // up -> down shortcut
    pending.last_up.map(|old| ExtractionMode::UpCrossover { old })
}

fn peering_mode<'a>(
    entry: &AsEntry,
    peer_idx: usize,
    include_peer: bool,
) -> Option<ExtractionMode<'a>> {
    match entry.peer_hop_field(peer_idx) {
        Some(hf) => Some(ExtractionMode::Peering {
            peer_ifid: hf.cons_ingress,
            include_peer,
        }),
        None => {
            debug!(
                "AS {}: no hop entry at peering index {}",
                entry.ia, peer_idx
            );
            None
        }
    }
}

/// Store the record of `entry`; without a mode only its locations are kept
fn store(entry: &AsEntry, mode: Option<ExtractionMode<'_>>, res: &mut RawPathMetadata) {
    let md = match mode {
        Some(mode) => extract(entry, mode),
        None => extract_geo(entry),
    };
    if let Some(md) = md {
        res.insert(entry.ia, md);
    }
}

fn store_geo(entry: &AsEntry, res: &mut RawPathMetadata) {
    store(entry, None, res);
}
