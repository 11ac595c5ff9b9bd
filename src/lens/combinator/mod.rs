//! Combinator lens (decode side)
//!
//! Reads the static info extensions along a solved end-to-end path and merges
//! them into one [`PathMetadata`] record:
//!
//! 1. [`AsEntryList::gather`] sorts the used AS entries by segment type,
//! 2. [`combine_segments`] extracts what each AS contributes, handling the
//!    junctions between segments,
//! 3. [`RawPathMetadata::condense`] reduces the per-AS records to path totals.
//!
//! Missing or inconsistent data never fails the computation; it only leaves the
//! affected AS fields empty.
//!
//! # Example
//!
//! ```rust,ignore
//! use pathmeta::lens::combinator::CombinatorLens;
//!
//! let lens = CombinatorLens::new();
//! let solutions = lens.load_solutions("paths.json")?;
//! for md in lens.metadata_batch(&solutions) {
//!     println!("{}", md);
//! }
//! ```

pub mod args;
pub mod collect;
pub mod combine;
mod condense;
pub mod extract;
pub mod types;

pub use args::CombineArgs;
pub use collect::{AsEntryList, Edge, PathSolution, SolutionEdge};
pub use combine::{combine_segments, PendingCrossover};
pub use extract::{extract, extract_geo, ExtractionMode};
pub use types::{
    AsBandwidth, AsLatency, AsLink, AsMetadata, AsMetadataRow, DenseGeo, DenseLinkType,
    DenseNote, PathMetadata, PathSummaryRow, RawPathMetadata,
};

use anyhow::{anyhow, Result};
use rayon::prelude::*;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

#[cfg(feature = "display")]
use crate::lens::utils::OutputFormat;

/// Input file layout: a single solution or a list of them
#[derive(Deserialize)]
#[serde(untagged)]
enum SolutionsFile {
    Many(Vec<PathSolution>),
    One(PathSolution),
}

/// Combinator lens
///
/// Stateless; all methods only read the path solutions handed to them.
#[derive(Debug, Default, Clone, Copy)]
pub struct CombinatorLens;

impl CombinatorLens {
    pub fn new() -> Self {
        Self
    }

    /// Per-AS breakdown of one path
    pub fn combine(&self, solution: &PathSolution) -> RawPathMetadata {
        let list = AsEntryList::gather(solution);
        debug!(
            "gathered {} up, {} core, {} down AS entries",
            list.ups.len(),
            list.cores.len(),
            list.downs.len()
        );
        combine_segments(&list)
    }

    /// Condensed metadata of one path
    pub fn metadata(&self, solution: &PathSolution) -> PathMetadata {
        self.combine(solution).condense()
    }

    /// Condensed metadata of many paths, computed in parallel.
    ///
    /// The output keeps the order of `solutions`.
    pub fn metadata_batch(&self, solutions: &[PathSolution]) -> Vec<PathMetadata> {
        solutions.par_iter().map(|s| self.metadata(s)).collect()
    }

    /// Load path solutions from a JSON file holding one solution or an array
    pub fn load_solutions<P: AsRef<Path>>(&self, path: P) -> Result<Vec<PathSolution>> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("unable to read {}: {}", path.display(), e))?;
        let solutions = Self::parse_solutions(&raw)
            .map_err(|e| anyhow!("invalid path solutions in {}: {}", path.display(), e))?;
        info!(
            "loaded {} path solution(s) from {}",
            solutions.len(),
            path.display()
        );
        Ok(solutions)
    }

    /// Parse path solutions from a JSON string holding one solution or an array
    pub fn parse_solutions(raw: &str) -> Result<Vec<PathSolution>, serde_json::Error> {
        Ok(match serde_json::from_str::<SolutionsFile>(raw)? {
            SolutionsFile::Many(v) => v,
            SolutionsFile::One(s) => vec![s],
        })
    }

    // =========================================================================
    // Formatting
    // =========================================================================

    /// Format the condensed metadata of several paths
    #[cfg(feature = "display")]
    pub fn format_metadata(&self, paths: &[PathMetadata], format: &OutputFormat) -> String {
        use tabled::settings::Style;
        use tabled::Table;

        let rows = || {
            paths
                .iter()
                .enumerate()
                .map(|(i, p)| p.summary_row(i))
                .collect::<Vec<_>>()
        };

        match format {
            OutputFormat::Json => serde_json::to_string(paths).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(paths).unwrap_or_default(),
            OutputFormat::JsonLine => json_lines(paths),
            OutputFormat::Table => Table::new(rows()).with(Style::rounded()).to_string(),
            OutputFormat::Markdown => Table::new(rows()).with(Style::markdown()).to_string(),
            OutputFormat::Psv => {
                let mut lines = vec!["path|latency_ms|hops|bottleneck_kbps|notes".to_string()];
                lines.extend(rows().into_iter().map(|r| {
                    format!(
                        "{}|{}|{}|{}|{}",
                        r.path, r.latency_ms, r.hops, r.bottleneck_kbps, r.notes
                    )
                }));
                lines.join("\n")
            }
        }
    }

    /// Format the per-AS breakdown of one path
    #[cfg(feature = "display")]
    pub fn format_breakdown(&self, raw: &RawPathMetadata, format: &OutputFormat) -> String {
        use tabled::settings::Style;
        use tabled::Table;

        match format {
            OutputFormat::Json => serde_json::to_string(raw).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(raw).unwrap_or_default(),
            OutputFormat::JsonLine => json_lines(&raw.rows()),
            OutputFormat::Table => Table::new(raw.rows()).with(Style::rounded()).to_string(),
            OutputFormat::Markdown => Table::new(raw.rows()).with(Style::markdown()).to_string(),
            OutputFormat::Psv => {
                let mut lines =
                    vec!["ia|latency_ms|bandwidth_kbps|hops|link|locations|note".to_string()];
                lines.extend(raw.rows().into_iter().map(|r| {
                    format!(
                        "{}|{}|{}|{}|{}|{}|{}",
                        r.ia, r.latency_ms, r.bandwidth_kbps, r.hops, r.link, r.locations, r.note
                    )
                }));
                lines.join("\n")
            }
        }
    }
}

#[cfg(feature = "display")]
fn json_lines<T: serde::Serialize>(items: &[T]) -> String {
    items
        .iter()
        .filter_map(|item| serde_json::to_string(item).ok())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lens::staticinfo::{StaticInfoCfg, StaticInfoExtendArgs, StaticInfoLens};
    use crate::segment::{
        AsEntry, BandwidthInfo, HopField, HopsInfo, IfId, IsdAsn, LatencyChild, LatencyInfo,
        LinkType, LinkTypeInfo, PathSegment, SegType, StaticInfoExtension,
    };
    use std::io::Write;

    fn hop(ingress: u64, egress: u64) -> HopField {
        HopField {
            cons_ingress: IfId(ingress),
            cons_egress: IfId(egress),
        }
    }

    fn ext(egress: u16, in_to_out: u16, bw: u32, hops: u8) -> StaticInfoExtension {
        StaticInfoExtension {
            latency: LatencyInfo {
                egress,
                ingress_to_egress: in_to_out,
                ..Default::default()
            },
            bandwidth: BandwidthInfo {
                egress: bw,
                ingress_to_egress: bw,
                ..Default::default()
            },
            hops: HopsInfo {
                ingress_to_egress: hops,
                ..Default::default()
            },
            link_type: LinkTypeInfo {
                egress: LinkType::Direct,
                peers: vec![],
            },
            note: String::new(),
            ..Default::default()
        }
    }

    fn entry(asn: u64, hf: HopField, ext: StaticInfoExtension) -> AsEntry {
        AsEntry::new(IsdAsn::new(1, asn), hf).with_static_info(ext)
    }

    /// Path 1 -> 2 -> 3 -> 10 -> 20 over an up, a core and a down segment.
    /// Entries are listed in construction order.
    fn solution() -> PathSolution {
        let mut core_junction = ext(25, 0, 0, 0);
        core_junction.latency.children.push(LatencyChild {
            ifid: IfId(7),
            intra: 12,
        });
        let mut down_junction = ext(8, 0, 0, 0);
        down_junction.latency.children.push(LatencyChild {
            ifid: IfId(11),
            intra: 4,
        });

        let mut sol = PathSolution::default();
        sol.push(
            PathSegment::new(
                SegType::Up,
                vec![
                    entry(3, hop(0, 7), ext(15, 0, 0, 0)),
                    entry(2, hop(1, 2), ext(10, 3, 900, 2)),
                    entry(1, hop(5, 0), ext(0, 0, 0, 0)),
                ],
            ),
            Edge::default(),
        );
        sol.push(
            PathSegment::new(
                SegType::Core,
                vec![
                    entry(3, hop(0, 6), core_junction),
                    entry(10, hop(11, 0), ext(30, 0, 0, 0)),
                ],
            ),
            Edge::default(),
        );
        sol.push(
            PathSegment::new(
                SegType::Down,
                vec![
                    entry(10, hop(0, 12), down_junction),
                    entry(20, hop(13, 0), ext(0, 0, 0, 0)),
                ],
            ),
            Edge::default(),
        );
        sol
    }

    #[test]
    fn test_combine_full_path() {
        let raw = CombinatorLens::new().combine(&solution());

        assert_eq!(raw.len(), 5);
        assert_eq!(
            raw.get(&IsdAsn::new(1, 3)).unwrap().latency,
            Some(AsLatency {
                intra: 12,
                inter: 25,
                peer: 15
            })
        );
        assert_eq!(
            raw.get(&IsdAsn::new(1, 10)).unwrap().latency,
            Some(AsLatency {
                intra: 4,
                inter: 8,
                peer: 0
            })
        );
        assert!(raw.get(&IsdAsn::new(1, 1)).unwrap().latency.is_none());
        assert!(raw.get(&IsdAsn::new(1, 20)).unwrap().latency.is_none());
    }

    #[test]
    fn test_metadata() {
        let md = CombinatorLens::new().metadata(&solution());
        // AS 2: 3 + 10, AS 3: 12 + 25 + 15, AS 10: 4 + 8
        assert_eq!(md.total_latency, 77);
        assert_eq!(md.total_hops, 2);
        assert_eq!(md.bandwidth_bottleneck, 900);
        assert!(md.notes.is_empty());
        assert_eq!(md.link_types.len(), 3);
    }

    #[test]
    fn test_metadata_empty_path() {
        let md = CombinatorLens::new().metadata(&PathSolution::default());
        assert_eq!(md, PathMetadata::default());
    }

    #[test]
    fn test_single_as_up_segment() {
        let mut sol = PathSolution::default();
        sol.push(
            PathSegment::new(
                SegType::Up,
                vec![AsEntry::new(IsdAsn::new(1, 1), hop(0, 1))],
            ),
            Edge::default(),
        );
        assert!(CombinatorLens::new().combine(&sol).is_empty());
    }

    fn staticinfo_lens(raw: &str) -> StaticInfoLens {
        StaticInfoLens::new(StaticInfoCfg::from_json_str(raw).unwrap())
    }

    #[test]
    fn test_up_down_shortcut() {
        // AS 5 joins an up and a down segment through interfaces 1 and 2; the
        // pair (1, 2) is only stored in the extension scoped to interface 1
        let lens = staticinfo_lens(
            r#"{
            "Latency": {
                "1": {"Inter": 10, "Intra": {"2": 5}},
                "2": {"Inter": 20, "Intra": {"1": 5}}
            },
            "Bandwidth": {
                "1": {"Inter": 1000, "Intra": {"2": 300}},
                "2": {"Inter": 2000, "Intra": {"1": 300}}
            },
            "Hops": {"1": {"Intra": {"2": 3}}, "2": {"Intra": {"1": 3}}}
        }"#,
        );
        let up_ext = lens.extend(&StaticInfoExtendArgs::new(IfId(1), IfId(0)));
        let down_ext = lens.extend(&StaticInfoExtendArgs::new(IfId(2), IfId(0)));
        assert!(down_ext.latency.children.is_empty());

        let mut sol = PathSolution::default();
        sol.push(
            PathSegment::new(
                SegType::Up,
                vec![
                    entry(5, hop(0, 1), up_ext),
                    AsEntry::new(IsdAsn::new(1, 4), hop(3, 0)),
                ],
            ),
            Edge::default(),
        );
        sol.push(
            PathSegment::new(
                SegType::Down,
                vec![
                    entry(5, hop(0, 2), down_ext),
                    AsEntry::new(IsdAsn::new(1, 6), hop(7, 0)),
                ],
            ),
            Edge::default(),
        );

        let lens = CombinatorLens::new();
        let raw = lens.combine(&sol);
        assert_eq!(raw.len(), 1);
        assert_eq!(
            raw.get(&IsdAsn::new(1, 5)).unwrap().latency,
            Some(AsLatency {
                intra: 5,
                inter: 20,
                peer: 10
            })
        );

        let md = lens.metadata(&sol);
        assert_eq!(md.total_latency, 35);
        assert_eq!(md.total_hops, 3);
        assert_eq!(md.bandwidth_bottleneck, 300);
    }

    #[test]
    fn test_peering_path() {
        // AS 7 leaves its up segment over peering interface 9, AS 8 enters its
        // down segment over peering interface 8; only the up side counts the link
        let up_lens = staticinfo_lens(
            r#"{
            "Latency": {
                "1": {"Inter": 7, "Intra": {"2": 2, "9": 4}},
                "2": {"Inter": 3, "Intra": {"1": 2, "9": 5}},
                "9": {"Inter": 50, "Intra": {"1": 4, "2": 5}}
            },
            "Linktype": {"1": "direct", "9": "opennet"}
        }"#,
        );
        let down_lens = staticinfo_lens(
            r#"{
            "Latency": {
                "1": {"Inter": 6, "Intra": {"2": 1, "8": 11}},
                "2": {"Inter": 9, "Intra": {"1": 1, "8": 12}},
                "8": {"Inter": 40, "Intra": {"1": 11, "2": 12}}
            }
        }"#,
        );
        let up_ext =
            up_lens.extend(&StaticInfoExtendArgs::new(IfId(1), IfId(2)).with_peer(IfId(9)));
        let down_ext =
            down_lens.extend(&StaticInfoExtendArgs::new(IfId(1), IfId(2)).with_peer(IfId(8)));

        let peering = Edge {
            shortcut: 1,
            peer: Some(1),
        };
        let mut sol = PathSolution::default();
        sol.push(
            PathSegment::new(
                SegType::Up,
                vec![
                    AsEntry::new(IsdAsn::new(1, 100), hop(0, 4)),
                    entry(7, hop(2, 1), up_ext).with_peer_hop(hop(9, 1)),
                    AsEntry::new(IsdAsn::new(1, 70), hop(3, 0)),
                ],
            ),
            peering,
        );
        sol.push(
            PathSegment::new(
                SegType::Down,
                vec![
                    AsEntry::new(IsdAsn::new(1, 200), hop(0, 4)),
                    entry(8, hop(2, 1), down_ext).with_peer_hop(hop(8, 1)),
                    AsEntry::new(IsdAsn::new(1, 80), hop(3, 0)),
                ],
            ),
            peering,
        );

        let lens = CombinatorLens::new();
        let raw = lens.combine(&sol);
        let up_side = raw.get(&IsdAsn::new(1, 7)).unwrap();
        assert_eq!(
            up_side.latency,
            Some(AsLatency {
                intra: 4,
                inter: 7,
                peer: 50
            })
        );
        assert_eq!(up_side.link.unwrap().peer, LinkType::OpenNet);
        let down_side = raw.get(&IsdAsn::new(1, 8)).unwrap();
        assert_eq!(
            down_side.latency,
            Some(AsLatency {
                intra: 11,
                inter: 6,
                peer: 0
            })
        );
        assert_eq!(down_side.link.unwrap().peer, LinkType::Unset);

        assert_eq!(lens.metadata(&sol).total_latency, 78);
    }

    #[test]
    fn test_metadata_batch_keeps_order() {
        let lens = CombinatorLens::new();
        let solutions = vec![solution(), PathSolution::default(), solution()];
        let res = lens.metadata_batch(&solutions);
        assert_eq!(res.len(), 3);
        assert_eq!(res[0].total_latency, 77);
        assert_eq!(res[1].total_latency, 0);
        assert_eq!(res[2], res[0]);
    }

    #[test]
    fn test_parse_solutions_single_and_array() {
        let one = serde_json::to_string(&solution()).unwrap();
        assert_eq!(CombinatorLens::parse_solutions(&one).unwrap().len(), 1);

        let many = serde_json::to_string(&vec![solution(), solution()]).unwrap();
        assert_eq!(CombinatorLens::parse_solutions(&many).unwrap().len(), 2);

        assert!(CombinatorLens::parse_solutions("{\"bogus\": 1}").is_err());
    }

    #[test]
    fn test_load_solutions() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&vec![solution()]).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let lens = CombinatorLens::new();
        let solutions = lens.load_solutions(file.path()).unwrap();
        assert_eq!(solutions, vec![solution()]);

        assert!(lens.load_solutions("/nonexistent/paths.json").is_err());
    }

    #[cfg(feature = "display")]
    #[test]
    fn test_format_metadata() {
        let lens = CombinatorLens::new();
        let paths = vec![lens.metadata(&solution())];

        let psv = lens.format_metadata(&paths, &OutputFormat::Psv);
        assert_eq!(
            psv,
            "path|latency_ms|hops|bottleneck_kbps|notes\n0|77|2|900|"
        );

        let json = lens.format_metadata(&paths, &OutputFormat::Json);
        let back: Vec<PathMetadata> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, paths);

        assert!(lens
            .format_metadata(&paths, &OutputFormat::Table)
            .contains("latency_ms"));
    }

    #[cfg(feature = "display")]
    #[test]
    fn test_format_breakdown() {
        let lens = CombinatorLens::new();
        let raw = lens.combine(&solution());

        let psv = lens.format_breakdown(&raw, &OutputFormat::Psv);
        let lines: Vec<&str> = psv.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[1].starts_with("1-1|-|"));

        let jsonl = lens.format_breakdown(&raw, &OutputFormat::JsonLine);
        assert_eq!(jsonl.lines().count(), 5);
    }
}
