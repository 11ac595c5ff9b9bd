#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

//! Pathmeta - per-AS static info for path-aware routing
//!
//! Pathmeta computes, attaches and reconstructs the static telemetry an AS
//! publishes about itself (latency, bandwidth, internal hops, link types,
//! router locations, operator notes) along path segments.
//!
//! - The **encode side** turns an operator's interface configuration into the
//!   compact extension one AS entry carries while a segment is built.
//! - The **decode side** reads the extensions along a solved end-to-end path
//!   (up, core and down segments, possibly with shortcuts and peering links)
//!   and condenses them into path-level metadata.
//!
//! # Feature Flags
//!
//! | Feature | Description | Key Dependencies |
//! |---------|-------------|------------------|
//! | `display` | Table formatting of lens output | `tabled`, `json_to_table` |
//! | `cli` | `pathmeta` command line binary | All above + `clap`, `tracing-subscriber` |
//!
//! ```toml
//! # Library only
//! pathmeta = { version = "0.1", default-features = false }
//!
//! # Library with table output
//! pathmeta = { version = "0.1", default-features = false, features = ["display"] }
//! ```
//!
//! # Architecture
//!
//! - **[`segment`]**: path segment data model and the static info extension record
//! - **[`lens`]**: high-level entry points
//!   - `staticinfo`: operator configuration to extension (encode side)
//!   - `combinator`: extensions along a path to path metadata (decode side)
//! - **[`config`]**: tool configuration
//!
//! # Quick Start Examples
//!
//! ## Building an extension
//!
//! ```rust,ignore
//! use pathmeta::lens::staticinfo::{StaticInfoExtendArgs, StaticInfoLens};
//! use pathmeta::segment::IfId;
//!
//! let lens = StaticInfoLens::from_file("staticinfo_config.json")?;
//! let args = StaticInfoExtendArgs::new(IfId(2), IfId(1));
//! let ext = lens.extend(&args);
//! println!("{}", lens.format_json(&ext));
//! ```
//!
//! ## Combining a solved path
//!
//! ```rust,ignore
//! use pathmeta::lens::combinator::CombinatorLens;
//!
//! let lens = CombinatorLens::new();
//! for solution in lens.load_solutions("paths.json")? {
//!     let md = lens.metadata(&solution);
//!     println!("{} ms, bottleneck {} Kbit/s", md.total_latency, md.bandwidth_bottleneck);
//! }
//! ```

pub mod config;
pub mod lens;
pub mod segment;

pub use config::PathmetaConfig;

pub use lens::utils::OutputFormat;

pub use segment::{AsEntry, IfId, IsdAsn, PathSegment, SegType, StaticInfoExtension};

pub use lens::staticinfo::{StaticInfoCfg, StaticInfoCfgError, StaticInfoExtendArgs, StaticInfoLens};

pub use lens::combinator::{CombinatorLens, PathMetadata, PathSolution, RawPathMetadata};
