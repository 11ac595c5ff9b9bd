//! Operator static info configuration
//!
//! The configuration is symmetric and redundant: every interface lists the
//! intra-AS value towards every other interface. It is loaded once at start-up
//! and then only read by the extractor.

use crate::segment::{IfId, LinkType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

/// Latency configuration of one interface, in milliseconds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceLatencies {
    #[serde(rename = "Inter", default)]
    pub inter: u16,
    #[serde(rename = "Intra", default)]
    pub intra: BTreeMap<IfId, u16>,
}

/// Bandwidth configuration of one interface, in Kbit/s
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceBandwidths {
    #[serde(rename = "Inter", default)]
    pub inter: u32,
    #[serde(rename = "Intra", default)]
    pub intra: BTreeMap<IfId, u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterfaceGeodata {
    #[serde(rename = "Latitude", default)]
    pub latitude: f32,
    #[serde(rename = "Longitude", default)]
    pub longitude: f32,
    #[serde(rename = "Address", default)]
    pub address: String,
}

/// Internal router hops between interface pairs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceHops {
    #[serde(rename = "Intra", default)]
    pub intra: BTreeMap<IfId, u8>,
}

/// Parsed operator configuration, keyed by interface
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticInfoCfg {
    #[serde(rename = "Latency", default)]
    pub latency: BTreeMap<IfId, InterfaceLatencies>,
    #[serde(rename = "Bandwidth", default)]
    pub bandwidth: BTreeMap<IfId, InterfaceBandwidths>,
    #[serde(rename = "Linktype", default)]
    pub link_type: BTreeMap<IfId, LinkType>,
    #[serde(rename = "Geo", default)]
    pub geo: BTreeMap<IfId, InterfaceGeodata>,
    #[serde(rename = "Hops", default)]
    pub hops: BTreeMap<IfId, InterfaceHops>,
    #[serde(rename = "Note", default)]
    pub note: String,
}

impl StaticInfoCfg {
    /// Read and parse a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StaticInfoCfgError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| StaticInfoCfgError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg: StaticInfoCfg =
            serde_json::from_str(&raw).map_err(|source| StaticInfoCfgError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        info!(
            "loaded static info config {} ({} interfaces)",
            path.display(),
            cfg.interface_count()
        );
        Ok(cfg)
    }

    /// Parse a configuration held in memory
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Number of distinct interfaces mentioned in any category
    pub fn interface_count(&self) -> usize {
        let mut ifids: Vec<IfId> = self
            .latency
            .keys()
            .chain(self.bandwidth.keys())
            .chain(self.link_type.keys())
            .chain(self.geo.keys())
            .chain(self.hops.keys())
            .copied()
            .collect();
        ifids.sort();
        ifids.dedup();
        ifids.len()
    }
}

/// Errors that can occur when loading the static info configuration
#[derive(Debug)]
pub enum StaticInfoCfgError {
    /// The file could not be read
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file is not a valid configuration document
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl StaticInfoCfgError {
    pub fn path(&self) -> &Path {
        match self {
            StaticInfoCfgError::Io { path, .. } => path,
            StaticInfoCfgError::Parse { path, .. } => path,
        }
    }
}

impl fmt::Display for StaticInfoCfgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaticInfoCfgError::Io { path, source } => write!(
                f,
                "Failed to read static info config {}: {}",
                path.display(),
                source
            ),
            StaticInfoCfgError::Parse { path, source } => write!(
                f,
                "Failed to parse static info config {}: {}",
                path.display(),
                source
            ),
        }
    }
}

impl std::error::Error for StaticInfoCfgError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StaticInfoCfgError::Io { source, .. } => Some(source),
            StaticInfoCfgError::Parse { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "Latency": {
            "1": {"Inter": 30, "Intra": {"2": 10, "3": 20}},
            "2": {"Inter": 40, "Intra": {"1": 10, "3": 5}}
        },
        "Bandwidth": {
            "1": {"Inter": 400000000, "Intra": {"2": 100000000}}
        },
        "Linktype": {"1": "direct", "2": "multihop", "3": "opennet"},
        "Geo": {
            "1": {"Latitude": 47.2, "Longitude": 62.2, "Address": "geo1"}
        },
        "Hops": {"1": {"Intra": {"2": 2}}},
        "Note": "test note"
    }"#;

    #[test]
    fn test_parse_sample() {
        let cfg = StaticInfoCfg::from_json_str(SAMPLE).unwrap();
        assert_eq!(cfg.latency[&IfId(1)].inter, 30);
        assert_eq!(cfg.latency[&IfId(2)].intra[&IfId(3)], 5);
        assert_eq!(cfg.bandwidth[&IfId(1)].intra[&IfId(2)], 100_000_000);
        assert_eq!(cfg.link_type[&IfId(2)], LinkType::MultiHop);
        assert_eq!(cfg.geo[&IfId(1)].address, "geo1");
        assert_eq!(cfg.hops[&IfId(1)].intra[&IfId(2)], 2);
        assert_eq!(cfg.note, "test note");
        assert_eq!(cfg.interface_count(), 3);
    }

    #[test]
    fn test_missing_categories_default_empty() {
        let cfg = StaticInfoCfg::from_json_str(r#"{"Note": "only a note"}"#).unwrap();
        assert!(cfg.latency.is_empty());
        assert!(cfg.geo.is_empty());
        assert_eq!(cfg.interface_count(), 0);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let cfg = StaticInfoCfg::from_file(file.path()).unwrap();
        assert_eq!(cfg.note, "test note");
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.json");

        let err = StaticInfoCfg::from_file(&path).unwrap_err();
        assert!(matches!(err, StaticInfoCfgError::Io { .. }));
        assert_eq!(err.path(), path.as_path());
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_from_file_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"Latency\": [1, 2").unwrap();

        let err = StaticInfoCfg::from_file(file.path()).unwrap_err();
        assert!(matches!(err, StaticInfoCfgError::Parse { .. }));
        assert!(err.to_string().contains("Failed to parse"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
