//! Static info lens arguments

use crate::segment::IfId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Arguments for building the extension of one AS entry
///
/// This struct can be used from the CLI (with clap derives when the `cli`
/// feature is enabled) or deserialized from JSON by the beaconing service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Args))]
pub struct StaticInfoExtendArgs {
    /// Egress interface of the AS entry being built (0 at the segment end)
    #[cfg_attr(feature = "cli", clap(short, long, value_parser = parse_ifid))]
    pub egress: IfId,

    /// Ingress interface of the AS entry being built (0 at the segment origin)
    #[cfg_attr(feature = "cli", clap(short, long, value_parser = parse_ifid, default_value = "0"))]
    #[serde(default)]
    pub ingress: IfId,

    /// Interfaces that are peering links (may be repeated)
    #[cfg_attr(feature = "cli", clap(short, long = "peer", value_parser = parse_ifid))]
    #[serde(default)]
    pub peers: Vec<IfId>,
}

#[cfg(feature = "cli")]
fn parse_ifid(s: &str) -> Result<IfId, String> {
    s.parse::<IfId>().map_err(|e| e.to_string())
}

impl StaticInfoExtendArgs {
    pub fn new(egress: IfId, ingress: IfId) -> Self {
        Self {
            egress,
            ingress,
            peers: Vec::new(),
        }
    }

    /// Flag an interface as peering
    pub fn with_peer(mut self, ifid: IfId) -> Self {
        self.peers.push(ifid);
        self
    }

    pub fn peer_set(&self) -> HashSet<IfId> {
        self.peers.iter().copied().collect()
    }

    /// Validate the arguments
    ///
    /// Returns an error message if the arguments are invalid.
    pub fn validate(&self) -> Result<(), String> {
        if !self.egress.is_unset() && self.egress == self.ingress {
            return Err(format!(
                "egress and ingress must differ (both are {})",
                self.egress
            ));
        }
        if self.peers.contains(&self.egress) && !self.egress.is_unset() {
            return Err(format!(
                "egress interface {} cannot also be a peering interface",
                self.egress
            ));
        }
        Ok(())
    }
}
