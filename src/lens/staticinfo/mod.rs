//! Static info lens (encode side)
//!
//! Turns the operator's symmetric interface configuration into the compact,
//! egress-scoped [`StaticInfoExtension`] attached to one AS entry while a path
//! segment is being built. No I/O happens here apart from the optional
//! configuration loading helper.
//!
//! # Example
//!
//! ```rust,ignore
//! use pathmeta::lens::staticinfo::{StaticInfoLens, StaticInfoExtendArgs};
//! use pathmeta::segment::IfId;
//!
//! let lens = StaticInfoLens::from_file("/etc/scion/staticinfo_config.json")?;
//! let args = StaticInfoExtendArgs::new(IfId(2), IfId(1)).with_peer(IfId(5));
//! let ext = lens.extend(&args);
//! ```

pub mod args;
pub mod config;
mod extract;

pub use args::StaticInfoExtendArgs;
pub use config::{
    InterfaceBandwidths, InterfaceGeodata, InterfaceHops, InterfaceLatencies, StaticInfoCfg,
    StaticInfoCfgError,
};
pub use extract::generate_static_info;

use crate::segment::StaticInfoExtension;
use anyhow::Result;
use std::path::Path;

/// Static info lens
///
/// Holds one parsed operator configuration and builds extensions from it.
pub struct StaticInfoLens {
    cfg: StaticInfoCfg,
}

impl StaticInfoLens {
    pub fn new(cfg: StaticInfoCfg) -> Self {
        Self { cfg }
    }

    /// Load the operator configuration and create the lens
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StaticInfoCfgError> {
        Ok(Self::new(StaticInfoCfg::from_file(path)?))
    }

    /// Build the extension for one AS entry
    pub fn extend(&self, args: &StaticInfoExtendArgs) -> StaticInfoExtension {
        generate_static_info(&self.cfg, &args.peer_set(), args.egress, args.ingress)
    }

    /// Validate the arguments, then build the extension
    pub fn try_extend(&self, args: &StaticInfoExtendArgs) -> Result<StaticInfoExtension> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;
        Ok(self.extend(args))
    }

    /// Render an extension as pretty JSON
    pub fn format_json(&self, ext: &StaticInfoExtension) -> String {
        serde_json::to_string_pretty(ext).unwrap_or_default()
    }
}
