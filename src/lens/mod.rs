//! Lens module
//!
//! Lenses wrap the static info pipeline behind small, reusable entry points
//! that the CLI (and any other front end) call into.
//!
//! | Lens | Side | Purpose |
//! |------|------|---------|
//! | `StaticInfoLens` | encode | build the extension an AS attaches to a segment |
//! | `CombinatorLens` | decode | merge the extensions along a solved path |
//!
//! Each lens module exports the lens struct, its argument structs and its
//! output types. Helpers stay private to the module.
//!
//! ```rust,ignore
//! use pathmeta::lens::staticinfo::{StaticInfoLens, StaticInfoExtendArgs};
//! use pathmeta::lens::combinator::{CombinatorLens, PathMetadata};
//! ```

pub mod utils;

// StaticInfoLens - operator configuration to per-AS extension
pub mod staticinfo;

// CombinatorLens - per-AS extensions to path metadata
pub mod combinator;
