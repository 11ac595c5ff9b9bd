//! ISD-AS identifiers and interface identifiers.
//!
//! An [`IsdAsn`] names one AS inside its isolation domain and is the key of every
//! per-AS record built on the decode side. The text form is `<isd>-<as>`, where the
//! AS part is either a plain decimal number (BGP-compatible range) or three
//! colon-separated 16-bit hex groups, e.g. `1-ff00:0:110`.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Largest AS number that is written in decimal form
const MAX_BGP_ASN: u64 = u32::MAX as u64;

/// Largest AS number representable in the 48-bit AS field
const MAX_ASN: u64 = (1 << 48) - 1;

/// Interface identifier, unique within one AS.
///
/// IFID 0 marks "no interface" (the open end of a segment).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct IfId(pub u64);

impl IfId {
    pub fn is_unset(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for IfId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for IfId {
    fn from(value: u64) -> Self {
        IfId(value)
    }
}

impl FromStr for IfId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u64>()
            .map(IfId)
            .map_err(|e| anyhow!("invalid interface id '{}': {}", s, e))
    }
}

/// Compound ISD-AS identifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsdAsn {
    pub isd: u16,
    pub asn: u64,
}

impl IsdAsn {
    pub fn new(isd: u16, asn: u64) -> Self {
        Self { isd, asn }
    }
}

impl fmt::Display for IsdAsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.asn <= MAX_BGP_ASN {
            write!(f, "{}-{}", self.isd, self.asn)
        } else {
            write!(
                f,
                "{}-{:x}:{:x}:{:x}",
                self.isd,
                (self.asn >> 32) & 0xffff,
                (self.asn >> 16) & 0xffff,
                self.asn & 0xffff
            )
        }
    }
}

impl FromStr for IsdAsn {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (isd_str, as_str) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| anyhow!("invalid ISD-AS '{}': missing '-'", s))?;

        let isd = isd_str
            .parse::<u16>()
            .map_err(|e| anyhow!("invalid ISD in '{}': {}", s, e))?;

        let asn = if as_str.contains(':') {
            let groups: Vec<&str> = as_str.split(':').collect();
            if groups.len() != 3 {
                return Err(anyhow!(
                    "invalid AS in '{}': expected three hex groups",
                    s
                ));
            }
            let mut asn = 0u64;
            for group in groups {
                let value = u16::from_str_radix(group, 16)
                    .map_err(|e| anyhow!("invalid AS group '{}' in '{}': {}", group, s, e))?;
                asn = (asn << 16) | value as u64;
            }
            asn
        } else {
            let asn = as_str
                .parse::<u64>()
                .map_err(|e| anyhow!("invalid AS in '{}': {}", s, e))?;
            if asn > MAX_BGP_ASN {
                return Err(anyhow!(
                    "decimal AS in '{}' exceeds {}, use hex notation",
                    s,
                    MAX_BGP_ASN
                ));
            }
            asn
        };

        if asn > MAX_ASN {
            return Err(anyhow!("AS in '{}' exceeds 48 bits", s));
        }

        Ok(IsdAsn { isd, asn })
    }
}

impl Serialize for IsdAsn {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for IsdAsn {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        IsdAsn::from_str(&s).map_err(serde::de::Error::custom)
    }
}
