//! Opaque content identifiers
//!
//! A `ContentId` stands for a node's identity: it wraps a CID (hash digest,
//! codec and multibase tag) and compares by digest, never by in-memory
//! object identity. Ids are assigned by the store on put or parsed from
//! their canonical string form; there are no implicit string conversions.

use crate::error::FormatError;
use cid::Cid;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An opaque, comparable content identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentId(Cid);

impl ContentId {
    /// Parse a canonical string encoding (base58btc CIDv0 or multibase CIDv1).
    ///
    /// Round-trips: `ContentId::parse(&x.to_string()) == Ok(x)` for every
    /// valid id `x`.
    pub fn parse(input: &str) -> Result<Self, FormatError> {
        Cid::try_from(input)
            .map(ContentId)
            .map_err(|source| FormatError {
                input: input.to_string(),
                source,
            })
    }

    /// Wrap an already-decoded CID. Used by store backends when minting ids.
    pub fn from_cid(cid: Cid) -> Self {
        ContentId(cid)
    }

    /// The underlying CID.
    pub fn as_cid(&self) -> &Cid {
        &self.0
    }

    /// Raw binary form of the id, suitable for feeding into a hasher.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes()
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ContentId {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentId::parse(s)
    }
}

impl Serialize for ContentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ContentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ContentId::parse(&s).map_err(serde::de::Error::custom)
    }
}
