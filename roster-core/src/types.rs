//! Domain types for roster.
//!
//! All remote identifiers are newtypes; a [`Username`] is always canonical
//! (lower-cased) so set membership checks are case-insensitive by
//! construction. All types are serializable via serde.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A chat-platform channel identifier (e.g. `C024BE91L`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub String);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ChannelId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ChannelId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A chat-platform user identifier (e.g. `U02AS35HM6A`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A GitHub team slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamSlug(pub String);

impl fmt::Display for TeamSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for TeamSlug {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TeamSlug {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A GitHub organization slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrgSlug(pub String);

impl fmt::Display for OrgSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for OrgSlug {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for OrgSlug {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A canonical (lower-cased) GitHub username.
///
/// GitHub logins are case-insensitive; every constructor lower-cases the raw
/// value so equality and hashing need no further normalization. This is the
/// join key between chat identity and team membership.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct Username(String);

impl Username {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Username {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Username {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// ---------------------------------------------------------------------------
// Mapping structs
// ---------------------------------------------------------------------------

/// One configured chat-channel → GitHub-team pairing.
///
/// Order in the configuration file is significant: the reconciler processes
/// mappings strictly in this order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelTeamMapping {
    pub channel: ChannelId,
    pub team: TeamSlug,
}

/// Ledger spreadsheet settings for one channel.
///
/// Zero or one per [`ChannelTeamMapping`]; a mapping without one skips
/// ledger operations entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetMapping {
    pub channel: ChannelId,
    pub spreadsheet_id: String,
    /// A1-notation range holding the ledger rows (e.g. `Data!A2:F`).
    pub data_range: String,
    /// BCP 47 locale tag; carried for configuration parity, the ledger date
    /// format itself is fixed (`MM/DD/YYYY`).
    pub locale: String,
    /// IANA timezone name used when formatting ledger dates.
    pub timezone: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
