//! Chat user profiles and the GitHub identity resolver.
//!
//! The resolver extracts a canonical [`Username`] from the designated custom
//! profile field. Two URL shapes are accepted:
//!
//! - `https://github.com/<username>` — last path segment
//! - `https://<username>.github.io` — subdomain label before the pages marker
//!
//! An absent or empty field value is the distinct, recoverable
//! missing-profile condition (`None`); callers branch on it (anonymous
//! ledger rows, reminder messages) rather than treating it as a failure.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::Username;

/// GitHub Pages domain marker used to recognise `<username>.github.io` URLs.
const GITHUB_PAGES_DOMAIN: &str = ".github.io";

/// One custom profile field as delivered by the chat platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileField {
    #[serde(default)]
    pub value: String,
}

/// A chat-platform user profile, as carried on events and returned by the
/// profile endpoint. Unknown fields are ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub real_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_name_normalized: Option<String>,
    /// Set when the profile belongs to an app/bot actor, not a human.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_app_id: Option<String>,
    #[serde(default)]
    pub fields: HashMap<String, ProfileField>,
}

impl UserProfile {
    /// Preferred human-readable name: normalized form when present.
    pub fn display_name(&self) -> &str {
        self.real_name_normalized
            .as_deref()
            .unwrap_or(&self.real_name)
    }

    /// Whether this profile belongs to a bot/app actor.
    pub fn is_app(&self) -> bool {
        self.api_app_id.is_some()
    }

    /// Raw value of the designated GitHub URL field, if set and non-empty.
    pub fn github_profile_url(&self, field_id: &str) -> Option<&str> {
        self.fields
            .get(field_id)
            .map(|f| f.value.as_str())
            .filter(|v| !v.is_empty())
    }
}

/// Extract the canonical username from a GitHub profile URL.
///
/// Deliberately permissive about the host, matching the behaviour users
/// rely on: anything after the last `/` is taken as the login unless the
/// URL is a GitHub Pages address.
pub fn username_from_url(url: &str) -> Username {
    match url.split_once(GITHUB_PAGES_DOMAIN) {
        Some((head, _)) => {
            let label = head.rsplit("//").next().unwrap_or(head);
            Username::new(label)
        }
        None => Username::new(url.rsplit('/').next().unwrap_or(url)),
    }
}

/// Resolve a profile to a canonical username via the designated field.
///
/// `None` signals the missing-profile condition.
pub fn resolve_username(profile: &UserProfile, field_id: &str) -> Option<Username> {
    profile.github_profile_url(field_id).map(username_from_url)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
