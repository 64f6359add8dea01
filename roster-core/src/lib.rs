//! Roster core library — domain types, configuration, identity resolution.
//!
//! Public API surface:
//! - [`types`] — newtypes and mapping structs
//! - [`config`] — [`AppConfig`] load / lookup
//! - [`profile`] — chat user profiles and the GitHub identity resolver
//! - [`event`] — the closed [`ChatEvent`] variant
//! - [`error`] — [`ConfigError`]

pub mod config;
pub mod error;
pub mod event;
pub mod profile;
pub mod types;

pub use config::AppConfig;
pub use error::ConfigError;
pub use event::ChatEvent;
pub use profile::{resolve_username, UserProfile};
pub use types::{ChannelId, ChannelTeamMapping, OrgSlug, SheetMapping, TeamSlug, UserId, Username};
