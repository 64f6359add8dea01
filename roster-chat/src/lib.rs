//! # roster-chat
//!
//! Chat-platform client: channel membership, user profiles, and the direct
//! message side channel used for profile reminders.

pub mod client;
pub mod error;
pub mod slack;

pub use client::ChatClient;
pub use error::ChatError;
pub use slack::SlackApiClient;
