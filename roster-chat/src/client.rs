//! The [`ChatClient`] trait.

use async_trait::async_trait;

use roster_core::profile::UserProfile;
use roster_core::types::{ChannelId, UserId};

use crate::error::ChatError;

/// Chat-platform operations the engine depends on.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// All member ids of a channel (fully paginated).
    async fn channel_members(&self, channel: &ChannelId) -> Result<Vec<UserId>, ChatError>;

    /// A user's full profile.
    async fn user_profile(&self, user: &UserId) -> Result<UserProfile, ChatError>;

    /// Send a direct message to a user (the notification side channel).
    async fn send_direct_message(&self, user: &UserId, text: &str) -> Result<(), ChatError>;
}
