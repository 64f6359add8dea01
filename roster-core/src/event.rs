//! Normalized chat-platform events.
//!
//! The delivery layer (webhook receiver, queue listener) hands the engine
//! exactly one of these per invocation. The variant set is closed and
//! dispatched exhaustively; there is no ad hoc `type`-string inspection.

use serde::{Deserialize, Serialize};

use crate::profile::UserProfile;
use crate::types::{ChannelId, UserId};

/// One normalized membership event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    /// A user joined a channel.
    MemberJoined {
        channel: ChannelId,
        user: UserId,
        profile: UserProfile,
    },
    /// A user left (or was removed from) a channel.
    MemberLeft {
        channel: ChannelId,
        user: UserId,
        profile: UserProfile,
    },
    /// A user's profile changed (no channel context).
    ProfileChanged { user: UserId, profile: UserProfile },
}

impl ChatEvent {
    /// Stable kind label used in logs and aggregate error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ChatEvent::MemberJoined { .. } => "member_joined",
            ChatEvent::MemberLeft { .. } => "member_left",
            ChatEvent::ProfileChanged { .. } => "profile_changed",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
