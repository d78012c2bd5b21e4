//! Canned ids, invokers and guild data for handler tests.

use std::sync::Arc;

use twilight_model::{
    guild::Permissions,
    id::{
        Id,
        marker::{ChannelMarker, GuildMarker, RoleMarker, UserMarker},
    },
    util::Timestamp,
};

use herald_core::{
    Context, DiscordApi,
    model::{GuildSummary, InteractionRef, Invocation, Invoker, MemberProfile, avatar_url},
};
use herald_database::Database;

pub const GUILD_ID: Id<GuildMarker> = Id::new(100_000_000_000_000_001);
pub const CHANNEL_ID: Id<ChannelMarker> = Id::new(100_000_000_000_000_002);
pub const OWNER_ID: Id<UserMarker> = Id::new(100_000_000_000_000_003);
pub const MODERATOR_ID: Id<UserMarker> = Id::new(100_000_000_000_000_004);
pub const MEMBER_ID: Id<UserMarker> = Id::new(100_000_000_000_000_005);
pub const VERIFIED_ROLE_ID: Id<RoleMarker> = Id::new(100_000_000_000_000_006);

/// Handler context over `api` and a fresh in-memory database.
pub async fn context(api: Arc<dyn DiscordApi>) -> anyhow::Result<Context> {
    let db = Database::in_memory().await?;
    Ok(Context::new(api, db))
}

/// An invocation in the fixture guild and channel by `user_id` holding `permissions`.
pub fn invocation(user_id: Id<UserMarker>, permissions: Permissions) -> Invocation {
    Invocation {
        interaction: InteractionRef {
            application_id: Id::new(1),
            id: Id::new(2),
            token: "interaction-token".to_owned(),
        },
        guild_id: Some(GUILD_ID),
        channel_id: Some(CHANNEL_ID),
        invoker: Invoker {
            user_id,
            display_name: format!("user-{}", user_id.get()),
            avatar_url: avatar_url(user_id, None),
            permissions,
            role_ids: Vec::new(),
        },
    }
}

/// The same invocation outside any guild.
pub fn direct_message_invocation(user_id: Id<UserMarker>) -> Invocation {
    let mut invocation = invocation(user_id, Permissions::empty());
    invocation.guild_id = None;
    invocation
}

pub fn admin_invocation() -> Invocation {
    invocation(MODERATOR_ID, Permissions::ADMINISTRATOR)
}

pub fn member(user_id: Id<UserMarker>, username: &str, nickname: Option<&str>) -> MemberProfile {
    MemberProfile {
        user_id,
        username: username.to_owned(),
        nickname: nickname.map(ToOwned::to_owned),
        avatar_url: avatar_url(user_id, None),
        joined_at: Timestamp::from_secs(1_700_000_000).ok(),
        role_ids: Vec::new(),
    }
}

pub fn guild() -> GuildSummary {
    GuildSummary {
        id: GUILD_ID,
        name: "Test Guild".to_owned(),
        icon_url: None,
        owner_id: OWNER_ID,
        member_count: Some(42),
        channel_count: 7,
        role_count: 5,
        boost_count: 2,
    }
}
