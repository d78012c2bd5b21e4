use async_trait::async_trait;
use twilight_model::{
    application::command::Command,
    channel::message::{component::Component, embed::Embed},
    http::interaction::InteractionResponse,
    id::{
        Id,
        marker::{
            ApplicationMarker, ChannelMarker, GuildMarker, MessageMarker, RoleMarker, UserMarker,
        },
    },
    util::Timestamp,
};

use crate::{
    error::ApiError,
    model::{GuildSummary, InteractionRef, MemberProfile, RoleSummary},
};

/// Every Discord call a handler may make.
///
/// Handlers only see this trait through [`crate::Context`], so tests can substitute a
/// recording implementation for the live client.
#[async_trait]
pub trait DiscordApi: Send + Sync {
    /// Send the initial response to an interaction.
    async fn create_response(
        &self,
        interaction: &InteractionRef,
        response: &InteractionResponse,
    ) -> Result<(), ApiError>;

    /// Send a follow-up message after the initial (possibly deferred) response.
    async fn create_followup(
        &self,
        interaction: &InteractionRef,
        content: &str,
        ephemeral: bool,
    ) -> Result<(), ApiError>;

    /// Send a follow-up carrying a single embed.
    async fn create_followup_embed(
        &self,
        interaction: &InteractionRef,
        embed: &Embed,
        ephemeral: bool,
    ) -> Result<(), ApiError>;

    async fn send_content(
        &self,
        channel_id: Id<ChannelMarker>,
        content: &str,
    ) -> Result<(), ApiError>;

    /// Post an embed with optional components and return the new message id.
    async fn send_embed(
        &self,
        channel_id: Id<ChannelMarker>,
        embed: &Embed,
        components: &[Component],
    ) -> Result<Id<MessageMarker>, ApiError>;

    async fn ban_member(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        reason: &str,
    ) -> Result<(), ApiError>;

    async fn kick_member(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        reason: &str,
    ) -> Result<(), ApiError>;

    async fn timeout_member(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        until: Timestamp,
        reason: &str,
    ) -> Result<(), ApiError>;

    async fn clear_timeout(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        reason: &str,
    ) -> Result<(), ApiError>;

    async fn add_member_role(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        role_id: Id<RoleMarker>,
    ) -> Result<(), ApiError>;

    async fn guild_summary(&self, guild_id: Id<GuildMarker>) -> Result<GuildSummary, ApiError>;

    async fn guild_roles(&self, guild_id: Id<GuildMarker>) -> Result<Vec<RoleSummary>, ApiError>;

    /// Resolve one member by id; `Ok(None)` when they are not in the guild.
    async fn member(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
    ) -> Result<Option<MemberProfile>, ApiError>;

    /// List every guild member in Discord's listing order.
    async fn members(&self, guild_id: Id<GuildMarker>) -> Result<Vec<MemberProfile>, ApiError>;

    /// Replace the application's global commands; returns how many were registered.
    async fn set_global_commands(
        &self,
        application_id: Id<ApplicationMarker>,
        commands: &[Command],
    ) -> Result<usize, ApiError>;
}
