use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use twilight_http::{Client, request::AuditLogReason as _};
use twilight_model::{
    application::command::Command,
    channel::message::{
        AllowedMentions, MentionType, MessageFlags, component::Component, embed::Embed,
    },
    guild::Member,
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
    api::DiscordApi,
    error::ApiError,
    model::{
        GuildSummary, InteractionRef, MemberProfile, RoleSummary, avatar_url, guild_icon_url,
    },
};

/// Largest page the member-listing endpoint accepts.
const MEMBER_PAGE_SIZE: u16 = 1000;

/// Live [`DiscordApi`] over a shared twilight HTTP client.
#[derive(Clone)]
pub struct HttpApi {
    http: Arc<Client>,
}

impl HttpApi {
    pub fn new(http: Arc<Client>) -> Self {
        Self { http }
    }
}

fn member_profile(member: Member) -> MemberProfile {
    MemberProfile {
        user_id: member.user.id,
        avatar_url: avatar_url(member.user.id, member.user.avatar),
        username: member.user.name,
        nickname: member.nick,
        joined_at: member.joined_at,
        role_ids: member.roles,
    }
}

#[async_trait]
impl DiscordApi for HttpApi {
    async fn create_response(
        &self,
        interaction: &InteractionRef,
        response: &InteractionResponse,
    ) -> Result<(), ApiError> {
        self.http
            .interaction(interaction.application_id)
            .create_response(interaction.id, &interaction.token, response)
            .await?;

        Ok(())
    }

    async fn create_followup(
        &self,
        interaction: &InteractionRef,
        content: &str,
        ephemeral: bool,
    ) -> Result<(), ApiError> {
        let client = self.http.interaction(interaction.application_id);
        let mut request = client.create_followup(&interaction.token).content(content);
        if ephemeral {
            request = request.flags(MessageFlags::EPHEMERAL);
        }

        request.await?;

        Ok(())
    }

    async fn create_followup_embed(
        &self,
        interaction: &InteractionRef,
        embed: &Embed,
        ephemeral: bool,
    ) -> Result<(), ApiError> {
        let client = self.http.interaction(interaction.application_id);
        let mut request = client
            .create_followup(&interaction.token)
            .embeds(std::slice::from_ref(embed));
        if ephemeral {
            request = request.flags(MessageFlags::EPHEMERAL);
        }

        request.await?;

        Ok(())
    }

    async fn send_content(
        &self,
        channel_id: Id<ChannelMarker>,
        content: &str,
    ) -> Result<(), ApiError> {
        let mentions = AllowedMentions {
            parse: vec![MentionType::Everyone],
            ..AllowedMentions::default()
        };

        self.http
            .create_message(channel_id)
            .content(content)
            .allowed_mentions(Some(&mentions))
            .await?;

        Ok(())
    }

    async fn send_embed(
        &self,
        channel_id: Id<ChannelMarker>,
        embed: &Embed,
        components: &[Component],
    ) -> Result<Id<MessageMarker>, ApiError> {
        let message = self
            .http
            .create_message(channel_id)
            .embeds(std::slice::from_ref(embed))
            .components(components)
            .await?
            .model()
            .await?;

        Ok(message.id)
    }

    async fn ban_member(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        reason: &str,
    ) -> Result<(), ApiError> {
        self.http
            .create_ban(guild_id, user_id)
            .reason(reason)
            .await?;

        Ok(())
    }

    async fn kick_member(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        reason: &str,
    ) -> Result<(), ApiError> {
        self.http
            .remove_guild_member(guild_id, user_id)
            .reason(reason)
            .await?;

        Ok(())
    }

    async fn timeout_member(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        until: Timestamp,
        reason: &str,
    ) -> Result<(), ApiError> {
        self.http
            .update_guild_member(guild_id, user_id)
            .communication_disabled_until(Some(until))
            .reason(reason)
            .await?;

        Ok(())
    }

    async fn clear_timeout(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        reason: &str,
    ) -> Result<(), ApiError> {
        self.http
            .update_guild_member(guild_id, user_id)
            .communication_disabled_until(None)
            .reason(reason)
            .await?;

        Ok(())
    }

    async fn add_member_role(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        role_id: Id<RoleMarker>,
    ) -> Result<(), ApiError> {
        self.http
            .add_guild_member_role(guild_id, user_id, role_id)
            .reason("verification panel")
            .await?;

        Ok(())
    }

    async fn guild_summary(&self, guild_id: Id<GuildMarker>) -> Result<GuildSummary, ApiError> {
        let guild = self
            .http
            .guild(guild_id)
            .with_counts(true)
            .await?
            .model()
            .await?;
        let channels = self.http.guild_channels(guild_id).await?.model().await?;

        Ok(GuildSummary {
            id: guild.id,
            icon_url: guild_icon_url(guild.id, guild.icon),
            name: guild.name,
            owner_id: guild.owner_id,
            member_count: guild.approximate_member_count,
            channel_count: channels.len(),
            role_count: guild.roles.len(),
            boost_count: guild.premium_subscription_count.unwrap_or_default(),
        })
    }

    async fn guild_roles(&self, guild_id: Id<GuildMarker>) -> Result<Vec<RoleSummary>, ApiError> {
        let roles = self.http.roles(guild_id).await?.model().await?;

        Ok(roles
            .into_iter()
            .map(|role| RoleSummary {
                id: role.id,
                color: role.color,
                position: role.position,
            })
            .collect())
    }

    async fn member(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
    ) -> Result<Option<MemberProfile>, ApiError> {
        let response = match self.http.guild_member(guild_id, user_id).await {
            Ok(response) => response,
            Err(source) => {
                let error = ApiError::from(source);
                if error.is_not_found() {
                    return Ok(None);
                }
                return Err(error);
            }
        };

        Ok(Some(member_profile(response.model().await?)))
    }

    async fn members(&self, guild_id: Id<GuildMarker>) -> Result<Vec<MemberProfile>, ApiError> {
        let mut members = Vec::new();
        let mut after: Option<Id<UserMarker>> = None;

        loop {
            let request = self.http.guild_members(guild_id).limit(MEMBER_PAGE_SIZE);
            let response = match after {
                Some(after_id) => request.after(after_id).await?,
                None => request.await?,
            };
            let page = response.model().await?;
            let page_len = page.len();

            after = page.last().map(|member| member.user.id);
            members.extend(page.into_iter().map(member_profile));

            if page_len < usize::from(MEMBER_PAGE_SIZE) {
                break;
            }
        }

        debug!(guild_id = guild_id.get(), count = members.len(), "listed guild members");

        Ok(members)
    }

    async fn set_global_commands(
        &self,
        application_id: Id<ApplicationMarker>,
        commands: &[Command],
    ) -> Result<usize, ApiError> {
        let registered = self
            .http
            .interaction(application_id)
            .set_global_commands(commands)
            .await?
            .model()
            .await?;

        Ok(registered.len())
    }
}
