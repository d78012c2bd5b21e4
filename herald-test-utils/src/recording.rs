use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use async_trait::async_trait;
use tokio::sync::Mutex;
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

use herald_core::{
    ApiError, DiscordApi,
    model::{GuildSummary, InteractionRef, MemberProfile, RoleSummary},
};

/// One outbound call observed by [`RecordingApi`].
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Response(InteractionResponse),
    Followup {
        content: String,
        ephemeral: bool,
    },
    FollowupEmbed {
        embed: Embed,
        ephemeral: bool,
    },
    Content {
        channel_id: Id<ChannelMarker>,
        content: String,
    },
    Embed {
        channel_id: Id<ChannelMarker>,
        embed: Embed,
        components: Vec<Component>,
    },
    Ban {
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        reason: String,
    },
    Kick {
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        reason: String,
    },
    Timeout {
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        until: Timestamp,
        reason: String,
    },
    ClearTimeout {
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        reason: String,
    },
    AddRole {
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        role_id: Id<RoleMarker>,
    },
    GuildSummary(Id<GuildMarker>),
    GuildRoles(Id<GuildMarker>),
    Member(Id<UserMarker>),
    Members(Id<GuildMarker>),
    SetGlobalCommands(Vec<Command>),
}

impl Call {
    /// Whether this call changes state on Discord's side (posting or moderating).
    pub fn is_action(&self) -> bool {
        matches!(
            self,
            Self::Content { .. }
                | Self::Embed { .. }
                | Self::Ban { .. }
                | Self::Kick { .. }
                | Self::Timeout { .. }
                | Self::ClearTimeout { .. }
                | Self::AddRole { .. }
        )
    }
}

/// [`DiscordApi`] stub that records calls and serves canned guild data.
pub struct RecordingApi {
    calls: Mutex<Vec<Call>>,
    action_failure: Mutex<Option<ApiError>>,
    guild: Option<GuildSummary>,
    roles: Vec<RoleSummary>,
    members: Vec<MemberProfile>,
    next_message_id: AtomicU64,
}

impl Default for RecordingApi {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingApi {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            action_failure: Mutex::new(None),
            guild: None,
            roles: Vec::new(),
            members: Vec::new(),
            next_message_id: AtomicU64::new(900_000),
        }
    }

    pub fn with_guild(mut self, guild: GuildSummary) -> Self {
        self.guild = Some(guild);
        self
    }

    pub fn with_roles(mut self, roles: Vec<RoleSummary>) -> Self {
        self.roles = roles;
        self
    }

    pub fn with_members(mut self, members: Vec<MemberProfile>) -> Self {
        self.members = members;
        self
    }

    /// Make every state-changing call fail with `error` from now on.
    pub async fn fail_actions(&self, error: ApiError) {
        *self.action_failure.lock().await = Some(error);
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub async fn calls(&self) -> Vec<Call> {
        self.calls.lock().await.clone()
    }

    pub async fn responses(&self) -> Vec<InteractionResponse> {
        self.calls
            .lock()
            .await
            .iter()
            .filter_map(|call| match call {
                Call::Response(response) => Some(response.clone()),
                _ => None,
            })
            .collect()
    }

    pub async fn actions(&self) -> Vec<Call> {
        self.calls
            .lock()
            .await
            .iter()
            .filter(|call| call.is_action())
            .cloned()
            .collect()
    }

    /// Roles granted to `user_id` so far, in grant order.
    pub async fn granted_roles(&self, user_id: Id<UserMarker>) -> Vec<Id<RoleMarker>> {
        self.calls
            .lock()
            .await
            .iter()
            .filter_map(|call| match call {
                Call::AddRole {
                    user_id: granted_to,
                    role_id,
                    ..
                } if *granted_to == user_id => Some(*role_id),
                _ => None,
            })
            .collect()
    }

    async fn record(&self, call: Call) {
        self.calls.lock().await.push(call);
    }

    async fn record_action(&self, call: Call) -> Result<(), ApiError> {
        if let Some(error) = self.action_failure.lock().await.clone() {
            return Err(error);
        }

        self.record(call).await;
        Ok(())
    }
}

#[async_trait]
impl DiscordApi for RecordingApi {
    async fn create_response(
        &self,
        _interaction: &InteractionRef,
        response: &InteractionResponse,
    ) -> Result<(), ApiError> {
        self.record(Call::Response(response.clone())).await;
        Ok(())
    }

    async fn create_followup(
        &self,
        _interaction: &InteractionRef,
        content: &str,
        ephemeral: bool,
    ) -> Result<(), ApiError> {
        self.record(Call::Followup {
            content: content.to_owned(),
            ephemeral,
        })
        .await;
        Ok(())
    }

    async fn create_followup_embed(
        &self,
        _interaction: &InteractionRef,
        embed: &Embed,
        ephemeral: bool,
    ) -> Result<(), ApiError> {
        self.record(Call::FollowupEmbed {
            embed: embed.clone(),
            ephemeral,
        })
        .await;
        Ok(())
    }

    async fn send_content(
        &self,
        channel_id: Id<ChannelMarker>,
        content: &str,
    ) -> Result<(), ApiError> {
        self.record_action(Call::Content {
            channel_id,
            content: content.to_owned(),
        })
        .await
    }

    async fn send_embed(
        &self,
        channel_id: Id<ChannelMarker>,
        embed: &Embed,
        components: &[Component],
    ) -> Result<Id<MessageMarker>, ApiError> {
        self.record_action(Call::Embed {
            channel_id,
            embed: embed.clone(),
            components: components.to_vec(),
        })
        .await?;

        Ok(Id::new(self.next_message_id.fetch_add(1, Ordering::Relaxed)))
    }

    async fn ban_member(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        reason: &str,
    ) -> Result<(), ApiError> {
        self.record_action(Call::Ban {
            guild_id,
            user_id,
            reason: reason.to_owned(),
        })
        .await
    }

    async fn kick_member(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        reason: &str,
    ) -> Result<(), ApiError> {
        self.record_action(Call::Kick {
            guild_id,
            user_id,
            reason: reason.to_owned(),
        })
        .await
    }

    async fn timeout_member(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        until: Timestamp,
        reason: &str,
    ) -> Result<(), ApiError> {
        self.record_action(Call::Timeout {
            guild_id,
            user_id,
            until,
            reason: reason.to_owned(),
        })
        .await
    }

    async fn clear_timeout(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        reason: &str,
    ) -> Result<(), ApiError> {
        self.record_action(Call::ClearTimeout {
            guild_id,
            user_id,
            reason: reason.to_owned(),
        })
        .await
    }

    async fn add_member_role(
        &self,
        guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
        role_id: Id<RoleMarker>,
    ) -> Result<(), ApiError> {
        self.record_action(Call::AddRole {
            guild_id,
            user_id,
            role_id,
        })
        .await
    }

    async fn guild_summary(&self, guild_id: Id<GuildMarker>) -> Result<GuildSummary, ApiError> {
        self.record(Call::GuildSummary(guild_id)).await;
        self.guild
            .clone()
            .ok_or_else(|| ApiError::NotFound("Unknown Guild".to_owned()))
    }

    async fn guild_roles(&self, guild_id: Id<GuildMarker>) -> Result<Vec<RoleSummary>, ApiError> {
        self.record(Call::GuildRoles(guild_id)).await;
        Ok(self.roles.clone())
    }

    async fn member(
        &self,
        _guild_id: Id<GuildMarker>,
        user_id: Id<UserMarker>,
    ) -> Result<Option<MemberProfile>, ApiError> {
        self.record(Call::Member(user_id)).await;
        Ok(self
            .members
            .iter()
            .find(|member| member.user_id == user_id)
            .cloned())
    }

    async fn members(&self, guild_id: Id<GuildMarker>) -> Result<Vec<MemberProfile>, ApiError> {
        self.record(Call::Members(guild_id)).await;
        Ok(self.members.clone())
    }

    async fn set_global_commands(
        &self,
        _application_id: Id<ApplicationMarker>,
        commands: &[Command],
    ) -> Result<usize, ApiError> {
        self.record(Call::SetGlobalCommands(commands.to_vec())).await;
        Ok(commands.len())
    }
}
