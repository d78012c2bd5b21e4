pub mod ban;
pub mod embeds;
pub mod kick;
pub mod timeout;
pub mod untimeout;

use twilight_model::{
    application::interaction::application_command::CommandData,
    guild::Permissions,
    id::{Id, marker::GuildMarker},
};

use crate::moderation::embeds::{
    TargetProfile, guild_only_message, permission_denied_message, self_action_message,
    target_profile,
};
use herald_core::{Context, model::Invocation};
use herald_utils::{
    options::{string_option, user_option},
    respond::respond_ephemeral_message,
};

/// Audit-log and embed reason used when the moderator gives none.
pub const DEFAULT_REASON: &str = "No reason given";

/// Arguments shared by the single-target moderation commands.
#[derive(Clone, Debug)]
pub struct ModerationArgs {
    pub target: TargetProfile,
    pub reason: String,
}

impl ModerationArgs {
    pub fn from_data(data: &CommandData) -> Option<Self> {
        let user_id = user_option(&data.options, "member")?;

        Some(Self {
            target: target_profile(data.resolved.as_ref(), user_id),
            reason: reason_or_default(string_option(&data.options, "reason")),
        })
    }
}

pub(crate) fn reason_or_default(raw: Option<&str>) -> String {
    raw.map(str::trim)
        .filter(|reason| !reason.is_empty())
        .unwrap_or(DEFAULT_REASON)
        .to_owned()
}

/// Resolve the guild a moderation command may act in.
///
/// Replies to the invoker and returns `Ok(None)` when the command is outside a guild, the
/// invoker lacks `required`, or the invoker targets themselves.
pub(crate) async fn authorize(
    ctx: &Context,
    invocation: &Invocation,
    target: &TargetProfile,
    required: Permissions,
    action: &str,
) -> anyhow::Result<Option<Id<GuildMarker>>> {
    let api = ctx.api.as_ref();

    let Some(guild_id) = invocation.guild_id else {
        respond_ephemeral_message(api, &invocation.interaction, guild_only_message()).await?;
        return Ok(None);
    };

    if !invocation.invoker.has_permission(required) {
        let denied = permission_denied_message(action);
        respond_ephemeral_message(api, &invocation.interaction, &denied).await?;
        return Ok(None);
    }

    if target.user_id == invocation.invoker.user_id {
        let self_action = self_action_message(action);
        respond_ephemeral_message(api, &invocation.interaction, &self_action).await?;
        return Ok(None);
    }

    Ok(Some(guild_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_reasons_fall_back_to_default() {
        assert_eq!(reason_or_default(None), DEFAULT_REASON);
        assert_eq!(reason_or_default(Some("   ")), DEFAULT_REASON);
        assert_eq!(reason_or_default(Some(" spam ")), "spam");
    }
}
