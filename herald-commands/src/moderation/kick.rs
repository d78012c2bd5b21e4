use tracing::error;
use twilight_model::{
    application::command::{Command, CommandType},
    guild::Permissions,
};
use twilight_util::builder::command::{CommandBuilder, StringBuilder, UserBuilder};

use crate::CommandMeta;
use crate::moderation::embeds::{KICK, action_failed_message, moderation_action_embed};
use crate::moderation::{ModerationArgs, authorize};
use herald_core::{Context, model::Invocation};
use herald_utils::respond::{respond_embed, respond_ephemeral_message};

pub const NAME: &str = "kick";

pub const META: CommandMeta = CommandMeta {
    name: NAME,
    desc: "Kick a member from the server.",
    category: "moderation",
    usage: "/kick <member> [reason]",
};

pub fn command() -> anyhow::Result<Command> {
    Ok(CommandBuilder::new(META.name, META.desc, CommandType::ChatInput)
        .option(UserBuilder::new("member", "Member to kick").required(true))
        .option(StringBuilder::new("reason", "Reason for the kick"))
        .validate()?
        .build())
}

/// Kick a target member after permission validation.
pub async fn run(ctx: &Context, invocation: &Invocation, args: ModerationArgs) -> anyhow::Result<()> {
    let api = ctx.api.as_ref();
    let Some(guild_id) = authorize(
        ctx,
        invocation,
        &args.target,
        Permissions::KICK_MEMBERS,
        "kick",
    )
    .await?
    else {
        return Ok(());
    };

    if let Err(source) = api
        .kick_member(guild_id, args.target.user_id, &args.reason)
        .await
    {
        error!(?source, target = args.target.user_id.get(), "kick request failed");
        let failed = action_failed_message(&source);
        respond_ephemeral_message(api, &invocation.interaction, &failed).await?;
        return Ok(());
    }

    let embed = moderation_action_embed(
        &KICK,
        &args.target,
        invocation.invoker.user_id,
        Some(&args.reason),
        None,
    )?;
    respond_embed(api, &invocation.interaction, embed).await
}

#[cfg(test)]
mod tests {
    use herald_test_utils::{Call, RecordingApi, fixture};

    use super::*;
    use crate::moderation::{DEFAULT_REASON, embeds::target_profile};

    fn args() -> ModerationArgs {
        ModerationArgs {
            target: target_profile(None, fixture::MEMBER_ID),
            reason: DEFAULT_REASON.to_owned(),
        }
    }

    #[tokio::test]
    async fn kicks_with_default_reason() -> anyhow::Result<()> {
        let api = RecordingApi::new().shared();
        let ctx = fixture::context(api.clone()).await?;
        let invocation = fixture::invocation(fixture::MODERATOR_ID, Permissions::KICK_MEMBERS);

        run(&ctx, &invocation, args()).await?;

        assert_eq!(
            api.actions().await,
            vec![Call::Kick {
                guild_id: fixture::GUILD_ID,
                user_id: fixture::MEMBER_ID,
                reason: DEFAULT_REASON.to_owned(),
            }]
        );
        Ok(())
    }

    #[tokio::test]
    async fn caller_without_kick_permission_never_reaches_discord() -> anyhow::Result<()> {
        let api = RecordingApi::new().shared();
        let ctx = fixture::context(api.clone()).await?;
        let invocation = fixture::invocation(fixture::MODERATOR_ID, Permissions::BAN_MEMBERS);

        run(&ctx, &invocation, args()).await?;

        assert!(api.actions().await.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn outside_a_guild_nothing_is_attempted() -> anyhow::Result<()> {
        let api = RecordingApi::new().shared();
        let ctx = fixture::context(api.clone()).await?;
        let invocation = fixture::direct_message_invocation(fixture::MODERATOR_ID);

        run(&ctx, &invocation, args()).await?;

        assert!(api.actions().await.is_empty());
        let responses = api.responses().await;
        assert_eq!(
            responses[0].data.as_ref().and_then(|data| data.content.as_deref()),
            Some("This command only works in servers.")
        );
        Ok(())
    }
}
