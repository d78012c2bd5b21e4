use tracing::error;
use twilight_model::{
    application::{
        command::{Command, CommandType},
        interaction::application_command::CommandData,
    },
    guild::Permissions,
};
use twilight_util::builder::command::{
    CommandBuilder, IntegerBuilder, StringBuilder, UserBuilder,
};

use crate::CommandMeta;
use crate::moderation::embeds::{
    TIMEOUT, TargetProfile, action_failed_message, invalid_timeout_message,
    moderation_action_embed, target_profile,
};
use crate::moderation::{authorize, reason_or_default};
use herald_core::{Context, model::Invocation};
use herald_utils::{
    options::{integer_option, string_option, user_option},
    respond::{respond_embed, respond_ephemeral_message},
    time::timestamp_after,
};

pub const NAME: &str = "timeout";

pub const META: CommandMeta = CommandMeta {
    name: NAME,
    desc: "Time out a member for a number of minutes.",
    category: "moderation",
    usage: "/timeout <member> <minutes> [reason]",
};

/// Discord caps communication timeouts at 28 days.
pub const MAX_TIMEOUT_MINUTES: i64 = 28 * 24 * 60;

#[derive(Clone, Debug)]
pub struct TimeoutArgs {
    pub target: TargetProfile,
    pub minutes: i64,
    pub reason: String,
}

impl TimeoutArgs {
    pub fn from_data(data: &CommandData) -> Option<Self> {
        let user_id = user_option(&data.options, "member")?;
        let minutes = integer_option(&data.options, "minutes")?;

        Some(Self {
            target: target_profile(data.resolved.as_ref(), user_id),
            minutes,
            reason: reason_or_default(string_option(&data.options, "reason")),
        })
    }
}

pub fn command() -> anyhow::Result<Command> {
    Ok(CommandBuilder::new(META.name, META.desc, CommandType::ChatInput)
        .option(UserBuilder::new("member", "Member to time out").required(true))
        .option(
            IntegerBuilder::new("minutes", "Length of the timeout in minutes")
                .required(true)
                .min_value(1)
                .max_value(MAX_TIMEOUT_MINUTES),
        )
        .option(StringBuilder::new("reason", "Reason for the timeout"))
        .validate()?
        .build())
}

fn minutes_label(minutes: i64) -> String {
    if minutes == 1 {
        "1 minute".to_owned()
    } else {
        format!("{minutes} minutes")
    }
}

/// Apply a communication timeout of `minutes` to the target member.
pub async fn run(ctx: &Context, invocation: &Invocation, args: TimeoutArgs) -> anyhow::Result<()> {
    let api = ctx.api.as_ref();
    let Some(guild_id) = authorize(
        ctx,
        invocation,
        &args.target,
        Permissions::MODERATE_MEMBERS,
        "time out",
    )
    .await?
    else {
        return Ok(());
    };

    if !(1..=MAX_TIMEOUT_MINUTES).contains(&args.minutes) {
        let invalid = invalid_timeout_message(MAX_TIMEOUT_MINUTES);
        respond_ephemeral_message(api, &invocation.interaction, &invalid).await?;
        return Ok(());
    }

    let until = timestamp_after(args.minutes.unsigned_abs() * 60)?;

    if let Err(source) = api
        .timeout_member(guild_id, args.target.user_id, until, &args.reason)
        .await
    {
        error!(?source, target = args.target.user_id.get(), "timeout request failed");
        let failed = action_failed_message(&source);
        respond_ephemeral_message(api, &invocation.interaction, &failed).await?;
        return Ok(());
    }

    let duration = minutes_label(args.minutes);
    let embed = moderation_action_embed(
        &TIMEOUT,
        &args.target,
        invocation.invoker.user_id,
        Some(&args.reason),
        Some(&duration),
    )?;
    respond_embed(api, &invocation.interaction, embed).await
}

#[cfg(test)]
mod tests {
    use herald_test_utils::{Call, RecordingApi, fixture};
    use herald_utils::time::now_unix_secs;

    use super::*;
    use crate::moderation::DEFAULT_REASON;

    fn args(minutes: i64) -> TimeoutArgs {
        TimeoutArgs {
            target: target_profile(None, fixture::MEMBER_ID),
            minutes,
            reason: DEFAULT_REASON.to_owned(),
        }
    }

    #[tokio::test]
    async fn minutes_become_an_expiry_timestamp() -> anyhow::Result<()> {
        let api = RecordingApi::new().shared();
        let ctx = fixture::context(api.clone()).await?;
        let invocation =
            fixture::invocation(fixture::MODERATOR_ID, Permissions::MODERATE_MEMBERS);
        let before = now_unix_secs() as i64;

        run(&ctx, &invocation, args(15)).await?;

        let actions = api.actions().await;
        let [Call::Timeout { user_id, until, .. }] = actions.as_slice() else {
            panic!("expected a single timeout call, got {actions:?}");
        };
        assert_eq!(*user_id, fixture::MEMBER_ID);
        let offset = until.as_secs() - before;
        assert!((15 * 60..=15 * 60 + 2).contains(&offset), "offset {offset}");
        Ok(())
    }

    #[tokio::test]
    async fn caller_without_moderate_permission_never_reaches_discord() -> anyhow::Result<()> {
        let api = RecordingApi::new().shared();
        let ctx = fixture::context(api.clone()).await?;
        let invocation = fixture::invocation(fixture::MODERATOR_ID, Permissions::KICK_MEMBERS);

        run(&ctx, &invocation, args(5)).await?;

        assert!(api.actions().await.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn out_of_range_lengths_are_rejected() -> anyhow::Result<()> {
        let api = RecordingApi::new().shared();
        let ctx = fixture::context(api.clone()).await?;
        let invocation = fixture::admin_invocation();

        run(&ctx, &invocation, args(0)).await?;
        run(&ctx, &invocation, args(MAX_TIMEOUT_MINUTES + 1)).await?;

        assert!(api.actions().await.is_empty());
        assert_eq!(api.responses().await.len(), 2);
        Ok(())
    }

    #[test]
    fn labels_pluralize() {
        assert_eq!(minutes_label(1), "1 minute");
        assert_eq!(minutes_label(10), "10 minutes");
    }
}
