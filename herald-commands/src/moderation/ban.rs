use tracing::error;
use twilight_model::{
    application::command::{Command, CommandType},
    guild::Permissions,
};
use twilight_util::builder::command::{CommandBuilder, StringBuilder, UserBuilder};

use crate::CommandMeta;
use crate::moderation::embeds::{BAN, action_failed_message, moderation_action_embed};
use crate::moderation::{ModerationArgs, authorize};
use herald_core::{Context, model::Invocation};
use herald_utils::respond::{respond_embed, respond_ephemeral_message};

pub const NAME: &str = "ban";

pub const META: CommandMeta = CommandMeta {
    name: NAME,
    desc: "Ban a member from the server.",
    category: "moderation",
    usage: "/ban <member> [reason]",
};

pub fn command() -> anyhow::Result<Command> {
    Ok(CommandBuilder::new(META.name, META.desc, CommandType::ChatInput)
        .option(UserBuilder::new("member", "Member to ban").required(true))
        .option(StringBuilder::new("reason", "Reason for the ban"))
        .validate()?
        .build())
}

/// Ban a target member after permission validation.
pub async fn run(ctx: &Context, invocation: &Invocation, args: ModerationArgs) -> anyhow::Result<()> {
    let api = ctx.api.as_ref();
    let Some(guild_id) = authorize(
        ctx,
        invocation,
        &args.target,
        Permissions::BAN_MEMBERS,
        "ban",
    )
    .await?
    else {
        return Ok(());
    };

    if let Err(source) = api
        .ban_member(guild_id, args.target.user_id, &args.reason)
        .await
    {
        error!(?source, target = args.target.user_id.get(), "ban request failed");
        let failed = action_failed_message(&source);
        respond_ephemeral_message(api, &invocation.interaction, &failed).await?;
        return Ok(());
    }

    let embed = moderation_action_embed(
        &BAN,
        &args.target,
        invocation.invoker.user_id,
        Some(&args.reason),
        None,
    )?;
    respond_embed(api, &invocation.interaction, embed).await
}
