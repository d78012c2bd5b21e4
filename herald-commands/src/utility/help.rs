use twilight_model::application::command::{Command, CommandType};
use twilight_util::builder::command::CommandBuilder;

use crate::utility::embeds::help_embed;
use crate::{COMMANDS, CommandMeta};
use herald_core::{Context, model::Invocation};
use herald_utils::respond::respond_ephemeral_embed;

pub const NAME: &str = "help";

pub const META: CommandMeta = CommandMeta {
    name: NAME,
    desc: "Show how to use the bot.",
    category: "info",
    usage: "/help",
};

pub fn command() -> anyhow::Result<Command> {
    Ok(CommandBuilder::new(META.name, META.desc, CommandType::ChatInput)
        .validate()?
        .build())
}

/// Reply with the command catalog, visible only to the invoker.
pub async fn run(ctx: &Context, invocation: &Invocation) -> anyhow::Result<()> {
    let embed = help_embed(COMMANDS)?;
    respond_ephemeral_embed(ctx.api.as_ref(), &invocation.interaction, embed).await
}

#[cfg(test)]
mod tests {
    use herald_test_utils::{RecordingApi, fixture};
    use twilight_model::{channel::message::MessageFlags, guild::Permissions};

    use super::*;

    #[tokio::test]
    async fn help_is_ephemeral_and_lists_every_command() -> anyhow::Result<()> {
        let api = RecordingApi::new().shared();
        let ctx = fixture::context(api.clone()).await?;
        let invocation = fixture::invocation(fixture::MEMBER_ID, Permissions::empty());

        run(&ctx, &invocation).await?;

        let responses = api.responses().await;
        let data = responses[0].data.as_ref().expect("response data");
        assert_eq!(data.flags, Some(MessageFlags::EPHEMERAL));
        let embed = &data.embeds.as_ref().expect("embeds")[0];
        let listed: String = embed
            .fields
            .iter()
            .map(|field| field.value.as_str())
            .collect();
        for command in COMMANDS {
            assert!(listed.contains(&format!("`/{}`", command.name)), "{}", command.name);
        }
        Ok(())
    }
}
