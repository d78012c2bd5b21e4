use tracing::error;
use twilight_model::{
    application::{
        command::{Command, CommandType},
        interaction::application_command::CommandData,
    },
    channel::message::embed::Embed,
    id::{Id, marker::GuildMarker},
};
use twilight_util::builder::command::{CommandBuilder, StringBuilder};

use crate::CommandMeta;
use crate::moderation::embeds::{action_failed_message, guild_only_message};
use crate::utility::embeds::{
    member_color, member_info_embed, server_info_embed, user_not_found_message,
};
use herald_core::{
    Context, DiscordApi,
    model::{Invocation, MemberProfile},
};
use herald_utils::{
    options::string_option,
    parse::{is_mention_form, parse_mention_user_id},
    respond::{defer_ephemeral, respond_ephemeral_message},
};

pub const NAME: &str = "info";

pub const META: CommandMeta = CommandMeta {
    name: NAME,
    desc: "Show information about the server or a member.",
    category: "info",
    usage: "/info [target]",
};

/// Target value that selects the server overview instead of a member.
pub const SERVER_TARGET: &str = "サーバー";

#[derive(Clone, Debug)]
pub struct InfoArgs {
    pub target: String,
}

impl InfoArgs {
    pub fn from_data(data: &CommandData) -> Self {
        Self {
            target: string_option(&data.options, "target")
                .unwrap_or(SERVER_TARGET)
                .to_owned(),
        }
    }

    fn wants_server(&self) -> bool {
        self.target.to_lowercase() == SERVER_TARGET
    }
}

pub fn command() -> anyhow::Result<Command> {
    Ok(CommandBuilder::new(META.name, META.desc, CommandType::ChatInput)
        .option(StringBuilder::new(
            "target",
            "A member mention or name, or サーバー for the server itself",
        ))
        .validate()?
        .build())
}

/// First member whose username or nickname contains `needle`, ignoring case.
pub fn find_member_by_name<'a>(
    members: &'a [MemberProfile],
    needle: &str,
) -> Option<&'a MemberProfile> {
    let needle = needle.to_lowercase();

    members.iter().find(|member| {
        member.username.to_lowercase().contains(&needle)
            || member
                .nickname
                .as_ref()
                .is_some_and(|nickname| nickname.to_lowercase().contains(&needle))
    })
}

async fn resolve_member(
    api: &dyn DiscordApi,
    guild_id: Id<GuildMarker>,
    target: &str,
) -> anyhow::Result<Option<MemberProfile>> {
    if is_mention_form(target) {
        let Some(user_id) = parse_mention_user_id(target) else {
            return Ok(None);
        };
        return Ok(api.member(guild_id, user_id).await?);
    }

    let members = api.members(guild_id).await?;
    Ok(find_member_by_name(&members, target).cloned())
}

async fn lookup(
    api: &dyn DiscordApi,
    guild_id: Id<GuildMarker>,
    args: &InfoArgs,
) -> anyhow::Result<Option<Embed>> {
    if args.wants_server() {
        let guild = api.guild_summary(guild_id).await?;
        return Ok(Some(server_info_embed(&guild)?));
    }

    let Some(member) = resolve_member(api, guild_id, &args.target).await? else {
        return Ok(None);
    };

    let roles = api.guild_roles(guild_id).await?;
    let embed = member_info_embed(guild_id, &member, member_color(&member, &roles))?;
    Ok(Some(embed))
}

/// Render the server overview or a member profile.
///
/// Deferred before any lookup. The embed, a miss or a failed lookup arrive as private follow-ups.
pub async fn run(ctx: &Context, invocation: &Invocation, args: InfoArgs) -> anyhow::Result<()> {
    let api = ctx.api.as_ref();
    let interaction = &invocation.interaction;
    let Some(guild_id) = invocation.guild_id else {
        respond_ephemeral_message(api, interaction, guild_only_message()).await?;
        return Ok(());
    };

    defer_ephemeral(api, interaction).await?;

    match lookup(api, guild_id, &args).await {
        Ok(Some(embed)) => api.create_followup_embed(interaction, &embed, true).await?,
        Ok(None) => {
            api.create_followup(interaction, user_not_found_message(), true)
                .await?
        }
        Err(source) => {
            error!(?source, target = %args.target, "info lookup failed");
            let failed = action_failed_message(&source);
            api.create_followup(interaction, &failed, true).await?;
        }
    }

    Ok(())
}
