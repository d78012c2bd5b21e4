use tracing::{error, info, warn};
use twilight_model::{
    application::{
        command::{Command, CommandType},
        interaction::application_command::CommandData,
    },
    guild::Permissions,
    id::{Id, marker::RoleMarker},
};
use twilight_util::builder::command::{CommandBuilder, RoleBuilder, StringBuilder};

use crate::CommandMeta;
use crate::moderation::embeds::{action_failed_message, guild_only_message};
use crate::verification::embeds::{
    already_verified_message, panel_components, panel_embed, panel_inactive_message,
    panel_posted_message, parse_panel_custom_id, role_granted_message,
};
use herald_core::{Context, model::Invocation};
use herald_database::auth_panels::{
    NewAuthPanel, attach_message, create_panel, delete_panel, find_panel,
};
use herald_utils::{
    options::{role_option, string_option},
    respond::respond_ephemeral_message,
};

pub const NAME: &str = "auth-panel";

pub const META: CommandMeta = CommandMeta {
    name: NAME,
    desc: "Post a verification panel that grants a role.",
    category: "verification",
    usage: "/auth-panel <role> [title] [description]",
};

pub const DEFAULT_TITLE: &str = "Verification";
pub const DEFAULT_DESCRIPTION: &str = "Click the button below to verify.";

const DENIED: &str = "You don't have permission to run this command.";

#[derive(Clone, Debug)]
pub struct PanelArgs {
    pub role_id: Id<RoleMarker>,
    pub title: String,
    pub description: String,
}

impl PanelArgs {
    pub fn from_data(data: &CommandData) -> Option<Self> {
        let options = &data.options;

        Some(Self {
            role_id: role_option(options, "role")?,
            title: string_option(options, "title")
                .unwrap_or(DEFAULT_TITLE)
                .to_owned(),
            description: string_option(options, "description")
                .unwrap_or(DEFAULT_DESCRIPTION)
                .to_owned(),
        })
    }
}

pub fn command() -> anyhow::Result<Command> {
    Ok(CommandBuilder::new(META.name, META.desc, CommandType::ChatInput)
        .name_localizations([("ja", "認証")])
        .option(RoleBuilder::new("role", "Role to grant once verified").required(true))
        .option(StringBuilder::new("title", "Panel title"))
        .option(StringBuilder::new("description", "Panel description"))
        .validate()?
        .build())
}

/// Store a panel binding and post its embed with a verify button.
///
/// The binding is removed again if the panel message cannot be posted.
pub async fn run(ctx: &Context, invocation: &Invocation, args: PanelArgs) -> anyhow::Result<()> {
    let api = ctx.api.as_ref();

    let (Some(guild_id), Some(channel_id)) = (invocation.guild_id, invocation.channel_id) else {
        respond_ephemeral_message(api, &invocation.interaction, guild_only_message()).await?;
        return Ok(());
    };

    if !invocation.invoker.has_permission(Permissions::ADMINISTRATOR) {
        respond_ephemeral_message(api, &invocation.interaction, DENIED).await?;
        return Ok(());
    }

    let embed = panel_embed(&args.title, &args.description, args.role_id)?;
    let panel_id = create_panel(
        &ctx.db,
        NewAuthPanel {
            guild_id,
            channel_id,
            role_id: args.role_id,
            created_by: invocation.invoker.user_id,
        },
    )
    .await?;

    let message_id = match api
        .send_embed(channel_id, &embed, &panel_components(panel_id))
        .await
    {
        Ok(message_id) => message_id,
        Err(source) => {
            error!(?source, panel_id, "failed to post verification panel");
            delete_panel(&ctx.db, panel_id).await?;
            let failed = action_failed_message(&source);
            respond_ephemeral_message(api, &invocation.interaction, &failed).await?;
            return Ok(());
        }
    };

    attach_message(&ctx.db, panel_id, message_id).await?;
    info!(panel_id, role = args.role_id.get(), "verification panel posted");

    respond_ephemeral_message(api, &invocation.interaction, panel_posted_message()).await
}

/// Handle a click on any verification panel's button.
pub async fn handle_click(
    ctx: &Context,
    invocation: &Invocation,
    custom_id: &str,
) -> anyhow::Result<()> {
    let api = ctx.api.as_ref();

    let panel = match parse_panel_custom_id(custom_id) {
        Some(panel_id) => find_panel(&ctx.db, panel_id).await?,
        None => None,
    };

    let Some(panel) = panel.filter(|panel| Some(panel.guild_id) == invocation.guild_id) else {
        warn!(custom_id, "click on unknown verification panel");
        respond_ephemeral_message(api, &invocation.interaction, panel_inactive_message()).await?;
        return Ok(());
    };

    if invocation.invoker.has_role(panel.role_id) {
        respond_ephemeral_message(api, &invocation.interaction, already_verified_message())
            .await?;
        return Ok(());
    }

    if let Err(source) = api
        .add_member_role(panel.guild_id, invocation.invoker.user_id, panel.role_id)
        .await
    {
        error!(?source, panel_id = panel.id, "failed to grant verification role");
        let failed = action_failed_message(&source);
        respond_ephemeral_message(api, &invocation.interaction, &failed).await?;
        return Ok(());
    }

    let granted = role_granted_message(panel.role_id);
    respond_ephemeral_message(api, &invocation.interaction, &granted).await
}
