pub mod announcement;
pub mod moderation;
pub mod utility;
pub mod verification;

use tracing::warn;
use twilight_model::{
    application::{
        command::Command,
        interaction::{InteractionData, application_command::CommandData},
    },
    gateway::payload::incoming::InteractionCreate,
    id::{Id, marker::ApplicationMarker},
};

use crate::announcement::announce::{self, AnnounceArgs};
use crate::moderation::{ModerationArgs, ban, kick, timeout, untimeout};
use crate::utility::{help, info};
use crate::verification::{embeds::CUSTOM_ID_PREFIX, panel};
use herald_core::{Context, model::Invocation};
use herald_utils::{interaction::invocation_from, respond::respond_ephemeral_message};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ComponentRoute {
    VerificationPanel,
}

fn route_component(custom_id: &str) -> Option<ComponentRoute> {
    const ROUTES: [(&str, ComponentRoute); 1] =
        [(CUSTOM_ID_PREFIX, ComponentRoute::VerificationPanel)];

    ROUTES
        .into_iter()
        .find_map(|(prefix, route)| custom_id.starts_with(prefix).then_some(route))
}

// Global command meta data
pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    announce::META,
    ban::META,
    kick::META,
    timeout::META,
    untimeout::META,
    info::META,
    help::META,
    panel::META,
    // Add new commands here
];

/// Slash command definitions in the same order as [`COMMANDS`].
pub fn command_definitions() -> anyhow::Result<Vec<Command>> {
    Ok(vec![
        announce::command()?,
        ban::command()?,
        kick::command()?,
        timeout::command()?,
        untimeout::command()?,
        info::command()?,
        help::command()?,
        panel::command()?,
    ])
}

/// Replace the application's global commands with this bot's definitions.
pub async fn register_commands(
    ctx: &Context,
    application_id: Id<ApplicationMarker>,
) -> anyhow::Result<usize> {
    let commands = command_definitions()?;
    let registered = ctx
        .api
        .set_global_commands(application_id, &commands)
        .await?;

    Ok(registered)
}

async fn invalid_options(ctx: &Context, invocation: &Invocation, name: &str) -> anyhow::Result<()> {
    warn!(command = name, "missing or mistyped command options");
    respond_ephemeral_message(
        ctx.api.as_ref(),
        &invocation.interaction,
        "That command was sent with missing or invalid options.",
    )
    .await
}

async fn run_command(ctx: &Context, invocation: &Invocation, data: &CommandData) -> anyhow::Result<()> {
    let name = data.name.as_str();

    match name {
        announce::NAME => match AnnounceArgs::from_data(data) {
            Some(args) => announce::run(ctx, invocation, args).await,
            None => invalid_options(ctx, invocation, name).await,
        },

        ban::NAME => match ModerationArgs::from_data(data) {
            Some(args) => ban::run(ctx, invocation, args).await,
            None => invalid_options(ctx, invocation, name).await,
        },
        kick::NAME => match ModerationArgs::from_data(data) {
            Some(args) => kick::run(ctx, invocation, args).await,
            None => invalid_options(ctx, invocation, name).await,
        },
        timeout::NAME => match timeout::TimeoutArgs::from_data(data) {
            Some(args) => timeout::run(ctx, invocation, args).await,
            None => invalid_options(ctx, invocation, name).await,
        },
        untimeout::NAME => match ModerationArgs::from_data(data) {
            Some(args) => untimeout::run(ctx, invocation, args).await,
            None => invalid_options(ctx, invocation, name).await,
        },

        info::NAME => info::run(ctx, invocation, info::InfoArgs::from_data(data)).await,
        help::NAME => help::run(ctx, invocation).await,

        panel::NAME => match panel::PanelArgs::from_data(data) {
            Some(args) => panel::run(ctx, invocation, args).await,
            None => invalid_options(ctx, invocation, name).await,
        },
        // Add new commands here
        other => {
            warn!(command = other, "received unknown command");
            Ok(())
        }
    }
}

/// Route one interaction: commands by name, component clicks by custom-id prefix.
pub async fn handle_interaction(
    ctx: Context,
    interaction: Box<InteractionCreate>,
) -> anyhow::Result<()> {
    let Some(invocation) = invocation_from(&interaction) else {
        return Ok(());
    };

    match interaction.data.as_ref() {
        Some(InteractionData::ApplicationCommand(data)) => {
            run_command(&ctx, &invocation, data).await
        }
        Some(InteractionData::MessageComponent(data)) => match route_component(&data.custom_id) {
            Some(ComponentRoute::VerificationPanel) => {
                panel::handle_click(&ctx, &invocation, &data.custom_id).await
            }
            None => Ok(()),
        },
        _ => Ok(()),
    }
}
