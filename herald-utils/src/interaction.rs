use twilight_model::{application::interaction::Interaction, guild::Permissions};

use herald_core::model::{InteractionRef, Invocation, Invoker, avatar_url};

/// Reduce a gateway interaction to the addressing and invoker data handlers need.
///
/// Returns `None` when the payload carries no user at all.
pub fn invocation_from(interaction: &Interaction) -> Option<Invocation> {
    let user = interaction.author()?;
    let member = interaction.member.as_ref();

    let display_name = member
        .and_then(|member| member.nick.clone())
        .or_else(|| user.global_name.clone())
        .unwrap_or_else(|| user.name.clone());
    let permissions = member
        .and_then(|member| member.permissions)
        .unwrap_or_else(Permissions::empty);
    let role_ids = member
        .map(|member| member.roles.clone())
        .unwrap_or_default();

    Some(Invocation {
        interaction: InteractionRef {
            application_id: interaction.application_id,
            id: interaction.id,
            token: interaction.token.clone(),
        },
        guild_id: interaction.guild_id,
        channel_id: interaction.channel.as_ref().map(|channel| channel.id),
        invoker: Invoker {
            user_id: user.id,
            display_name,
            avatar_url: avatar_url(user.id, user.avatar),
            permissions,
            role_ids,
        },
    })
}
