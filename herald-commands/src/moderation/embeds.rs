use twilight_model::{
    application::interaction::InteractionDataResolved,
    channel::message::embed::Embed,
    id::{Id, marker::UserMarker},
};
use twilight_util::builder::embed::{EmbedAuthorBuilder, EmbedBuilder, EmbedFieldBuilder};

use herald_core::model::avatar_url;
use herald_utils::embed::{GOLD, GREEN, ORANGE, RED, image_source, sanitize_mentions};

/// Display data for the member a moderation command targets.
#[derive(Clone, Debug)]
pub struct TargetProfile {
    pub user_id: Id<UserMarker>,
    pub display_name: String,
    pub avatar_url: String,
}

/// Build a target profile from the users Discord resolved alongside the command.
pub fn target_profile(
    resolved: Option<&InteractionDataResolved>,
    user_id: Id<UserMarker>,
) -> TargetProfile {
    let nickname = resolved
        .and_then(|resolved| resolved.members.get(&user_id))
        .and_then(|member| member.nick.clone());

    match resolved.and_then(|resolved| resolved.users.get(&user_id)) {
        Some(user) => TargetProfile {
            user_id,
            display_name: nickname
                .or_else(|| user.global_name.clone())
                .unwrap_or_else(|| user.name.clone()),
            avatar_url: avatar_url(user_id, user.avatar),
        },
        None => TargetProfile {
            user_id,
            display_name: format!("User {}", user_id.get()),
            avatar_url: avatar_url(user_id, None),
        },
    }
}

/// Presentation of one kind of moderation action.
#[derive(Clone, Copy, Debug)]
pub struct ModerationAction {
    pub title: &'static str,
    pub past_tense: &'static str,
    pub color: u32,
}

pub const BAN: ModerationAction = ModerationAction {
    title: "Member banned",
    past_tense: "banned",
    color: RED,
};

pub const KICK: ModerationAction = ModerationAction {
    title: "Member kicked",
    past_tense: "kicked",
    color: ORANGE,
};

pub const TIMEOUT: ModerationAction = ModerationAction {
    title: "Member timed out",
    past_tense: "timed out",
    color: GOLD,
};

pub const UNTIMEOUT: ModerationAction = ModerationAction {
    title: "Timeout removed",
    past_tense: "released from timeout",
    color: GREEN,
};

/// Build a moderation action-result embed.
///
/// This is a pure view/template helper and does not perform HTTP requests.
pub fn moderation_action_embed(
    action: &ModerationAction,
    target: &TargetProfile,
    moderator_id: Id<UserMarker>,
    reason: Option<&str>,
    duration: Option<&str>,
) -> anyhow::Result<Embed> {
    let headline = format!("{} has been {}", target.display_name, action.past_tense);
    let mut author = EmbedAuthorBuilder::new(headline);
    if let Some(icon) = image_source(&target.avatar_url) {
        author = author.icon_url(icon);
    }

    let mut builder = EmbedBuilder::new()
        .title(action.title)
        .color(action.color)
        .author(author.build())
        .description(format!(
            "<@{}> has been {}",
            target.user_id.get(),
            action.past_tense
        ));

    if let Some(duration) = duration {
        builder = builder.field(EmbedFieldBuilder::new("Duration", duration).inline().build());
    }

    if let Some(reason) = reason {
        builder = builder.field(
            EmbedFieldBuilder::new("Reason", sanitize_mentions(reason))
                .inline()
                .build(),
        );
    }

    let builder = builder.field(
        EmbedFieldBuilder::new("Moderator", format!("<@{}>", moderator_id.get()))
            .inline()
            .build(),
    );

    Ok(builder.validate()?.build())
}

pub fn guild_only_message() -> &'static str {
    "This command only works in servers."
}

pub fn permission_denied_message(action: &str) -> String {
    format!("You don't have permission to {action} members.")
}

pub fn self_action_message(action: &str) -> String {
    format!("You can't {action} yourself.")
}

pub fn action_failed_message(error: &impl std::fmt::Display) -> String {
    format!("An error occurred: {error}")
}

pub fn invalid_timeout_message(max_minutes: i64) -> String {
    format!("Timeout length must be between 1 and {max_minutes} minutes.")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> TargetProfile {
        TargetProfile {
            user_id: Id::new(55),
            display_name: "alice".to_owned(),
            avatar_url: avatar_url(Id::new(55), None),
        }
    }

    fn field<'a>(embed: &'a Embed, name: &str) -> Option<&'a str> {
        embed
            .fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }

    #[test]
    fn action_embed_lists_target_reason_and_moderator() -> anyhow::Result<()> {
        let embed = moderation_action_embed(&BAN, &target(), Id::new(9), Some("spam"), None)?;

        assert_eq!(embed.color, Some(RED));
        assert_eq!(embed.description.as_deref(), Some("<@55> has been banned"));
        assert_eq!(field(&embed, "Reason"), Some("spam"));
        assert_eq!(field(&embed, "Moderator"), Some("<@9>"));
        assert_eq!(field(&embed, "Duration"), None);
        assert_eq!(
            embed.author.as_ref().map(|author| author.name.as_str()),
            Some("alice has been banned")
        );
        Ok(())
    }

    #[test]
    fn reasons_cannot_smuggle_mentions() -> anyhow::Result<()> {
        let embed = moderation_action_embed(&KICK, &target(), Id::new(9), Some("@everyone"), None)?;

        assert_eq!(field(&embed, "Reason"), Some("@\u{200B}everyone"));
        Ok(())
    }

    #[test]
    fn unresolved_targets_fall_back_to_id() {
        let profile = target_profile(None, Id::new(77));

        assert_eq!(profile.display_name, "User 77");
    }
}
