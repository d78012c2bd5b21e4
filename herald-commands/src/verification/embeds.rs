use twilight_model::{
    channel::message::{
        EmojiReactionType,
        component::{ActionRow, Button, ButtonStyle, Component},
        embed::Embed,
    },
    id::{Id, marker::RoleMarker},
};
use twilight_util::builder::embed::{EmbedBuilder, EmbedFieldBuilder, EmbedFooterBuilder};

use herald_utils::embed::GREEN;

/// Prefix of every verification button's custom id; the panel row id follows it.
pub const CUSTOM_ID_PREFIX: &str = "auth:";

pub fn panel_custom_id(panel_id: i64) -> String {
    format!("{CUSTOM_ID_PREFIX}{panel_id}")
}

/// Panel row id carried by a verification button, if the custom id is well formed.
pub fn parse_panel_custom_id(custom_id: &str) -> Option<i64> {
    custom_id
        .strip_prefix(CUSTOM_ID_PREFIX)?
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
}

pub fn panel_embed(title: &str, description: &str, role_id: Id<RoleMarker>) -> anyhow::Result<Embed> {
    let embed = EmbedBuilder::new()
        .title(title)
        .description(description)
        .color(GREEN)
        .field(EmbedFieldBuilder::new("Role granted", format!("<@&{}>", role_id.get())))
        .footer(EmbedFooterBuilder::new("This message is a verification panel"))
        .validate()?
        .build();

    Ok(embed)
}

/// A single green "Verify" button bound to `panel_id`.
pub fn panel_components(panel_id: i64) -> Vec<Component> {
    let verify = Button {
        custom_id: Some(panel_custom_id(panel_id)),
        disabled: false,
        emoji: Some(EmojiReactionType::Unicode {
            name: "✅".to_owned(),
        }),
        label: Some("Verify".to_owned()),
        style: ButtonStyle::Success,
        url: None,
        sku_id: None,
    };

    vec![Component::ActionRow(ActionRow {
        components: vec![Component::Button(verify)],
    })]
}

pub fn panel_posted_message() -> &'static str {
    "Verification panel posted!"
}

pub fn panel_inactive_message() -> &'static str {
    "This verification panel is no longer active."
}

pub fn already_verified_message() -> &'static str {
    "You are already verified!"
}

pub fn role_granted_message(role_id: Id<RoleMarker>) -> String {
    format!("Granted <@&{}>! Verification complete.", role_id.get())
}
