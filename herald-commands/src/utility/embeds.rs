use twilight_model::{
    channel::message::embed::Embed,
    id::{Id, marker::GuildMarker},
};
use twilight_util::{
    builder::embed::{EmbedBuilder, EmbedFieldBuilder, EmbedFooterBuilder},
    snowflake::Snowflake,
};

use crate::CommandMeta;
use herald_core::model::{GuildSummary, MemberProfile, RoleSummary};
use herald_utils::embed::{
    DEFAULT_EMBED_COLOR, TimestampStyle, discord_timestamp, image_source,
};

const CATEGORIES: [(&str, &str); 4] = [
    ("announcement", "🎯 Announcements"),
    ("moderation", "🛡️ Moderation"),
    ("info", "ℹ️ Information"),
    ("verification", "✅ Verification"),
];

fn display_category(category: &str) -> &str {
    CATEGORIES
        .iter()
        .find(|(key, _)| *key == category)
        .map_or(category, |(_, label)| *label)
}

fn category_lines(commands: &[CommandMeta], category: &str) -> String {
    commands
        .iter()
        .filter(|command| command.category == category)
        .map(|command| format!("`/{}` - {}", command.name, command.desc))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the `/help` catalog, one field per category in a fixed order.
///
/// Categories not in the fixed order are appended after it so nothing registered goes missing.
pub fn help_embed(commands: &[CommandMeta]) -> anyhow::Result<Embed> {
    let mut categories: Vec<&str> = CATEGORIES.iter().map(|(key, _)| *key).collect();
    for command in commands {
        if !categories.contains(&command.category) {
            categories.push(command.category);
        }
    }

    let mut builder = EmbedBuilder::new()
        .title("Herald help")
        .description("Available commands")
        .color(DEFAULT_EMBED_COLOR)
        .footer(EmbedFooterBuilder::new(
            "Type / in the message box to see each command's options.",
        ));

    for category in categories {
        let lines = category_lines(commands, category);
        if lines.is_empty() {
            continue;
        }
        builder = builder.field(EmbedFieldBuilder::new(display_category(category), lines).build());
    }

    Ok(builder.validate()?.build())
}

/// Server overview for `/info` with the server sentinel.
pub fn server_info_embed(guild: &GuildSummary) -> anyhow::Result<Embed> {
    let created_secs = guild.id.timestamp() / 1000;
    let member_count = guild
        .member_count
        .map_or_else(|| "Unknown".to_owned(), |count| count.to_string());

    let mut builder = EmbedBuilder::new()
        .title(format!("{} info", guild.name))
        .color(DEFAULT_EMBED_COLOR)
        .field(EmbedFieldBuilder::new("Owner", format!("<@{}>", guild.owner_id.get())).inline())
        .field(EmbedFieldBuilder::new("Members", member_count).inline())
        .field(
            EmbedFieldBuilder::new(
                "Created",
                discord_timestamp(created_secs, TimestampStyle::ShortDate),
            )
            .inline(),
        )
        .field(EmbedFieldBuilder::new("Channels", guild.channel_count.to_string()).inline())
        .field(EmbedFieldBuilder::new("Roles", guild.role_count.to_string()).inline())
        .field(EmbedFieldBuilder::new("Boosts", guild.boost_count.to_string()).inline());

    if let Some(icon) = guild.icon_url.as_deref().and_then(image_source) {
        builder = builder.thumbnail(icon);
    }

    Ok(builder.validate()?.build())
}

/// Color of the member's highest positioned colored role, or the default blue.
pub fn member_color(member: &MemberProfile, roles: &[RoleSummary]) -> u32 {
    roles
        .iter()
        .filter(|role| role.color != 0 && member.role_ids.contains(&role.id))
        .max_by_key(|role| role.position)
        .map_or(DEFAULT_EMBED_COLOR, |role| role.color)
}

/// Member profile for `/info <member>`.
pub fn member_info_embed(
    guild_id: Id<GuildMarker>,
    member: &MemberProfile,
    color: u32,
) -> anyhow::Result<Embed> {
    let created_secs = member.user_id.timestamp() / 1000;
    let joined = member.joined_at.map_or_else(
        || "Unknown".to_owned(),
        |joined| discord_timestamp(joined.as_secs(), TimestampStyle::ShortDateTime),
    );
    let everyone_role = guild_id.cast();
    let roles = member
        .role_ids
        .iter()
        .filter(|role_id| **role_id != everyone_role)
        .map(|role_id| format!("<@&{}>", role_id.get()))
        .collect::<Vec<_>>()
        .join(" ");

    let mut builder = EmbedBuilder::new()
        .title(format!("{} info", member.username))
        .color(color)
        .field(EmbedFieldBuilder::new("Username", member.username.as_str()).inline())
        .field(
            EmbedFieldBuilder::new("Nickname", member.nickname.as_deref().unwrap_or("None"))
                .inline(),
        )
        .field(EmbedFieldBuilder::new("ID", member.user_id.get().to_string()))
        .field(EmbedFieldBuilder::new("Joined", joined).inline())
        .field(
            EmbedFieldBuilder::new(
                "Account created",
                discord_timestamp(created_secs, TimestampStyle::ShortDateTime),
            )
            .inline(),
        );

    if !roles.is_empty() {
        builder = builder.field(EmbedFieldBuilder::new("Roles", roles));
    }

    if let Some(avatar) = image_source(&member.avatar_url) {
        builder = builder.thumbnail(avatar);
    }

    Ok(builder.validate()?.build())
}

pub fn user_not_found_message() -> &'static str {
    "User not found."
}

#[cfg(test)]
mod tests {
    use herald_test_utils::fixture;
    use herald_utils::embed::RED;

    use super::*;

    fn field<'a>(embed: &'a Embed, name: &str) -> Option<&'a str> {
        embed
            .fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }

    #[test]
    fn server_embed_carries_counts() -> anyhow::Result<()> {
        let embed = server_info_embed(&fixture::guild())?;

        assert_eq!(embed.title.as_deref(), Some("Test Guild info"));
        assert_eq!(field(&embed, "Members"), Some("42"));
        assert_eq!(field(&embed, "Channels"), Some("7"));
        assert_eq!(field(&embed, "Roles"), Some("5"));
        assert_eq!(field(&embed, "Boosts"), Some("2"));
        assert_eq!(
            field(&embed, "Owner"),
            Some(format!("<@{}>", fixture::OWNER_ID).as_str())
        );
        Ok(())
    }

    #[test]
    fn member_roles_skip_everyone_and_vanish_when_empty() -> anyhow::Result<()> {
        let mut member = fixture::member(fixture::MEMBER_ID, "alice", None);
        member.role_ids = vec![fixture::GUILD_ID.cast(), Id::new(77)];

        let embed = member_info_embed(fixture::GUILD_ID, &member, DEFAULT_EMBED_COLOR)?;
        assert_eq!(field(&embed, "Roles"), Some("<@&77>"));
        assert_eq!(field(&embed, "Nickname"), Some("None"));

        member.role_ids = vec![fixture::GUILD_ID.cast()];
        let embed = member_info_embed(fixture::GUILD_ID, &member, DEFAULT_EMBED_COLOR)?;
        assert_eq!(field(&embed, "Roles"), None);
        Ok(())
    }

    #[test]
    fn account_age_comes_from_the_snowflake() -> anyhow::Result<()> {
        // One millisecond past the Discord epoch (2015-01-01).
        let member = fixture::member(Id::new(1 << 22), "old", None);

        let embed = member_info_embed(fixture::GUILD_ID, &member, DEFAULT_EMBED_COLOR)?;

        assert_eq!(field(&embed, "Account created"), Some("<t:1420070400:f>"));
        Ok(())
    }

    #[test]
    fn highest_colored_role_wins() {
        let mut member = fixture::member(fixture::MEMBER_ID, "alice", None);
        member.role_ids = vec![Id::new(1), Id::new(2), Id::new(3)];
        let roles = [
            RoleSummary { id: Id::new(1), color: RED, position: 1 },
            RoleSummary { id: Id::new(2), color: 0, position: 9 },
            RoleSummary { id: Id::new(3), color: 0x00_11_22, position: 5 },
            RoleSummary { id: Id::new(4), color: 0x99_99_99, position: 20 },
        ];

        assert_eq!(member_color(&member, &roles), 0x00_11_22);
        member.role_ids.clear();
        assert_eq!(member_color(&member, &roles), DEFAULT_EMBED_COLOR);
    }

    #[test]
    fn help_groups_by_category_in_fixed_order() -> anyhow::Result<()> {
        let commands = [
            CommandMeta { name: "kick", desc: "Kick.", category: "moderation", usage: "/kick" },
            CommandMeta { name: "announce", desc: "Post.", category: "announcement", usage: "/announce" },
            CommandMeta { name: "ban", desc: "Ban.", category: "moderation", usage: "/ban" },
        ];

        let embed = help_embed(&commands)?;

        let names: Vec<&str> = embed.fields.iter().map(|field| field.name.as_str()).collect();
        assert_eq!(names, ["🎯 Announcements", "🛡️ Moderation"]);
        assert_eq!(embed.fields[1].value, "`/kick` - Kick.\n`/ban` - Ban.");
        Ok(())
    }
}
