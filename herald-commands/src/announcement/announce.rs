use tracing::{error, info};
use twilight_model::{
    application::{
        command::{Command, CommandType},
        interaction::application_command::CommandData,
    },
    channel::{ChannelType, message::embed::Embed},
    guild::Permissions,
    id::{Id, marker::ChannelMarker},
};
use twilight_util::builder::{
    command::{ChannelBuilder, CommandBuilder, StringBuilder},
    embed::{EmbedBuilder, EmbedFooterBuilder},
};

use crate::CommandMeta;
use crate::announcement::format::{mention_line, resolve_color};
use herald_core::{ApiError, Context, DiscordApi, model::Invocation};
use herald_utils::{
    embed::image_source,
    options::{channel_option, string_option},
    parse::{http_url, unescape_newlines},
    respond::{defer_ephemeral, respond_ephemeral_message},
    time::now_timestamp,
};

pub const NAME: &str = "announce";

pub const META: CommandMeta = CommandMeta {
    name: NAME,
    desc: "Post a rich announcement embed.",
    category: "announcement",
    usage: "/announce <title> <content> [mention] [color] [image_url] [thumbnail_url] [footer] [channel]",
};

const SENT: &str = "✅ Announcement sent!";
const FORBIDDEN: &str = "❌ I don't have permission to post in that channel.";
const DENIED: &str = "❌ You don't have permission to use this command.";

#[derive(Clone, Debug)]
pub struct AnnounceArgs {
    pub title: String,
    pub content: String,
    pub mention: String,
    pub color: String,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub footer: Option<String>,
    pub channel_id: Option<Id<ChannelMarker>>,
}

impl AnnounceArgs {
    pub fn from_data(data: &CommandData) -> Option<Self> {
        let options = &data.options;
        let owned = |name: &str| string_option(options, name).map(ToOwned::to_owned);

        Some(Self {
            title: owned("title")?,
            content: owned("content")?,
            mention: owned("mention").unwrap_or_else(|| "everyone".to_owned()),
            color: owned("color").unwrap_or_else(|| "blue".to_owned()),
            image_url: owned("image_url"),
            thumbnail_url: owned("thumbnail_url"),
            footer: owned("footer"),
            channel_id: channel_option(options, "channel"),
        })
    }
}

pub fn command() -> anyhow::Result<Command> {
    Ok(CommandBuilder::new(META.name, META.desc, CommandType::ChatInput)
        .name_localizations([("ja", "お知らせ")])
        .option(StringBuilder::new("title", "Announcement title").required(true))
        .option(
            StringBuilder::new("content", "Body text; type \\n for a line break").required(true),
        )
        .option(StringBuilder::new("mention", "everyone / here / none"))
        .option(StringBuilder::new(
            "color",
            "red, green, blue, yellow, orange, purple, random or #RRGGBB",
        ))
        .option(StringBuilder::new("image_url", "Image URL"))
        .option(StringBuilder::new("thumbnail_url", "Thumbnail URL"))
        .option(StringBuilder::new("footer", "Footer text"))
        .option(
            ChannelBuilder::new("channel", "Channel to post in")
                .channel_types([ChannelType::GuildText, ChannelType::GuildAnnouncement]),
        )
        .validate()?
        .build())
}

/// Build the announcement embed posted to the destination channel.
pub fn announcement_embed(
    args: &AnnounceArgs,
    invoker_name: &str,
    invoker_avatar: &str,
) -> anyhow::Result<Embed> {
    let footer_text = args
        .footer
        .clone()
        .unwrap_or_else(|| format!("Sent by {invoker_name}"));
    let mut footer = EmbedFooterBuilder::new(footer_text);
    if let Some(icon) = image_source(invoker_avatar) {
        footer = footer.icon_url(icon);
    }

    let mut builder = EmbedBuilder::new()
        .title(format!("📢 {}", args.title))
        .description(unescape_newlines(&args.content))
        .color(resolve_color(&args.color))
        .timestamp(now_timestamp()?)
        .footer(footer);

    if let Some(image) = http_url(args.image_url.as_deref()).and_then(image_source) {
        builder = builder.image(image);
    }

    if let Some(thumbnail) = http_url(args.thumbnail_url.as_deref()).and_then(image_source) {
        builder = builder.thumbnail(thumbnail);
    }

    Ok(builder.validate()?.build())
}

async fn post(
    api: &dyn DiscordApi,
    channel_id: Id<ChannelMarker>,
    args: &AnnounceArgs,
    invocation: &Invocation,
) -> anyhow::Result<()> {
    let embed = announcement_embed(
        args,
        &invocation.invoker.display_name,
        &invocation.invoker.avatar_url,
    )?;

    let mention = mention_line(&args.mention);
    if !mention.is_empty() {
        api.send_content(channel_id, mention).await?;
    }

    api.send_embed(channel_id, &embed, &[]).await?;

    Ok(())
}

/// User-facing text for a failed announcement.
pub fn failure_message(error: &anyhow::Error) -> String {
    match error.downcast_ref::<ApiError>() {
        Some(api_error) if api_error.is_forbidden() => FORBIDDEN.to_owned(),
        _ => format!("⚠ Error: {error}"),
    }
}

/// Post an announcement on behalf of an administrator.
///
/// The interaction is deferred first; every outcome is then reported as an ephemeral follow-up.
pub async fn run(ctx: &Context, invocation: &Invocation, args: AnnounceArgs) -> anyhow::Result<()> {
    let api = ctx.api.as_ref();

    if !invocation.invoker.has_permission(Permissions::ADMINISTRATOR) {
        respond_ephemeral_message(api, &invocation.interaction, DENIED).await?;
        return Ok(());
    }

    defer_ephemeral(api, &invocation.interaction).await?;

    let result = match args.channel_id.or(invocation.channel_id) {
        Some(channel_id) => post(api, channel_id, &args, invocation).await,
        None => Err(anyhow::anyhow!("no channel to post in")),
    };

    let reply = match result {
        Ok(()) => {
            info!(user = invocation.invoker.user_id.get(), "announcement posted");
            SENT.to_owned()
        }
        Err(source) => {
            error!(?source, "announcement failed");
            failure_message(&source)
        }
    };

    api.create_followup(&invocation.interaction, &reply, true)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use herald_test_utils::{Call, RecordingApi, fixture};

    use super::*;

    fn args(title: &str, content: &str) -> AnnounceArgs {
        AnnounceArgs {
            title: title.to_owned(),
            content: content.to_owned(),
            mention: "everyone".to_owned(),
            color: "blue".to_owned(),
            image_url: None,
            thumbnail_url: None,
            footer: None,
            channel_id: None,
        }
    }

    fn last_followup(calls: &[Call]) -> Option<(&str, bool)> {
        calls.iter().rev().find_map(|call| match call {
            Call::Followup { content, ephemeral } => Some((content.as_str(), *ephemeral)),
            _ => None,
        })
    }

    #[tokio::test]
    async fn maintenance_notice_pings_here_and_renders_two_lines() -> anyhow::Result<()> {
        let api = RecordingApi::new().shared();
        let ctx = fixture::context(api.clone()).await?;
        let invocation = fixture::admin_invocation();
        let mut maintenance = args("Maintenance", r"Starts at 5\nEnds at 6");
        maintenance.mention = "here".to_owned();
        maintenance.color = "#00ff00".to_owned();

        run(&ctx, &invocation, maintenance).await?;

        let actions = api.actions().await;
        assert_eq!(
            actions[0],
            Call::Content {
                channel_id: fixture::CHANNEL_ID,
                content: "@here".to_owned(),
            }
        );
        let Call::Embed { channel_id, embed, .. } = &actions[1] else {
            panic!("expected an embed, got {:?}", actions[1]);
        };
        assert_eq!(*channel_id, fixture::CHANNEL_ID);
        assert_eq!(embed.title.as_deref(), Some("📢 Maintenance"));
        assert_eq!(embed.description.as_deref(), Some("Starts at 5\nEnds at 6"));
        assert_eq!(embed.color, Some(0x00_FF_00));
        assert_eq!(last_followup(&api.calls().await), Some((SENT, true)));
        Ok(())
    }

    #[tokio::test]
    async fn none_mode_posts_only_the_embed_to_the_chosen_channel() -> anyhow::Result<()> {
        let api = RecordingApi::new().shared();
        let ctx = fixture::context(api.clone()).await?;
        let invocation = fixture::admin_invocation();
        let mut quiet = args("Quiet", "hello");
        quiet.mention = "なし".to_owned();
        quiet.channel_id = Some(Id::new(555));

        run(&ctx, &invocation, quiet).await?;

        let actions = api.actions().await;
        assert_eq!(actions.len(), 1);
        assert!(matches!(
            &actions[0],
            Call::Embed { channel_id, .. } if *channel_id == Id::new(555)
        ));
        Ok(())
    }

    #[tokio::test]
    async fn non_administrators_are_refused_without_deferring() -> anyhow::Result<()> {
        let api = RecordingApi::new().shared();
        let ctx = fixture::context(api.clone()).await?;
        let invocation = fixture::invocation(fixture::MODERATOR_ID, Permissions::BAN_MEMBERS);

        run(&ctx, &invocation, args("Nope", "nope")).await?;

        assert!(api.actions().await.is_empty());
        let responses = api.responses().await;
        assert_eq!(responses.len(), 1);
        assert_eq!(
            responses[0].data.as_ref().and_then(|data| data.content.as_deref()),
            Some(DENIED)
        );
        Ok(())
    }

    #[tokio::test]
    async fn forbidden_channel_gets_the_fixed_message() -> anyhow::Result<()> {
        let api = RecordingApi::new().shared();
        api.fail_actions(ApiError::Forbidden("Missing Access".to_owned()))
            .await;
        let ctx = fixture::context(api.clone()).await?;

        run(&ctx, &fixture::admin_invocation(), args("Hi", "there")).await?;

        assert_eq!(last_followup(&api.calls().await), Some((FORBIDDEN, true)));
        Ok(())
    }

    #[tokio::test]
    async fn oversized_body_reports_the_validation_error() -> anyhow::Result<()> {
        let api = RecordingApi::new().shared();
        let ctx = fixture::context(api.clone()).await?;

        run(&ctx, &fixture::admin_invocation(), args("Long", &"x".repeat(5000))).await?;

        assert!(api.actions().await.is_empty());
        let calls = api.calls().await;
        let (content, ephemeral) = last_followup(&calls).expect("follow-up");
        assert!(content.starts_with("⚠ Error: "), "{content}");
        assert!(ephemeral);
        Ok(())
    }

    #[test]
    fn non_http_images_are_dropped_and_footer_defaults_to_sender() -> anyhow::Result<()> {
        let mut with_images = args("Pics", "body");
        with_images.image_url = Some("ftp://x.test/a.png".to_owned());
        with_images.thumbnail_url = Some("https://x.test/t.png".to_owned());

        let embed = announcement_embed(&with_images, "Alice", "https://cdn.test/a.png")?;

        assert!(embed.image.is_none());
        assert_eq!(
            embed.thumbnail.map(|thumbnail| thumbnail.url),
            Some("https://x.test/t.png".to_owned())
        );
        assert_eq!(
            embed.footer.map(|footer| footer.text),
            Some("Sent by Alice".to_owned())
        );
        Ok(())
    }
}
