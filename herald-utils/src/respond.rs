//! Shared interaction response helpers.

use twilight_model::{
    channel::message::{MessageFlags, embed::Embed},
    http::interaction::{InteractionResponse, InteractionResponseType},
};
use twilight_util::builder::InteractionResponseDataBuilder;

use herald_core::{DiscordApi, model::InteractionRef};

/// Respond to an interaction with an ephemeral message.
pub async fn respond_ephemeral_message(
    api: &dyn DiscordApi,
    interaction: &InteractionRef,
    content: &str,
) -> anyhow::Result<()> {
    let response = InteractionResponse {
        kind: InteractionResponseType::ChannelMessageWithSource,
        data: Some(
            InteractionResponseDataBuilder::new()
                .content(content)
                .flags(MessageFlags::EPHEMERAL)
                .build(),
        ),
    };

    api.create_response(interaction, &response).await?;

    Ok(())
}

/// Respond to an interaction with a single embed, visible to everyone in the channel.
pub async fn respond_embed(
    api: &dyn DiscordApi,
    interaction: &InteractionRef,
    embed: Embed,
) -> anyhow::Result<()> {
    let response = InteractionResponse {
        kind: InteractionResponseType::ChannelMessageWithSource,
        data: Some(InteractionResponseDataBuilder::new().embeds([embed]).build()),
    };

    api.create_response(interaction, &response).await?;

    Ok(())
}

pub async fn respond_ephemeral_embed(
    api: &dyn DiscordApi,
    interaction: &InteractionRef,
    embed: Embed,
) -> anyhow::Result<()> {
    let response = InteractionResponse {
        kind: InteractionResponseType::ChannelMessageWithSource,
        data: Some(
            InteractionResponseDataBuilder::new()
                .embeds([embed])
                .flags(MessageFlags::EPHEMERAL)
                .build(),
        ),
    };

    api.create_response(interaction, &response).await?;

    Ok(())
}

/// Acknowledge now and promise an ephemeral answer through follow-ups.
pub async fn defer_ephemeral(
    api: &dyn DiscordApi,
    interaction: &InteractionRef,
) -> anyhow::Result<()> {
    let response = InteractionResponse {
        kind: InteractionResponseType::DeferredChannelMessageWithSource,
        data: Some(
            InteractionResponseDataBuilder::new()
                .flags(MessageFlags::EPHEMERAL)
                .build(),
        ),
    };

    api.create_response(interaction, &response).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use herald_test_utils::{RecordingApi, fixture};
    use twilight_model::guild::Permissions;
    use twilight_util::builder::embed::EmbedBuilder;

    use super::*;

    #[tokio::test]
    async fn ephemeral_message_sets_flag_and_content() -> anyhow::Result<()> {
        let api = RecordingApi::new();
        let invocation = fixture::invocation(fixture::MEMBER_ID, Permissions::empty());

        respond_ephemeral_message(&api, &invocation.interaction, "hi").await?;

        let responses = api.responses().await;
        assert_eq!(responses.len(), 1);
        let data = responses[0].data.as_ref().expect("response data");
        assert_eq!(data.content.as_deref(), Some("hi"));
        assert_eq!(data.flags, Some(MessageFlags::EPHEMERAL));
        Ok(())
    }

    #[tokio::test]
    async fn public_embed_has_no_flags() -> anyhow::Result<()> {
        let api = RecordingApi::new();
        let invocation = fixture::invocation(fixture::MEMBER_ID, Permissions::empty());
        let embed = EmbedBuilder::new().title("t").build();

        respond_embed(&api, &invocation.interaction, embed.clone()).await?;

        let responses = api.responses().await;
        let data = responses[0].data.as_ref().expect("response data");
        assert_eq!(data.flags, None);
        assert_eq!(data.embeds.as_deref(), Some(std::slice::from_ref(&embed)));
        Ok(())
    }

    #[tokio::test]
    async fn deferral_is_ephemeral() -> anyhow::Result<()> {
        let api = RecordingApi::new();
        let invocation = fixture::invocation(fixture::MEMBER_ID, Permissions::empty());

        defer_ephemeral(&api, &invocation.interaction).await?;

        let responses = api.responses().await;
        assert_eq!(
            responses[0].kind,
            InteractionResponseType::DeferredChannelMessageWithSource
        );
        assert_eq!(
            responses[0].data.as_ref().and_then(|data| data.flags),
            Some(MessageFlags::EPHEMERAL)
        );
        Ok(())
    }
}
