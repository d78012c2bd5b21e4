use twilight_util::builder::embed::ImageSource;

/// Default embed color used across the bot UI.
pub const DEFAULT_EMBED_COLOR: u32 = BLUE;

pub const RED: u32 = 0xE7_4C_3C;
pub const GREEN: u32 = 0x2E_CC_71;
pub const BLUE: u32 = 0x34_98_DB;
pub const GOLD: u32 = 0xF1_C4_0F;
pub const ORANGE: u32 = 0xE6_7E_22;
pub const PURPLE: u32 = 0x9B_59_B6;

/// Embed image source for an `http(s)` URL, or `None` if Discord would reject it.
pub fn image_source(url: &str) -> Option<ImageSource> {
    ImageSource::url(url).ok()
}

/// Discord timestamp markup styles used in embeds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TimestampStyle {
    /// `18/10/2026`
    ShortDate,
    /// `18 October 2026 09:01`
    ShortDateTime,
}

/// Render unix seconds as client-localized timestamp markup.
pub fn discord_timestamp(unix_secs: i64, style: TimestampStyle) -> String {
    let flag = match style {
        TimestampStyle::ShortDate => 'd',
        TimestampStyle::ShortDateTime => 'f',
    };

    format!("<t:{unix_secs}:{flag}>")
}

/// Neutralize mentions inside user-supplied text.
pub fn sanitize_mentions(text: &str) -> String {
    text.replace('@', "@\u{200B}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_use_discord_markup() {
        assert_eq!(discord_timestamp(60, TimestampStyle::ShortDate), "<t:60:d>");
        assert_eq!(
            discord_timestamp(1_700_000_000, TimestampStyle::ShortDateTime),
            "<t:1700000000:f>"
        );
    }

    #[test]
    fn image_sources_require_http() {
        assert!(image_source("https://cdn.test/a.png").is_some());
        assert!(image_source("not a url").is_none());
    }

    #[test]
    fn mentions_are_broken_with_zero_width_space() {
        assert_eq!(sanitize_mentions("@everyone"), "@\u{200B}everyone");
    }
}
