use twilight_model::id::{Id, marker::UserMarker};

/// Whether `raw` has the `<@...>` shape of a user mention, valid or not.
pub fn is_mention_form(raw: &str) -> bool {
    raw.starts_with("<@") && raw.ends_with('>')
}

/// Parse a user mention (`<@id>` or `<@!id>`) into its id.
pub fn parse_mention_user_id(raw: &str) -> Option<Id<UserMarker>> {
    let without_wrappers = raw.strip_prefix("<@")?.strip_suffix('>')?;
    let numeric = without_wrappers
        .strip_prefix('!')
        .unwrap_or(without_wrappers);

    Id::new_checked(numeric.parse::<u64>().ok()?)
}

/// Turn every literal `\n` escape into a real line break.
///
/// Existing line breaks are left alone, so applying this twice is the same as once.
pub fn unescape_newlines(raw: &str) -> String {
    raw.replace("\\n", "\n")
}

/// Keep a URL only if it is absolute `http(s)`.
pub fn http_url(raw: Option<&str>) -> Option<&str> {
    raw.filter(|url| url.starts_with("http://") || url.starts_with("https://"))
}
