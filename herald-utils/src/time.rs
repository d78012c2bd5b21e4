use std::time::{SystemTime, UNIX_EPOCH};

use twilight_model::util::Timestamp;

pub fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_secs())
}

/// The current time as a Discord timestamp.
pub fn now_timestamp() -> anyhow::Result<Timestamp> {
    timestamp_after(0)
}

/// The Discord timestamp `secs` seconds from now.
pub fn timestamp_after(secs: u64) -> anyhow::Result<Timestamp> {
    let at = now_unix_secs().saturating_add(secs);
    Ok(Timestamp::from_secs(i64::try_from(at)?)?)
}
