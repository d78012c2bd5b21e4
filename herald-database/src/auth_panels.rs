use sqlx::FromRow;
use twilight_model::id::{
    Id,
    marker::{ChannelMarker, GuildMarker, MessageMarker, RoleMarker, UserMarker},
};

use crate::Database;

/// A posted verification panel and the role its button grants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthPanel {
    pub id: i64,
    pub guild_id: Id<GuildMarker>,
    pub channel_id: Id<ChannelMarker>,
    pub role_id: Id<RoleMarker>,
    pub created_by: Id<UserMarker>,
    pub message_id: Option<Id<MessageMarker>>,
    pub created_at: u64,
}

/// Values needed to register a new panel before its message exists.
#[derive(Clone, Copy, Debug)]
pub struct NewAuthPanel {
    pub guild_id: Id<GuildMarker>,
    pub channel_id: Id<ChannelMarker>,
    pub role_id: Id<RoleMarker>,
    pub created_by: Id<UserMarker>,
}

#[derive(FromRow)]
struct AuthPanelRow {
    id: i64,
    guild_id: i64,
    channel_id: i64,
    role_id: i64,
    created_by: i64,
    message_id: Option<i64>,
    created_at: i64,
}

impl AuthPanelRow {
    fn into_panel(self) -> anyhow::Result<AuthPanel> {
        Ok(AuthPanel {
            id: self.id,
            guild_id: snowflake(self.guild_id)?,
            channel_id: snowflake(self.channel_id)?,
            role_id: snowflake(self.role_id)?,
            created_by: snowflake(self.created_by)?,
            message_id: self.message_id.map(snowflake).transpose()?,
            created_at: u64::try_from(self.created_at).unwrap_or_default(),
        })
    }
}

fn snowflake<T>(raw: i64) -> anyhow::Result<Id<T>> {
    u64::try_from(raw)
        .ok()
        .and_then(Id::new_checked)
        .ok_or_else(|| anyhow::anyhow!("invalid snowflake stored in auth_panels: {raw}"))
}

// Discord snowflakes stay below 2^63, so the cast is lossless.
fn column<T>(id: Id<T>) -> i64 {
    id.get() as i64
}

/// Insert a panel binding and return its identifier.
pub async fn create_panel(db: &Database, panel: NewAuthPanel) -> anyhow::Result<i64> {
    let result = sqlx::query(
        "INSERT INTO auth_panels (guild_id, channel_id, role_id, created_by)
         VALUES (?, ?, ?, ?)",
    )
    .bind(column(panel.guild_id))
    .bind(column(panel.channel_id))
    .bind(column(panel.role_id))
    .bind(column(panel.created_by))
    .execute(db.pool())
    .await?;

    Ok(result.last_insert_rowid())
}

/// Record which message carries the panel's button.
pub async fn attach_message(
    db: &Database,
    panel_id: i64,
    message_id: Id<MessageMarker>,
) -> anyhow::Result<()> {
    sqlx::query("UPDATE auth_panels SET message_id = ? WHERE id = ?")
        .bind(column(message_id))
        .bind(panel_id)
        .execute(db.pool())
        .await?;

    Ok(())
}

/// Look up a panel binding by identifier.
pub async fn find_panel(db: &Database, panel_id: i64) -> anyhow::Result<Option<AuthPanel>> {
    let row = sqlx::query_as::<_, AuthPanelRow>(
        "SELECT id, guild_id, channel_id, role_id, created_by, message_id, created_at
         FROM auth_panels WHERE id = ?",
    )
    .bind(panel_id)
    .fetch_optional(db.pool())
    .await?;

    row.map(AuthPanelRow::into_panel).transpose()
}

/// Remove a panel binding. Returns whether a row was deleted.
pub async fn delete_panel(db: &Database, panel_id: i64) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM auth_panels WHERE id = ?")
        .bind(panel_id)
        .execute(db.pool())
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_panel() -> NewAuthPanel {
        NewAuthPanel {
            guild_id: Id::new(1_000),
            channel_id: Id::new(2_000),
            role_id: Id::new(3_000),
            created_by: Id::new(4_000),
        }
    }

    #[tokio::test]
    async fn created_panel_is_found_with_its_role() -> anyhow::Result<()> {
        let db = Database::in_memory().await?;

        let id = create_panel(&db, new_panel()).await?;
        let panel = find_panel(&db, id).await?.expect("panel should exist");

        assert_eq!(panel.id, id);
        assert_eq!(panel.role_id, Id::new(3_000));
        assert_eq!(panel.guild_id, Id::new(1_000));
        assert_eq!(panel.message_id, None);
        Ok(())
    }

    #[tokio::test]
    async fn creation_time_is_stamped_by_the_database() -> anyhow::Result<()> {
        let db = Database::in_memory().await?;

        let id = create_panel(&db, new_panel()).await?;
        let panel = find_panel(&db, id).await?.expect("panel should exist");

        // 2023-11-14, well before any panel this schema can store.
        assert!(panel.created_at > 1_700_000_000, "created_at {}", panel.created_at);
        Ok(())
    }

    #[tokio::test]
    async fn attach_message_sets_message_id() -> anyhow::Result<()> {
        let db = Database::in_memory().await?;

        let id = create_panel(&db, new_panel()).await?;
        attach_message(&db, id, Id::new(5_000)).await?;

        let panel = find_panel(&db, id).await?.expect("panel should exist");
        assert_eq!(panel.message_id, Some(Id::new(5_000)));
        Ok(())
    }

    #[tokio::test]
    async fn identifiers_are_distinct_per_panel() -> anyhow::Result<()> {
        let db = Database::in_memory().await?;

        let first = create_panel(&db, new_panel()).await?;
        let second = create_panel(&db, new_panel()).await?;

        assert_ne!(first, second);
        Ok(())
    }

    #[tokio::test]
    async fn missing_panel_is_none() -> anyhow::Result<()> {
        let db = Database::in_memory().await?;

        assert!(find_panel(&db, 42).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn deleted_panel_is_gone() -> anyhow::Result<()> {
        let db = Database::in_memory().await?;

        let id = create_panel(&db, new_panel()).await?;
        assert!(delete_panel(&db, id).await?);
        assert!(!delete_panel(&db, id).await?);
        assert!(find_panel(&db, id).await?.is_none());
        Ok(())
    }
}
