use twilight_model::{
    guild::Permissions,
    id::{
        Id,
        marker::{
            ApplicationMarker, ChannelMarker, GuildMarker, InteractionMarker, RoleMarker,
            UserMarker,
        },
    },
    util::{ImageHash, Timestamp},
};

/// Addressing data needed to answer an interaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InteractionRef {
    pub application_id: Id<ApplicationMarker>,
    pub id: Id<InteractionMarker>,
    pub token: String,
}

/// The user behind an interaction, as seen from the invoking guild.
#[derive(Clone, Debug)]
pub struct Invoker {
    pub user_id: Id<UserMarker>,
    pub display_name: String,
    pub avatar_url: String,
    /// Resolved guild permissions; empty outside guilds.
    pub permissions: Permissions,
    pub role_ids: Vec<Id<RoleMarker>>,
}

impl Invoker {
    /// Whether the invoker holds `required`, with administrator implying everything.
    pub fn has_permission(&self, required: Permissions) -> bool {
        self.permissions.contains(Permissions::ADMINISTRATOR) || self.permissions.contains(required)
    }

    pub fn has_role(&self, role_id: Id<RoleMarker>) -> bool {
        self.role_ids.contains(&role_id)
    }
}

/// One inbound interaction reduced to what handlers act on.
#[derive(Clone, Debug)]
pub struct Invocation {
    pub interaction: InteractionRef,
    pub guild_id: Option<Id<GuildMarker>>,
    pub channel_id: Option<Id<ChannelMarker>>,
    pub invoker: Invoker,
}

/// Server-level attributes rendered by `/info`.
#[derive(Clone, Debug)]
pub struct GuildSummary {
    pub id: Id<GuildMarker>,
    pub name: String,
    pub icon_url: Option<String>,
    pub owner_id: Id<UserMarker>,
    pub member_count: Option<u64>,
    pub channel_count: usize,
    pub role_count: usize,
    pub boost_count: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoleSummary {
    pub id: Id<RoleMarker>,
    pub color: u32,
    pub position: i64,
}

/// Guild member attributes used for lookup and display.
#[derive(Clone, Debug)]
pub struct MemberProfile {
    pub user_id: Id<UserMarker>,
    pub username: String,
    pub nickname: Option<String>,
    pub avatar_url: String,
    pub joined_at: Option<Timestamp>,
    pub role_ids: Vec<Id<RoleMarker>>,
}

/// CDN URL for a user's avatar, falling back to the default avatar set.
pub fn avatar_url(user_id: Id<UserMarker>, avatar: Option<ImageHash>) -> String {
    match avatar {
        Some(avatar) => format!(
            "https://cdn.discordapp.com/avatars/{}/{}.png?size=128",
            user_id.get(),
            avatar
        ),
        None => {
            let default_avatar_index = (user_id.get() >> 22) % 6;
            format!(
                "https://cdn.discordapp.com/embed/avatars/{}.png",
                default_avatar_index
            )
        }
    }
}

pub fn guild_icon_url(guild_id: Id<GuildMarker>, icon: Option<ImageHash>) -> Option<String> {
    icon.map(|icon| {
        format!(
            "https://cdn.discordapp.com/icons/{}/{}.png?size=256",
            guild_id.get(),
            icon
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoker(permissions: Permissions) -> Invoker {
        Invoker {
            user_id: Id::new(1),
            display_name: "mod".to_owned(),
            avatar_url: avatar_url(Id::new(1), None),
            permissions,
            role_ids: vec![Id::new(10)],
        }
    }

    #[test]
    fn administrator_implies_any_permission() {
        let admin = invoker(Permissions::ADMINISTRATOR);

        assert!(admin.has_permission(Permissions::BAN_MEMBERS));
        assert!(admin.has_permission(Permissions::MODERATE_MEMBERS));
    }

    #[test]
    fn permission_must_be_present_without_administrator() {
        let kicker = invoker(Permissions::KICK_MEMBERS);

        assert!(kicker.has_permission(Permissions::KICK_MEMBERS));
        assert!(!kicker.has_permission(Permissions::BAN_MEMBERS));
        assert!(!kicker.has_permission(Permissions::ADMINISTRATOR));
    }

    #[test]
    fn role_membership_checks_role_ids() {
        let member = invoker(Permissions::empty());

        assert!(member.has_role(Id::new(10)));
        assert!(!member.has_role(Id::new(11)));
    }

    #[test]
    fn default_avatar_uses_snowflake_bucket() {
        let url = avatar_url(Id::new(5 << 22), None);

        assert_eq!(url, "https://cdn.discordapp.com/embed/avatars/5.png");
    }
}
