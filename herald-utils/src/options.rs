use twilight_model::{
    application::interaction::application_command::{CommandDataOption, CommandOptionValue},
    id::{
        Id,
        marker::{ChannelMarker, RoleMarker, UserMarker},
    },
};

fn find<'a>(options: &'a [CommandDataOption], name: &str) -> Option<&'a CommandOptionValue> {
    options
        .iter()
        .find(|option| option.name == name)
        .map(|option| &option.value)
}

pub fn string_option<'a>(options: &'a [CommandDataOption], name: &str) -> Option<&'a str> {
    match find(options, name)? {
        CommandOptionValue::String(value) => Some(value.as_str()),
        _ => None,
    }
}

pub fn integer_option(options: &[CommandDataOption], name: &str) -> Option<i64> {
    match find(options, name)? {
        CommandOptionValue::Integer(value) => Some(*value),
        _ => None,
    }
}

pub fn user_option(options: &[CommandDataOption], name: &str) -> Option<Id<UserMarker>> {
    match find(options, name)? {
        CommandOptionValue::User(id) => Some(*id),
        _ => None,
    }
}

pub fn channel_option(options: &[CommandDataOption], name: &str) -> Option<Id<ChannelMarker>> {
    match find(options, name)? {
        CommandOptionValue::Channel(id) => Some(*id),
        _ => None,
    }
}

pub fn role_option(options: &[CommandDataOption], name: &str) -> Option<Id<RoleMarker>> {
    match find(options, name)? {
        CommandOptionValue::Role(id) => Some(*id),
        _ => None,
    }
}
