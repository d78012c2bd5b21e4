/// Generic embed builders shared across commands.
pub mod embed;
/// Conversion of gateway interactions into handler invocations.
pub mod interaction;
/// Typed accessors over slash-command options.
pub mod options;
/// Pure parser helpers.
pub mod parse;
/// Interaction response helpers built on `DiscordApi`.
pub mod respond;
/// Shared time helpers.
pub mod time;
