pub mod automod;
pub mod embeds;
