pub mod automod;
pub mod moderation;
