pub mod automod;
pub mod config;
pub mod moderation;
