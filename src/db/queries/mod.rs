pub mod automod_policy;
pub mod guild_config;
pub mod mod_log;
pub mod recent_messages;
