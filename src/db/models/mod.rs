mod automod_policy;
mod guild_config;
mod mod_log;
mod recent_message;

pub use automod_policy::AutomodPolicy;
pub use guild_config::GuildConfig;
pub use mod_log::ModLogEntry;
pub use recent_message::RecentMessage;
