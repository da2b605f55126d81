use crate::bot::data::Context;
use crate::bot::error::Error;
use crate::constants::embeds;
use crate::db::models::AutomodPolicy;
use crate::db::queries::automod_policy::{self, AutomodFeature};

/// Configure automod for this server
#[poise::command(
    slash_command,
    subcommands("status", "enable", "disable", "thresholds"),
    required_permissions = "MANAGE_GUILD",
    guild_only
)]
pub async fn automod(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say("Use one of the subcommands: `/automod status`, `/automod enable`, `/automod disable`, `/automod thresholds`")
        .await?;
    Ok(())
}

/// Show the current automod configuration
#[poise::command(slash_command, guild_only, user_cooldown = 3)]
pub async fn status(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    let policy = automod_policy::get_or_create(&ctx.data().pool, guild_id.get() as i64).await?;

    let embed = embeds::info_embed()
        .title("Automod Status")
        .field("Anti-spam", on_off(policy.spam_protection), true)
        .field("Caps filter", on_off(policy.caps_protection), true)
        .field("Link filter", on_off(policy.link_protection), true)
        .field("Profanity filter", on_off(policy.profanity_filter), true)
        .field("Max mentions", policy.max_mentions.to_string(), true)
        .field("Max duplicates", policy.max_duplicates.to_string(), true)
        .field(
            "Timeout duration",
            format!("{} seconds", policy.timeout_duration),
            true,
        );

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

/// Enable an automod feature
#[poise::command(slash_command, guild_only, user_cooldown = 3)]
pub async fn enable(
    ctx: Context<'_>,
    #[description = "The automod feature to enable"] feature: FeatureChoice,
) -> Result<(), Error> {
    set_feature(ctx, feature, true).await
}

/// Disable an automod feature
#[poise::command(slash_command, guild_only, user_cooldown = 3)]
pub async fn disable(
    ctx: Context<'_>,
    #[description = "The automod feature to disable"] feature: FeatureChoice,
) -> Result<(), Error> {
    set_feature(ctx, feature, false).await
}

/// Update automod thresholds; omitted values are left unchanged
#[poise::command(slash_command, guild_only, user_cooldown = 3)]
pub async fn thresholds(
    ctx: Context<'_>,
    #[description = "Mentions allowed per message (0 disables the check)"]
    #[min = 0]
    #[max = 50]
    max_mentions: Option<i64>,
    #[description = "Identical messages allowed within 30 seconds"]
    #[min = 1]
    #[max = 20]
    max_duplicates: Option<i64>,
    #[description = "Timeout on violation, in seconds (0 disables timeouts)"]
    #[min = 0]
    #[max = 2419200]
    timeout_seconds: Option<i64>,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;

    if max_mentions.is_none() && max_duplicates.is_none() && timeout_seconds.is_none() {
        let embed = embeds::error_embed()
            .title("Nothing To Update")
            .description("Provide at least one of `max_mentions`, `max_duplicates`, or `timeout_seconds`.");
        ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
            .await?;
        return Ok(());
    }

    let policy = automod_policy::set_thresholds(
        &ctx.data().pool,
        guild_id.get() as i64,
        max_mentions,
        max_duplicates,
        timeout_seconds,
    )
    .await?;

    let embed = embeds::success_embed()
        .title("Thresholds Updated")
        .description(format!(
            "Max mentions: **{}**\nMax duplicates: **{}**\nTimeout: **{} seconds**",
            policy.max_mentions, policy.max_duplicates, policy.timeout_duration
        ));

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

async fn set_feature(ctx: Context<'_>, feature: FeatureChoice, enabled: bool) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(Error::custom("Not in a guild"))?;
    let pool = &ctx.data().pool;
    let gid = guild_id.get() as i64;

    let (label, policy): (&str, AutomodPolicy) = match feature {
        FeatureChoice::All => (
            "All features",
            automod_policy::set_all_features(pool, gid, enabled).await?,
        ),
        other => {
            let feature = other.into_feature();
            (
                feature.label(),
                automod_policy::set_feature(pool, gid, feature, enabled).await?,
            )
        }
    };

    let embed = embeds::success_embed()
        .title(if enabled { "Feature Enabled" } else { "Feature Disabled" })
        .description(format!(
            "**{}** is now {}.",
            label,
            if enabled { "enabled" } else { "disabled" }
        ))
        .field("Anti-spam", on_off(policy.spam_protection), true)
        .field("Caps filter", on_off(policy.caps_protection), true)
        .field("Link filter", on_off(policy.link_protection), true)
        .field("Profanity filter", on_off(policy.profanity_filter), true);

    ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
        .await?;

    Ok(())
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "Enabled"
    } else {
        "Disabled"
    }
}

/// Automod feature choice for commands
#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum FeatureChoice {
    #[name = "Anti-spam"]
    Spam,
    #[name = "Caps filter"]
    Caps,
    #[name = "Link filter"]
    Links,
    #[name = "Profanity filter"]
    Profanity,
    #[name = "All features"]
    All,
}

impl FeatureChoice {
    fn into_feature(self) -> AutomodFeature {
        match self {
            FeatureChoice::Spam => AutomodFeature::Spam,
            FeatureChoice::Caps => AutomodFeature::Caps,
            FeatureChoice::Links => AutomodFeature::Links,
            FeatureChoice::Profanity => AutomodFeature::Profanity,
            // "All" is handled before conversion
            FeatureChoice::All => AutomodFeature::Spam,
        }
    }
}
