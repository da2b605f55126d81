use serenity::all::{Context, GuildId, Permissions, UserId};

/// Check if a member holds a specific permission
pub async fn has_permission(
    ctx: &Context,
    guild_id: GuildId,
    user_id: UserId,
    permission: Permissions,
) -> bool {
    if let Ok(member) = guild_id.member(ctx, user_id).await {
        return member
            .permissions(ctx)
            .map(|p| p.contains(permission))
            .unwrap_or(false);
    }
    false
}

/// Link-check exemption: members who can manage messages may post links
pub async fn can_manage_messages(ctx: &Context, guild_id: GuildId, user_id: UserId) -> bool {
    has_permission(ctx, guild_id, user_id, Permissions::MANAGE_MESSAGES).await
}
