/// Format a user mention
pub fn mention_user(user_id: i64) -> String {
    format!("<@{}>", user_id)
}

/// Format a channel mention
pub fn mention_channel(channel_id: i64) -> String {
    format!("<#{}>", channel_id)
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Render a welcome/leave template: `{user}` becomes a mention, `{server}`
/// the guild name
pub fn render_member_template(template: &str, user_id: i64, guild_name: &str) -> String {
    template
        .replace("{user}", &mention_user(user_id))
        .replace("{server}", guild_name)
}
