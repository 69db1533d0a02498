//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggestions are scoped to the invoking user's own data.

use crate::{
    bot::BotData,
    core::{friend, user},
    errors::Error,
};

/// Discord shows at most 25 suggestions.
const SUGGESTION_LIMIT: usize = 25;

/// Looks up the invoking user without creating one; autocomplete must stay read-only.
async fn author_user_id(ctx: poise::Context<'_, BotData, Error>) -> Option<i64> {
    user::get_user_by_external_id(&ctx.data().database, &ctx.author().id.to_string())
        .await
        .ok()
        .flatten()
        .map(|user| user.id)
}

/// Keeps the names containing `partial` (case-insensitive), sorted, capped at 25.
fn matching_names(names: impl IntoIterator<Item = String>, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    let mut matching: Vec<String> = names
        .into_iter()
        .filter(|name| name.to_lowercase().contains(&partial_lower))
        .collect();
    matching.sort();
    matching.truncate(SUGGESTION_LIMIT);
    matching
}

/// Provides autocomplete suggestions for the user's friend names.
pub async fn autocomplete_friend_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let Some(owner_id) = author_user_id(ctx).await else {
        return Vec::new();
    };
    let Ok(friends) = friend::get_friends_for_user(&ctx.data().database, owner_id).await else {
        return Vec::new();
    };

    matching_names(friends.into_iter().map(|f| f.name), partial)
}
