//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for `OurCheckSplitter`,
//! including all slash commands, autocomplete handlers, and bot context management.

/// Discord command implementations (receipt, item, friend, assignment, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;
/// Parsing of free-text command arguments
pub mod parsing;

use crate::{
    config::settings::SplitSettings,
    core::user,
    entities::app_user,
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};

/// Embed descriptions are capped by Discord at 4096 characters.
const EMBED_DESCRIPTION_LIMIT: usize = 4000;

/// Discord purple, used for every embed.
const EMBED_COLOR: u32 = 0x0058_65F2;

/// Shared data available to all bot commands.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Rounding and reconciliation settings for the cost aggregator
    pub settings: SplitSettings,
}

impl BotData {
    /// Creates a new `BotData` instance.
    #[must_use]
    pub const fn new(database: DatabaseConnection, settings: SplitSettings) -> Self {
        Self { database, settings }
    }
}

/// Resolves the Discord author of the interaction to an app user.
pub async fn current_user(ctx: poise::Context<'_, BotData, Error>) -> Result<app_user::Model> {
    let author = ctx.author();
    user::get_or_create_user(&ctx.data().database, &author.id.to_string(), &author.name).await
}

/// Sends lines as the description of one embed, cut off at the embed limit.
pub async fn send_lines(
    ctx: poise::Context<'_, BotData, Error>,
    title: impl Into<String>,
    lines: &[String],
) -> Result<()> {
    let embed = serenity::CreateEmbed::default()
        .title(title)
        .color(EMBED_COLOR)
        .description(join_lines(lines, EMBED_DESCRIPTION_LIMIT));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Joins lines with newlines, dropping whole lines past `limit` characters.
fn join_lines(lines: &[String], limit: usize) -> String {
    let mut out = String::new();
    for (index, line) in lines.iter().enumerate() {
        let needed = line.chars().count() + usize::from(!out.is_empty());
        if out.chars().count() + needed > limit {
            let remaining = lines.len() - index;
            out.push_str(&format!("\n... {remaining} more line(s)"));
            break;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(line);
    }
    out
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            let message = match &error {
                Error::Validation { .. }
                | Error::InvalidAmount { .. }
                | Error::ReceiptNotFound { .. }
                | Error::ItemNotFound { .. }
                | Error::FriendNotFound { .. }
                | Error::UnitNotFound { .. } => {
                    warn!("Rejected `{}`: {}", ctx.command().name, error);
                    format!("❌ {error}")
                }
                _ => {
                    error!("Error in command `{}`: {:?}", ctx.command().name, error);
                    "❌ Something went wrong. Please try again later.".to_string()
                }
            };
            if let Err(e) = ctx.say(message).await {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Starts the Discord client and blocks until it stops.
pub async fn run_bot(
    token: String,
    database: DatabaseConnection,
    settings: SplitSettings,
) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!("Registered commands globally");
                Ok(BotData::new(database, settings))
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    info!("Starting bot client...");
    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))
        .map_err(Error::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_lines_within_limit() {
        let lines = vec!["a".to_string(), "b".to_string()];
        assert_eq!(join_lines(&lines, 100), "a\nb");
    }

    #[test]
    fn test_join_lines_truncates_whole_lines() {
        let lines = vec!["12345".to_string(), "67890".to_string(), "x".to_string()];
        assert_eq!(join_lines(&lines, 8), "12345\n... 2 more line(s)");
    }
}
