//! Friend Discord commands - `/friend add|list|delete` and `/participant add|remove|list`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, current_user, handlers::autocomplete, send_lines},
        core::friend,
        errors::{Error, Result},
    };

    /// Parent command for managing the people you split with.
    #[poise::command(
        slash_command,
        subcommands("friend_add", "friend_list", "friend_delete")
    )]
    pub async fn friend(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Friend command. Available subcommands:\n\
            `/friend add` - Add a friend\n\
            `/friend list` - List your friends\n\
            `/friend delete` - Delete a friend and their shares";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Adds a friend you can split receipts with.
    #[poise::command(slash_command, rename = "add")]
    pub async fn friend_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Friend's name, unique among your friends"] name: String,
    ) -> Result<()> {
        let user = current_user(ctx).await?;
        let created = friend::create_friend(&ctx.data().database, user.id, name).await?;

        ctx.say(format!("✅ Added friend '{}'.", created.name)).await?;
        Ok(())
    }

    /// Lists your friends.
    #[poise::command(slash_command, rename = "list")]
    pub async fn friend_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let user = current_user(ctx).await?;
        let friends = friend::get_friends_for_user(&ctx.data().database, user.id).await?;

        if friends.is_empty() {
            ctx.say("You have no friends yet. Use `/friend add` to add one!")
                .await?;
            return Ok(());
        }

        let lines: Vec<String> = friends.into_iter().map(|f| f.name).collect();
        send_lines(ctx, "Your friends", &lines).await
    }

    /// Deletes a friend. Units only they shared are removed as well.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn friend_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Friend to delete"]
        #[autocomplete = "autocomplete::autocomplete_friend_name"]
        name: String,
    ) -> Result<()> {
        let user = current_user(ctx).await?;
        let found = friend::require_friend_by_name(&ctx.data().database, user.id, &name).await?;
        friend::delete_friend(&ctx.data().database, user.id, found.id).await?;

        ctx.say(format!("🗑️ Deleted friend '{}'.", found.name)).await?;
        Ok(())
    }

    /// Parent command for the friends taking part in a receipt.
    #[poise::command(
        slash_command,
        subcommands("participant_add", "participant_remove", "participant_list")
    )]
    pub async fn participant(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Participant command. Available subcommands:\n\
            `/participant add` - Add a friend to a receipt\n\
            `/participant remove` - Remove a friend with no shares from a receipt\n\
            `/participant list` - List the friends on a receipt";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Adds a friend to a receipt before assigning anything to them.
    #[poise::command(slash_command, rename = "add")]
    pub async fn participant_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Receipt number"] receipt_id: i64,
        #[description = "Friend to add"]
        #[autocomplete = "autocomplete::autocomplete_friend_name"]
        name: String,
    ) -> Result<()> {
        let user = current_user(ctx).await?;
        let found = friend::require_friend_by_name(&ctx.data().database, user.id, &name).await?;
        let added =
            friend::add_participant(&ctx.data().database, user.id, receipt_id, found.id).await?;

        let message = if added {
            format!("✅ {} now takes part in receipt #{receipt_id}.", found.name)
        } else {
            format!("{} already takes part in receipt #{receipt_id}.", found.name)
        };
        ctx.say(message).await?;
        Ok(())
    }

    /// Removes a friend from a receipt. They must not share any units on it.
    #[poise::command(slash_command, rename = "remove")]
    pub async fn participant_remove(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Receipt number"] receipt_id: i64,
        #[description = "Friend to remove"]
        #[autocomplete = "autocomplete::autocomplete_friend_name"]
        name: String,
    ) -> Result<()> {
        let user = current_user(ctx).await?;
        let found = friend::require_friend_by_name(&ctx.data().database, user.id, &name).await?;
        friend::remove_participant(&ctx.data().database, user.id, receipt_id, found.id).await?;

        ctx.say(format!(
            "✅ {} no longer takes part in receipt #{receipt_id}.",
            found.name
        ))
        .await?;
        Ok(())
    }

    /// Lists the friends taking part in a receipt.
    #[poise::command(slash_command, rename = "list")]
    pub async fn participant_list(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Receipt number"] receipt_id: i64,
    ) -> Result<()> {
        let user = current_user(ctx).await?;
        let participants =
            friend::get_participants(&ctx.data().database, user.id, receipt_id).await?;

        if participants.is_empty() {
            ctx.say(format!("Nobody takes part in receipt #{receipt_id} yet."))
                .await?;
            return Ok(());
        }

        let lines: Vec<String> = participants.into_iter().map(|f| f.name).collect();
        send_lines(ctx, format!("Receipt #{receipt_id} participants"), &lines).await
    }
}

// Re-export all commands
pub use inner::*;
