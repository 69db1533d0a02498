//! General Discord commands - ping and help.
//! This module contains simple commands that don't require database operations.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**OurCheckSplitter Help**\n\
        Split a check in four steps: record the receipt, add its items, add your \
        friends, then say who had what.\n\n\
        **Receipts and items**\n\
        • `/receipt create <name> <total> [tax] [tax_type] [tips] [tips_included]` - Records a receipt.\n\
        • `/receipt list` / `/receipt show <receipt>` - Lists receipts or shows one in detail.\n\
        • `/receipt charges` / `/receipt delete` - Changes charges or deletes a receipt.\n\
        • `/item add <receipt> <name> <price> [quantity]` - Adds an item (price per piece).\n\
        • `/item delete <receipt> <item>` - Removes an item.\n\n\
        **Friends**\n\
        • `/friend add|list|delete` - Manages the people you split with.\n\
        • `/participant add|remove|list` - Manages who takes part in a receipt.\n\n\
        **Splitting**\n\
        • `/assign <receipt> <item> <friends>` - Everyone listed shares the whole item.\n\
        • `/split <receipt> <item> <units>` - Units like `1: Alice; 2: Bob, Carol`.\n\
        • `/attach` / `/unassign <receipt> <unit> <friend>` - Adds or removes one friend.\n\
        • `/clear <receipt> <item>` - Makes an item unassigned again.\n\
        • `/totals <receipt>` - Shows what everyone owes, tax and tips included.\n\n\
        **Utility Commands**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
