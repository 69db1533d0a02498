//! Item Discord commands - `/item add|delete`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, current_user},
        core::{item, money::format_money},
        errors::{Error, Result},
    };

    /// Parent command for managing receipt items.
    #[poise::command(slash_command, subcommands("item_add", "item_delete"))]
    pub async fn item(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Item command. Available subcommands:\n\
            `/item add` - Add a line item to a receipt\n\
            `/item delete` - Remove an item and its assignments";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Adds a line item to a receipt.
    ///
    /// The price is per piece; a quantity of 3 at $1.00 costs $3.00.
    #[poise::command(slash_command, rename = "add")]
    pub async fn item_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Receipt number"] receipt_id: i64,
        #[description = "Item name (e.g., 'Margherita')"] name: String,
        #[description = "Price of one piece"] price: f64,
        #[description = "Number of pieces. Defaults to 1."] quantity: Option<i32>,
    ) -> Result<()> {
        let user = current_user(ctx).await?;
        let added = item::add_item(
            &ctx.data().database,
            user.id,
            receipt_id,
            name,
            quantity.unwrap_or(1),
            price,
        )
        .await?;

        ctx.say(format!(
            "✅ Added item **[{}]** {} x{} @ {} = {}",
            added.id,
            added.name,
            added.quantity,
            format_money(added.price),
            format_money(added.total_price())
        ))
        .await?;
        Ok(())
    }

    /// Removes an item together with its units.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn item_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Receipt number"] receipt_id: i64,
        #[description = "Item number, as shown by /receipt show"] item_id: i64,
    ) -> Result<()> {
        let user = current_user(ctx).await?;
        item::delete_item(&ctx.data().database, user.id, receipt_id, item_id).await?;

        ctx.say(format!("🗑️ Deleted item {item_id} from receipt #{receipt_id}."))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
