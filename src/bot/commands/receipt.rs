//! Receipt Discord commands - `/receipt create|list|show|charges|delete`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, current_user, send_lines},
        core::{
            graph::load_receipt_graph,
            money::{TaxType, format_money},
            receipt::{self, ReceiptCharges},
            report,
        },
        errors::{Error, Result},
    };

    /// Parent command for managing receipts.
    #[poise::command(
        slash_command,
        subcommands(
            "receipt_create",
            "receipt_list",
            "receipt_show",
            "receipt_charges",
            "receipt_delete"
        )
    )]
    pub async fn receipt(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Receipt command. Available subcommands:\n\
            `/receipt create` - Record a new receipt\n\
            `/receipt list` - List your receipts\n\
            `/receipt show` - Show items and who shares them\n\
            `/receipt charges` - Change tax, tips or total\n\
            `/receipt delete` - Delete a receipt";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Builds charges from command options, falling back to configured defaults.
    fn charges_from_options(
        ctx: poise::Context<'_, BotData, Error>,
        total: f64,
        tax: Option<f64>,
        tax_type: Option<String>,
        tips: Option<f64>,
        tips_included: Option<bool>,
    ) -> Result<ReceiptCharges> {
        let tax_type = match tax_type {
            Some(raw) => raw.parse::<TaxType>()?,
            None => ctx.data().settings.default_tax_type,
        };

        Ok(ReceiptCharges {
            tax: tax.unwrap_or(0.0),
            tax_type,
            tips: tips.unwrap_or(0.0),
            total,
            tips_included_in_total: tips_included.unwrap_or(false),
        })
    }

    /// Records a new receipt.
    #[poise::command(slash_command, rename = "create")]
    pub async fn receipt_create(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Name of the receipt (e.g., 'Friday dinner')"] name: String,
        #[description = "Total printed on the receipt"] total: f64,
        #[description = "Tax, as an amount or a percentage"] tax: Option<f64>,
        #[description = "How to read the tax: 'amount' or 'percentage'"] tax_type: Option<String>,
        #[description = "Tip amount"] tips: Option<f64>,
        #[description = "Whether the total already contains the tip"] tips_included: Option<bool>,
    ) -> Result<()> {
        let charges = charges_from_options(ctx, total, tax, tax_type, tips, tips_included)?;
        let user = current_user(ctx).await?;
        let created =
            receipt::create_receipt(&ctx.data().database, user.id, name, charges).await?;

        ctx.say(format!(
            "✅ Created receipt **#{}** '{}' with total {}. Add items with `/item add`.",
            created.id,
            created.name,
            format_money(created.total)
        ))
        .await?;
        Ok(())
    }

    /// Lists your receipts, newest first.
    #[poise::command(slash_command, rename = "list")]
    pub async fn receipt_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let user = current_user(ctx).await?;
        let receipts = receipt::get_receipts_for_user(&ctx.data().database, user.id).await?;

        if receipts.is_empty() {
            ctx.say("You have no receipts yet. Use `/receipt create` to add one!")
                .await?;
            return Ok(());
        }

        let lines: Vec<String> = receipts.iter().map(report::format_receipt_line).collect();
        send_lines(ctx, "Your receipts", &lines).await
    }

    /// Shows a receipt's items, units and how its total compares.
    #[poise::command(slash_command, rename = "show")]
    pub async fn receipt_show(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Receipt number"] receipt_id: i64,
    ) -> Result<()> {
        let user = current_user(ctx).await?;
        let data = ctx.data();
        let graph = load_receipt_graph(&data.database, user.id, receipt_id).await?;
        let reconciliation = receipt::reconcile_receipt(&graph.receipt, &graph.items)?;

        let mut lines = report::format_receipt_overview(&graph);
        lines.push(String::new());
        lines.push(report::format_reconciliation(
            &reconciliation,
            data.settings.reconciliation_tolerance,
        ));

        send_lines(ctx, format!("Receipt #{receipt_id}"), &lines).await
    }

    /// Replaces the tax, tips and total of a receipt.
    #[poise::command(slash_command, rename = "charges")]
    pub async fn receipt_charges(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Receipt number"] receipt_id: i64,
        #[description = "Total printed on the receipt"] total: f64,
        #[description = "Tax, as an amount or a percentage"] tax: Option<f64>,
        #[description = "How to read the tax: 'amount' or 'percentage'"] tax_type: Option<String>,
        #[description = "Tip amount"] tips: Option<f64>,
        #[description = "Whether the total already contains the tip"] tips_included: Option<bool>,
    ) -> Result<()> {
        let charges = charges_from_options(ctx, total, tax, tax_type, tips, tips_included)?;
        let user = current_user(ctx).await?;
        let updated =
            receipt::update_receipt_charges(&ctx.data().database, user.id, receipt_id, charges)
                .await?;

        ctx.say(format!("✅ Updated {}", report::format_receipt_line(&updated)))
            .await?;
        Ok(())
    }

    /// Deletes a receipt with all its items and assignments.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn receipt_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Receipt number"] receipt_id: i64,
    ) -> Result<()> {
        let user = current_user(ctx).await?;
        receipt::delete_receipt(&ctx.data().database, user.id, receipt_id).await?;

        ctx.say(format!("🗑️ Deleted receipt #{receipt_id}.")).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
