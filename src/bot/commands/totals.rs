//! Totals Discord command - `/totals`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, current_user, send_lines},
        core::{graph::load_receipt_graph, report, totals},
        errors::{Error, Result},
    };
    use tracing::info;

    /// Shows how much every friend owes for a receipt, tax and tips included.
    #[poise::command(slash_command)]
    pub async fn totals(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Receipt number"] receipt_id: i64,
    ) -> Result<()> {
        let user = current_user(ctx).await?;
        let data = ctx.data();

        let graph = load_receipt_graph(&data.database, user.id, receipt_id).await?;
        let computed = totals::compute_friend_totals(&graph, &data.settings)?;
        info!(
            receipt_id,
            friends = computed.owed.len(),
            reconciled = computed.is_reconciled(),
            "Computed totals"
        );

        let status = if computed.is_reconciled() { "✅" } else { "⚠️" };
        let lines = report::format_totals_report(&graph, &computed);
        send_lines(
            ctx,
            format!("{status} {} - who owes what", graph.receipt.name),
            &lines,
        )
        .await
    }
}

// Re-export all commands
pub use inner::*;
