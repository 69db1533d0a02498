//! Assignment Discord commands - `/assign`, `/split`, `/attach`, `/unassign`, `/clear`.
//!
//! Friends are typed by name and resolved against the author's friend list
//! before anything reaches the assignment engine.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, current_user, handlers::autocomplete, parsing, send_lines},
        core::{
            assignment::{self, UnitAssignmentResult},
            friend,
            graph::load_receipt_graph,
            report,
            split::UnitRequest,
        },
        errors::{Error, Result},
    };

    /// Replies with the units an operation produced.
    async fn send_units(
        ctx: poise::Context<'_, BotData, Error>,
        owner_id: i64,
        receipt_id: i64,
        result: &UnitAssignmentResult,
    ) -> Result<()> {
        let graph = load_receipt_graph(&ctx.data().database, owner_id, receipt_id).await?;
        let title = graph.item(result.item_id).map_or_else(
            || format!("Item {}", result.item_id),
            |item| format!("{} (receipt #{receipt_id})", item.name),
        );
        let lines = report::format_assigned_units(&graph, &result.units);
        send_lines(ctx, title, &lines).await
    }

    /// Assigns a whole item to one or more friends who share it equally.
    #[poise::command(slash_command)]
    pub async fn assign(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Receipt number"] receipt_id: i64,
        #[description = "Item number, as shown by /receipt show"] item_id: i64,
        #[description = "Comma separated friend names (e.g., 'Alice, Bob')"] friends: String,
    ) -> Result<()> {
        let names = parsing::parse_friend_list(&friends)?;
        let user = current_user(ctx).await?;
        let db = &ctx.data().database;

        let friend_ids = friend::resolve_friend_ids(db, user.id, &names).await?;
        let result =
            assignment::assign_whole_item(db, user.id, receipt_id, item_id, &friend_ids).await?;

        send_units(ctx, user.id, receipt_id, &result).await
    }

    /// Splits an item into units with different sharers.
    ///
    /// Example for three sodas: `1: Alice; 2: Bob, Carol`
    #[poise::command(slash_command)]
    pub async fn split(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Receipt number"] receipt_id: i64,
        #[description = "Item number, as shown by /receipt show"] item_id: i64,
        #[description = "Units as 'quantity: friends; ...' (e.g., '1: Alice; 2: Bob, Carol')"]
        units: String,
    ) -> Result<()> {
        let specs = parsing::parse_split_spec(&units)?;
        let user = current_user(ctx).await?;
        let db = &ctx.data().database;

        let mut requests = Vec::with_capacity(specs.len());
        for spec in specs {
            let friend_ids = friend::resolve_friend_ids(db, user.id, &spec.friend_names).await?;
            requests.push(UnitRequest::new(spec.quantity, friend_ids));
        }

        let result = assignment::split_item(db, user.id, receipt_id, item_id, &requests).await?;
        send_units(ctx, user.id, receipt_id, &result).await
    }

    /// Adds a friend to an existing unit.
    #[poise::command(slash_command)]
    pub async fn attach(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Receipt number"] receipt_id: i64,
        #[description = "Unit number, as shown by /receipt show"] unit_id: i64,
        #[description = "Friend to add to the unit"]
        #[autocomplete = "autocomplete::autocomplete_friend_name"]
        friend_name: String,
    ) -> Result<()> {
        let user = current_user(ctx).await?;
        let db = &ctx.data().database;

        let found = friend::require_friend_by_name(db, user.id, &friend_name).await?;
        let result = assignment::attach_friend(db, user.id, receipt_id, unit_id, found.id).await?;

        send_units(ctx, user.id, receipt_id, &result).await
    }

    /// Removes a friend from a unit. A unit nobody shares any more is deleted.
    #[poise::command(slash_command)]
    pub async fn unassign(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Receipt number"] receipt_id: i64,
        #[description = "Unit number, as shown by /receipt show"] unit_id: i64,
        #[description = "Friend to remove from the unit"]
        #[autocomplete = "autocomplete::autocomplete_friend_name"]
        friend_name: String,
    ) -> Result<()> {
        let user = current_user(ctx).await?;
        let db = &ctx.data().database;

        let found = friend::require_friend_by_name(db, user.id, &friend_name).await?;
        let outcome =
            assignment::unassign_friend(db, user.id, receipt_id, unit_id, found.id).await?;

        let graph = load_receipt_graph(db, user.id, receipt_id).await?;
        ctx.say(report::format_unassign_outcome(&graph, &outcome))
            .await?;
        Ok(())
    }

    /// Removes all units of an item so it counts as unassigned again.
    #[poise::command(slash_command)]
    pub async fn clear(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Receipt number"] receipt_id: i64,
        #[description = "Item number, as shown by /receipt show"] item_id: i64,
    ) -> Result<()> {
        let user = current_user(ctx).await?;
        let removed =
            assignment::clear_item(&ctx.data().database, user.id, receipt_id, item_id).await?;

        ctx.say(format!(
            "✅ Removed {removed} unit(s) from item {item_id}. It is unassigned now."
        ))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
