//! Checkout command.

use anyhow::{Context as _, Result};
use chrono::Utc;
use storefront_commerce::checkout::{prepare_handoff, OrderNumber};

use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;
    let lines = store.read_cart();

    let now = Utc::now();
    let today = now.date_naive();
    let order_number = if args.existing.is_empty() {
        OrderNumber::random(today)
    } else {
        OrderNumber::sequential(today, &args.existing)
    };

    let handoff = prepare_handoff(
        &lines,
        order_number,
        &ctx.config.store.checkout,
        ctx.config.store.currency,
        now,
    )
    .context("Failed to prepare checkout")?;

    tracing::info!(
        order_number = %order_number,
        whatsapp_url = %handoff.whatsapp_url,
        "checkout prepared"
    );

    if args.clear {
        store.clear_cart();
    }

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "summary": handoff.summary,
            "message": handoff.message,
            "whatsapp_url": handoff.whatsapp_url,
        }));
        return Ok(());
    }

    ctx.output.header(&format!("Order {}", order_number));
    for line in handoff.message.lines().skip(1) {
        ctx.output.list_item(line);
    }
    ctx.output.info("");
    ctx.output.kv("whatsapp", &handoff.whatsapp_url);
    if args.clear {
        ctx.output.success("Cart cleared");
    }

    Ok(())
}
