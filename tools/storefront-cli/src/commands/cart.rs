//! Cart commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use storefront_commerce::cart::CartLine;
use storefront_commerce::ProductId;

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::truncate;

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;

    match args.command.unwrap_or(CartCommand::List) {
        CartCommand::List => {
            print_lines(&store.read_cart(), ctx);
        }
        CartCommand::Add(product) => {
            let product = product.into_product()?;
            let lines = store.add_to_cart(&product);
            ctx.output.success(&format!("Added {} to cart", product.name));
            print_lines(&lines, ctx);
        }
        CartCommand::Remove { id } => {
            let lines = store.remove_from_cart(&ProductId::new(&id));
            ctx.output.success(&format!("Removed {}", id));
            print_lines(&lines, ctx);
        }
        CartCommand::Set { id, quantity } => {
            let id = ProductId::new(id);
            if !store.read_cart().iter().any(|l| l.id() == &id) {
                ctx.output.warn(&format!("{} is not in the cart", id));
            }
            let lines = store.update_quantity(&id, quantity);
            print_lines(&lines, ctx);
        }
        CartCommand::Clear { yes } => {
            if store.read_cart().is_empty() {
                ctx.output.info("Cart is already empty");
                return Ok(());
            }
            if !yes && !ctx.output.is_json() {
                let confirmed = Confirm::new()
                    .with_prompt("Clear the cart?")
                    .default(false)
                    .interact()?;

                if !confirmed {
                    bail!("Cancelled");
                }
            }
            store.clear_cart();
            ctx.output.success("Cart cleared");
        }
        CartCommand::Total => {
            let totals = store.cart_totals()?;
            if ctx.output.is_json() {
                ctx.output.json(&totals);
                return Ok(());
            }
            ctx.output.header("Cart total");
            ctx.output.kv("lines", &totals.line_count.to_string());
            ctx.output.kv("items", &totals.item_count.to_string());
            ctx.output.kv("subtotal", &totals.subtotal.display());
        }
    }

    Ok(())
}

fn print_lines(lines: &[CartLine], ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&lines);
        return;
    }

    if lines.is_empty() {
        ctx.output.info("Cart is empty");
        return;
    }

    ctx.output.header("Cart");
    let widths = [12, 28, 5, 10];
    ctx.output.table_row(&["ID", "NAME", "QTY", "PRICE"], &widths);
    for line in lines {
        let id = truncate(line.id().as_str(), widths[0]);
        let name = truncate(&line.product.name, widths[1]);
        let quantity = line.quantity.to_string();
        let price = format!("{:.2}", line.product.price);
        ctx.output.table_row(&[&id, &name, &quantity, &price], &widths);
    }
}
