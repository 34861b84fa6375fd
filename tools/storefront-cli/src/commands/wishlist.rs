//! Wishlist commands.

use anyhow::Result;
use storefront_commerce::catalog::ProductRef;
use storefront_commerce::ProductId;

use super::{WishlistArgs, WishlistCommand};
use crate::context::Context;

/// Run the wishlist command.
pub fn run(args: WishlistArgs, ctx: &Context) -> Result<()> {
    let store = ctx.open_store()?;

    match args.command.unwrap_or(WishlistCommand::List) {
        WishlistCommand::List => print_entries(&store.read_wishlist(), ctx),
        WishlistCommand::Toggle(product) => {
            let product = product.into_product()?;
            let entries = store.toggle_wishlist(&product);
            if entries.iter().any(|p| p.id == product.id) {
                ctx.output.success(&format!("Saved {}", product.name));
            } else {
                ctx.output.success(&format!("Removed {} from wishlist", product.name));
            }
            print_entries(&entries, ctx);
        }
        WishlistCommand::Add(product) => {
            let product = product.into_product()?;
            if store.is_wishlisted(&product.id) {
                ctx.output.info(&format!("{} is already saved", product.name));
            }
            let entries = store.add_to_wishlist(&product);
            print_entries(&entries, ctx);
        }
        WishlistCommand::Remove { id } => {
            let entries = store.remove_from_wishlist(&ProductId::new(&id));
            ctx.output.success(&format!("Removed {}", id));
            print_entries(&entries, ctx);
        }
    }

    Ok(())
}

fn print_entries(entries: &[ProductRef], ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&entries);
        return;
    }

    if entries.is_empty() {
        ctx.output.info("Wishlist is empty");
        return;
    }

    ctx.output.header(&format!("Wishlist ({})", entries.len()));
    for p in entries {
        let category = p.category.as_deref().unwrap_or("uncategorised");
        ctx.output
            .list_item(&format!("{}  {}  {:.2}  [{}]", p.id, p.name, p.price, category));
    }
}
