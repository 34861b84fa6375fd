//! Image locator command.

use anyhow::Result;
use storefront_commerce::catalog::ImageResolver;

use super::ImageArgs;
use crate::context::Context;

/// Run the image command.
pub fn run(args: ImageArgs, ctx: &Context) -> Result<()> {
    let resolver = ImageResolver::new(ctx.config.store.images.clone());
    let url = resolver.resolve(&args.locator);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "locator": args.locator, "url": url }));
    } else {
        println!("{}", url);
    }

    Ok(())
}
