//! Configuration management commands.

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }
    ctx.output.kv("data_dir", &ctx.data_dir.display().to_string());

    let store = &ctx.config.store;
    ctx.output.info("");
    ctx.output.info("[store]");
    ctx.output.kv("cart_key", &store.cart_key);
    ctx.output.kv("wishlist_key", &store.wishlist_key);
    ctx.output.kv("currency", store.currency.code());

    ctx.output.info("");
    ctx.output.info("[store.images]");
    if let Some(ref url) = store.images.storage_base_url {
        ctx.output.kv("storage_base_url", url);
    }
    ctx.output.kv("bucket", &store.images.bucket);
    ctx.output.kv("placeholder", &store.images.placeholder);
    ctx.output.kv("cache_bust", &store.images.cache_bust.to_string());

    ctx.output.info("");
    ctx.output.info("[store.checkout]");
    ctx.output.kv("whatsapp_number", &store.checkout.whatsapp_number);

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = CliConfig {
        data_dir: Some(".storefront".to_string()),
        ..CliConfig::default()
    };
    config.save(&config_path)?;

    ctx.output.success(&format!("Created: {}", config_path.display()));
    ctx.output
        .info("Set store.checkout.whatsapp_number before running checkout.");

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    let problems = ctx.config.validate();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "valid": problems.is_empty(),
            "problems": problems,
        }));
    } else if problems.is_empty() {
        ctx.output.success("Configuration is valid");
    } else {
        ctx.output.header("Validating configuration");
        for problem in &problems {
            ctx.output.list_item(problem);
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        bail!("{} configuration problem(s)", problems.len())
    }
}
