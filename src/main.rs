//! amz-catalog - Bibliographic metadata for Amazon catalog items
//!
//! Signed Product Advertising API lookups and wishlist exports.

use amz_catalog::amazon::regions::Region;
use amz_catalog::commands::{LookupCommand, WishlistCommand};
use amz_catalog::config::{Config, OutputFormat};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "amz-catalog",
    version,
    about = "Bibliographic metadata for Amazon catalog items",
    long_about = "Looks up items through the signed Product Advertising API and exports public wishlists."
)]
struct Cli {
    /// Amazon store (overrides config file and AMZ_REGION)
    #[arg(short, long, global = true)]
    region: Option<Region>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true)]
    proxy: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up an item by ASIN or ISBN-10
    #[command(alias = "l")]
    Lookup {
        /// Item id to look up
        item_id: String,

        /// AWS access key id
        #[arg(long, env = "AWS_KEY", hide_env_values = true)]
        access_key: String,

        /// AWS secret key
        #[arg(long, env = "AWS_SECRET", hide_env_values = true)]
        secret: String,

        /// Associate tag sent with the request
        #[arg(long)]
        associate_tag: Option<String>,
    },

    /// Export every item of a public wishlist
    #[command(alias = "w")]
    Wishlist {
        /// Wishlist id, as found in the list URL
        wishlist_id: String,

        /// Stop with an error instead of fetching past this many pages
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        max_pages: Option<u32>,
    },

    /// List supported regions
    Regions,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(region) = cli.region {
        config.region = region;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }

    match cli.command {
        Commands::Lookup { item_id, access_key, secret, associate_tag } => {
            if let Some(tag) = associate_tag {
                config.associate_tag = tag;
            }

            let cmd = LookupCommand::new(config);
            let cred = cmd.credentials(&access_key, &secret);
            let output = cmd.execute(&cred, &item_id).await?;
            println!("{}", output);
        }

        Commands::Wishlist { wishlist_id, max_pages } => {
            if max_pages.is_some() {
                config.max_pages = max_pages;
            }

            let cmd = WishlistCommand::new(config);
            let mut stdout = std::io::stdout().lock();
            cmd.execute(&wishlist_id, &mut stdout).await?;
        }

        Commands::Regions => {
            println!("Supported Amazon regions:\n");
            println!("{:<6} {:<16} {:<24}", "Code", "Domain", "API host");
            println!("{:-<6} {:-<16} {:-<24}", "", "", "");

            for region in Region::all() {
                println!(
                    "{:<6} {:<16} {:<24}",
                    region.to_string(),
                    region.domain(),
                    region.api_host()
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_pages_must_be_positive() {
        let result = Cli::try_parse_from(["amz-catalog", "wishlist", "3ABC123", "--max-pages", "0"]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from(["amz-catalog", "wishlist", "3ABC123", "--max-pages", "1"])
            .unwrap();
        match cli.command {
            Commands::Wishlist { max_pages, .. } => assert_eq!(max_pages, Some(1)),
            _ => panic!("expected wishlist command"),
        }
    }
}
