mod commands;
mod config;
mod home_dir;
mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::{Args, Parser, Subcommand};
use closet::infra::storage::{FsBlobStore, FsRecordStore};
use closet::{AttributeTag, Category, ClosetModule, ColorToken, ItemFilter, PantsType, SubType};
use url::Url;

use crate::commands::{AddItem, Context};
use crate::config::AppConfig;

/// Closet - digital wardrobe intake and outfit pairing
#[derive(Parser)]
#[command(name = "closet")]
#[command(about = "Closet - digital wardrobe intake and outfit pairing")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Closet home directory (overrides config)
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add an item by walking the intake wizard
    AddItem(AddItemArgs),
    /// List items, newest first
    ListItems(ListItemsArgs),
    /// Save a top + bottom combination
    SavePair {
        /// Image URL of the top
        #[arg(long)]
        top: Url,
        /// Image URL of the bottom
        #[arg(long)]
        bottom: Url,
    },
    /// List saved outfit pairs, newest first
    ListPairs,
    /// Print categories, types, attribute tags and colors
    Taxonomy,
    /// Validate configuration and print it
    Check,
}

#[derive(Args)]
struct AddItemArgs {
    /// Image file to upload
    #[arg(long)]
    image: PathBuf,
    #[arg(long)]
    category: Category,
    #[arg(long)]
    sub_type: Option<SubType>,
    #[arg(long)]
    pants_type: Option<PantsType>,
    /// Attribute tag as `group:value`, e.g. `sleeve:short`; repeatable
    #[arg(long = "tag")]
    tags: Vec<AttributeTag>,
    /// Color token, e.g. `red` or `light-blue`; repeatable
    #[arg(long = "color")]
    colors: Vec<ColorToken>,
}

#[derive(Args)]
struct ListItemsArgs {
    #[arg(long)]
    category: Option<Category>,
    #[arg(long)]
    sub_type: Option<SubType>,
    #[arg(long)]
    color: Option<ColorToken>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Layered config:
    // 1) defaults -> 2) YAML (if provided) -> 3) env (CLOSET__*) -> 4) CLI overrides
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(cli.home.as_deref(), cli.verbose);

    logging::init_logging(&config.logging);

    match cli.command {
        Commands::Check => check_config(&config),
        Commands::Taxonomy => {
            print!("{}", commands::render_taxonomy()?);
            Ok(())
        }
        command => run(&config, command).await,
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    let home = config.resolve_home(false)?;
    println!("Configuration is valid");
    println!("home: {}", home.display());
    println!("{}", config.to_yaml()?);
    Ok(())
}

async fn run(config: &AppConfig, command: Commands) -> Result<()> {
    let home = config
        .resolve_home(true)
        .context("failed to prepare closet home directory")?;
    tracing::info!(home = %home.display(), "using closet home");

    let module = ClosetModule::new(
        config.closet.clone(),
        Arc::new(FsBlobStore::new(&home)?),
        Arc::new(FsRecordStore::new(&home)),
    );
    let ctx = Context {
        client: module.client(),
        session: config.local_user.session(),
    };

    match command {
        Commands::AddItem(args) => {
            let item = commands::add_item(
                &ctx,
                module.new_wizard(),
                AddItem {
                    image: args.image,
                    category: args.category,
                    sub_type: args.sub_type,
                    pants_type: args.pants_type,
                    tags: args.tags,
                    colors: args.colors,
                },
            )
            .await?;
            println!("Item added to your closet: {} {}", item.id, item.image_url);
        }
        Commands::ListItems(args) => {
            let filter = ItemFilter {
                category: args.category,
                sub_type: args.sub_type,
                color: args.color,
            };
            print!("{}", commands::list_items(&ctx, &filter).await?);
        }
        Commands::SavePair { top, bottom } => {
            let pair = commands::save_pair(&ctx, &top, &bottom).await?;
            println!("Outfit pair saved: {}", pair.id);
        }
        Commands::ListPairs => print!("{}", commands::list_pairs(&ctx).await?),
        Commands::Taxonomy | Commands::Check => {}
    }
    Ok(())
}
