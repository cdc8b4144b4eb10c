use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use metaltrack::cli::holdings::{NewCoin, NewJewellery};
use metaltrack::core::holdings::{
    DEFAULT_COIN_WEIGHT, DEFAULT_COIN_WEIGHT_UNIT, DEFAULT_JEWELLERY_WEIGHT_UNIT,
};
use metaltrack::core::log::init_logging;
use metaltrack::core::purity::DEFAULT_KARAT;
use metaltrack::core::{Metal, WeightUnit};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    /// Manual gold price per gram in the base currency
    #[arg(long, global = true)]
    gold_price: Option<f64>,

    /// Manual silver price per gram in the base currency
    #[arg(long, global = true)]
    silver_price: Option<f64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display holdings and their value
    Summary {
        /// Currency to show values in (base or secondary)
        #[arg(long)]
        currency: Option<String>,
    },
    /// Calculate Zakah due on gold and silver holdings
    Zakah,
    /// Display historical metal prices
    History,
    /// Record a coin holding
    AddCoin {
        name: String,
        #[arg(short, long, default_value = "gold")]
        metal: Metal,
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
        /// Weight of a single coin
        #[arg(short, long, default_value_t = DEFAULT_COIN_WEIGHT)]
        weight: f64,
        /// Weight unit: oz (troy ounce) or g
        #[arg(short, long, default_value_t = DEFAULT_COIN_WEIGHT_UNIT)]
        unit: WeightUnit,
    },
    /// Record a jewellery item
    AddJewellery {
        name: String,
        #[arg(short, long, default_value = "gold")]
        metal: Metal,
        /// Total weight of the item
        #[arg(short, long)]
        weight: f64,
        /// Weight unit: oz (troy ounce) or g
        #[arg(short, long, default_value_t = DEFAULT_JEWELLERY_WEIGHT_UNIT)]
        unit: WeightUnit,
        #[arg(short, long)]
        description: Option<String>,
        /// Gold purity (24, 22, 18 or 9). Ignored for silver.
        #[arg(short, long, default_value_t = DEFAULT_KARAT)]
        karat: u32,
    },
    /// Remove a holding by id (or a unique id prefix)
    Remove { id: String },
}

impl From<Commands> for metaltrack::AppCommand {
    fn from(cmd: Commands) -> metaltrack::AppCommand {
        match cmd {
            Commands::Summary { currency } => metaltrack::AppCommand::Summary { currency },
            Commands::Zakah => metaltrack::AppCommand::Zakah,
            Commands::History => metaltrack::AppCommand::History,
            Commands::AddCoin {
                name,
                metal,
                quantity,
                weight,
                unit,
            } => metaltrack::AppCommand::AddCoin(NewCoin {
                name,
                metal,
                quantity,
                weight,
                unit,
            }),
            Commands::AddJewellery {
                name,
                metal,
                weight,
                unit,
                description,
                karat,
            } => metaltrack::AppCommand::AddJewellery(NewJewellery {
                name,
                metal,
                weight,
                unit,
                description,
                karat: Some(karat),
            }),
            Commands::Remove { id } => metaltrack::AppCommand::Remove { id },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let overrides = metaltrack::PriceOverrides {
        gold_per_gram: cli.gold_price,
        silver_per_gram: cli.silver_price,
    };
    let result = match cli.command {
        Some(Commands::Setup) => metaltrack::cli::setup::setup(),
        Some(cmd) => {
            metaltrack::run_command(cmd.into(), cli.config_path.as_deref(), overrides).await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
