use anyhow::Result;
use clap::{Args, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "hedge")]
#[command(about = "Hedge engine accounting kernel CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Value a single position: quantity * mark price (basis points)
    Value {
        #[arg(long, allow_hyphen_values = true)]
        quantity: i64,

        /// Mark price in basis points (1 unit = 10000)
        #[arg(long, allow_hyphen_values = true)]
        mark_price: i64,
    },

    /// Net asset value of a snapshot file
    Nav {
        #[command(flatten)]
        input: SnapshotArgs,
    },

    /// Find a position by exact asset id
    Lookup {
        #[command(flatten)]
        input: SnapshotArgs,

        #[arg(long)]
        asset_id: String,
    },

    /// Compare kernel results with the i128 reference oracle
    Check {
        #[command(flatten)]
        input: SnapshotArgs,
    },

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order (base -> overlays)
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

#[derive(Args)]
struct SnapshotArgs {
    /// Snapshot JSON: {"cash": i64, "positions": [{"asset_id", "quantity", "mark_price"}]}
    #[arg(long)]
    snapshot: String,

    /// Layered config paths in merge order
    #[arg(long = "config")]
    config_paths: Vec<String>,
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Value {
            quantity,
            mark_price,
        } => {
            commands::init_tracing(hedge_config::DEFAULT_LOG_FILTER);
            commands::valuation::value(quantity, mark_price)?;
        }

        Commands::Nav { input } => {
            let settings = commands::Settings::load(&input.config_paths)?;
            commands::valuation::nav(&input.snapshot, &settings)?;
        }

        Commands::Lookup { input, asset_id } => {
            let settings = commands::Settings::load(&input.config_paths)?;
            commands::valuation::lookup(&input.snapshot, &asset_id, &settings)?;
        }

        Commands::Check { input } => {
            let settings = commands::Settings::load(&input.config_paths)?;
            commands::valuation::check(&input.snapshot, &settings)?;
        }

        Commands::ConfigHash { paths } => {
            commands::init_tracing(hedge_config::DEFAULT_LOG_FILTER);
            let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
            let loaded = hedge_config::load_layered_yaml(&path_refs)?;
            println!("config_hash={}", loaded.config_hash);
            println!("{}", loaded.canonical_json);
        }
    }

    Ok(())
}
