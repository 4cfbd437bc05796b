//! Jade CLI over the skincare intelligence core.
//!
//! # Responsibility
//! - Open the local graph database and run one core operation per call.
//! - Print results as pretty JSON on stdout.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use jade_core::db::open_db;
use jade_core::{
    calculate_compatibility_score, default_log_level, init_logging, parse_access_level,
    AccessLevel, AtomListQuery, AtomService, CausalDirection, CausalService,
    CompatibilityService, IntelligenceConfig, ProductService, SqliteAtomRepository,
    SqliteProductRepository,
};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jade")]
#[command(author, version, about = "Skincare ingredient intelligence", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// SQLite database path
    #[arg(long, global = true, default_value = "jade.sqlite3")]
    db: PathBuf,

    /// Optional TOML file with traversal and scoring limits
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write rolling logs into this absolute directory
    #[arg(long, global = true)]
    log_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the 13-dimension tensor of a stored product
    Tensor { product_id: String },

    /// Score two raw tensors given as comma-separated values
    Score { left: String, right: String },

    /// Compatibility score of two stored products
    Compare { left: String, right: String },

    /// Rank stored products by similarity to one product
    Similar {
        product_id: String,
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
        #[arg(long, default_value_t = 0.0)]
        min_score: f64,
    },

    /// List atoms visible at an access level
    Atoms {
        /// Case-insensitive title filter
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        limit: Option<u32>,
        #[arg(short, long, default_value = "public", value_parser = access_arg)]
        access: AccessLevel,
    },

    /// Walk the causal graph from one atom
    Chain {
        atom_id: String,
        /// upstream, downstream or both
        #[arg(short, long, default_value = "downstream", value_parser = direction_arg)]
        direction: CausalDirection,
        #[arg(long, default_value_t = 3)]
        depth: u32,
        #[arg(short, long, default_value = "public", value_parser = access_arg)]
        access: AccessLevel,
    },

    /// Shortest downstream path between two atoms
    Path {
        from: String,
        to: String,
        #[arg(short, long, default_value = "public", value_parser = access_arg)]
        access: AccessLevel,
    },

    /// Explain why an atom works, optionally toward a target atom
    Why {
        atom_id: String,
        #[arg(short, long)]
        target: Option<String>,
        #[arg(short, long, default_value = "public", value_parser = access_arg)]
        access: AccessLevel,
    },

    /// Analyze pairwise compatibility of a set of atoms
    Analyze {
        #[arg(required = true, num_args = 1..)]
        atom_ids: Vec<String>,
        #[arg(short, long, default_value = "public", value_parser = access_arg)]
        access: AccessLevel,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    run(cli, &mut stdout.lock())
}

/// Runs one parsed command, writing its JSON result to `out`.
fn run(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    if let Some(dir) = cli.log_dir.as_deref() {
        let level = match cli.log_level.as_deref() {
            Some(level) => level,
            None => default_log_level(),
        };
        init_logging(level, dir).context("failed to initialize logging")?;
    }

    let config = match cli.config.as_ref() {
        Some(path) => IntelligenceConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => IntelligenceConfig::default(),
    };
    let conn = open_db(&cli.db)
        .with_context(|| format!("failed to open database {}", cli.db.display()))?;

    match cli.command {
        Commands::Tensor { product_id } => {
            let service = ProductService::new(SqliteProductRepository::new(&conn));
            match service.product_tensor(&product_id)? {
                Some(tensor) => print_json(out, &tensor),
                None => bail!("product `{product_id}` not found"),
            }
        }

        Commands::Score { left, right } => {
            let left = parse_vector(&left)?;
            let right = parse_vector(&right)?;
            print_json(out, &calculate_compatibility_score(&left, &right)?)
        }

        Commands::Compare { left, right } => {
            let service = ProductService::new(SqliteProductRepository::new(&conn));
            match service.compare_products(&left, &right)? {
                Some(score) => print_json(out, &score),
                None => bail!("product `{left}` or `{right}` not found"),
            }
        }

        Commands::Similar {
            product_id,
            limit,
            min_score,
        } => {
            let service = ProductService::new(SqliteProductRepository::new(&conn));
            let ranked = service.find_compatible_products(&product_id, limit, min_score)?;
            print_json(out, &ranked)
        }

        Commands::Atoms {
            title,
            limit,
            access,
        } => {
            let service = AtomService::new(SqliteAtomRepository::new(&conn));
            let query = AtomListQuery {
                title_contains: title,
                limit,
                ..AtomListQuery::default()
            };
            print_json(out, &service.get_accessible_atoms(&query, access)?)
        }

        Commands::Chain {
            atom_id,
            direction,
            depth,
            access,
        } => {
            let service = CausalService::with_config(SqliteAtomRepository::new(&conn), config);
            let nodes = service.navigate_causal_chain(&atom_id, direction, depth, access)?;
            print_json(out, &nodes)
        }

        Commands::Path { from, to, access } => {
            let service = CausalService::with_config(SqliteAtomRepository::new(&conn), config);
            print_json(out, &service.find_causal_path(&from, &to, access)?)
        }

        Commands::Why {
            atom_id,
            target,
            access,
        } => {
            let service = CausalService::with_config(SqliteAtomRepository::new(&conn), config);
            match service.generate_why_explanation(&atom_id, target.as_deref(), access)? {
                Some(explanation) => print_json(out, &explanation),
                None => bail!("atom `{atom_id}` not found"),
            }
        }

        Commands::Analyze { atom_ids, access } => {
            let service =
                CompatibilityService::with_config(SqliteAtomRepository::new(&conn), config);
            print_json(out, &service.analyze_compatibility(&atom_ids, access)?)
        }
    }
}

fn access_arg(value: &str) -> Result<AccessLevel, String> {
    parse_access_level(value).map_err(|err| err.to_string())
}

fn direction_arg(value: &str) -> Result<CausalDirection, String> {
    CausalDirection::parse(value).ok_or_else(|| {
        format!("unknown direction `{value}`, expected upstream, downstream or both")
    })
}

fn parse_vector(raw: &str) -> anyhow::Result<Vec<f64>> {
    raw.split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<f64>()
                .with_context(|| format!("invalid tensor value `{part}`"))
        })
        .collect()
}

fn print_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
