use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use dotenv::dotenv;
use migres::catalog::DirectoryCatalog;
use migres::config;
use migres::constants::CONFIG_FILENAME;
use migres::history::{NoHistory, PgHistoryStore, connect_target};
use migres::resolver::{ResolvedMigration, Resolver, SqlScriptFactory};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(long, default_value = CONFIG_FILENAME, global = true)]
    config_file: String,

    /// Enable verbose output (info level)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Suppress all non-essential output (error level only)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Enable debug output (debug level)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
struct ResolveArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    format: PlanFormat,

    /// Target database URL (overrides config and DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,

    /// Plan against an explicitly empty history instead of querying the
    /// target database (offline planning, first deploys)
    #[arg(long)]
    no_history: bool,

    /// Migrations directory (overrides config)
    #[arg(long)]
    dir: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the ordered migration plan for the target schema
    Resolve(ResolveArgs),

    /// Resolve the test-data migration set (never part of the plan)
    TestData {
        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: PlanFormat,

        /// Migrations directory (overrides config)
        #[arg(long)]
        dir: Option<String>,
    },

    /// Scaffold a migrations directory and config file
    Init,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum PlanFormat {
    /// Human-readable table
    Table,
    /// JSON for piping to jq
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    initialize_logging(&cli);
    run_main(cli).await
}

fn initialize_logging(cli: &Cli) {
    let level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else if cli.quiet {
        "error"
    } else {
        "warn" // default level
    };

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(level)
    };

    fmt().with_env_filter(filter).with_target(false).init();
}

async fn run_main(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Resolve(args) => cmd_resolve(&cli.config_file, args).await,
        Commands::TestData { format, dir } => cmd_test_data(&cli.config_file, format, dir),
        Commands::Init => cmd_init(&cli.config_file),
    }
}

async fn cmd_resolve(config_file: &str, args: ResolveArgs) -> Result<()> {
    let mut config = config::resolve_config(config::load_config(config_file)?);
    if let Some(dir) = args.dir {
        config.resolver.migrations_dir = dir.into();
    }
    if let Some(url) = args.database_url {
        config.database.target_url = Some(url);
    }

    let catalog = DirectoryCatalog::new(&config.resolver.migrations_dir);
    let factory = SqlScriptFactory;
    let resolver = Resolver::new(&config.resolver, &catalog, &factory);

    let plan = if args.no_history {
        resolver.resolve(&NoHistory).await?
    } else {
        let Some(url) = &config.database.target_url else {
            bail!(
                "No target database configured. Set database.target_url in {}, \
                 export DATABASE_URL, pass --database-url, or use --no-history \
                 for an offline plan.",
                config_file
            );
        };

        let pool = connect_target(url).await?;
        let store = PgHistoryStore::new(pool, config.database.history_table.clone());
        store.ensure_history_table().await?;
        resolver.resolve(&store).await?
    };

    print_plan(&plan, args.format)
}

fn cmd_test_data(config_file: &str, format: PlanFormat, dir: Option<String>) -> Result<()> {
    let mut config = config::resolve_config(config::load_config(config_file)?);
    if let Some(dir) = dir {
        config.resolver.migrations_dir = dir.into();
    }

    let catalog = DirectoryCatalog::new(&config.resolver.migrations_dir);
    let factory = SqlScriptFactory;
    let resolver = Resolver::new(&config.resolver, &catalog, &factory);

    let migrations = resolver.resolve_test_data()?;
    print_plan(&migrations, format)
}

fn cmd_init(config_file: &str) -> Result<()> {
    let config = config::Config::default();

    if std::path::Path::new(config_file).exists() {
        bail!("{} already exists", config_file);
    }

    std::fs::create_dir_all(&config.resolver.migrations_dir).with_context(|| {
        format!(
            "Failed to create migrations directory {}",
            config.resolver.migrations_dir.display()
        )
    })?;

    let scaffold = format!(
        r#"# migres configuration
database:
  # target_url: postgres://localhost/app
  history_table:
    schema: {}
    name: {}

migrations:
  dir: {}
  versioned_prefix: {}
  baseline_prefix: {}
  repeatable_prefix: {}
  test_data_prefix: {}
  suffixes: [".sql"]
  encoding: UTF-8
  mixed: false
"#,
        config.database.history_table.schema,
        config.database.history_table.name,
        config.resolver.migrations_dir.display(),
        config.resolver.versioned_prefix,
        config.resolver.baseline_prefix,
        config.resolver.repeatable_prefix,
        config.resolver.test_data_prefix,
    );

    std::fs::write(config_file, scaffold)
        .with_context(|| format!("Failed to write {}", config_file))?;

    println!("✓ Created {}", config_file);
    println!(
        "✓ Created {}/",
        config.resolver.migrations_dir.display()
    );
    Ok(())
}

fn print_plan(plan: &[ResolvedMigration], format: PlanFormat) -> Result<()> {
    match format {
        PlanFormat::Json => {
            println!("{}", serde_json::to_string_pretty(plan)?);
        }
        PlanFormat::Table => {
            if plan.is_empty() {
                println!("No migrations resolved.");
                return Ok(());
            }

            for migration in plan {
                let version = migration
                    .version
                    .as_ref()
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:<10} {:>8}  {:<32} {}",
                    style(migration.kind).cyan(),
                    version,
                    migration.description,
                    style(&migration.script).dim()
                );
            }

            let versioned = plan.iter().filter(|m| m.version.is_some()).count();
            println!(
                "\n{} migration(s) resolved ({} versioned, {} repeatable)",
                plan.len(),
                versioned,
                plan.len() - versioned
            );
        }
    }
    Ok(())
}
