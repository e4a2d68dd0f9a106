use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use ctxtree::commands::{check, navigate, progress_audit, resolve_scope, scan, validate};
use ctxtree::config::{self, BudgetConfig, NamingConfig};
use ctxtree::validation::{
    clap_filename_validator, clap_module_id_validator, clap_relative_dir_validator,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ctxtree")]
#[command(about = "Context resolution and validation for agent knowledge trees", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    naming: NamingArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Filenames the scanner recognizes. Overridable so the tool is not tied
/// to one ecosystem's conventions.
#[derive(Args)]
struct NamingArgs {
    /// Rule filename pattern auto-loaded per directory (glob allowed)
    #[arg(long, global = true, default_value = config::DEFAULT_RULE_PATTERN, value_parser = clap_filename_validator)]
    rule_file: String,

    /// Directory of the knowledge tree, relative to the project root
    #[arg(long, global = true, default_value = config::DEFAULT_KNOWLEDGE_ROOT, value_parser = clap_relative_dir_validator)]
    knowledge_root: String,

    /// Index filename directly under the knowledge root
    #[arg(long, global = true, default_value = config::DEFAULT_INDEX_FILE, value_parser = clap_filename_validator)]
    index_file: String,

    /// Module README filename
    #[arg(long, global = true, default_value = config::DEFAULT_README_FILE, value_parser = clap_filename_validator)]
    readme_file: String,

    /// Module architecture filename
    #[arg(long, global = true, default_value = config::DEFAULT_ARCHITECTURE_FILE, value_parser = clap_filename_validator)]
    architecture_file: String,

    /// Module progress filename
    #[arg(long, global = true, default_value = config::DEFAULT_PROGRESS_FILE, value_parser = clap_filename_validator)]
    progress_file: String,
}

impl NamingArgs {
    fn to_config(&self) -> NamingConfig {
        NamingConfig {
            rule_pattern: self.rule_file.clone(),
            knowledge_root: self.knowledge_root.clone(),
            index_file: self.index_file.clone(),
            readme_file: self.readme_file.clone(),
            architecture_file: self.architecture_file.clone(),
            progress_file: self.progress_file.clone(),
        }
    }
}

#[derive(Args)]
struct BudgetArgs {
    /// Maximum lines for a rule file
    #[arg(long)]
    rule_max_lines: Option<usize>,

    /// Maximum lines for the index
    #[arg(long)]
    index_max_lines: Option<usize>,

    /// Maximum lines for a module README
    #[arg(long)]
    readme_max_lines: Option<usize>,

    /// Maximum lines for an architecture file
    #[arg(long)]
    architecture_max_lines: Option<usize>,

    /// Maximum lines for a progress file
    #[arg(long)]
    progress_max_lines: Option<usize>,

    /// Days since verification before a file counts as stale
    #[arg(long)]
    staleness_days: Option<i64>,
}

impl BudgetArgs {
    fn to_config(&self) -> BudgetConfig {
        let defaults = BudgetConfig::default();
        BudgetConfig {
            rule_max_lines: self.rule_max_lines.unwrap_or(defaults.rule_max_lines),
            index_max_lines: self.index_max_lines.unwrap_or(defaults.index_max_lines),
            readme_max_lines: self.readme_max_lines.unwrap_or(defaults.readme_max_lines),
            architecture_max_lines: self
                .architecture_max_lines
                .unwrap_or(defaults.architecture_max_lines),
            progress_max_lines: self
                .progress_max_lines
                .unwrap_or(defaults.progress_max_lines),
            staleness_days: self.staleness_days.unwrap_or(defaults.staleness_days),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a project tree and report every recognized context file
    Scan {
        /// Project root to scan
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Print the raw snapshot as JSON instead of a summary
        #[arg(long)]
        json: bool,

        /// Write the JSON snapshot to a file (for later progress-audit)
        #[arg(long, value_name = "FILE")]
        snapshot_out: Option<PathBuf>,
    },

    /// List the rule files governing a working path, root first
    ResolveScope {
        /// Project root to scan
        root: PathBuf,

        /// Working path, relative to the root or absolute under it
        working_path: String,
    },

    /// Walk the knowledge graph toward a module, bounded by a hop limit
    Navigate {
        /// Project root to scan
        root: PathBuf,

        /// Module id to look for (alphanumeric, dash, underscore; max 64 characters)
        #[arg(value_parser = clap_module_id_validator)]
        target_module: String,

        /// Start node path (default: the index file)
        #[arg(long, value_name = "NODE")]
        from: Option<String>,

        /// Maximum link hops from the start node
        #[arg(long, default_value_t = 8)]
        max_hops: usize,
    },

    /// Audit line budgets and verification staleness
    Validate {
        /// Project root to scan
        #[arg(default_value = ".")]
        root: PathBuf,

        #[command(flatten)]
        budget: BudgetArgs,

        /// Evaluate staleness as of this date instead of today
        #[arg(long, value_name = "YYYY-MM-DD", value_parser = clap_date_validator)]
        now: Option<NaiveDate>,
    },

    /// Audit structural consistency (dangling links, orphans, cycles)
    Check {
        /// Project root to scan
        #[arg(default_value = ".")]
        root: PathBuf,
    },

    /// Compare progress files against a previously saved snapshot
    ProgressAudit {
        /// Project root to scan
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Previously saved JSON snapshot to compare against
        #[arg(long, value_name = "FILE")]
        previous: PathBuf,

        /// Save the current snapshot after the audit
        #[arg(long, value_name = "FILE")]
        save: Option<PathBuf>,
    },
}

fn clap_date_validator(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| e.to_string())
}

/// Diagnostics go to stderr so report output stays pipeable
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "ctxtree=warn".into()),
    );
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn dispatch(command: Commands, naming: &NamingConfig) -> Result<i32> {
    match command {
        Commands::Scan {
            root,
            json,
            snapshot_out,
        } => scan::execute(&root, naming, json, snapshot_out),
        Commands::ResolveScope { root, working_path } => {
            resolve_scope::execute(&root, naming, &working_path)
        }
        Commands::Navigate {
            root,
            target_module,
            from,
            max_hops,
        } => navigate::execute(&root, naming, &target_module, from.as_deref(), max_hops),
        Commands::Validate { root, budget, now } => {
            validate::execute(&root, naming, &budget.to_config(), now)
        }
        Commands::Check { root } => check::execute(&root, naming),
        Commands::ProgressAudit {
            root,
            previous,
            save,
        } => progress_audit::execute(&root, naming, previous, save),
    }
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let naming = cli.naming.to_config();

    match dispatch(cli.command, &naming) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{} {err:#}", "✗".red().bold());
            std::process::exit(2);
        }
    }
}
