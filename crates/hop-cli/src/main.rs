//! hop CLI - hierarchical task network planner.
//!
//! - `hop run <problem.yaml>` - plan a problem against a reference domain
//! - `hop describe [domain]` - list a domain's operators and methods

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use hop_planner::{Planner, Verbosity};

mod problem;

use problem::Problem;

#[derive(Parser)]
#[command(name = "hop")]
#[command(about = "Hierarchical task network planner", version)]
struct Cli {
    /// Verbose output (-v problem and result, -vv every call, -vvv operator and method detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a YAML problem file
    Run {
        problem: PathBuf,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,

        /// Replay the plan and print the final state
        #[arg(long)]
        final_state: bool,
    },

    /// Show a reference domain's operators and methods
    Describe {
        /// Domain name; lists the available domains when omitted
        domain: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let verbosity = Verbosity::from(cli.verbose);

    match cli.command {
        Commands::Run {
            problem,
            json,
            final_state,
        } => {
            let loaded = Problem::load(&problem)?;
            let verbosity = run_verbosity(cli.verbose, loaded.planner.verbosity);
            init_tracing(verbosity);
            run_problem(&problem, loaded, verbosity, json, final_state)
        }
        Commands::Describe { domain } => {
            init_tracing(verbosity);
            describe(domain.as_deref())
        }
    }
}

/// The louder of `-v` and the problem file's `planner.verbosity`.
fn run_verbosity(flags: u8, from_file: Verbosity) -> Verbosity {
    Verbosity::from(flags).max(from_file)
}

/// Filter directive for a verbosity level. `RUST_LOG` still takes precedence.
fn log_level(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Silent => "warn",
        Verbosity::Summary => "info",
        Verbosity::Calls => "debug",
        Verbosity::Detail => "trace",
    }
}

fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(verbosity)));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run_problem(
    path: &Path,
    problem: Problem,
    verbosity: Verbosity,
    json: bool,
    final_state: bool,
) -> Result<()> {
    let domain = hop_domains::by_name(&problem.domain).ok_or_else(|| {
        anyhow!(
            "unknown domain '{}' (expected one of: {})",
            problem.domain,
            hop_domains::DOMAINS.join(", ")
        )
    })?;
    let tasks = problem.tasks()?;

    let mut config = problem.planner;
    config.verbosity = verbosity;
    let planner = Planner::new(domain).with_config(config);

    tracing::info!(
        problem = %path.display(),
        domain = %problem.domain,
        tasks = tasks.len(),
        "Planning"
    );

    let plan = planner
        .plan(&problem.state, &tasks)
        .with_context(|| format!("Planning {} failed", path.display()))?;

    let Some(plan) = plan else {
        println!("no plan");
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        for step in &plan {
            println!("{step}");
        }
    }

    if final_state {
        let end = planner
            .domain()
            .execute(&problem.state, &plan)?
            .ok_or_else(|| anyhow!("plan does not replay from {}", problem.state.name()))?;
        print!("{}", hop_tools::render_state(&end, 0));
    }

    Ok(())
}

fn describe(domain: Option<&str>) -> Result<()> {
    let Some(name) = domain else {
        println!("Domains:");
        for name in hop_domains::DOMAINS {
            println!("  {name}");
        }
        return Ok(());
    };

    let domain = hop_domains::by_name(name).ok_or_else(|| anyhow!("unknown domain '{name}'"))?;
    println!("{}", domain.describe_operators());
    println!();
    print!("{}", domain.describe_methods());
    Ok(())
}
