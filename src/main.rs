//! Main CLI application for the minesweeper mine prover

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use minesweeper_sat::{
    config::{CliOverrides, OutputFormat, Settings, Strategy},
    minesweeper::{create_example_grids, load_grid_from_file},
    sat::{ConstraintEncoder, Successor},
    utils::{ColorOutput, GridFormatter},
    MineFinder,
};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "minesweeper_sat")]
#[command(about = "Minesweeper SAT Mine Prover")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Flag every cell that provably holds a mine
    Solve {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Grid file (overrides config)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Report file (overrides config); printed to stdout when absent
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Search strategy (overrides config)
        #[arg(short, long, value_enum)]
        strategy: Option<Strategy>,

        /// Successor model for best-first search (overrides config)
        #[arg(long, value_enum)]
        successor: Option<Successor>,

        /// Per-search timeout in milliseconds, 0 for none (overrides config)
        #[arg(short, long)]
        timeout_ms: Option<u64>,

        /// Worker thread count (overrides config)
        #[arg(long)]
        threads: Option<usize>,

        /// Reject grids whose clues contradict each other
        #[arg(long)]
        verify: bool,

        /// Also prove cells safe
        #[arg(long)]
        prove_safe: bool,

        /// Query cells one at a time on the current thread
        #[arg(long)]
        sequential: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create example configuration and grid files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Show encoding statistics for a grid
    Analyze {
        /// Grid file
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            config,
            input,
            output,
            format,
            strategy,
            successor,
            timeout_ms,
            threads,
            verify,
            prove_safe,
            sequential,
            verbose,
        } => {
            configure_logging(verbose);
            let overrides = CliOverrides {
                grid_file: input,
                output_file: output,
                format,
                strategy,
                successor,
                timeout_ms,
                threads,
                verify_feasible: verify,
                prove_safe,
                sequential,
            };
            solve_command(config, overrides, verbose)
        }
        Commands::Setup { directory, force } => {
            configure_logging(false);
            setup_command(directory, force)
        }
        Commands::Analyze { input } => {
            configure_logging(false);
            analyze_command(input)
        }
    }
}

fn configure_logging(verbose: bool) {
    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .filter_level(level_filter)
        .target(env_logger::Target::Stderr)
        .init();
}

fn solve_command(config_path: PathBuf, overrides: CliOverrides, verbose: bool) -> Result<()> {
    let mut settings = if config_path.exists() {
        Settings::from_file(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        log::warn!("Config file {} not found, using defaults", config_path.display());
        Settings::default()
    };

    settings.merge_with_cli(&overrides);
    settings.validate().context("Configuration validation failed")?;

    if verbose {
        println!("Configuration:");
        println!("  Grid file: {}", settings.input.grid_file.display());
        println!("  Strategy: {}", settings.solver.strategy);
        if settings.solver.strategy == Strategy::BestFirst {
            println!("  Successor: {}", settings.solver.successor);
        }
        println!("  Timeout: {} ms", settings.solver.timeout_ms);
        println!("  Verify feasible: {}", settings.solver.verify_feasible);
        println!("  Prove safe: {}", settings.solver.prove_safe);
        println!();
    }

    let grid = load_grid_from_file(&settings.input.grid_file)?;
    let report = MineFinder::new(settings.solver.solve_options())
        .analyze(&grid)
        .with_context(|| format!("Failed to solve grid {}", settings.input.grid_file.display()))?;

    match settings.output.output_file {
        Some(ref path) => {
            GridFormatter::save_report(&report, path, settings.output.format)?;
            println!("{}", ColorOutput::success(&format!("Report saved to {}", path.display())));
        }
        None => println!("{}", GridFormatter::render(&report, settings.output.format)?),
    }

    if !report.is_complete() {
        eprintln!(
            "{}",
            ColorOutput::warning(&format!(
                "{} search(es) timed out; raise the timeout or switch strategy",
                report.warnings.len()
            ))
        );
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let input_dir = directory.join("input/grids");

    for dir in [&config_dir, &input_dir] {
        std::fs::create_dir_all(dir).with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_grids(&input_dir).context("Failed to create example grids")?;
    println!("Created example grids in: {}", input_dir.display());

    let variants_dir = config_dir.join("variants");
    std::fs::create_dir_all(&variants_dir)
        .with_context(|| format!("Failed to create directory {}", variants_dir.display()))?;

    let mut thorough = Settings::default();
    thorough.solver.strategy = Strategy::Cadical;
    thorough.solver.prove_safe = true;
    thorough.input.grid_file = PathBuf::from("input/grids/ambiguous.txt");
    thorough.to_file(&variants_dir.join("cadical.yaml"))?;

    let mut heuristic = Settings::default();
    heuristic.solver.strategy = Strategy::BestFirst;
    heuristic.solver.successor = Successor::Flip;
    heuristic.input.grid_file = PathBuf::from("input/grids/saturated.txt");
    heuristic.to_file(&variants_dir.join("best_first.yaml"))?;

    println!("Created configuration variants in: {}", variants_dir.display());
    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Add your grids to {}", input_dir.display());
    println!("3. Run: cargo run -- solve --config config/default.yaml");

    Ok(())
}

fn analyze_command(input: PathBuf) -> Result<()> {
    let grid = load_grid_from_file(&input)?;

    println!("Grid ({}x{}):", grid.width, grid.height);
    println!("{}", GridFormatter::format_grid_with_coords(&grid));

    println!("Grid Statistics:");
    println!("  Unopened cells: {}", grid.unopened_count());
    println!("  Flagged cells: {}", grid.flagged_count());

    let mut encoder = ConstraintEncoder::for_grid(&grid);
    let system = encoder.encode(&grid);
    println!("\n{}", encoder.statistics());

    if system.has_empty_clause() {
        println!("{}", ColorOutput::error("Grid is unsatisfiable: some clue cannot be met"));
    }

    Ok(())
}
