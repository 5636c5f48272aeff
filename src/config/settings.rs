//! Configuration settings for the minesweeper mine prover

use crate::sat::Successor;
use crate::solve::SolveOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub solver: SolverConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    pub strategy: Strategy,
    #[serde(default)]
    pub successor: Successor,
    /// Per-search deadline in milliseconds, 0 disables it
    pub timeout_ms: u64,
    pub verify_feasible: bool,
    pub prove_safe: bool,
    pub parallel: bool,
    #[serde(default)]
    pub threads: Option<usize>,
}

/// Satisfiability procedure used for every per-cell query
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Exhaustive,
    #[default]
    Backtracking,
    #[value(name = "best_first")]
    BestFirst,
    Cadical,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Strategy::Exhaustive => "exhaustive",
            Strategy::Backtracking => "backtracking",
            Strategy::BestFirst => "best_first",
            Strategy::Cadical => "cadical",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub grid_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    #[serde(default)]
    pub output_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            solver: SolverConfig {
                strategy: Strategy::Backtracking,
                successor: Successor::Extend,
                timeout_ms: 10_000,
                verify_feasible: true,
                prove_safe: false,
                parallel: true,
                threads: None,
            },
            input: InputConfig {
                grid_file: PathBuf::from("input/grids/one_two_one.txt"),
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                output_file: None,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.solver.threads == Some(0) {
            anyhow::bail!("Thread count must be positive");
        }

        if !self.input.grid_file.exists() {
            anyhow::bail!("Grid file does not exist: {}", self.input.grid_file.display());
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(ref grid_file) = cli_overrides.grid_file {
            self.input.grid_file = grid_file.clone();
        }
        if let Some(ref output_file) = cli_overrides.output_file {
            self.output.output_file = Some(output_file.clone());
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
        if let Some(strategy) = cli_overrides.strategy {
            self.solver.strategy = strategy;
        }
        if let Some(successor) = cli_overrides.successor {
            self.solver.successor = successor;
        }
        if let Some(timeout_ms) = cli_overrides.timeout_ms {
            self.solver.timeout_ms = timeout_ms;
        }
        if let Some(threads) = cli_overrides.threads {
            self.solver.threads = Some(threads);
        }
        if cli_overrides.verify_feasible {
            self.solver.verify_feasible = true;
        }
        if cli_overrides.prove_safe {
            self.solver.prove_safe = true;
        }
        if cli_overrides.sequential {
            self.solver.parallel = false;
        }
    }
}

impl SolverConfig {
    /// Per-search deadline, `None` when disabled
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }

    pub fn solve_options(&self) -> SolveOptions {
        SolveOptions {
            strategy: self.strategy,
            successor: self.successor,
            timeout: self.timeout(),
            verify_feasible: self.verify_feasible,
            prove_safe: self.prove_safe,
            parallel: self.parallel,
            threads: self.threads,
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub grid_file: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub strategy: Option<Strategy>,
    pub successor: Option<Successor>,
    pub timeout_ms: Option<u64>,
    pub threads: Option<usize>,
    pub verify_feasible: bool,
    pub prove_safe: bool,
    pub sequential: bool,
}
