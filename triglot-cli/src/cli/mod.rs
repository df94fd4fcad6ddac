//! CLI command definitions and handlers

mod build;
mod identify;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use triglot_core::config::ALGORITHM_ENV;
use triglot_core::{Algorithm, Config, ValueMode};

/// Parse a corpus weight (finite, non-negative)
fn parse_weight(s: &str) -> Result<f32, String> {
    let w: f32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if !w.is_finite() || w < 0.0 {
        Err("weight must be a non-negative number".to_string())
    } else {
        Ok(w)
    }
}

/// Parse a line limit (at least 1)
fn parse_line_limit(s: &str) -> Result<u32, String> {
    let n: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("line limit must be at least 1".to_string())
    } else {
        Ok(n)
    }
}

/// triglot - language identification by trigram profiles
#[derive(Parser, Debug)]
#[command(name = "triglot")]
#[command(
    version,
    about = "Identify the language of a text by comparing trigram profiles",
    after_help = "\
Examples:
  triglot identify notes.txt                       Identify a file
  cat notes.txt | triglot identify                 Identify standard input
  triglot identify notes.txt --algorithm jaccard   Use weighted Jaccard
  triglot identify notes.txt --top 5               Show the five best candidates
  triglot build --corpus corpus_gn.txt --code grn --name Guarani"
)]
pub struct Cli {
    /// Config file (default: ./triglot.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Directory of stored language profiles
    #[arg(long, global = true)]
    pub trigrams_dir: Option<PathBuf>,

    /// Language names table
    #[arg(long, global = true)]
    pub names_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Identify the language of a file or of standard input
    Identify {
        /// Text file to identify (reads standard input when omitted)
        path: Option<PathBuf>,

        /// Read standard input even when a path could be given
        #[arg(long, conflicts_with = "path")]
        stdin: bool,

        /// Similarity algorithm: cosine, jaccard, cavnar-trenkle
        #[arg(long, short = 'a')]
        algorithm: Option<Algorithm>,

        /// Values compared by jaccard and cavnar-trenkle: normalized, real
        #[arg(long)]
        values: Option<ValueMode>,

        /// Maximum number of input lines read
        #[arg(long, value_parser = parse_line_limit)]
        line_limit: Option<u32>,

        /// Keep only the N most frequent input trigrams (0 = all)
        #[arg(long)]
        trigram_limit: Option<u32>,

        /// Show the N best candidates instead of a single answer
        #[arg(long)]
        top: Option<usize>,
    },

    /// Build a language profile from a corpus and register the language
    Build {
        /// UTF-8 corpus, one sentence or line of code per line
        #[arg(long)]
        corpus: PathBuf,

        /// Short language code, also the profile file name (e.g. grn, cpp)
        #[arg(long)]
        code: String,

        /// Display name written to the names table (default: the code)
        #[arg(long)]
        name: Option<String>,

        /// Count added per trigram occurrence
        #[arg(long, default_value = "1", value_parser = parse_weight)]
        weight: f32,
    },
}

/// Loads the config file and environment, then applies resource flags.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_deref()).with_context(|| {
        format!(
            "failed to load configuration (check {} and the config file)",
            ALGORITHM_ENV
        )
    })?;

    if let Some(dir) = &cli.trigrams_dir {
        config.resources.trigrams_dir = dir.clone();
    }
    if let Some(file) = &cli.names_file {
        config.resources.names_file = file.clone();
    }
    Ok(config)
}

pub fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Identify {
            path,
            stdin,
            algorithm,
            values,
            line_limit,
            trigram_limit,
            top,
        } => {
            let overrides = identify::Overrides {
                algorithm,
                value_mode: values,
                line_limit,
                trigram_limit,
            };
            let input = match path {
                Some(path) if !stdin => identify::Input::File(path),
                _ => identify::Input::Stdin,
            };
            identify::run(config, overrides, input, top)
        }

        Commands::Build {
            corpus,
            code,
            name,
            weight,
        } => build::run(&config.resources, &corpus, &code, name.as_deref(), weight),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identify_flags() {
        let cli = Cli::try_parse_from([
            "triglot",
            "identify",
            "notes.txt",
            "--algorithm",
            "cavnar-trenkle",
            "--values",
            "real",
            "--top",
            "3",
        ])
        .unwrap();

        match cli.command {
            Commands::Identify {
                path,
                algorithm,
                values,
                top,
                ..
            } => {
                assert_eq!(path, Some(PathBuf::from("notes.txt")));
                assert_eq!(algorithm, Some(Algorithm::CavnarTrenkle));
                assert_eq!(values, Some(ValueMode::Real));
                assert_eq!(top, Some(3));
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn unknown_algorithm_is_rejected() {
        assert!(Cli::try_parse_from(["triglot", "identify", "--algorithm", "levenshtein"]).is_err());
    }

    #[test]
    fn zero_line_limit_is_rejected() {
        assert!(Cli::try_parse_from(["triglot", "identify", "--line-limit", "0"]).is_err());
    }

    #[test]
    fn stdin_conflicts_with_path() {
        assert!(Cli::try_parse_from(["triglot", "identify", "a.txt", "--stdin"]).is_err());
    }

    #[test]
    fn build_flags() {
        let cli = Cli::try_parse_from([
            "triglot",
            "--trigrams-dir",
            "out",
            "build",
            "--corpus",
            "corpus.txt",
            "--code",
            "grn",
            "--weight",
            "2.5",
        ])
        .unwrap();

        assert_eq!(cli.trigrams_dir, Some(PathBuf::from("out")));
        match cli.command {
            Commands::Build {
                code, name, weight, ..
            } => {
                assert_eq!(code, "grn");
                assert_eq!(name, None);
                assert_eq!(weight, 2.5);
            }
            other => panic!("unexpected command {other:?}"),
        }

        assert!(Cli::try_parse_from([
            "triglot", "build", "--corpus", "c.txt", "--code", "x", "--weight", "-1"
        ])
        .is_err());
    }
}
