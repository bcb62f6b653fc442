//! Viewer configuration: command-line arguments over environment defaults.

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::types::NumeralType;

pub const DEFAULT_STEP_MS: u64 = 400;

pub const USAGE: &str = "\
usage: kanji-2048 <command> [options]

commands:
  play <script>   replay a script in the terminal
  html <script>   apply a script and print the resulting page as HTML

options:
  --step-ms <ms>      replay step interval (env KANJI2048_STEP_MS, default 400)
  --numerals <0|1|2>  initial numerals: 0 digits, 1 daiji, 2 kanji
                      (env KANJI2048_NUMERALS, default 1)

environment:
  KANJI2048_LOG_PATH  write logs to this file (RUST_LOG sets the filter)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play(PathBuf),
    Html(PathBuf),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    pub step_ms: u64,
    pub numerals: NumeralType,
    pub log_path: Option<String>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            step_ms: DEFAULT_STEP_MS,
            numerals: NumeralType::Daiji,
            log_path: None,
        }
    }
}

impl ViewerConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build from a variable lookup. Unparseable values fall back to defaults.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let step_ms = var("KANJI2048_STEP_MS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.step_ms);

        let numerals = var("KANJI2048_NUMERALS")
            .and_then(|s| parse_numerals(&s))
            .unwrap_or(defaults.numerals);

        let log_path = var("KANJI2048_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            step_ms,
            numerals,
            log_path,
        }
    }
}

fn parse_numerals(s: &str) -> Option<NumeralType> {
    match s.trim() {
        "0" => Some(NumeralType::Arabic),
        "1" => Some(NumeralType::Daiji),
        "2" => Some(NumeralType::Kanji),
        _ => None,
    }
}

/// Parse `args` (without the program name), starting from `base`.
pub fn parse_args(args: &[String], base: ViewerConfig) -> Result<(Command, ViewerConfig)> {
    let mut config = base;
    let mut command = None;
    let mut script = None;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => return Ok((Command::Help, config)),
            "--step-ms" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --step-ms"))?;
                config.step_ms = v
                    .parse::<u64>()
                    .map_err(|_| anyhow!("invalid --step-ms value: {}", v))?;
            }
            "--numerals" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --numerals"))?;
                config.numerals =
                    parse_numerals(v).ok_or_else(|| anyhow!("invalid --numerals value: {}", v))?;
            }
            other if other.starts_with("--") => {
                return Err(anyhow!("unknown argument: {}", other));
            }
            other if command.is_none() => command = Some(other.to_string()),
            other if script.is_none() => script = Some(PathBuf::from(other)),
            other => return Err(anyhow!("unexpected argument: {}", other)),
        }
        i += 1;
    }

    let command = match command.as_deref() {
        None | Some("help") => Command::Help,
        Some("play") => Command::Play(script.ok_or_else(|| anyhow!("play: missing script path"))?),
        Some("html") => Command::Html(script.ok_or_else(|| anyhow!("html: missing script path"))?),
        Some(other) => return Err(anyhow!("unknown command: {}", other)),
    };
    Ok((command, config))
}
