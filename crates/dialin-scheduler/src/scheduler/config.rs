use std::{path::PathBuf, time::Duration};

use anyhow::bail;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use dialin::{
    DEFAULT_BATCH_SIZE, DEFAULT_MAX_ATTEMPTS, DEFAULT_MIN_DAYS_AHEAD, SupplyConfig, SynthConfig,
    parse_date,
};

const SECONDS_PER_HOUR: u64 = 60 * 60;

/// Command line and environment settings for `dialin-scheduler`.
///
/// Every option can also be set through the environment variable named in
/// its help text. A `.env` file in the working directory is read first.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "dialin-scheduler",
    version,
    about = "Keeps the Dialin phrase ledger stocked with future-dated phrases"
)]
pub struct CliArgs {
    /// Path to the phrase ledger. Created on first write if missing.
    ///
    /// Environment variable: `DIALIN_LEDGER`
    #[arg(long, env = "DIALIN_LEDGER", default_value = "words.txt", global = true)]
    pub ledger: PathBuf,

    /// Generate a batch when fewer than this many future phrases remain.
    ///
    /// Environment variable: `MIN_DAYS_AHEAD`
    #[arg(long = "min-days", env = "MIN_DAYS_AHEAD", default_value_t = DEFAULT_MIN_DAYS_AHEAD, global = true)]
    pub min_days_ahead: usize,

    /// Phrases generated per top-up.
    ///
    /// Environment variable: `BATCH_SIZE`
    #[arg(long, env = "BATCH_SIZE", default_value_t = DEFAULT_BATCH_SIZE, global = true)]
    pub batch_size: usize,

    /// Synthesis attempts per phrase before giving up on it.
    ///
    /// Environment variable: `MAX_ATTEMPTS`
    #[arg(long, env = "MAX_ATTEMPTS", default_value_t = DEFAULT_MAX_ATTEMPTS, global = true)]
    pub max_attempts: usize,

    /// Hours between checks in `run` mode.
    ///
    /// Environment variable: `CHECK_INTERVAL_HOURS`
    #[arg(long, env = "CHECK_INTERVAL_HOURS", default_value_t = 24, global = true)]
    pub interval_hours: u64,

    /// Lexicon file to use instead of the embedded one.
    ///
    /// Environment variable: `DIALIN_LEXICON`
    #[arg(long, env = "DIALIN_LEXICON", global = true)]
    pub lexicon: Option<PathBuf>,

    /// Seed for reproducible generation. Unseeded runs use the thread RNG.
    ///
    /// Environment variable: `DIALIN_SEED`
    #[arg(long, env = "DIALIN_SEED", global = true)]
    pub seed: Option<u64>,

    /// Date to continue from when the ledger is empty (YYYY-MM-DD).
    ///
    /// Environment variable: `DIALIN_EPOCH`
    #[arg(long, env = "DIALIN_EPOCH", value_parser = parse_date_arg, global = true)]
    pub epoch: Option<NaiveDate>,

    /// Treat this date as today (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date_arg, global = true)]
    pub today: Option<NaiveDate>,

    /// Print command results as JSON.
    #[arg(long, default_value_t = false, global = true)]
    pub json: bool,

    /// Log line format on stderr.
    ///
    /// Environment variable: `LOG_FORMAT`
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Check now, then every --interval-hours until Ctrl+C or SIGTERM.
    Run,
    /// Run a single supply check and exit.
    Check,
    /// Append COUNT phrases regardless of current supply.
    Generate { count: usize },
    /// Validate and append an operator-chosen phrase.
    Submit {
        phrase: String,
        /// Schedule for this date instead of the next free one.
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },
    /// Print the phrase scheduled for a date (default today).
    Today {
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },
    /// Report invalid, repeated and malformed ledger lines.
    Audit,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub ledger: PathBuf,
    pub lexicon: Option<PathBuf>,
    pub seed: Option<u64>,
    pub today: Option<NaiveDate>,
    pub json: bool,
    pub log_format: LogFormat,
    pub interval: Duration,
    pub supply: SupplyConfig,
    pub command: Command,
}

impl TryFrom<CliArgs> for SchedulerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.batch_size == 0 {
            bail!("BATCH_SIZE must be greater than 0");
        }

        if args.max_attempts == 0 {
            bail!("MAX_ATTEMPTS must be greater than 0");
        }

        if args.interval_hours == 0 {
            bail!("CHECK_INTERVAL_HOURS must be greater than 0");
        }

        let interval = args
            .interval_hours
            .checked_mul(SECONDS_PER_HOUR)
            .map(Duration::from_secs)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "CHECK_INTERVAL_HOURS ({}) is too large",
                    args.interval_hours
                )
            })?;

        if let Some(Command::Generate { count: 0 }) = args.command {
            bail!("generate needs a count greater than 0");
        }

        let supply = SupplyConfig::default()
            .with_min_days_ahead(args.min_days_ahead)
            .with_batch_size(args.batch_size)
            .with_synth(SynthConfig::default().with_max_attempts(args.max_attempts))
            .with_epoch(args.epoch);

        Ok(Self {
            ledger: args.ledger,
            lexicon: args.lexicon,
            seed: args.seed,
            today: args.today,
            json: args.json,
            log_format: args.log_format,
            interval,
            supply,
            command: args.command.unwrap_or(Command::Run),
        })
    }
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).ok_or_else(|| format!("expected a date as YYYY-MM-DD, got {value:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<SchedulerConfig> {
        let args = CliArgs::try_parse_from(
            ["dialin-scheduler"].into_iter().chain(args.iter().copied()),
        )?;
        SchedulerConfig::try_from(args)
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn defaults_to_run() {
        let config = parse(&["--ledger", "ledger.txt"]).unwrap();
        assert_eq!(config.command, Command::Run);
        assert_eq!(config.ledger, PathBuf::from("ledger.txt"));
        assert_eq!(config.interval, Duration::from_secs(24 * 60 * 60));
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn maps_supply_settings() {
        let config = parse(&[
            "--ledger",
            "words.txt",
            "--min-days",
            "3",
            "--batch-size",
            "10",
            "--max-attempts",
            "50",
            "--epoch",
            "2025-07-31",
            "check",
        ])
        .unwrap();
        assert_eq!(config.command, Command::Check);
        assert_eq!(config.supply.min_days_ahead, 3);
        assert_eq!(config.supply.batch_size, 10);
        assert_eq!(config.supply.synth.max_attempts, 50);
        assert_eq!(config.supply.epoch, Some(day(2025, 7, 31)));
    }

    #[test]
    fn parses_subcommands() {
        let config = parse(&["--ledger", "w.txt", "generate", "5"]).unwrap();
        assert_eq!(config.command, Command::Generate { count: 5 });

        let config = parse(&[
            "--ledger",
            "w.txt",
            "submit",
            "i love you",
            "--date",
            "2025-08-02",
        ])
        .unwrap();
        assert_eq!(
            config.command,
            Command::Submit {
                phrase: "i love you".to_owned(),
                date: Some(day(2025, 8, 2)),
            }
        );

        let config = parse(&["--ledger", "w.txt", "today", "--json"]).unwrap();
        assert_eq!(config.command, Command::Today { date: None });
        assert!(config.json);
    }

    #[test]
    fn rejects_zero_values() {
        assert!(parse(&["--ledger", "w.txt", "--batch-size", "0"]).is_err());
        assert!(parse(&["--ledger", "w.txt", "--max-attempts", "0"]).is_err());
        assert!(parse(&["--ledger", "w.txt", "--interval-hours", "0"]).is_err());
        assert!(parse(&["--ledger", "w.txt", "generate", "0"]).is_err());
    }

    #[test]
    fn rejects_overflowing_interval() {
        let hours = u64::MAX.to_string();
        assert!(parse(&["--ledger", "w.txt", "--interval-hours", &hours]).is_err());
    }

    #[test]
    fn rejects_bad_dates() {
        assert!(parse(&["--ledger", "w.txt", "--today", "31/07/2025"]).is_err());
        assert!(parse(&["--ledger", "w.txt", "--epoch", "2025-02-30"]).is_err());
    }
}
