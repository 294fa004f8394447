//! Command line arguments and their merge with the config file.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use rrg_chart::ToggleFlags;
use rrg_config::Config;
use rrg_core::Timeframe;
use rrg_data::{load_watchlist, WatchlistEntry};
use rrg_metrics::MetricConfig;

#[derive(Parser, Debug)]
#[command(
    name = "rrg",
    version,
    about = "Relative Rotation Graph of a watchlist against a benchmark"
)]
pub struct Cli {
    /// Symbols to plot, as `SYMBOL` or `SYMBOL,Short Name`.
    #[arg(value_name = "SYMBOL")]
    pub symbols: Vec<String>,

    /// Watchlist file with one `SYMBOL[,Short Name]` per line.
    #[arg(short = 'w', long, value_name = "FILE")]
    pub watchlist: Option<PathBuf>,

    /// Benchmark symbol. Overrides `general.benchmark`.
    #[arg(short = 'b', long, value_name = "SYMBOL")]
    pub benchmark: Option<String>,

    /// Number of points in each tail (at least 2).
    #[arg(short = 't', long = "tail", value_name = "N")]
    pub tail: Option<usize>,

    /// Momentum base date. Overrides `rrg.base_date`.
    #[arg(long = "base-date", value_name = "YYYY-MM-DD")]
    pub base_date: Option<NaiveDate>,

    /// Timeframe the daily data is resampled to (daily, weekly, monthly).
    #[arg(long, value_name = "TF")]
    pub timeframe: Option<Timeframe>,

    /// Directory holding `<symbol>.csv` files.
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Config file. Defaults to `./rrg.toml`, then the user config directory.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the latest coordinates instead of opening a window.
    #[arg(long)]
    pub print: bool,
}

impl Cli {
    /// Load the config named on the command line, or the default one.
    pub fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("cannot load config {}", path.display())),
            None => Config::load_default().context("cannot load config"),
        }
    }

    /// Symbols from the watchlist file followed by those given as arguments.
    pub fn watchlist_entries(&self) -> Result<Vec<WatchlistEntry>> {
        let mut entries = match &self.watchlist {
            Some(path) => load_watchlist(path)
                .with_context(|| format!("cannot read watchlist {}", path.display()))?,
            None => Vec::new(),
        };
        entries.extend(self.symbols.iter().filter_map(|s| WatchlistEntry::parse(s)));
        Ok(entries)
    }
}

/// Everything a run needs, with command line values taking precedence.
#[derive(Debug, Clone)]
pub struct Settings {
    pub benchmark: String,
    pub watchlist: Vec<WatchlistEntry>,
    pub data_dir: PathBuf,
    pub timeframe: Timeframe,
    pub metric: MetricConfig,
    pub tail_curve: bool,
    pub display: ToggleFlags,
    pub hit_radius_px: f32,
}

impl Settings {
    pub fn resolve(cli: &Cli, config: &Config) -> Result<Self> {
        let benchmark = match cli.benchmark.as_ref().or(config.general.benchmark.as_ref()) {
            Some(symbol) if !symbol.trim().is_empty() => symbol.trim().to_string(),
            _ => bail!("no benchmark given, pass -b SYMBOL or set general.benchmark"),
        };

        let watchlist = cli.watchlist_entries()?;
        if watchlist.is_empty() {
            bail!("no symbols to plot, pass SYMBOL arguments or -w FILE");
        }

        let metric = MetricConfig {
            period: config.rrg.period,
            momentum_lookback: config.rrg.momentum_lookback,
            base_date: cli.base_date.or(config.rrg.base_date),
            tail_length: cli.tail.unwrap_or(config.rrg.tail_length),
            momentum_mode: config.rrg.momentum_mode,
        };

        let display = &config.display;
        Ok(Self {
            benchmark,
            watchlist,
            data_dir: cli.data_dir.clone().unwrap_or_else(|| config.general.data_dir.clone()),
            timeframe: cli.timeframe.unwrap_or(config.general.timeframe),
            metric,
            tail_curve: config.rrg.tail_curve,
            display: ToggleFlags::new(
                display.show_tails,
                display.show_annotations,
                display.show_help,
            ),
            hit_radius_px: display.hit_radius_px,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("rrg").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_arguments() {
        let cli = parse(&[
            "infy",
            "tcs,Tata",
            "-b",
            "^NSEI",
            "-t",
            "6",
            "--base-date",
            "2024-01-05",
            "--timeframe",
            "daily",
            "--print",
        ]);

        assert_eq!(cli.symbols, vec!["infy", "tcs,Tata"]);
        assert_eq!(cli.benchmark.as_deref(), Some("^NSEI"));
        assert_eq!(cli.tail, Some(6));
        assert_eq!(cli.base_date, NaiveDate::from_ymd_opt(2024, 1, 5));
        assert_eq!(cli.timeframe, Some(Timeframe::Daily));
        assert!(cli.print);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Cli::try_parse_from(["rrg", "--base-date", "05/01/2024"]).is_err());
        assert!(Cli::try_parse_from(["rrg", "--timeframe", "hourly"]).is_err());
        assert!(Cli::try_parse_from(["rrg", "-t", "many"]).is_err());
    }

    #[test]
    fn test_cli_overrides_config() {
        let mut config = Config::default();
        config.general.benchmark = Some("SPY".to_string());
        config.rrg.tail_length = 8;
        config.display.show_tails = true;

        let cli = parse(&["aapl", "-b", "QQQ", "-t", "3", "--data-dir", "prices"]);
        let settings = Settings::resolve(&cli, &config).unwrap();

        assert_eq!(settings.benchmark, "QQQ");
        assert_eq!(settings.metric.tail_length, 3);
        assert_eq!(settings.data_dir, PathBuf::from("prices"));
        assert_eq!(settings.timeframe, Timeframe::Weekly);
        assert!(settings.display.show_tails);
        assert_eq!(settings.watchlist[0].label, "AAPL");
    }

    #[test]
    fn test_config_supplies_defaults() {
        let mut config = Config::default();
        config.general.benchmark = Some("SPY".to_string());
        config.rrg.base_date = NaiveDate::from_ymd_opt(2024, 3, 1);

        let settings = Settings::resolve(&parse(&["aapl"]), &config).unwrap();

        assert_eq!(settings.benchmark, "SPY");
        assert_eq!(settings.metric.base_date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(settings.metric.period, 14);
        assert_eq!(settings.hit_radius_px, 8.0);
    }

    #[test]
    fn test_missing_benchmark_or_symbols() {
        let config = Config::default();
        assert!(Settings::resolve(&parse(&["aapl"]), &config).is_err());
        assert!(Settings::resolve(&parse(&["-b", "SPY"]), &config).is_err());
    }

    #[test]
    fn test_watchlist_file_then_arguments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("banks.txt");
        std::fs::write(&path, "# banks\nhdfcbank,Hdfc\nicicibank\n").unwrap();

        let path_arg = path.to_string_lossy().into_owned();
        let cli = parse(&["-w", &path_arg, "sbin"]);
        let entries = cli.watchlist_entries().unwrap();

        let symbols: Vec<_> = entries.iter().map(|e| e.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["hdfcbank", "icicibank", "sbin"]);
        assert_eq!(entries[0].label, "HDFC");
    }
}
