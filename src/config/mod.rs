pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, CountdownArgs, DatesArgs, FileInfoArgs, PostsArgs, SunriseArgs};

#[cfg(feature = "cli")]
mod cli {
    use super::toml_config::AppConfig;
    use crate::core::dates::TimeUnit;
    use crate::domain::model::Coordinates;
    use crate::utils::error::Result;
    use crate::utils::validation::Validate;
    use clap::{Args, Parser, Subcommand};
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "async-drills")]
    #[command(about = "Async programming drills: concurrent lookups, HTTP demos, dates, files and a countdown")]
    pub struct CliConfig {
        #[arg(long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, global = true, help = "Emit logs as JSON")]
        pub json_logs: bool,

        /// Path to an optional TOML configuration file
        #[arg(long, global = true)]
        pub config: Option<PathBuf>,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Compare sunrise times of two places, fetched concurrently
        Sunrise(SunriseArgs),
        /// Fetch posts and users from JSONPlaceholder and print statistics
        Posts(PostsArgs),
        /// Show date arithmetic, formatting and relative descriptions
        Dates(DatesArgs),
        /// Print filesystem metadata for a path
        FileInfo(FileInfoArgs),
        /// Count down to the next January 1st
        Countdown(CountdownArgs),
    }

    #[derive(Debug, Clone, Args)]
    pub struct SunriseArgs {
        /// First place as LAT,LNG
        #[arg(long, allow_hyphen_values = true)]
        pub city_a: Option<Coordinates>,

        /// Second place as LAT,LNG
        #[arg(long, allow_hyphen_values = true)]
        pub city_b: Option<Coordinates>,

        /// Date to look up (YYYY-MM-DD), defaults to today
        #[arg(long)]
        pub date: Option<String>,
    }

    #[derive(Debug, Clone, Args)]
    pub struct PostsArgs {
        #[arg(long, default_value = "1")]
        pub post_id: u64,

        /// Only list posts of this user
        #[arg(long)]
        pub user_id: Option<u64>,

        /// A post id expected to be missing (404)
        #[arg(long, default_value = "9999")]
        pub missing_post_id: u64,

        /// Also create a post with POST /posts
        #[arg(long)]
        pub create: bool,
    }

    #[derive(Debug, Clone, Args)]
    pub struct DatesArgs {
        /// Base timestamp (RFC 3339), defaults to now
        #[arg(long)]
        pub base: Option<String>,

        #[arg(long, default_value = "3", allow_hyphen_values = true)]
        pub amount: i64,

        #[arg(long, default_value = "days")]
        pub unit: TimeUnit,

        #[arg(long, default_value = "%Y-%m-%d %H:%M:%S")]
        pub pattern: String,

        /// Second timestamp (RFC 3339) to diff and compare against the base
        #[arg(long)]
        pub compare: Option<String>,
    }

    #[derive(Debug, Clone, Args)]
    pub struct FileInfoArgs {
        pub path: PathBuf,
    }

    #[derive(Debug, Clone, Args)]
    pub struct CountdownArgs {
        /// Stop after this many ticks
        #[arg(long)]
        pub ticks: Option<u64>,

        #[arg(long)]
        pub interval_ms: Option<u64>,
    }

    impl CliConfig {
        /// 載入設定檔 (若有指定)，套用命令列覆蓋後驗證
        pub fn app_config(&self) -> Result<AppConfig> {
            let mut config = match &self.config {
                Some(path) => {
                    tracing::info!("📁 Loading configuration from: {}", path.display());
                    AppConfig::from_file(path)?
                }
                None => AppConfig::default(),
            };

            match &self.command {
                Command::Sunrise(args) => {
                    if let Some(city) = args.city_a {
                        config.sunrise.city_a = format!("{},{}", city.latitude(), city.longitude());
                    }
                    if let Some(city) = args.city_b {
                        config.sunrise.city_b = format!("{},{}", city.latitude(), city.longitude());
                    }
                }
                Command::Countdown(args) => {
                    if let Some(interval_ms) = args.interval_ms {
                        config.countdown.interval_ms = interval_ms;
                    }
                    if args.ticks.is_some() {
                        config.countdown.ticks = args.ticks;
                    }
                }
                _ => {}
            }

            config.validate()?;
            Ok(config)
        }
    }

}
