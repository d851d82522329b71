use std::error::Error;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::append::rolling_file::policy::compound::{
    CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

const FILE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {t} - {m}{n}";
const CONSOLE_PATTERN: &str = "[{l}] {m}{n}";
const ROLL_SIZE: u64 = 10 * 1024 * 1024;
const DEFAULT_RETENTION: u32 = 7;

/// Where and how much to log.
///
/// Console output always goes to stderr so stdout stays free for reports. When `dir` is set,
/// records are also written to `{dir}/stockdbf.log`, rolled at 10 MiB keeping `retention` files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSettings {
    pub dir: Option<PathBuf>,
    pub level: Option<String>,
    pub retention: Option<u32>,
}

impl LogSettings {
    /// Read `STOCKDBF_LOG_DIR`, `STOCKDBF_LOG_LEVEL` and `STOCKDBF_LOG_RETENTION` through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            dir: lookup("STOCKDBF_LOG_DIR").map(PathBuf::from),
            level: lookup("STOCKDBF_LOG_LEVEL"),
            retention: lookup("STOCKDBF_LOG_RETENTION").and_then(|s| s.trim().parse().ok()),
        }
    }

    #[must_use]
    pub fn level_filter(&self) -> LevelFilter {
        parse_level(self.level.as_deref().unwrap_or("info"))
    }
}

/// error|warn|info|debug|trace|off; anything else means info.
#[must_use]
pub fn parse_level(level: &str) -> LevelFilter {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Build the log4rs configuration for `settings`, creating the log directory if needed.
///
/// # Errors
/// Returns an error if the log directory or the rolling appender cannot be set up.
pub fn build_config(settings: &LogSettings) -> Result<Config, Box<dyn Error>> {
    let console = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(CONSOLE_PATTERN)))
        .build();
    let mut builder = Config::builder().appender(Appender::builder().build("console", Box::new(console)));
    let mut root = Root::builder().appender("console");

    if let Some(dir) = settings.dir.as_deref() {
        builder = builder.appender(Appender::builder().build("file", Box::new(rolling_appender(dir, settings)?)));
        root = root.appender("file");
    }
    Ok(builder.build(root.build(settings.level_filter()))?)
}

fn rolling_appender(dir: &Path, settings: &LogSettings) -> Result<RollingFileAppender, Box<dyn Error>> {
    std::fs::create_dir_all(dir)?;
    let keep = settings.retention.unwrap_or(DEFAULT_RETENTION);
    let roller = FixedWindowRoller::builder().build(&format!("{}", dir.join("stockdbf.{}.log").display()), keep)?;
    let policy = CompoundPolicy::new(Box::new(SizeTrigger::new(ROLL_SIZE)), Box::new(roller));
    Ok(RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(FILE_PATTERN)))
        .build(dir.join("stockdbf.log"), Box::new(policy))?)
}

/// Install the global logger. A second call leaves the first configuration in place.
///
/// # Errors
/// Returns an error if the configuration cannot be built.
pub fn configure_logging(settings: &LogSettings) -> Result<(), Box<dyn Error>> {
    let config = build_config(settings)?;
    if let Err(e) = log4rs::init_config(config) {
        log::debug!("logger already initialized: {e}");
    }
    Ok(())
}

/// [`configure_logging`] with settings taken from the process environment.
///
/// # Errors
/// See [`configure_logging`].
pub fn configure_from_env() -> Result<(), Box<dyn Error>> {
    configure_logging(&LogSettings::from_lookup(|k| std::env::var(k).ok()))
}
