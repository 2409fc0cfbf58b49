//! Configuration structures for the care history generator
//!
//! Configuration is layered: built-in defaults, then an optional JSON file, then
//! command line flags. Lifecycle probabilities are fixed constants rather than
//! tunables; only counts, ranges, the seed and the horizon are configurable.

use chrono::{DateTime, Utc};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Admission/discharge lifecycle constants
pub mod lifecycle {
    /// Fewest residents admitted right after a home opens
    pub const MIN_INITIAL_RESIDENTS: usize = 1;

    /// Most residents admitted right after a home opens
    pub const MAX_INITIAL_RESIDENTS: usize = 2;

    /// Latest initial admission, in days after opening
    pub const INITIAL_ADMISSION_WINDOW_DAYS: i64 = 30;

    /// Days after opening before the stepped admission loop starts
    pub const FIRST_STEP_OFFSET_DAYS: i64 = 45;

    /// Shortest step of the admission loop
    pub const MIN_STEP_DAYS: i64 = 7;

    /// Longest step of the admission loop
    pub const MAX_STEP_DAYS: i64 = 21;

    /// Chance of admitting someone at a step when a bed is free
    pub const ADMISSION_PROBABILITY: f64 = 0.30;

    /// Shortest pre-decided stay
    pub const MIN_STAY_DAYS: i64 = 60;

    /// Longest pre-decided stay
    pub const MAX_STAY_DAYS: i64 = 700;

    /// Chance that a stepped admission gets a discharge scheduled at admission
    pub const SCHEDULED_DISCHARGE_PROBABILITY: f64 = 0.40;

    /// Per-step discharge chance for long open stays
    pub const HAZARD_DISCHARGE_PROBABILITY: f64 = 0.02;

    /// Open stays must exceed this many days before the hazard applies
    pub const HAZARD_MIN_STAY_DAYS: i64 = 180;
}

/// Opening window for the home at `index` (0-based), in days after horizon start
///
/// The first home opens two weeks in; later homes open in widening windows and
/// homes past the sixth continue at 120-day spacing.
pub fn opening_window(index: usize) -> (i64, i64) {
    const WINDOWS: [(i64, i64); 6] =
        [(14, 14), (90, 120), (180, 240), (300, 360), (420, 480), (540, 600)];
    match WINDOWS.get(index) {
        Some(window) => *window,
        None => {
            let extra = (index - WINDOWS.len() + 1) as i64 * 120;
            (540 + extra, 600 + extra)
        }
    }
}

/// Largest home count whose 1-based sequence fits two base-36 characters
pub const MAX_HOME_COUNT: usize = 36 * 36 - 1;

/// Largest bed count per home
pub const MAX_BEDS_PER_HOME: usize = 36;

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "care-history-simulator",
    version,
    about = "Generates a deterministic synthetic operational history for residential care homes",
    long_about = "Generates a multi-year synthetic history for a multi-site residential care business: homes opening over time, beds filling and emptying, residents admitted and discharged, and correlated daily care logs, activities, incidents, appointments and documents.

EXAMPLES:
    # Run with default settings (seed 42, two years ending now)
    care-history-simulator

    # Reproducible run with a fixed horizon end
    care-history-simulator --seed 7 --anchor 2025-01-01T00:00:00Z

    # Use a configuration file
    care-history-simulator --config config.json

    # Generate configuration template
    care-history-simulator --print-config > my-config.json

    # Validate configuration without running
    care-history-simulator --config my-config.json --dry-run

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)"
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Random seed for reproducible results
    #[arg(long, help = "Random seed for reproducible results")]
    pub seed: Option<u64>,

    /// End of the simulation horizon
    #[arg(
        long,
        help = "Horizon end as an RFC 3339 timestamp",
        long_help = "End of the simulation horizon, e.g. 2025-01-01T00:00:00Z. Defaults to the current time, which makes runs differ from day to day."
    )]
    pub anchor: Option<DateTime<Utc>>,

    /// Horizon length in days
    #[arg(long, help = "Horizon length in days (default 730)")]
    pub horizon_days: Option<i64>,

    /// Number of homes to open
    #[arg(long, help = "Number of homes to open over the horizon")]
    pub homes: Option<usize>,

    /// Minimum beds per home
    #[arg(long, help = "Minimum beds per home")]
    pub min_beds: Option<usize>,

    /// Maximum beds per home
    #[arg(long, help = "Maximum beds per home")]
    pub max_beds: Option<usize>,

    /// Minimum caregivers hired per home
    #[arg(long, help = "Minimum caregivers hired per home")]
    pub min_caregivers: Option<usize>,

    /// Maximum caregivers hired per home
    #[arg(long, help = "Maximum caregivers hired per home")]
    pub max_caregivers: Option<usize>,

    /// Directory that receives the JSON collections
    #[arg(short, long, help = "Output directory for generated collections")]
    pub output_dir: Option<String>,

    /// Days after the horizon end to schedule upcoming appointments (0 disables)
    #[arg(
        long,
        help = "Schedule upcoming appointments this many days past the horizon (0 = off)",
        long_help = "Schedule 0-2 upcoming appointments per active resident within this many days \
                     past the horizon end. 0 (the default) keeps every record inside the horizon; \
                     30 restores the month-ahead appointment book of earlier generated datasets."
    )]
    pub upcoming_appointment_days: Option<u32>,

    /// Skip document rendering
    #[arg(long, help = "Do not render resident documents")]
    pub no_documents: bool,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Log JSON lines on the console
    #[arg(long, help = "Emit console logs as JSON lines")]
    pub log_json: bool,

    /// Directory for the JSON run log
    #[arg(long, help = "Also write a JSON run log with phase timings to this directory")]
    pub log_dir: Option<String>,

    /// Plain console output without ANSI colors
    #[arg(long, help = "Disable colored console output")]
    pub no_color: bool,

    /// Dry run mode - validate configuration without generating
    #[arg(long, help = "Validate configuration without generating data")]
    pub dry_run: bool,

    /// Print effective configuration and exit
    #[arg(long, help = "Print the effective configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Random seed
    pub seed: Option<u64>,
    /// Horizon end
    pub anchor: Option<DateTime<Utc>>,
    /// Horizon length in days
    pub horizon_days: Option<i64>,
    /// Number of homes
    pub home_count: Option<usize>,
    /// Minimum beds per home
    pub min_beds_per_home: Option<usize>,
    /// Maximum beds per home
    pub max_beds_per_home: Option<usize>,
    /// Minimum caregivers per home
    pub min_caregivers_per_home: Option<usize>,
    /// Maximum caregivers per home
    pub max_caregivers_per_home: Option<usize>,
    /// Chance that a later home borrows a caregiver from an early home
    pub cross_home_assignment_probability: Option<f64>,
    /// Upcoming appointment window past the horizon end
    pub upcoming_appointment_days: Option<u32>,
    /// Whether to render resident documents
    pub render_documents: Option<bool>,
    /// Output directory
    pub output_directory: Option<String>,
}

/// Configuration for one generation run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationConfig {
    /// Random seed; the same seed and anchor reproduce the same dataset
    pub seed: u64,
    /// Horizon end; `None` means the wall clock at the start of the run
    pub anchor: Option<DateTime<Utc>>,
    /// Horizon length in days
    pub horizon_days: i64,
    /// Number of homes opened over the horizon
    pub home_count: usize,
    /// Minimum beds per home
    pub min_beds_per_home: usize,
    /// Maximum beds per home
    pub max_beds_per_home: usize,
    /// Minimum caregivers hired per home
    pub min_caregivers_per_home: usize,
    /// Maximum caregivers hired per home
    pub max_caregivers_per_home: usize,
    /// Chance that a home after the third borrows a caregiver from the first three
    pub cross_home_assignment_probability: f64,
    /// Upcoming appointment window past the horizon end; 0 keeps everything in the horizon
    pub upcoming_appointment_days: u32,
    /// Whether to render resident documents
    pub render_documents: bool,
    /// Output directory for the JSON collections
    pub output_directory: String,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for simulation configuration
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigValidationError {
    /// Home count is zero or exceeds the encodable home code
    #[error("Home count must be between 1 and {max}, got {value}")]
    InvalidHomeCount {
        /// Configured value
        value: usize,
        /// Largest allowed value
        max: usize,
    },

    /// Bed range is invalid
    #[error("Invalid bed range: min ({0}) must be >= 1, <= max ({1}) and max <= 36")]
    InvalidBedRange(usize, usize),

    /// Caregiver range is invalid
    #[error("Invalid caregiver range: min ({0}) must be >= 1 and <= max ({1})")]
    InvalidCaregiverRange(usize, usize),

    /// Horizon too short for the configured homes
    #[error("Horizon of {horizon_days} days is too short; the last home needs at least {required_days}")]
    HorizonTooShort {
        /// Configured horizon
        horizon_days: i64,
        /// Smallest horizon that fits every home
        required_days: i64,
    },

    /// Percentage value is out of range
    #[error("Invalid percentage for {field}: {value} (must be between 0.0 and 1.0)")]
    InvalidPercentage {
        /// Name of the field with invalid percentage
        field: String,
        /// The invalid percentage value
        value: f64,
    },

    /// Output directory is empty
    #[error("Output directory must not be empty")]
    EmptyOutputDirectory,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            anchor: None,
            horizon_days: 730,
            home_count: 6,
            min_beds_per_home: 4,
            max_beds_per_home: 6,
            min_caregivers_per_home: 2,
            max_caregivers_per_home: 3,
            cross_home_assignment_probability: 0.5,
            upcoming_appointment_days: 0,
            render_documents: true,
            output_directory: "synthetic-data".to_string(),
        }
    }
}

impl SimulationConfig {
    /// Create a new configuration from command line arguments and optional config file
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::from_cli_args(args)
    }

    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(config_path) => Self::from_file(config_path)?,
            None => Self::default(),
        };

        Self::apply_cli_overrides(&mut config, args);
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let content = fs::read_to_string(path)?;
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            seed: file.seed.unwrap_or(defaults.seed),
            anchor: file.anchor.or(defaults.anchor),
            horizon_days: file.horizon_days.unwrap_or(defaults.horizon_days),
            home_count: file.home_count.unwrap_or(defaults.home_count),
            min_beds_per_home: file.min_beds_per_home.unwrap_or(defaults.min_beds_per_home),
            max_beds_per_home: file.max_beds_per_home.unwrap_or(defaults.max_beds_per_home),
            min_caregivers_per_home: file
                .min_caregivers_per_home
                .unwrap_or(defaults.min_caregivers_per_home),
            max_caregivers_per_home: file
                .max_caregivers_per_home
                .unwrap_or(defaults.max_caregivers_per_home),
            cross_home_assignment_probability: file
                .cross_home_assignment_probability
                .unwrap_or(defaults.cross_home_assignment_probability),
            upcoming_appointment_days: file
                .upcoming_appointment_days
                .unwrap_or(defaults.upcoming_appointment_days),
            render_documents: file.render_documents.unwrap_or(defaults.render_documents),
            output_directory: file.output_directory.unwrap_or(defaults.output_directory),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if let Some(value) = args.seed {
            config.seed = value;
        }
        if let Some(value) = args.anchor {
            config.anchor = Some(value);
        }
        if let Some(value) = args.horizon_days {
            config.horizon_days = value;
        }
        if let Some(value) = args.homes {
            config.home_count = value;
        }
        if let Some(value) = args.min_beds {
            config.min_beds_per_home = value;
        }
        if let Some(value) = args.max_beds {
            config.max_beds_per_home = value;
        }
        if let Some(value) = args.min_caregivers {
            config.min_caregivers_per_home = value;
        }
        if let Some(value) = args.max_caregivers {
            config.max_caregivers_per_home = value;
        }
        if let Some(value) = args.output_dir {
            config.output_directory = value;
        }
        if let Some(value) = args.upcoming_appointment_days {
            config.upcoming_appointment_days = value;
        }
        if args.no_documents {
            config.render_documents = false;
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Horizon end for this run
    pub fn resolve_anchor(&self) -> DateTime<Utc> {
        self.anchor.unwrap_or_else(Utc::now)
    }

    /// Smallest horizon that leaves room for every home to open and start its
    /// admission loop
    pub fn required_horizon_days(&self) -> i64 {
        let last_index = self.home_count.saturating_sub(1);
        opening_window(last_index).1 + lifecycle::FIRST_STEP_OFFSET_DAYS + 1
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.home_count == 0 || self.home_count > MAX_HOME_COUNT {
            return Err(ConfigValidationError::InvalidHomeCount {
                value: self.home_count,
                max: MAX_HOME_COUNT,
            });
        }

        if self.min_beds_per_home == 0
            || self.min_beds_per_home > self.max_beds_per_home
            || self.max_beds_per_home > MAX_BEDS_PER_HOME
        {
            return Err(ConfigValidationError::InvalidBedRange(
                self.min_beds_per_home,
                self.max_beds_per_home,
            ));
        }

        if self.min_caregivers_per_home == 0
            || self.min_caregivers_per_home > self.max_caregivers_per_home
        {
            return Err(ConfigValidationError::InvalidCaregiverRange(
                self.min_caregivers_per_home,
                self.max_caregivers_per_home,
            ));
        }

        let required_days = self.required_horizon_days();
        if self.horizon_days < required_days {
            return Err(ConfigValidationError::HorizonTooShort {
                horizon_days: self.horizon_days,
                required_days,
            });
        }

        self.validate_percentage(
            "cross_home_assignment_probability",
            self.cross_home_assignment_probability,
        )?;

        if self.output_directory.trim().is_empty() {
            return Err(ConfigValidationError::EmptyOutputDirectory);
        }

        Ok(())
    }

    /// Helper method to validate percentage values
    fn validate_percentage(&self, field: &str, value: f64) -> Result<(), ConfigValidationError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigValidationError::InvalidPercentage {
                field: field.to_string(),
                value,
            });
        }
        Ok(())
    }

    /// Bed count range as a tuple
    pub fn beds_per_home(&self) -> (usize, usize) {
        (self.min_beds_per_home, self.max_beds_per_home)
    }

    /// Caregiver count range as a tuple
    pub fn caregivers_per_home(&self) -> (usize, usize) {
        (self.min_caregivers_per_home, self.max_caregivers_per_home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn cli(args: &[&str]) -> CliArgs {
        let mut argv = vec!["care-history-simulator"];
        argv.extend_from_slice(args);
        CliArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.seed, 42);
        assert_eq!(config.horizon_days, 730);
        assert_eq!(config.beds_per_home(), (4, 6));
        assert_eq!(config.caregivers_per_home(), (2, 3));
    }

    #[test]
    fn test_opening_windows() {
        assert_eq!(opening_window(0), (14, 14));
        assert_eq!(opening_window(5), (540, 600));
        assert_eq!(opening_window(6), (660, 720));
        for index in 1..10 {
            assert!(opening_window(index).0 > opening_window(index - 1).0);
        }
    }

    #[test]
    fn test_validation_rejects_bad_ranges() {
        let config = SimulationConfig { min_beds_per_home: 7, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidBedRange(7, 6)));

        let config = SimulationConfig { min_caregivers_per_home: 0, ..Default::default() };
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidCaregiverRange(0, 3)));

        let config = SimulationConfig { home_count: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigValidationError::InvalidHomeCount { .. })));

        let config =
            SimulationConfig { cross_home_assignment_probability: 1.5, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigValidationError::InvalidPercentage { .. })));
    }

    #[test]
    fn test_validation_rejects_short_horizon() {
        let config = SimulationConfig { horizon_days: 365, ..Default::default() };
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::HorizonTooShort { horizon_days: 365, required_days: 646 })
        );

        let config = SimulationConfig { horizon_days: 365, home_count: 2, ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_overrides_defaults() {
        let args = cli(&[
            "--seed",
            "7",
            "--anchor",
            "2025-01-01T00:00:00Z",
            "--homes",
            "3",
            "--no-documents",
            "--output-dir",
            "out",
        ]);
        let config = SimulationConfig::from_cli_args(args).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.home_count, 3);
        assert!(!config.render_documents);
        assert_eq!(config.output_directory, "out");
        assert_eq!(config.anchor.unwrap().to_rfc3339(), "2025-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_config_file_merges_with_defaults() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(file, r#"{{ "seed": 9, "home_count": 2 }}"#).unwrap();

        let config = SimulationConfig::from_file(file.path()).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.home_count, 2);
        assert_eq!(config.horizon_days, 730);
    }

    #[test]
    fn test_cli_beats_config_file() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        writeln!(file, r#"{{ "seed": 9 }}"#).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = SimulationConfig::from_cli_args(cli(&["--config", &path, "--seed", "1"]))
            .unwrap();
        assert_eq!(config.seed, 1);
    }

    #[test]
    fn test_unsupported_and_missing_files() {
        let file = Builder::new().suffix(".toml").tempfile().unwrap();
        assert!(matches!(
            SimulationConfig::from_file(file.path()),
            Err(ConfigError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            SimulationConfig::from_file("/definitely/not/here.json"),
            Err(ConfigError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let file = Builder::new().suffix(".json").tempfile().unwrap();
        let config = SimulationConfig { seed: 1234, home_count: 4, ..Default::default() };
        config.save_to_file(file.path()).unwrap();

        let reloaded = SimulationConfig::from_file(file.path()).unwrap();
        assert_eq!(reloaded, config);
    }
}
