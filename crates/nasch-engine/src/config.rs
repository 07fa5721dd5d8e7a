//! Simulation configuration: raw input, resolution, and error types.
//!
//! [`RawConfig`] is the untyped key/value record a host hands over
//! (the binary builds one from a JSON object). [`resolve`] validates it
//! and derives the cell and car counts, producing an immutable
//! [`SimConfig`]. [`SimConfig::builder`] offers the same validation for
//! programmatic construction.

use std::error::Error;
use std::fmt;
use std::time::Duration;

use indexmap::IndexMap;
use nasch_core::cell::is_valid_sentinel;
use nasch_core::{CellValue, Velocity};
use nasch_space::Lane;

use crate::history::MAX_HISTORY_CELLS;

// ── Raw input ──────────────────────────────────────────────────────

/// One value of a raw configuration record.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigValue {
    /// Whole number.
    Int(i64),
    /// Whole number above `i64::MAX`.
    UInt(u64),
    /// Real number.
    Float(f64),
    /// Boolean flag.
    Bool(bool),
    /// Free text.
    Text(String),
}

impl ConfigValue {
    fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) | Self::UInt(_) => "integer",
            Self::Float(_) => "number",
            Self::Bool(_) => "boolean",
            Self::Text(_) => "string",
        }
    }
}

impl From<i64> for ConfigValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for ConfigValue {
    fn from(v: u64) -> Self {
        Self::UInt(v)
    }
}

impl From<f64> for ConfigValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for ConfigValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for ConfigValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

/// Ordered key/value configuration record, as read from a file.
pub type RawConfig = IndexMap<String, ConfigValue>;

/// Key of the empty-cell sentinel.
pub const EMPTY_KEY: &str = "empty";
/// Upper-case spelling of [`EMPTY_KEY`], accepted as an alias.
pub const EMPTY_KEY_ALIAS: &str = "EMPTY";

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while resolving a configuration.
///
/// All of them are fatal: no lane is allocated until resolution succeeds.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A required key is absent.
    MissingField {
        /// The missing key.
        key: &'static str,
    },
    /// A key holds a value of the wrong kind.
    WrongType {
        /// The offending key.
        key: &'static str,
        /// What the key must hold.
        expected: &'static str,
        /// What it actually held.
        found: &'static str,
    },
    /// `lane_length` or `cell_length` is not a finite positive number.
    InvalidLength {
        /// The offending key.
        key: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// `lane_length / cell_length` rounds down to zero cells.
    NonPositiveCellCount {
        /// Physical lane length.
        lane_length: f64,
        /// Physical cell length.
        cell_length: f64,
    },
    /// The derived cell count exceeds what a lane can hold.
    TooManyCells {
        /// Derived cell count.
        cells: f64,
        /// Largest supported lane.
        max: usize,
    },
    /// `density` lies outside `[0, 1]`.
    DensityOutOfRange {
        /// The rejected value.
        value: f64,
    },
    /// The resolved car count lies outside `[0, num_cells]`.
    CarCountOutOfRange {
        /// The requested or derived car count.
        cars: i64,
        /// Cells on the lane.
        cells: usize,
    },
    /// `v_max` is negative or not below the cell count.
    VelocityLimitOutOfRange {
        /// The rejected limit.
        v_max: i64,
        /// Cells on the lane.
        cells: usize,
    },
    /// `delay_factor` is not a probability.
    DelayFactorOutOfRange {
        /// The rejected value.
        value: f64,
    },
    /// `history` is below 1.
    HistoryTooSmall {
        /// The rejected depth.
        history: i64,
    },
    /// `history × num_cells` exceeds [`MAX_HISTORY_CELLS`].
    HistoryTooLarge {
        /// The rejected depth.
        history: i64,
        /// Cells on the lane.
        cells: usize,
        /// Largest supported history, in cells.
        max: usize,
    },
    /// `delta_t` is negative, NaN, or too large for a [`Duration`].
    InvalidDeltaT {
        /// The rejected value.
        value: f64,
    },
    /// The empty sentinel does not fit a cell or collides with a velocity.
    SentinelCollision {
        /// The rejected sentinel.
        empty: i64,
        /// The configured velocity limit.
        v_max: Velocity,
    },
    /// `seed` is negative.
    InvalidSeed {
        /// The rejected value.
        value: i64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { key } => write!(f, "missing required key '{key}'"),
            Self::WrongType {
                key,
                expected,
                found,
            } => write!(f, "key '{key}' must be {expected}, got {found}"),
            Self::InvalidLength { key, value } => {
                write!(f, "{key} must be finite and positive, got {value}")
            }
            Self::NonPositiveCellCount {
                lane_length,
                cell_length,
            } => write!(
                f,
                "lane_length {lane_length} / cell_length {cell_length} yields no cells"
            ),
            Self::TooManyCells { cells, max } => {
                write!(f, "{cells} cells exceeds the maximum of {max}")
            }
            Self::DensityOutOfRange { value } => {
                write!(f, "density must lie in [0, 1], got {value}")
            }
            Self::CarCountOutOfRange { cars, cells } => {
                write!(f, "num_cars {cars} outside [0, {cells}]")
            }
            Self::VelocityLimitOutOfRange { v_max, cells } => {
                write!(f, "v_max {v_max} must lie in [0, {cells})")
            }
            Self::DelayFactorOutOfRange { value } => {
                write!(f, "delay_factor must lie in [0, 1], got {value}")
            }
            Self::HistoryTooSmall { history } => {
                write!(f, "history must be at least 1, got {history}")
            }
            Self::HistoryTooLarge {
                history,
                cells,
                max,
            } => write!(
                f,
                "history {history} of {cells}-cell lanes exceeds {max} stored cells"
            ),
            Self::InvalidDeltaT { value } => {
                write!(f, "delta_t must be a finite non-negative duration, got {value}")
            }
            Self::SentinelCollision { empty, v_max } => write!(
                f,
                "empty sentinel {empty} must be a 32-bit value outside [0, {v_max}]"
            ),
            Self::InvalidSeed { value } => write!(f, "seed must be non-negative, got {value}"),
        }
    }
}

impl Error for ConfigError {}

// ── SimConfig ──────────────────────────────────────────────────────

/// Fully resolved, immutable simulation parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    lane_length: f64,
    cell_length: f64,
    density: f64,
    delay_factor: f64,
    history: usize,
    v_max: Velocity,
    delta_t: Duration,
    empty: CellValue,
    num_cells: usize,
    num_cars: usize,
    seed: u64,
}

impl SimConfig {
    /// Start a builder for programmatic construction.
    pub fn builder() -> SimConfigBuilder {
        SimConfigBuilder::default()
    }

    /// Physical lane length.
    pub fn lane_length(&self) -> f64 {
        self.lane_length
    }

    /// Physical length of one cell.
    pub fn cell_length(&self) -> f64 {
        self.cell_length
    }

    /// Configured density (used only when `num_cars` was absent).
    pub fn density(&self) -> f64 {
        self.density
    }

    /// Per-car probability of a random slowdown each tick.
    pub fn delay_factor(&self) -> f64 {
        self.delay_factor
    }

    /// Number of snapshots kept in the history buffer.
    pub fn history(&self) -> usize {
        self.history
    }

    /// Maximum velocity in cells per tick.
    pub fn v_max(&self) -> Velocity {
        self.v_max
    }

    /// Real-time pacing interval between ticks.
    pub fn delta_t(&self) -> Duration {
        self.delta_t
    }

    /// Sentinel marking an empty cell.
    pub fn empty(&self) -> CellValue {
        self.empty
    }

    /// `floor(lane_length / cell_length)`.
    pub fn num_cells(&self) -> usize {
        self.num_cells
    }

    /// Fixed car population.
    pub fn num_cars(&self) -> usize {
        self.num_cars
    }

    /// Seed for every random stream of the simulation.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The same configuration with a different seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

// ── Resolution ─────────────────────────────────────────────────────

/// Validate `raw` and derive the cell and car counts.
///
/// Pure: the record is only read. The first violation found is
/// returned.
pub fn resolve(raw: &RawConfig) -> Result<SimConfig, ConfigError> {
    let lane_length = positive_length(raw, "lane_length")?;
    let cell_length = positive_length(raw, "cell_length")?;
    let density = number(raw, "density")?;
    let delay_factor = number(raw, "delay_factor")?;
    let history = integer(raw, "history")?;
    let v_max = integer(raw, "v_max")?;
    let delta_t = number(raw, "delta_t")?;
    let empty = sentinel(raw)?;

    let cells = (lane_length / cell_length).floor();
    if cells < 1.0 {
        return Err(ConfigError::NonPositiveCellCount {
            lane_length,
            cell_length,
        });
    }
    if cells > Lane::MAX_LEN as f64 {
        return Err(ConfigError::TooManyCells {
            cells,
            max: Lane::MAX_LEN,
        });
    }
    let num_cells = cells as usize;

    if !(0.0..=1.0).contains(&density) {
        return Err(ConfigError::DensityOutOfRange { value: density });
    }
    if !(0.0..=1.0).contains(&delay_factor) {
        return Err(ConfigError::DelayFactorOutOfRange {
            value: delay_factor,
        });
    }
    if history < 1 {
        return Err(ConfigError::HistoryTooSmall { history });
    }
    let history_cells = (history as u64).checked_mul(num_cells as u64);
    if history_cells.is_none_or(|n| n > MAX_HISTORY_CELLS as u64) {
        return Err(ConfigError::HistoryTooLarge {
            history,
            cells: num_cells,
            max: MAX_HISTORY_CELLS,
        });
    }
    if v_max < 0 || v_max as u64 >= num_cells as u64 {
        return Err(ConfigError::VelocityLimitOutOfRange {
            v_max,
            cells: num_cells,
        });
    }
    // v_max < num_cells <= i32::MAX, so the narrowing is lossless.
    let v_max = v_max as Velocity;
    if !delta_t.is_finite() || delta_t < 0.0 {
        return Err(ConfigError::InvalidDeltaT { value: delta_t });
    }
    let delta_t =
        Duration::try_from_secs_f64(delta_t).map_err(|_| ConfigError::InvalidDeltaT {
            value: delta_t,
        })?;
    let empty = CellValue::try_from(empty)
        .ok()
        .filter(|&e| is_valid_sentinel(e, v_max))
        .ok_or(ConfigError::SentinelCollision { empty, v_max })?;

    let cars = match optional_integer(raw, "num_cars")? {
        Some(n) => n,
        None => (num_cells as f64 * density).floor() as i64,
    };
    if cars < 0 || cars as u64 > num_cells as u64 {
        return Err(ConfigError::CarCountOutOfRange {
            cars,
            cells: num_cells,
        });
    }

    let seed = seed(raw)?;

    Ok(SimConfig {
        lane_length,
        cell_length,
        density,
        delay_factor,
        history: history as usize,
        v_max,
        delta_t,
        empty,
        num_cells,
        num_cars: cars as usize,
        seed,
    })
}

fn required<'r>(raw: &'r RawConfig, key: &'static str) -> Result<&'r ConfigValue, ConfigError> {
    raw.get(key).ok_or(ConfigError::MissingField { key })
}

fn number(raw: &RawConfig, key: &'static str) -> Result<f64, ConfigError> {
    match required(raw, key)? {
        ConfigValue::Float(v) => Ok(*v),
        ConfigValue::Int(v) => Ok(*v as f64),
        ConfigValue::UInt(v) => Ok(*v as f64),
        other => Err(ConfigError::WrongType {
            key,
            expected: "a number",
            found: other.kind(),
        }),
    }
}

fn positive_length(raw: &RawConfig, key: &'static str) -> Result<f64, ConfigError> {
    let value = number(raw, key)?;
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::InvalidLength { key, value });
    }
    Ok(value)
}

fn as_integer(key: &'static str, value: &ConfigValue) -> Result<i64, ConfigError> {
    match value {
        ConfigValue::Int(v) => Ok(*v),
        // Anything past i64::MAX is out of range for every count, so
        // saturating lets the range checks report it.
        ConfigValue::UInt(v) => Ok(i64::try_from(*v).unwrap_or(i64::MAX)),
        other => Err(ConfigError::WrongType {
            key,
            expected: "an integer",
            found: other.kind(),
        }),
    }
}

fn integer(raw: &RawConfig, key: &'static str) -> Result<i64, ConfigError> {
    as_integer(key, required(raw, key)?)
}

fn optional_integer(raw: &RawConfig, key: &'static str) -> Result<Option<i64>, ConfigError> {
    raw.get(key).map(|v| as_integer(key, v)).transpose()
}

fn seed(raw: &RawConfig) -> Result<u64, ConfigError> {
    match raw.get("seed") {
        None => Ok(0),
        Some(ConfigValue::UInt(s)) => Ok(*s),
        Some(ConfigValue::Int(s)) => {
            u64::try_from(*s).map_err(|_| ConfigError::InvalidSeed { value: *s })
        }
        Some(other) => Err(ConfigError::WrongType {
            key: "seed",
            expected: "an integer",
            found: other.kind(),
        }),
    }
}

fn sentinel(raw: &RawConfig) -> Result<i64, ConfigError> {
    match raw.get(EMPTY_KEY).or_else(|| raw.get(EMPTY_KEY_ALIAS)) {
        Some(value) => as_integer(EMPTY_KEY, value),
        None => Err(ConfigError::MissingField { key: EMPTY_KEY }),
    }
}

// ── Builder ────────────────────────────────────────────────────────

/// Builder for [`SimConfig`].
///
/// Every setter records a raw value; [`build`](SimConfigBuilder::build)
/// runs them through [`resolve`], so programmatic and file-based
/// configurations are validated identically.
#[derive(Clone, Debug, Default)]
pub struct SimConfigBuilder {
    raw: RawConfig,
}

impl SimConfigBuilder {
    fn set(mut self, key: &str, value: ConfigValue) -> Self {
        self.raw.insert(key.to_string(), value);
        self
    }

    /// Physical lane length.
    pub fn lane_length(self, v: f64) -> Self {
        self.set("lane_length", v.into())
    }

    /// Physical length of one cell.
    pub fn cell_length(self, v: f64) -> Self {
        self.set("cell_length", v.into())
    }

    /// Fraction of cells occupied when no explicit car count is given.
    pub fn density(self, v: f64) -> Self {
        self.set("density", v.into())
    }

    /// Per-car slowdown probability.
    pub fn delay_factor(self, v: f64) -> Self {
        self.set("delay_factor", v.into())
    }

    /// History depth.
    pub fn history(self, v: i64) -> Self {
        self.set("history", v.into())
    }

    /// Maximum velocity.
    pub fn v_max(self, v: i64) -> Self {
        self.set("v_max", v.into())
    }

    /// Pacing interval in seconds.
    pub fn delta_t(self, v: f64) -> Self {
        self.set("delta_t", v.into())
    }

    /// Empty-cell sentinel.
    pub fn empty(self, v: i64) -> Self {
        self.set(EMPTY_KEY, v.into())
    }

    /// Explicit car count, overriding the density.
    pub fn num_cars(self, v: i64) -> Self {
        self.set("num_cars", v.into())
    }

    /// Random seed.
    pub fn seed(self, v: u64) -> Self {
        self.set("seed", v.into())
    }

    /// Resolve the collected values.
    pub fn build(self) -> Result<SimConfig, ConfigError> {
        resolve(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> RawConfig {
        let mut raw = RawConfig::new();
        raw.insert("lane_length".into(), ConfigValue::Int(100));
        raw.insert("cell_length".into(), ConfigValue::Int(10));
        raw.insert("density".into(), ConfigValue::Float(0.5));
        raw.insert("delay_factor".into(), ConfigValue::Float(0.3));
        raw.insert("history".into(), ConfigValue::Int(10));
        raw.insert("v_max".into(), ConfigValue::Int(5));
        raw.insert("delta_t".into(), ConfigValue::Int(1));
        raw.insert("empty".into(), ConfigValue::Int(-2));
        raw
    }

    fn with(key: &str, value: ConfigValue) -> RawConfig {
        let mut raw = base();
        raw.insert(key.to_string(), value);
        raw
    }

    // ── Derivation ─────────────────────────────────────────────────

    #[test]
    fn density_derives_car_count() {
        let cfg = resolve(&base()).unwrap();
        assert_eq!(cfg.num_cells(), 10);
        assert_eq!(cfg.num_cars(), 5);
        assert_eq!(cfg.v_max(), 5);
        assert_eq!(cfg.empty(), -2);
        assert_eq!(cfg.delta_t(), Duration::from_secs(1));
        assert_eq!(cfg.seed(), 0);
    }

    #[test]
    fn explicit_car_count_above_cells_rejected() {
        let err = resolve(&with("num_cars", ConfigValue::Int(12))).unwrap_err();
        assert_eq!(err, ConfigError::CarCountOutOfRange { cars: 12, cells: 10 });
    }

    #[test]
    fn explicit_car_count_overrides_density() {
        let cfg = resolve(&with("num_cars", ConfigValue::Int(10))).unwrap();
        assert_eq!(cfg.num_cars(), 10);
    }

    #[test]
    fn fractional_cells_round_down() {
        let mut raw = with("lane_length", ConfigValue::Int(1000));
        raw.insert("cell_length".into(), ConfigValue::Float(7.5));
        let cfg = resolve(&raw).unwrap();
        assert_eq!(cfg.num_cells(), 133);
        assert_eq!(cfg.num_cars(), 66);
    }

    #[test]
    fn upper_case_sentinel_key_accepted() {
        let mut raw = base();
        raw.shift_remove("empty");
        raw.insert("EMPTY".into(), ConfigValue::Int(-1));
        assert_eq!(resolve(&raw).unwrap().empty(), -1);
    }

    #[test]
    fn sentinel_above_v_max_accepted() {
        let cfg = resolve(&with("empty", ConfigValue::Int(99))).unwrap();
        assert_eq!(cfg.empty(), 99);
    }

    // ── Rejection ──────────────────────────────────────────────────

    #[test]
    fn every_required_key_checked() {
        for key in [
            "lane_length",
            "cell_length",
            "density",
            "delay_factor",
            "history",
            "v_max",
            "delta_t",
            "empty",
        ] {
            let mut raw = base();
            raw.shift_remove(key);
            assert!(
                matches!(resolve(&raw), Err(ConfigError::MissingField { .. })),
                "removing {key} should fail"
            );
        }
    }

    #[test]
    fn wrong_type_rejected() {
        let err = resolve(&with("history", ConfigValue::Float(2.5))).unwrap_err();
        assert_eq!(
            err,
            ConfigError::WrongType {
                key: "history",
                expected: "an integer",
                found: "number",
            }
        );
        assert!(matches!(
            resolve(&with("density", ConfigValue::Text("half".into()))),
            Err(ConfigError::WrongType { key: "density", .. })
        ));
    }

    #[test]
    fn zero_cells_rejected() {
        let err = resolve(&with("cell_length", ConfigValue::Int(200))).unwrap_err();
        assert!(matches!(err, ConfigError::NonPositiveCellCount { .. }));
    }

    #[test]
    fn non_positive_length_rejected() {
        assert!(matches!(
            resolve(&with("lane_length", ConfigValue::Float(-5.0))),
            Err(ConfigError::InvalidLength { key: "lane_length", .. })
        ));
        assert!(matches!(
            resolve(&with("cell_length", ConfigValue::Float(f64::NAN))),
            Err(ConfigError::InvalidLength { key: "cell_length", .. })
        ));
    }

    #[test]
    fn v_max_must_stay_below_cell_count() {
        assert_eq!(
            resolve(&with("v_max", ConfigValue::Int(10))).unwrap_err(),
            ConfigError::VelocityLimitOutOfRange { v_max: 10, cells: 10 }
        );
        assert!(resolve(&with("v_max", ConfigValue::Int(9))).is_ok());
        assert!(resolve(&with("v_max", ConfigValue::Int(-1))).is_err());
    }

    #[test]
    fn delay_factor_must_be_probability() {
        assert!(matches!(
            resolve(&with("delay_factor", ConfigValue::Float(1.5))),
            Err(ConfigError::DelayFactorOutOfRange { .. })
        ));
        assert!(resolve(&with("delay_factor", ConfigValue::Int(1))).is_ok());
    }

    #[test]
    fn history_must_be_positive() {
        assert_eq!(
            resolve(&with("history", ConfigValue::Int(0))).unwrap_err(),
            ConfigError::HistoryTooSmall { history: 0 }
        );
    }

    #[test]
    fn history_bounded_by_stored_cells() {
        assert_eq!(
            resolve(&with("history", ConfigValue::Int(i64::MAX))).unwrap_err(),
            ConfigError::HistoryTooLarge {
                history: i64::MAX,
                cells: 10,
                max: MAX_HISTORY_CELLS,
            }
        );
        let at_limit = (MAX_HISTORY_CELLS / 10) as i64;
        assert!(resolve(&with("history", ConfigValue::Int(at_limit))).is_ok());
        assert!(matches!(
            resolve(&with("history", ConfigValue::Int(at_limit + 1))),
            Err(ConfigError::HistoryTooLarge { .. })
        ));
    }

    #[test]
    fn oversized_unsigned_count_rejected_by_range() {
        assert!(matches!(
            resolve(&with("num_cars", ConfigValue::UInt(u64::MAX))),
            Err(ConfigError::CarCountOutOfRange { cars: i64::MAX, .. })
        ));
        assert!(matches!(
            resolve(&with("history", ConfigValue::UInt(u64::MAX))),
            Err(ConfigError::HistoryTooLarge { .. })
        ));
    }

    #[test]
    fn sentinel_inside_velocity_range_rejected() {
        assert_eq!(
            resolve(&with("empty", ConfigValue::Int(3))).unwrap_err(),
            ConfigError::SentinelCollision { empty: 3, v_max: 5 }
        );
        assert!(resolve(&with("empty", ConfigValue::Int(i64::MIN))).is_err());
    }

    #[test]
    fn negative_delta_t_rejected() {
        assert!(matches!(
            resolve(&with("delta_t", ConfigValue::Float(-0.1))),
            Err(ConfigError::InvalidDeltaT { .. })
        ));
        assert!(resolve(&with("delta_t", ConfigValue::Int(0))).is_ok());
    }

    #[test]
    fn negative_car_count_rejected() {
        assert!(matches!(
            resolve(&with("num_cars", ConfigValue::Int(-1))),
            Err(ConfigError::CarCountOutOfRange { cars: -1, .. })
        ));
    }

    #[test]
    fn density_out_of_range_rejected() {
        assert!(matches!(
            resolve(&with("density", ConfigValue::Float(1.2))),
            Err(ConfigError::DensityOutOfRange { .. })
        ));
    }

    // ── Builder ────────────────────────────────────────────────────

    #[test]
    fn builder_matches_resolve() {
        let built = SimConfig::builder()
            .lane_length(100.0)
            .cell_length(10.0)
            .density(0.5)
            .delay_factor(0.3)
            .history(10)
            .v_max(5)
            .delta_t(1.0)
            .empty(-2)
            .build()
            .unwrap();
        assert_eq!(built, resolve(&base()).unwrap());
    }

    #[test]
    fn builder_validates() {
        let err = SimConfig::builder().lane_length(10.0).build().unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { .. }));
    }

    #[test]
    fn with_seed_replaces_seed() {
        let cfg = resolve(&with("seed", ConfigValue::Int(42))).unwrap();
        assert_eq!(cfg.seed(), 42);
        assert_eq!(cfg.with_seed(7).seed(), 7);
    }

    #[test]
    fn full_u64_seed_range_kept() {
        let cfg = resolve(&with("seed", ConfigValue::UInt(u64::MAX))).unwrap();
        assert_eq!(cfg.seed(), u64::MAX);

        let built = SimConfig::builder()
            .lane_length(100.0)
            .cell_length(10.0)
            .density(0.5)
            .delay_factor(0.3)
            .history(10)
            .v_max(5)
            .delta_t(1.0)
            .empty(-2)
            .seed(u64::MAX - 4)
            .build()
            .unwrap();
        assert_eq!(built.seed(), u64::MAX - 4);
    }

    #[test]
    fn negative_seed_rejected() {
        assert_eq!(
            resolve(&with("seed", ConfigValue::Int(-1))).unwrap_err(),
            ConfigError::InvalidSeed { value: -1 }
        );
        assert!(matches!(
            resolve(&with("seed", ConfigValue::Float(1.0))),
            Err(ConfigError::WrongType { key: "seed", .. })
        ));
    }
}
