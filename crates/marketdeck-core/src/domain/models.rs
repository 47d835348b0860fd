use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Period, Symbol, ValidationError};

/// Snapshot of a ticker's current price and fundamentals.
///
/// Immutable once produced: a fresh fetch yields a new `Quote`, never a
/// mutation of a previous one. Fundamentals are optional because the backend
/// omits them on free upstream tiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: Symbol,
    pub company_name: String,
    pub current_price: f64,
    pub change: f64,
    pub change_percent: f64,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub pe_ratio: Option<f64>,
    #[serde(default)]
    pub volume: Option<u64>,
    #[serde(rename = "52_week_high", default)]
    pub week_high_52: Option<f64>,
    #[serde(rename = "52_week_low", default)]
    pub week_low_52: Option<f64>,
    #[serde(default)]
    pub eps: Option<f64>,
    #[serde(default)]
    pub beta: Option<f64>,
    #[serde(default)]
    pub dividend_yield: Option<f64>,
    #[serde(default)]
    pub peg_ratio: Option<f64>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Quote {
    /// Build a quote from the always-present fields; fundamentals start empty.
    pub fn new(
        symbol: Symbol,
        company_name: impl Into<String>,
        current_price: f64,
        change: f64,
        change_percent: f64,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("current_price", current_price)?;
        validate_finite("change", change)?;
        validate_finite("change_percent", change_percent)?;

        Ok(Self {
            symbol,
            company_name: company_name.into(),
            current_price,
            change,
            change_percent,
            market_cap: None,
            pe_ratio: None,
            volume: None,
            week_high_52: None,
            week_low_52: None,
            eps: None,
            beta: None,
            dividend_yield: None,
            peg_ratio: None,
            sector: None,
            industry: None,
            description: None,
        })
    }
}

/// One OHLCV point of a historical series.
///
/// `date` is the calendar label exactly as reported upstream (daily points
/// carry a date, intraday points a date-time).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: Option<u64>,
}

impl PricePoint {
    pub fn new(
        date: impl Into<String>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: Option<u64>,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("open", open)?;
        validate_non_negative("high", high)?;
        validate_non_negative("low", low)?;
        validate_non_negative("close", close)?;

        if high < low {
            return Err(ValidationError::InvalidPointRange);
        }
        if open < low || open > high || close < low || close > high {
            return Err(ValidationError::InvalidPointBounds);
        }

        Ok(Self {
            date: date.into(),
            open,
            high,
            low,
            close,
            volume,
        })
    }
}

/// Ordered price history for one `(symbol, period)` pairing, with the
/// aggregates the dashboard renders alongside the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSeries {
    pub symbol: Symbol,
    pub period: Period,
    #[serde(rename = "data_points")]
    pub points: Vec<PricePoint>,
    pub point_count: usize,
    pub period_high: f64,
    pub period_low: f64,
}

impl HistoricalSeries {
    /// Build a series and derive the aggregates from the points themselves.
    /// Deserialized responses keep the backend's aggregates instead.
    pub fn from_points(symbol: Symbol, period: Period, points: Vec<PricePoint>) -> Self {
        let point_count = points.len();
        let period_high = points.iter().map(|p| p.high).fold(0.0_f64, f64::max);
        let period_low = points
            .iter()
            .map(|p| p.low)
            .fold(f64::INFINITY, f64::min)
            .min(period_high);

        Self {
            symbol,
            period,
            points,
            point_count,
            period_high,
            period_low,
        }
    }
}

/// Price level of one market index as reported by the overview endpoint,
/// which keys these by index code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexLevels {
    pub name: String,
    pub value: f64,
    pub change: f64,
    pub change_percent: f64,
}

/// One market index entry after shaping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    pub code: String,
    pub name: String,
    pub value: f64,
    pub change: f64,
    pub change_percent: f64,
}

/// Market-wide index snapshot list, ordered by index code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketOverview {
    pub indices: Vec<IndexSnapshot>,
}

impl MarketOverview {
    /// Shape the backend's code-keyed map into a deterministic ordered list.
    pub fn from_code_map(map: BTreeMap<String, IndexLevels>) -> Self {
        let indices = map
            .into_iter()
            .map(|(code, levels)| IndexSnapshot {
                code,
                name: levels.name,
                value: levels.value,
                change: levels.change,
                change_percent: levels.change_percent,
            })
            .collect();

        Self { indices }
    }
}

fn validate_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    Ok(())
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    validate_finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}
