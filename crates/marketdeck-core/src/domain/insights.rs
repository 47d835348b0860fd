//! AI-generated news sentiment payloads.
//!
//! These types mirror the backend's insight responses; the client shapes and
//! displays them without re-scoring anything.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Symbol, UtcDateTime, ValidationError};

/// Coarse sentiment classification. No other value is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Bullish,
    Bearish,
    Neutral,
}

impl Sentiment {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bullish => "bullish",
            Self::Bearish => "bearish",
            Self::Neutral => "neutral",
        }
    }
}

impl Display for Sentiment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bullish" => Ok(Self::Bullish),
            "bearish" => Ok(Self::Bearish),
            "neutral" => Ok(Self::Neutral),
            other => Err(ValidationError::InvalidSentiment {
                value: other.to_owned(),
            }),
        }
    }
}

/// Expected market impact of a scheduled event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactTier {
    High,
    Medium,
    Low,
}

impl FromStr for ImpactTier {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(ValidationError::InvalidImpact {
                value: other.to_owned(),
            }),
        }
    }
}

/// A source article backing an insight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
    pub published_at: UtcDateTime,
    pub source: String,
}

/// Per-symbol news sentiment insight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsInsight {
    pub symbol: Symbol,
    pub sentiment: Sentiment,
    pub sentiment_score: f64,
    pub summary: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub articles: Vec<NewsArticle>,
    pub article_count: usize,
    pub last_updated: UtcDateTime,
}

/// A stock the market-wide analysis flags as trending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingStock {
    pub symbol: Symbol,
    pub sentiment: Sentiment,
    pub rationale: String,
}

/// An upcoming scheduled event (earnings, macro releases) with impact tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub title: String,
    pub date: String,
    pub impact: ImpactTier,
}

/// Market-wide news sentiment insight over a look-back window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketInsight {
    pub sentiment: Sentiment,
    pub sentiment_score: f64,
    pub summary: String,
    #[serde(default)]
    pub key_themes: Vec<String>,
    #[serde(default)]
    pub articles: Vec<NewsArticle>,
    pub article_count: usize,
    pub last_updated: UtcDateTime,
    pub days_back: u32,
    #[serde(default)]
    pub trending_stocks: Vec<TrendingStock>,
    #[serde(default)]
    pub upcoming_events: Vec<ScheduledEvent>,
}
