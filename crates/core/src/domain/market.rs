use serde::{Deserialize, Serialize};

/// A market trend reported for an industry; relevance is on a 0-100 scale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketTrend {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub relevance: Option<f64>,
}

impl MarketTrend {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), relevance: None }
    }

    pub fn with_relevance(mut self, relevance: f64) -> Self {
        self.relevance = Some(relevance);
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendSet {
    pub trends: Vec<MarketTrend>,
}

impl TrendSet {
    pub fn new(trends: Vec<MarketTrend>) -> Self {
        Self { trends }
    }

    pub fn is_empty(&self) -> bool {
        self.trends.is_empty()
    }
}
