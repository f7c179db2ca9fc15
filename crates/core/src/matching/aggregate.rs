//! Weighted aggregation of criterion scores and the dispersion-based confidence.

use serde::{Deserialize, Serialize};

use super::types::{Criterion, CriterionScores};
use super::MIN_CONFIDENCE;

/// Weights for the seven criteria; they sum to 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriterionWeights {
    pub industry: f64,
    pub audience: f64,
    pub goal: f64,
    pub technical: f64,
    pub budget: f64,
    pub trend: f64,
    pub brand: f64,
}

impl CriterionWeights {
    pub fn weight(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::IndustryFit => self.industry,
            Criterion::AudienceFit => self.audience,
            Criterion::GoalAlignment => self.goal,
            Criterion::TechnicalFit => self.technical,
            Criterion::BudgetFit => self.budget,
            Criterion::TrendFit => self.trend,
            Criterion::BrandFit => self.brand,
        }
    }

    pub fn sum(&self) -> f64 {
        Criterion::ALL.iter().map(|criterion| self.weight(*criterion)).sum()
    }

    pub fn is_normalized(&self) -> bool {
        Criterion::ALL.iter().all(|criterion| self.weight(*criterion) >= 0.0)
            && (self.sum() - 1.0).abs() <= 0.001
    }
}

impl Default for CriterionWeights {
    fn default() -> Self {
        super::DEFAULT_WEIGHTS
    }
}

/// round(Σ weight × score), clamped to 0..=100.
pub fn match_score(scores: &CriterionScores, weights: &CriterionWeights) -> u8 {
    let total: f64 = scores
        .entries()
        .iter()
        .map(|(criterion, score)| weights.weight(*criterion) * f64::from(*score))
        .sum();

    total.round().clamp(0.0, 100.0) as u8
}

/// 1 - (population standard deviation / 100), floored at 0.1 and rounded to two decimals.
pub fn confidence(scores: &CriterionScores) -> f64 {
    let values = scores.entries().map(|(_, score)| f64::from(score));
    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    let variance = values.iter().map(|value| (value - mean).powi(2)).sum::<f64>() / count;

    let raw = (1.0 - variance.sqrt() / 100.0).max(MIN_CONFIDENCE);
    (raw * 100.0).round() / 100.0
}
