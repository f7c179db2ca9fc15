//! Template Matching & Scoring Engine
//!
//! Scores catalog templates against a business profile across seven criteria,
//! aggregates them into a match score with a dispersion-based confidence, and
//! projects business, implementation and investment figures for each candidate.

mod aggregate;
mod criteria;
mod engine;
mod explain;
mod fallback;
mod pipeline;
mod projection;
mod types;

pub use aggregate::{confidence, match_score, CriterionWeights};
pub use criteria::CriterionScorer;
pub use engine::TemplateMatcher;
pub use explain::{explain, humanize_criterion};
pub use fallback::fallback_recommendations;
pub use pipeline::{PipelineCollaborators, RecommendationPipeline};
pub use projection::Projector;
pub use types::*;

/// Weight of the industry-fit criterion in the match score.
pub const INDUSTRY_WEIGHT: f64 = 0.20;
/// Weight of the audience-fit criterion in the match score.
pub const AUDIENCE_WEIGHT: f64 = 0.20;
/// Weight of the goal-alignment criterion in the match score.
pub const GOAL_WEIGHT: f64 = 0.15;
/// Weight of the technical-constraint criterion in the match score.
pub const TECHNICAL_WEIGHT: f64 = 0.15;
/// Weight of the budget-fit criterion in the match score.
pub const BUDGET_WEIGHT: f64 = 0.10;
/// Weight of the market-trend criterion in the match score.
pub const TREND_WEIGHT: f64 = 0.10;
/// Weight of the brand-fit criterion in the match score.
pub const BRAND_WEIGHT: f64 = 0.10;

/// Default criterion weights
pub const DEFAULT_WEIGHTS: CriterionWeights = CriterionWeights {
    industry: INDUSTRY_WEIGHT,
    audience: AUDIENCE_WEIGHT,
    goal: GOAL_WEIGHT,
    technical: TECHNICAL_WEIGHT,
    budget: BUDGET_WEIGHT,
    trend: TREND_WEIGHT,
    brand: BRAND_WEIGHT,
};

/// Base template cost before the complexity-tier multiplier.
pub const DEFAULT_TEMPLATE_BASE_COST: f64 = 5_000.0;

/// Maximum recommendations to return
pub const DEFAULT_MAX_RECOMMENDATIONS: usize = 5;

/// Upper bound on recommendations per request
pub const MAX_RECOMMENDATIONS_LIMIT: usize = 50;

/// Maximum same-category alternatives listed per recommendation
pub const DEFAULT_MAX_ALTERNATIVES: usize = 3;

/// Lowest confidence the aggregator reports.
pub const MIN_CONFIDENCE: f64 = 0.1;

/// Score returned by criteria that lack the data to judge a template.
pub const NEUTRAL_SCORE: u8 = 70;

/// Brand fit assumed when no brand identity is supplied.
pub const DEFAULT_BRAND_FIT: u8 = 80;
