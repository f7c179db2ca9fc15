//! Template evaluation: criterion scoring, aggregation, explanation and projections
//! for a single (template, profile) pair.

use crate::config::ScoringConfig;
use crate::domain::market::TrendSet;
use crate::domain::profile::{BrandIdentity, BusinessProfile};
use crate::domain::template::Template;
use crate::errors::DomainError;

use super::aggregate::{confidence, match_score, CriterionWeights};
use super::criteria::CriterionScorer;
use super::explain::explain;
use super::projection::Projector;
use super::types::Recommendation;

/// Stateless evaluator producing one recommendation per template
#[derive(Debug, Clone)]
pub struct TemplateMatcher {
    weights: CriterionWeights,
    scorer: CriterionScorer,
    projector: Projector,
}

impl TemplateMatcher {
    /// Create a matcher with default weights and base cost
    pub fn new() -> Self {
        Self {
            weights: CriterionWeights::default(),
            scorer: CriterionScorer::default(),
            projector: Projector::default(),
        }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self {
            weights: config.weights,
            scorer: CriterionScorer::new(config.template_base_cost),
            projector: Projector::new(config.template_base_cost),
        }
    }

    /// Evaluate a template against the profile.
    ///
    /// Fails only when the template itself is malformed.
    pub fn evaluate(
        &self,
        template: &Template,
        profile: &BusinessProfile,
        trends: Option<&TrendSet>,
        brand: Option<&BrandIdentity>,
    ) -> Result<Recommendation, DomainError> {
        template.validate()?;

        let criterion_scores = self.scorer.score_all(template, profile, trends, brand);

        Ok(Recommendation {
            template_id: template.id.clone(),
            template_name: template.name.clone(),
            category: template.category,
            complexity: template.complexity,
            match_score: match_score(&criterion_scores, &self.weights),
            confidence: confidence(&criterion_scores),
            criterion_scores,
            reasoning: explain(&criterion_scores),
            business_alignment: self.projector.business_alignment(template, profile),
            implementation: self.projector.implementation_plan(template, profile),
            investment: self.projector.investment(template, profile),
            customization: None,
            performance: None,
            alternatives: Vec::new(),
            is_fallback: false,
        })
    }
}

impl Default for TemplateMatcher {
    fn default() -> Self {
        Self::new()
    }
}
