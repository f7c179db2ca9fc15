//! Synthetic recommendations returned when the pipeline cannot produce real ones.

use crate::domain::customization::CustomizationBundle;
use crate::domain::profile::BusinessCategory;
use crate::domain::template::{ComplexityTier, TemplateId};

use super::projection::payback_period;
use super::types::{
    BusinessAlignment, CostBreakdown, CriterionScores, ImplementationPlan, InvestmentProjection,
    Recommendation,
};
use super::{DEFAULT_TEMPLATE_BASE_COST, NEUTRAL_SCORE};

const FALLBACK_CONFIDENCE: f64 = 0.5;
const FALLBACK_ROI: f64 = 168.0;

fn fallback_recommendation(slot: usize) -> Recommendation {
    let tier = ComplexityTier::Simple;
    let total = DEFAULT_TEMPLATE_BASE_COST * tier.cost_multiplier();
    let design = total * 0.30;
    let development = total * 0.60 * tier.development_multiplier();

    Recommendation {
        template_id: TemplateId::new(format!("fallback-{slot}")),
        template_name: format!("Starter Template {slot}"),
        category: BusinessCategory::Landing,
        complexity: tier,
        match_score: NEUTRAL_SCORE,
        confidence: FALLBACK_CONFIDENCE,
        criterion_scores: CriterionScores {
            industry_fit: NEUTRAL_SCORE,
            audience_fit: NEUTRAL_SCORE,
            goal_alignment: NEUTRAL_SCORE,
            technical_fit: NEUTRAL_SCORE,
            budget_fit: NEUTRAL_SCORE,
            trend_fit: NEUTRAL_SCORE,
            brand_fit: NEUTRAL_SCORE,
        },
        reasoning: vec![
            "General-purpose starter template offered while personalized matching is unavailable"
                .to_string(),
        ],
        business_alignment: BusinessAlignment {
            conversion_potential: NEUTRAL_SCORE,
            scalability: tier.scalability_score(),
            maintenance_complexity: tier.maintenance_complexity(),
        },
        implementation: ImplementationPlan {
            estimated_hours: tier.base_hours(),
            timeline_weeks: 1,
            risks: Vec::new(),
        },
        investment: InvestmentProjection {
            estimated_total_cost: total,
            cost_breakdown: CostBreakdown {
                design,
                development,
                maintenance_per_year: total * 0.15,
                total_initial: design + development,
            },
            roi_estimate: FALLBACK_ROI,
            payback_period: payback_period(FALLBACK_ROI),
        },
        customization: Some(CustomizationBundle::default_bundle()),
        performance: None,
        alternatives: Vec::new(),
        is_fallback: true,
    }
}

/// Exactly `count` synthetic recommendations, numbered from 1.
pub fn fallback_recommendations(count: usize) -> Vec<Recommendation> {
    (1..=count).map(fallback_recommendation).collect()
}
