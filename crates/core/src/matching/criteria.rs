//! Criterion scorers. Every function here is pure and returns a score in 0..=100.

use crate::domain::market::TrendSet;
use crate::domain::profile::{
    BrandIdentity, BudgetEnvelope, BusinessCategory, BusinessGoal, BusinessProfile,
    ConstraintPriority, GoalType, IndustrySector, TargetAudience, TechnicalConstraint,
};
use crate::domain::template::Template;

use super::types::CriterionScores;
use super::{DEFAULT_BRAND_FIT, DEFAULT_TEMPLATE_BASE_COST, NEUTRAL_SCORE};

const PREFERRED_CATEGORY_SCORE: u8 = 90;
const OTHER_CATEGORY_SCORE: u8 = 60;
const VERTICAL_MATCH_BONUS: u8 = 10;

const AUDIENCE_MATCH_BONUS: u8 = 10;

const TECHNICAL_BASE_SCORE: i32 = 90;
const MUST_HAVE_PENALTY: i32 = 30;
const SHOULD_HAVE_PENALTY: i32 = 10;

const DEFAULT_TREND_RELEVANCE: f64 = 80.0;

const BRAND_BASE_SCORE: f64 = 70.0;
const PERSONALITY_WEIGHT: f64 = 0.3;
const COLOR_WEIGHT: f64 = 0.2;
const STYLE_WEIGHT: f64 = 0.3;
const NEUTRAL_COLOR_COMPATIBILITY: f64 = 0.8;
const MATCHED_COLOR_COMPATIBILITY: f64 = 1.0;
const CLASHING_COLOR_COMPATIBILITY: f64 = 0.4;

/// Template categories each sector is best served by.
pub fn preferred_categories(sector: IndustrySector) -> &'static [BusinessCategory] {
    use BusinessCategory::*;

    match sector {
        IndustrySector::Technology => &[Saas, Landing, Corporate],
        IndustrySector::Finance => &[Corporate, Saas, Landing],
        IndustrySector::Retail => &[ECommerce, Marketplace, Landing],
        IndustrySector::Healthcare => &[Corporate, Landing, Blog],
        IndustrySector::Education => &[Blog, Community, Corporate],
        IndustrySector::Hospitality => &[Landing, Portfolio, ECommerce],
        IndustrySector::Creative => &[Portfolio, Blog, Landing],
        IndustrySector::RealEstate => &[Marketplace, Corporate, Landing],
        IndustrySector::Nonprofit => &[Community, Blog, Landing],
        IndustrySector::Other => &[Corporate, Landing],
    }
}

/// Support a template gives each goal type.
pub fn goal_support(goal_type: GoalType) -> f64 {
    match goal_type {
        GoalType::Conversion => 90.0,
        GoalType::Engagement => 85.0,
        GoalType::Awareness => 80.0,
        GoalType::Retention => 75.0,
        GoalType::Growth => 85.0,
        GoalType::Education => 70.0,
        GoalType::Support => 65.0,
        GoalType::Other => 70.0,
    }
}

/// Maps an estimated-cost to budget ratio onto a budget-fit score.
pub fn budget_fit_from_ratio(ratio: f64) -> u8 {
    if ratio <= 0.8 {
        100
    } else if ratio <= 1.0 {
        90
    } else if ratio <= 1.2 {
        70
    } else if ratio <= 1.5 {
        50
    } else {
        20
    }
}

fn clamp_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

fn contains_ignore_case(values: &[String], needle: &str) -> bool {
    values.iter().any(|value| value.trim().eq_ignore_ascii_case(needle.trim()))
}

/// Criterion scorer bound to the configured base template cost
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriterionScorer {
    base_cost: f64,
}

impl CriterionScorer {
    pub fn new(base_cost: f64) -> Self {
        Self { base_cost }
    }

    /// Score every criterion for one template.
    pub fn score_all(
        &self,
        template: &Template,
        profile: &BusinessProfile,
        trends: Option<&TrendSet>,
        brand: Option<&BrandIdentity>,
    ) -> CriterionScores {
        CriterionScores {
            industry_fit: self.industry_fit(template, profile),
            audience_fit: self.audience_fit(template, &profile.audience),
            goal_alignment: self.goal_alignment(&profile.goals),
            technical_fit: self.technical_fit(template, &profile.constraints),
            budget_fit: self.budget_fit(template, &profile.budget),
            trend_fit: self.trend_fit(template, trends),
            brand_fit: self.brand_fit(template, brand),
        }
    }

    pub fn industry_fit(&self, template: &Template, profile: &BusinessProfile) -> u8 {
        let mut score = if preferred_categories(profile.sector).contains(&template.category) {
            PREFERRED_CATEGORY_SCORE
        } else {
            OTHER_CATEGORY_SCORE
        };

        let vertical_match = match (&template.vertical, &profile.vertical) {
            (Some(offered), Some(wanted)) => offered == wanted,
            _ => false,
        };
        if vertical_match {
            score = score.saturating_add(VERTICAL_MATCH_BONUS).min(100);
        }

        score
    }

    pub fn audience_fit(&self, template: &Template, audience: &TargetAudience) -> u8 {
        let declared = &template.audience;
        let mut score = NEUTRAL_SCORE;

        if declared
            .age_range
            .map(|range| range.covers_lower_bound_of(&audience.age_range))
            .unwrap_or(false)
        {
            score += AUDIENCE_MATCH_BONUS;
        }
        if declared.digital_savviness == Some(audience.digital_savviness) {
            score += AUDIENCE_MATCH_BONUS;
        }
        if declared.primary_device == Some(audience.primary_device) {
            score += AUDIENCE_MATCH_BONUS;
        }

        score.min(100)
    }

    /// Priority-weighted average of per-goal support.
    pub fn goal_alignment(&self, goals: &[BusinessGoal]) -> u8 {
        let total_priority: u64 = goals.iter().map(|goal| u64::from(goal.priority)).sum();
        if goals.is_empty() || total_priority == 0 {
            return NEUTRAL_SCORE;
        }

        let weighted: f64 = goals
            .iter()
            .map(|goal| goal_support(goal.goal_type) * f64::from(goal.priority))
            .sum();

        clamp_score(weighted / total_priority as f64)
    }

    pub fn technical_fit(&self, template: &Template, constraints: &[TechnicalConstraint]) -> u8 {
        let mut score = TECHNICAL_BASE_SCORE;

        for constraint in constraints {
            if template.capabilities.supports_constraint(&constraint.kind) {
                continue;
            }

            score -= match constraint.priority {
                ConstraintPriority::MustHave => MUST_HAVE_PENALTY,
                ConstraintPriority::ShouldHave => SHOULD_HAVE_PENALTY,
                ConstraintPriority::NiceToHave => 0,
            };
        }

        score.clamp(0, 100) as u8
    }

    pub fn budget_fit(&self, template: &Template, budget: &BudgetEnvelope) -> u8 {
        if budget.total <= 0.0 {
            return budget_fit_from_ratio(f64::INFINITY);
        }

        let ratio = template.estimated_total_cost(self.base_cost) / budget.total;
        budget_fit_from_ratio(ratio)
    }

    /// Mean relevance of the trends the template supports.
    pub fn trend_fit(&self, template: &Template, trends: Option<&TrendSet>) -> u8 {
        let Some(trends) = trends.filter(|set| !set.is_empty()) else {
            return NEUTRAL_SCORE;
        };

        let relevances: Vec<f64> = trends
            .trends
            .iter()
            .filter(|trend| template.capabilities.supports_trend(&trend.id))
            .map(|trend| trend.relevance.unwrap_or(DEFAULT_TREND_RELEVANCE).clamp(0.0, 100.0))
            .collect();

        if relevances.is_empty() {
            return NEUTRAL_SCORE;
        }

        clamp_score(relevances.iter().sum::<f64>() / relevances.len() as f64)
    }

    pub fn brand_fit(&self, template: &Template, brand: Option<&BrandIdentity>) -> u8 {
        let Some(brand) = brand else {
            return DEFAULT_BRAND_FIT;
        };

        let personality_overlap = if brand.personality.is_empty() {
            0.0
        } else {
            let shared = brand
                .personality
                .iter()
                .filter(|trait_name| contains_ignore_case(&template.personality, trait_name))
                .count();
            shared as f64 / brand.personality.len() as f64
        };

        let color_compatibility = match &brand.color_mood {
            Some(mood) if !template.color_schemes.is_empty() => {
                if contains_ignore_case(&template.color_schemes, mood) {
                    MATCHED_COLOR_COMPATIBILITY
                } else {
                    CLASHING_COLOR_COMPATIBILITY
                }
            }
            _ => NEUTRAL_COLOR_COMPATIBILITY,
        };

        let style_match = match (&brand.style, &template.style) {
            (Some(wanted), Some(offered)) if wanted.trim().eq_ignore_ascii_case(offered.trim()) => {
                1.0
            }
            _ => 0.0,
        };

        let score = BRAND_BASE_SCORE
            + personality_overlap * PERSONALITY_WEIGHT * 100.0
            + color_compatibility * COLOR_WEIGHT * 100.0
            + style_match * STYLE_WEIGHT * 100.0;

        clamp_score(score.min(100.0))
    }
}

impl Default for CriterionScorer {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE_BASE_COST)
    }
}
