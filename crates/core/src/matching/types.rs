//! Types for the Template Matching Engine

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::customization::CustomizationBundle;
use crate::domain::profile::{BrandIdentity, BusinessCategory, BusinessProfile};
use crate::domain::template::{ComplexityTier, TemplateId};

/// Request for template recommendations
#[derive(Debug, Clone)]
pub struct RecommendationRequest {
    /// Business the templates are evaluated against
    pub profile: BusinessProfile,
    /// Maximum number of recommendations; falls back to the pipeline default
    pub max_recommendations: Option<usize>,
    /// Optional brand identity for brand fit and customization
    pub brand: Option<BrandIdentity>,
    /// Market identifier passed to the trend service
    pub market: Option<String>,
    /// Identifier threaded through every log line of the request
    pub correlation_id: String,
}

impl RecommendationRequest {
    /// Create a new recommendation request
    pub fn new(profile: BusinessProfile) -> Self {
        Self {
            profile,
            max_recommendations: None,
            brand: None,
            market: None,
            correlation_id: "unassigned".to_owned(),
        }
    }

    /// Set max recommendations
    pub fn with_max_recommendations(mut self, max: usize) -> Self {
        self.max_recommendations = Some(max);
        self
    }

    /// Attach a brand identity
    pub fn with_brand(mut self, brand: BrandIdentity) -> Self {
        self.brand = Some(brand);
        self
    }

    /// Set the market used for trend lookup
    pub fn with_market(mut self, market: impl Into<String>) -> Self {
        self.market = Some(market.into());
        self
    }

    /// Set the correlation id
    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = correlation_id.into();
        self
    }
}

/// The seven evaluation criteria, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Criterion {
    IndustryFit,
    AudienceFit,
    GoalAlignment,
    TechnicalFit,
    BudgetFit,
    TrendFit,
    BrandFit,
}

impl Criterion {
    pub const ALL: [Criterion; 7] = [
        Criterion::IndustryFit,
        Criterion::AudienceFit,
        Criterion::GoalAlignment,
        Criterion::TechnicalFit,
        Criterion::BudgetFit,
        Criterion::TrendFit,
        Criterion::BrandFit,
    ];

    /// Camel-case key used in reports and serialized output
    pub fn key(&self) -> &'static str {
        match self {
            Criterion::IndustryFit => "industryFit",
            Criterion::AudienceFit => "audienceFit",
            Criterion::GoalAlignment => "goalAlignment",
            Criterion::TechnicalFit => "technicalFit",
            Criterion::BudgetFit => "budgetFit",
            Criterion::TrendFit => "trendFit",
            Criterion::BrandFit => "brandFit",
        }
    }
}

/// Individual criterion scores, each in 0..=100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionScores {
    pub industry_fit: u8,
    pub audience_fit: u8,
    pub goal_alignment: u8,
    pub technical_fit: u8,
    pub budget_fit: u8,
    pub trend_fit: u8,
    pub brand_fit: u8,
}

impl CriterionScores {
    pub fn get(&self, criterion: Criterion) -> u8 {
        match criterion {
            Criterion::IndustryFit => self.industry_fit,
            Criterion::AudienceFit => self.audience_fit,
            Criterion::GoalAlignment => self.goal_alignment,
            Criterion::TechnicalFit => self.technical_fit,
            Criterion::BudgetFit => self.budget_fit,
            Criterion::TrendFit => self.trend_fit,
            Criterion::BrandFit => self.brand_fit,
        }
    }

    /// Scores paired with their criterion, in declaration order
    pub fn entries(&self) -> [(Criterion, u8); 7] {
        Criterion::ALL.map(|criterion| (criterion, self.get(criterion)))
    }
}

/// Projected business impact of adopting a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessAlignment {
    pub conversion_potential: u8,
    pub scalability: u8,
    pub maintenance_complexity: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskKind {
    Technical,
    Timeline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImplementationRisk {
    pub kind: RiskKind,
    /// Likelihood in 0.0..=1.0
    pub probability: f64,
    /// Severity on a 1..=10 scale
    pub impact: u8,
    pub mitigation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImplementationPlan {
    pub estimated_hours: f64,
    pub timeline_weeks: u32,
    pub risks: Vec<ImplementationRisk>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub design: f64,
    pub development: f64,
    pub maintenance_per_year: f64,
    pub total_initial: f64,
}

/// Expected time to recoup the investment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaybackPeriod {
    #[serde(rename = "3-6 months")]
    ThreeToSixMonths,
    #[serde(rename = "6-12 months")]
    SixToTwelveMonths,
    #[serde(rename = "12-18 months")]
    TwelveToEighteenMonths,
    #[serde(rename = "18+ months")]
    OverEighteenMonths,
}

impl PaybackPeriod {
    pub fn label(&self) -> &'static str {
        match self {
            PaybackPeriod::ThreeToSixMonths => "3-6 months",
            PaybackPeriod::SixToTwelveMonths => "6-12 months",
            PaybackPeriod::TwelveToEighteenMonths => "12-18 months",
            PaybackPeriod::OverEighteenMonths => "18+ months",
        }
    }
}

impl fmt::Display for PaybackPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentProjection {
    pub estimated_total_cost: f64,
    pub cost_breakdown: CostBreakdown,
    pub roi_estimate: f64,
    pub payback_period: PaybackPeriod,
}

/// Predicted runtime characteristics of a customized template
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub load_time_secs: f64,
    pub quality_score: u8,
    pub mobile_score: u8,
    pub accessibility_score: u8,
    pub seo_score: u8,
}

/// A scored template recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub template_id: TemplateId,
    pub template_name: String,
    pub category: BusinessCategory,
    pub complexity: ComplexityTier,
    /// Weighted match score (0 - 100)
    pub match_score: u8,
    /// Agreement among criterion scores (0.1 - 1.0)
    pub confidence: f64,
    pub criterion_scores: CriterionScores,
    /// Human-readable reasoning
    pub reasoning: Vec<String>,
    pub business_alignment: BusinessAlignment,
    pub implementation: ImplementationPlan,
    pub investment: InvestmentProjection,
    pub customization: Option<CustomizationBundle>,
    pub performance: Option<PerformanceMetrics>,
    /// Other evaluated templates in the same category
    pub alternatives: Vec<TemplateId>,
    /// Synthetic recommendation produced when the pipeline could not run
    pub is_fallback: bool,
}

impl Recommendation {
    /// Copy of this recommendation carrying the given customization
    pub fn with_customization(self, bundle: CustomizationBundle) -> Self {
        Self { customization: Some(bundle), ..self }
    }

    /// Copy of this recommendation carrying the given performance prediction
    pub fn with_performance(self, metrics: PerformanceMetrics) -> Self {
        Self { performance: Some(metrics), ..self }
    }

    /// Copy of this recommendation listing the given alternatives
    pub fn with_alternatives(self, alternatives: Vec<TemplateId>) -> Self {
        Self { alternatives, ..self }
    }
}
