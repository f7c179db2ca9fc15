//! Business, implementation and investment projections derived from a template's
//! complexity tier and the business profile.

use crate::domain::profile::{
    BusinessCategory, BusinessProfile, DeviceType, IndustrySector, TimelineFlexibility,
};
use crate::domain::template::Template;

use super::types::{
    BusinessAlignment, CostBreakdown, ImplementationPlan, ImplementationRisk, InvestmentProjection,
    PaybackPeriod, RiskKind,
};
use super::DEFAULT_TEMPLATE_BASE_COST;

const HIGH_CONVERSION_POTENTIAL: u8 = 85;
const BASE_CONVERSION_POTENTIAL: u8 = 70;
const MOBILE_CONVERSION_BONUS: u8 = 10;

const DESIGN_PREFERENCE_HOURS_FACTOR: f64 = 1.3;
const HOURS_PER_WEEK: f64 = 40.0;

const DESIGN_SHARE: f64 = 0.30;
const DESIGN_PREFERENCE_COST_FACTOR: f64 = 1.5;
const DEVELOPMENT_SHARE: f64 = 0.60;
const MAINTENANCE_SHARE: f64 = 0.15;

const TECHNICAL_RISK_PROBABILITY: f64 = 0.3;
const TECHNICAL_RISK_IMPACT: u8 = 8;
const TIMELINE_RISK_PROBABILITY: f64 = 0.4;
const TIMELINE_RISK_IMPACT: u8 = 7;

/// ROI multiplier per sector.
pub fn sector_roi_multiplier(sector: IndustrySector) -> f64 {
    match sector {
        IndustrySector::Technology => 1.5,
        IndustrySector::Finance => 1.8,
        IndustrySector::Retail => 1.3,
        IndustrySector::Healthcare => 1.2,
        IndustrySector::Education => 1.0,
        _ => 1.2,
    }
}

pub fn payback_period(roi: f64) -> PaybackPeriod {
    if roi > 200.0 {
        PaybackPeriod::ThreeToSixMonths
    } else if roi > 150.0 {
        PaybackPeriod::SixToTwelveMonths
    } else if roi > 100.0 {
        PaybackPeriod::TwelveToEighteenMonths
    } else {
        PaybackPeriod::OverEighteenMonths
    }
}

/// Deterministic projection calculator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    base_cost: f64,
}

impl Projector {
    pub fn new(base_cost: f64) -> Self {
        Self { base_cost }
    }

    pub fn conversion_potential(&self, template: &Template, profile: &BusinessProfile) -> u8 {
        let mut potential = match template.category {
            BusinessCategory::Landing | BusinessCategory::ECommerce | BusinessCategory::Saas => {
                HIGH_CONVERSION_POTENTIAL
            }
            _ => BASE_CONVERSION_POTENTIAL,
        };

        if profile.audience.primary_device == DeviceType::Mobile && template.optimization.mobile {
            potential = (potential + MOBILE_CONVERSION_BONUS).min(100);
        }

        potential
    }

    pub fn business_alignment(
        &self,
        template: &Template,
        profile: &BusinessProfile,
    ) -> BusinessAlignment {
        BusinessAlignment {
            conversion_potential: self.conversion_potential(template, profile),
            scalability: template.complexity.scalability_score(),
            maintenance_complexity: template.complexity.maintenance_complexity(),
        }
    }

    pub fn implementation_hours(&self, template: &Template, profile: &BusinessProfile) -> f64 {
        let hours = template.complexity.base_hours();
        if profile.has_design_preferences() {
            hours * DESIGN_PREFERENCE_HOURS_FACTOR
        } else {
            hours
        }
    }

    /// Risks are additive; a rigid, complex build carries both.
    pub fn implementation_risks(
        &self,
        template: &Template,
        profile: &BusinessProfile,
    ) -> Vec<ImplementationRisk> {
        let mut risks = Vec::new();

        if template.complexity.is_heavyweight() {
            risks.push(ImplementationRisk {
                kind: RiskKind::Technical,
                probability: TECHNICAL_RISK_PROBABILITY,
                impact: TECHNICAL_RISK_IMPACT,
                mitigation: "Stage the build and review integrations before content migration"
                    .to_string(),
            });
        }

        if profile.timeline == TimelineFlexibility::Rigid {
            risks.push(ImplementationRisk {
                kind: RiskKind::Timeline,
                probability: TIMELINE_RISK_PROBABILITY,
                impact: TIMELINE_RISK_IMPACT,
                mitigation: "Agree a reduced launch scope with a follow-up release".to_string(),
            });
        }

        risks
    }

    pub fn implementation_plan(
        &self,
        template: &Template,
        profile: &BusinessProfile,
    ) -> ImplementationPlan {
        let estimated_hours = self.implementation_hours(template, profile);
        ImplementationPlan {
            estimated_hours,
            timeline_weeks: (estimated_hours / HOURS_PER_WEEK).ceil() as u32,
            risks: self.implementation_risks(template, profile),
        }
    }

    pub fn cost_breakdown(&self, template: &Template, profile: &BusinessProfile) -> CostBreakdown {
        let total = template.estimated_total_cost(self.base_cost);

        let mut design = total * DESIGN_SHARE;
        if profile.has_design_preferences() {
            design *= DESIGN_PREFERENCE_COST_FACTOR;
        }
        let development = total * DEVELOPMENT_SHARE * template.complexity.development_multiplier();

        CostBreakdown {
            design,
            development,
            maintenance_per_year: total * MAINTENANCE_SHARE,
            total_initial: design + development,
        }
    }

    /// Conversion potential × 2, scaled by the sector multiplier.
    pub fn roi_estimate(&self, conversion_potential: u8, sector: IndustrySector) -> f64 {
        f64::from(conversion_potential) * 2.0 * sector_roi_multiplier(sector)
    }

    pub fn investment(
        &self,
        template: &Template,
        profile: &BusinessProfile,
    ) -> InvestmentProjection {
        let roi_estimate =
            self.roi_estimate(self.conversion_potential(template, profile), profile.sector);

        InvestmentProjection {
            estimated_total_cost: template.estimated_total_cost(self.base_cost),
            cost_breakdown: self.cost_breakdown(template, profile),
            roi_estimate,
            payback_period: payback_period(roi_estimate),
        }
    }
}

impl Default for Projector {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE_BASE_COST)
    }
}
