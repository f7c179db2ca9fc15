use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Industry sector the business operates in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndustrySector {
    Technology,
    Finance,
    Retail,
    Healthcare,
    Education,
    Hospitality,
    Creative,
    RealEstate,
    Nonprofit,
    #[serde(other)]
    Other,
}

/// Shared category vocabulary for businesses and catalog templates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessCategory {
    ECommerce,
    Saas,
    Marketplace,
    Portfolio,
    Corporate,
    Landing,
    Blog,
    Community,
}

impl BusinessCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ECommerce => "e_commerce",
            Self::Saas => "saas",
            Self::Marketplace => "marketplace",
            Self::Portfolio => "portfolio",
            Self::Corporate => "corporate",
            Self::Landing => "landing",
            Self::Blog => "blog",
            Self::Community => "community",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigitalSavviness {
    Low,
    Medium,
    High,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    Mobile,
    Desktop,
    Tablet,
}

/// Inclusive age bracket, e.g. 25-45.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    pub min: u8,
    pub max: u8,
}

impl AgeRange {
    pub fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    /// True when this bracket covers the lower bound of `other`.
    pub fn covers_lower_bound_of(&self, other: &AgeRange) -> bool {
        self.min <= other.min && other.min <= self.max
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetAudience {
    pub age_range: AgeRange,
    pub digital_savviness: DigitalSavviness,
    pub primary_device: DeviceType,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    Conversion,
    Engagement,
    Awareness,
    Retention,
    Growth,
    Education,
    Support,
    #[serde(other)]
    Other,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessGoal {
    pub goal_type: GoalType,
    /// Relative weight of the goal; must be at least 1.
    pub priority: u32,
}

impl BusinessGoal {
    pub fn new(goal_type: GoalType, priority: u32) -> Self {
        Self { goal_type, priority }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintPriority {
    MustHave,
    ShouldHave,
    NiceToHave,
}

/// A technical requirement such as `ssl`, `cms`, `multilingual` or `payments`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicalConstraint {
    pub kind: String,
    pub priority: ConstraintPriority,
}

impl TechnicalConstraint {
    pub fn new(kind: impl Into<String>, priority: ConstraintPriority) -> Self {
        Self { kind: kind.into(), priority }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetEnvelope {
    pub total: f64,
    #[serde(default)]
    pub design: Option<f64>,
    #[serde(default)]
    pub development: Option<f64>,
    #[serde(default)]
    pub maintenance: Option<f64>,
}

impl BudgetEnvelope {
    pub fn with_total(total: f64) -> Self {
        Self { total, ..Self::default() }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineFlexibility {
    Rigid,
    #[default]
    Moderate,
    Flexible,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignPreferences {
    #[serde(default)]
    pub styles: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub avoid: Vec<String>,
}

/// Optional brand description used for brand-fit scoring and customization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandIdentity {
    pub name: String,
    #[serde(default)]
    pub personality: Vec<String>,
    #[serde(default)]
    pub color_mood: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub primary_colors: Vec<String>,
}

/// Immutable description of the business a recommendation is made for.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub name: String,
    pub sector: IndustrySector,
    pub category: BusinessCategory,
    #[serde(default)]
    pub vertical: Option<String>,
    pub audience: TargetAudience,
    #[serde(default)]
    pub goals: Vec<BusinessGoal>,
    #[serde(default)]
    pub constraints: Vec<TechnicalConstraint>,
    pub budget: BudgetEnvelope,
    #[serde(default)]
    pub timeline: TimelineFlexibility,
    #[serde(default)]
    pub design_preferences: Option<DesignPreferences>,
}

impl BusinessProfile {
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(goal) = self.goals.iter().find(|goal| goal.priority == 0) {
            return Err(DomainError::InvalidProfile(format!(
                "goal {:?} must have a priority of at least 1",
                goal.goal_type
            )));
        }

        if !self.budget.total.is_finite() || self.budget.total < 0.0 {
            return Err(DomainError::InvalidProfile(format!(
                "budget total must be a non-negative amount, got {}",
                self.budget.total
            )));
        }

        if self.audience.age_range.min > self.audience.age_range.max {
            return Err(DomainError::InvalidProfile(format!(
                "audience age range {}-{} is inverted",
                self.audience.age_range.min, self.audience.age_range.max
            )));
        }

        Ok(())
    }

    pub fn has_design_preferences(&self) -> bool {
        self.design_preferences.is_some()
    }
}
