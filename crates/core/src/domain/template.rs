use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::profile::{AgeRange, BusinessCategory, DeviceType, DigitalSavviness};
use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub String);

impl TemplateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordinal build complexity driving cost, timeline and scalability projections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityTier {
    Simple,
    Moderate,
    Complex,
    Enterprise,
}

impl ComplexityTier {
    /// Multiplier applied to the base template cost.
    pub fn cost_multiplier(&self) -> f64 {
        match self {
            Self::Simple => 1.0,
            Self::Moderate => 1.5,
            Self::Complex => 2.5,
            Self::Enterprise => 4.0,
        }
    }

    /// Multiplier applied to the development share of the cost breakdown.
    pub fn development_multiplier(&self) -> f64 {
        match self {
            Self::Simple => 1.0,
            Self::Moderate => 1.2,
            Self::Complex => 1.8,
            Self::Enterprise => 2.5,
        }
    }

    pub fn base_hours(&self) -> f64 {
        match self {
            Self::Simple => 40.0,
            Self::Moderate => 80.0,
            Self::Complex => 160.0,
            Self::Enterprise => 320.0,
        }
    }

    pub fn scalability_score(&self) -> u8 {
        match self {
            Self::Simple => 60,
            Self::Moderate => 75,
            Self::Complex => 90,
            Self::Enterprise => 95,
        }
    }

    pub fn maintenance_complexity(&self) -> u8 {
        match self {
            Self::Simple => 20,
            Self::Moderate => 40,
            Self::Complex => 65,
            Self::Enterprise => 85,
        }
    }

    pub fn is_heavyweight(&self) -> bool {
        matches!(self, Self::Complex | Self::Enterprise)
    }
}

/// Audience the template was designed for, if the catalog declares one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateAudience {
    #[serde(default)]
    pub age_range: Option<AgeRange>,
    #[serde(default)]
    pub digital_savviness: Option<DigitalSavviness>,
    #[serde(default)]
    pub primary_device: Option<DeviceType>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationFlags {
    #[serde(default)]
    pub mobile: bool,
    #[serde(default)]
    pub accessibility: bool,
    #[serde(default)]
    pub seo: bool,
}

/// Capability table published by the catalog for a single template.
///
/// Constraint tags are compared case-insensitively; trend ids exactly.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    #[serde(default)]
    pub constraints: BTreeSet<String>,
    #[serde(default)]
    pub trends: BTreeSet<String>,
}

impl Capabilities {
    pub fn with_constraints<I, S>(mut self, constraints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraints
            .extend(constraints.into_iter().map(|tag| tag.into().trim().to_ascii_lowercase()));
        self
    }

    pub fn with_trends<I, S>(mut self, trends: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.trends.extend(trends.into_iter().map(Into::into));
        self
    }

    pub fn supports_constraint(&self, kind: &str) -> bool {
        let normalized = kind.trim().to_ascii_lowercase();
        self.constraints.iter().any(|tag| tag.trim().eq_ignore_ascii_case(&normalized))
    }

    pub fn supports_trend(&self, trend_id: &str) -> bool {
        self.trends.contains(trend_id)
    }
}

/// Read-only catalog entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    pub category: BusinessCategory,
    pub complexity: ComplexityTier,
    #[serde(default)]
    pub vertical: Option<String>,
    #[serde(default)]
    pub personality: Vec<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub color_schemes: Vec<String>,
    #[serde(default)]
    pub audience: TemplateAudience,
    #[serde(default)]
    pub optimization: OptimizationFlags,
    #[serde(default)]
    pub capabilities: Capabilities,
    /// Overrides the configured base cost when the catalog prices a template explicitly.
    #[serde(default)]
    pub base_cost: Option<f64>,
}

impl Template {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: BusinessCategory,
        complexity: ComplexityTier,
    ) -> Self {
        Self {
            id: TemplateId::new(id),
            name: name.into(),
            category,
            complexity,
            vertical: None,
            personality: Vec::new(),
            style: None,
            color_schemes: Vec::new(),
            audience: TemplateAudience::default(),
            optimization: OptimizationFlags::default(),
            capabilities: Capabilities::default(),
            base_cost: None,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.as_str().trim().is_empty() {
            return Err(DomainError::InvalidTemplate {
                template_id: self.id.clone(),
                reason: "template id is empty".to_string(),
            });
        }

        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidTemplate {
                template_id: self.id.clone(),
                reason: "template name is empty".to_string(),
            });
        }

        if let Some(base_cost) = self.base_cost {
            if !base_cost.is_finite() || base_cost <= 0.0 {
                return Err(DomainError::InvalidTemplate {
                    template_id: self.id.clone(),
                    reason: format!("declared base cost {base_cost} is not a positive amount"),
                });
            }
        }

        Ok(())
    }

    /// Estimated total build cost: base cost times the tier multiplier.
    pub fn estimated_total_cost(&self, default_base_cost: f64) -> f64 {
        self.base_cost.unwrap_or(default_base_cost) * self.complexity.cost_multiplier()
    }
}
