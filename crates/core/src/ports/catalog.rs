//! In-memory template catalog

use async_trait::async_trait;

use super::{CatalogError, TemplateCatalog};
use crate::domain::profile::{
    AgeRange, BusinessCategory, BusinessProfile, DeviceType, DigitalSavviness,
};
use crate::domain::template::{
    Capabilities, ComplexityTier, OptimizationFlags, Template, TemplateAudience, TemplateId,
};

/// Lightweight catalog seed used by the default in-memory catalog.
#[derive(Debug, Clone, Copy)]
struct TemplateSeed {
    id: &'static str,
    name: &'static str,
    category: BusinessCategory,
    complexity: ComplexityTier,
    vertical: Option<&'static str>,
    personality: &'static [&'static str],
    style: Option<&'static str>,
    color_schemes: &'static [&'static str],
    age_range: Option<(u8, u8)>,
    savviness: Option<DigitalSavviness>,
    device: Option<DeviceType>,
    mobile: bool,
    constraints: &'static [&'static str],
    trends: &'static [&'static str],
}

const TEMPLATE_SEEDS: &[TemplateSeed] = &[
    TemplateSeed {
        id: "tpl_saas_launchpad",
        name: "SaaS Launchpad",
        category: BusinessCategory::Saas,
        complexity: ComplexityTier::Moderate,
        vertical: None,
        personality: &["modern", "confident"],
        style: Some("minimal"),
        color_schemes: &["cool", "vibrant"],
        age_range: Some((25, 45)),
        savviness: Some(DigitalSavviness::High),
        device: Some(DeviceType::Desktop),
        mobile: true,
        constraints: &["ssl", "analytics", "cms", "integrations"],
        trends: &["ai_assistants", "dark_mode", "interactive_demos"],
    },
    TemplateSeed {
        id: "tpl_storefront_plus",
        name: "Storefront Plus",
        category: BusinessCategory::ECommerce,
        complexity: ComplexityTier::Complex,
        vertical: Some("fashion"),
        personality: &["playful", "bold"],
        style: Some("editorial"),
        color_schemes: &["vibrant", "warm"],
        age_range: Some((18, 34)),
        savviness: Some(DigitalSavviness::Medium),
        device: Some(DeviceType::Mobile),
        mobile: true,
        constraints: &["ssl", "payments", "inventory", "analytics", "multilingual"],
        trends: &["social_commerce", "video_hero", "one_click_checkout"],
    },
    TemplateSeed {
        id: "tpl_market_hub",
        name: "Market Hub",
        category: BusinessCategory::Marketplace,
        complexity: ComplexityTier::Enterprise,
        vertical: None,
        personality: &["trustworthy", "efficient"],
        style: Some("functional"),
        color_schemes: &["neutral"],
        age_range: Some((25, 54)),
        savviness: Some(DigitalSavviness::Medium),
        device: Some(DeviceType::Desktop),
        mobile: true,
        constraints: &["ssl", "payments", "user_accounts", "search", "multilingual"],
        trends: &["personalization", "social_proof"],
    },
    TemplateSeed {
        id: "tpl_studio_folio",
        name: "Studio Folio",
        category: BusinessCategory::Portfolio,
        complexity: ComplexityTier::Simple,
        vertical: Some("photography"),
        personality: &["creative", "elegant"],
        style: Some("minimal"),
        color_schemes: &["monochrome"],
        age_range: Some((25, 44)),
        savviness: None,
        device: None,
        mobile: true,
        constraints: &["ssl", "gallery"],
        trends: &["bold_typography", "video_hero"],
    },
    TemplateSeed {
        id: "tpl_corporate_edge",
        name: "Corporate Edge",
        category: BusinessCategory::Corporate,
        complexity: ComplexityTier::Moderate,
        vertical: Some("finance"),
        personality: &["trustworthy", "professional"],
        style: Some("classic"),
        color_schemes: &["cool", "neutral"],
        age_range: Some((35, 64)),
        savviness: Some(DigitalSavviness::Medium),
        device: Some(DeviceType::Desktop),
        mobile: false,
        constraints: &["ssl", "cms", "accessibility", "multilingual"],
        trends: &["accessibility_first", "personalization"],
    },
    TemplateSeed {
        id: "tpl_launch_lite",
        name: "Launch Lite",
        category: BusinessCategory::Landing,
        complexity: ComplexityTier::Simple,
        vertical: None,
        personality: &["bold", "energetic"],
        style: Some("minimal"),
        color_schemes: &["vibrant"],
        age_range: Some((18, 44)),
        savviness: Some(DigitalSavviness::High),
        device: Some(DeviceType::Mobile),
        mobile: true,
        constraints: &["ssl", "analytics", "forms"],
        trends: &["micro_interactions", "bold_typography"],
    },
    TemplateSeed {
        id: "tpl_care_clinic",
        name: "Care Clinic",
        category: BusinessCategory::Corporate,
        complexity: ComplexityTier::Complex,
        vertical: Some("clinic"),
        personality: &["caring", "trustworthy"],
        style: Some("soft"),
        color_schemes: &["calm", "cool"],
        age_range: Some((30, 70)),
        savviness: Some(DigitalSavviness::Low),
        device: Some(DeviceType::Mobile),
        mobile: true,
        constraints: &["ssl", "booking", "accessibility", "forms"],
        trends: &["accessibility_first", "telehealth"],
    },
    TemplateSeed {
        id: "tpl_learn_commons",
        name: "Learn Commons",
        category: BusinessCategory::Community,
        complexity: ComplexityTier::Complex,
        vertical: None,
        personality: &["friendly", "curious"],
        style: Some("playful"),
        color_schemes: &["warm"],
        age_range: Some((16, 40)),
        savviness: Some(DigitalSavviness::Medium),
        device: Some(DeviceType::Tablet),
        mobile: true,
        constraints: &["ssl", "user_accounts", "video", "cms"],
        trends: &["gamification", "video_hero"],
    },
];

fn template_from_seed(seed: &TemplateSeed) -> Template {
    Template {
        id: TemplateId::new(seed.id),
        name: seed.name.to_owned(),
        category: seed.category,
        complexity: seed.complexity,
        vertical: seed.vertical.map(str::to_owned),
        personality: seed.personality.iter().map(|value| (*value).to_owned()).collect(),
        style: seed.style.map(str::to_owned),
        color_schemes: seed.color_schemes.iter().map(|value| (*value).to_owned()).collect(),
        audience: TemplateAudience {
            age_range: seed.age_range.map(|(min, max)| AgeRange::new(min, max)),
            digital_savviness: seed.savviness,
            primary_device: seed.device,
        },
        optimization: OptimizationFlags { mobile: seed.mobile, accessibility: true, seo: true },
        capabilities: Capabilities::default()
            .with_constraints(seed.constraints.iter().copied())
            .with_trends(seed.trends.iter().copied()),
        base_cost: None,
    }
}

/// Catalog backed by a fixed list of templates, returned in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplateCatalog {
    templates: Vec<Template>,
}

impl InMemoryTemplateCatalog {
    pub fn new(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    /// Catalog preloaded with the bundled template seeds.
    pub fn seeded() -> Self {
        Self::new(TEMPLATE_SEEDS.iter().map(template_from_seed).collect())
    }

    /// Parse a JSON array of templates.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let templates = serde_json::from_str::<Vec<Template>>(raw)
            .map_err(|error| CatalogError::Malformed(error.to_string()))?;
        Ok(Self::new(templates))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[async_trait]
impl TemplateCatalog for InMemoryTemplateCatalog {
    async fn candidates(&self, _profile: &BusinessProfile) -> Result<Vec<Template>, CatalogError> {
        Ok(self.templates.clone())
    }

    async fn get_by_id(&self, id: &TemplateId) -> Result<Template, CatalogError> {
        self.templates
            .iter()
            .find(|template| template.id == *id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_catalog_templates_are_valid() {
        let catalog = InMemoryTemplateCatalog::seeded();
        assert_eq!(catalog.len(), TEMPLATE_SEEDS.len());
        for template in &catalog.templates {
            assert!(template.validate().is_ok(), "{} should validate", template.id);
        }
    }

    #[tokio::test]
    async fn get_by_id_reports_missing_templates() {
        let catalog = InMemoryTemplateCatalog::seeded();

        let found = catalog
            .get_by_id(&TemplateId::new("tpl_launch_lite"))
            .await
            .expect("seeded template exists");
        assert_eq!(found.name, "Launch Lite");
        assert!(found.capabilities.supports_constraint("forms"));

        let missing = catalog.get_by_id(&TemplateId::new("tpl_unknown")).await;
        assert_eq!(missing, Err(CatalogError::NotFound(TemplateId::new("tpl_unknown"))));
    }

    #[test]
    fn from_json_parses_minimal_templates() {
        let catalog = InMemoryTemplateCatalog::from_json(
            r#"[{"id":"tpl_a","name":"A","category":"saas","complexity":"simple"}]"#,
        )
        .expect("json parses");
        assert_eq!(catalog.len(), 1);

        let malformed = InMemoryTemplateCatalog::from_json("{not json");
        assert!(matches!(malformed, Err(CatalogError::Malformed(_))));
    }
}
