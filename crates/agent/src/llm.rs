use std::fmt::Write as _;

use anyhow::Result;
use async_trait::async_trait;
use sitefit_core::{BrandIdentity, BusinessProfile, Template};

/// Text-completion backend used to generate customization bundles.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Prompt asking for a customization bundle as a single JSON object.
pub fn customization_prompt(
    template: &Template,
    profile: &BusinessProfile,
    brand: Option<&BrandIdentity>,
) -> String {
    let mut prompt = String::from(
        "You are customizing a website template. Respond with one JSON object with the keys \
         palette, typography, imagery, content and animations. Colours must be hex values.\n\n",
    );

    let _ = writeln!(
        prompt,
        "Template: {} ({}, {:?} complexity)",
        template.name,
        template.category.as_str(),
        template.complexity
    );
    if let Some(style) = &template.style {
        let _ = writeln!(prompt, "Template style: {style}");
    }
    let _ = writeln!(prompt, "Business: {} in {:?}", profile.name, profile.sector);
    if let Some(vertical) = &profile.vertical {
        let _ = writeln!(prompt, "Vertical: {vertical}");
    }
    let goals: Vec<String> =
        profile.goals.iter().map(|goal| format!("{:?}", goal.goal_type).to_lowercase()).collect();
    if !goals.is_empty() {
        let _ = writeln!(prompt, "Goals: {}", goals.join(", "));
    }

    if let Some(brand) = brand {
        let _ = writeln!(prompt, "Brand: {}", brand.name);
        if !brand.personality.is_empty() {
            let _ = writeln!(prompt, "Brand personality: {}", brand.personality.join(", "));
        }
        if !brand.primary_colors.is_empty() {
            let _ = writeln!(prompt, "Brand colours: {}", brand.primary_colors.join(", "));
        }
    }

    prompt
}

/// The outermost `{...}` span of a completion, ignoring surrounding prose or fences.
pub fn extract_json_object(completion: &str) -> Option<&str> {
    let start = completion.find('{')?;
    let end = completion.rfind('}')?;
    (end > start).then(|| &completion[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitefit_core::domain::profile::{
        AgeRange, BudgetEnvelope, BusinessCategory, BusinessGoal, DeviceType, DigitalSavviness,
        GoalType, IndustrySector, TargetAudience, TimelineFlexibility,
    };
    use sitefit_core::domain::template::ComplexityTier;

    #[test]
    fn extracts_json_from_fenced_completion() {
        let completion = "Here you go:\n```json\n{\"a\": {\"b\": 1}}\n```";
        assert_eq!(extract_json_object(completion), Some("{\"a\": {\"b\": 1}}"));
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("} backwards {"), None);
    }

    #[test]
    fn prompt_mentions_template_business_and_brand() {
        let template =
            Template::new("tpl", "Launch Lite", BusinessCategory::Landing, ComplexityTier::Simple);
        let profile = BusinessProfile {
            name: "Brightside Bakery".to_string(),
            sector: IndustrySector::Hospitality,
            category: BusinessCategory::Landing,
            vertical: Some("bakery".to_string()),
            audience: TargetAudience {
                age_range: AgeRange::new(20, 60),
                digital_savviness: DigitalSavviness::Medium,
                primary_device: DeviceType::Mobile,
            },
            goals: vec![BusinessGoal::new(GoalType::Awareness, 5)],
            constraints: Vec::new(),
            budget: BudgetEnvelope::with_total(3_000.0),
            timeline: TimelineFlexibility::Flexible,
            design_preferences: None,
        };
        let brand = BrandIdentity {
            name: "Brightside".to_string(),
            primary_colors: vec!["#F4A261".to_string()],
            ..BrandIdentity::default()
        };

        let prompt = customization_prompt(&template, &profile, Some(&brand));

        assert!(prompt.contains("Launch Lite"));
        assert!(prompt.contains("Brightside Bakery"));
        assert!(prompt.contains("Vertical: bakery"));
        assert!(prompt.contains("Goals: awareness"));
        assert!(prompt.contains("Brand colours: #F4A261"));
    }
}
