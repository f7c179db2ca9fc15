//! Customization service backed by a text-completion model.

use std::time::Duration;

use async_trait::async_trait;
use sitefit_core::config::LlmConfig;
use sitefit_core::{
    BrandIdentity, BusinessProfile, CustomizationBundle, CustomizationError, CustomizationService,
    Template,
};
use tracing::{debug, warn};

use crate::guardrails::{BundleGuardrails, GuardrailDecision};
use crate::llm::{customization_prompt, extract_json_object, LlmClient};

pub struct LlmCustomizationService<C> {
    client: C,
    guardrails: BundleGuardrails,
    timeout: Duration,
}

impl<C: LlmClient> LlmCustomizationService<C> {
    pub fn new(client: C, config: &LlmConfig) -> Self {
        Self {
            client,
            guardrails: BundleGuardrails::default(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub fn with_guardrails(mut self, guardrails: BundleGuardrails) -> Self {
        self.guardrails = guardrails;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn parse_bundle(&self, completion: &str) -> Result<CustomizationBundle, CustomizationError> {
        let json = extract_json_object(completion).ok_or_else(|| {
            CustomizationError::Rejected("completion contains no JSON object".to_string())
        })?;

        serde_json::from_str::<CustomizationBundle>(json)
            .map_err(|error| CustomizationError::Rejected(format!("malformed bundle: {error}")))
    }
}

#[async_trait]
impl<C: LlmClient> CustomizationService for LlmCustomizationService<C> {
    async fn customize(
        &self,
        template: &Template,
        profile: &BusinessProfile,
        brand: Option<&BrandIdentity>,
    ) -> Result<CustomizationBundle, CustomizationError> {
        let prompt = customization_prompt(template, profile, brand);

        let completion = tokio::time::timeout(self.timeout, self.client.complete(&prompt))
            .await
            .map_err(|_| CustomizationError::Timeout(self.timeout.as_millis() as u64))?
            .map_err(|error| CustomizationError::Unavailable(error.to_string()))?;

        let bundle = self.parse_bundle(&completion)?;

        match self.guardrails.evaluate(&bundle) {
            GuardrailDecision::Allow => {
                debug!(
                    event_name = "agent.customization.accepted",
                    template_id = %template.id,
                    "generated customization bundle accepted"
                );
                Ok(bundle)
            }
            GuardrailDecision::Degrade { reason_code, detail } => {
                warn!(
                    event_name = "agent.customization.sanitized",
                    template_id = %template.id,
                    reason_code,
                    detail = %detail,
                    "generated customization bundle sanitized"
                );
                Ok(self.guardrails.sanitize(bundle))
            }
            GuardrailDecision::Deny { reason_code, detail } => {
                Err(CustomizationError::Rejected(format!("{reason_code}: {detail}")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use anyhow::{anyhow, Result};
    use sitefit_core::domain::profile::{
        AgeRange, BudgetEnvelope, BusinessCategory, DeviceType, DigitalSavviness, IndustrySector,
        TargetAudience, TimelineFlexibility,
    };
    use sitefit_core::domain::template::ComplexityTier;

    use super::*;

    enum Script {
        Reply(String),
        Fail,
        Stall,
    }

    struct ScriptedClient {
        script: Script,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedClient {
        fn new(script: Script) -> Self {
            Self { script, prompts: Mutex::new(Vec::new()) }
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedClient {
        async fn complete(&self, prompt: &str) -> Result<String> {
            if let Ok(mut prompts) = self.prompts.lock() {
                prompts.push(prompt.to_string());
            }
            match &self.script {
                Script::Reply(reply) => Ok(reply.clone()),
                Script::Fail => Err(anyhow!("model endpoint returned 503")),
                Script::Stall => {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    Ok(String::new())
                }
            }
        }
    }

    fn template() -> Template {
        Template::new("tpl_launch", "Launch", BusinessCategory::Landing, ComplexityTier::Simple)
    }

    fn profile() -> BusinessProfile {
        BusinessProfile {
            name: "Northwind Coffee".to_string(),
            sector: IndustrySector::Hospitality,
            category: BusinessCategory::Landing,
            vertical: None,
            audience: TargetAudience {
                age_range: AgeRange::new(20, 50),
                digital_savviness: DigitalSavviness::Medium,
                primary_device: DeviceType::Mobile,
            },
            goals: Vec::new(),
            constraints: Vec::new(),
            budget: BudgetEnvelope::with_total(4_000.0),
            timeline: TimelineFlexibility::Moderate,
            design_preferences: None,
        }
    }

    fn bundle_json(font_px: u8, accent: &str) -> String {
        let mut bundle = CustomizationBundle::default_bundle();
        bundle.typography.base_size_px = font_px;
        bundle.palette.accent = accent.to_string();
        bundle.content.headline = "Coffee worth the walk".to_string();
        serde_json::to_string(&bundle).unwrap_or_default()
    }

    fn service(script: Script) -> LlmCustomizationService<ScriptedClient> {
        LlmCustomizationService::new(ScriptedClient::new(script), &LlmConfig::default())
    }

    #[tokio::test]
    async fn valid_completion_is_parsed() {
        let reply = format!("Sure! Here is the bundle:\n{}", bundle_json(16, "#C0392B"));
        let service = service(Script::Reply(reply));

        let bundle =
            service.customize(&template(), &profile(), None).await.expect("bundle accepted");

        assert_eq!(bundle.content.headline, "Coffee worth the walk");
        assert_eq!(bundle.palette.accent, "#C0392B");
        let prompts = service.client.prompts.lock().map(|p| p.len()).unwrap_or_default();
        assert_eq!(prompts, 1);
    }

    #[tokio::test]
    async fn out_of_range_font_is_clamped() {
        let service = service(Script::Reply(bundle_json(9, "#C0392B")));

        let bundle = service.customize(&template(), &profile(), None).await.expect("sanitized");

        assert_eq!(bundle.typography.base_size_px, 12);
    }

    #[tokio::test]
    async fn invalid_colour_is_rejected() {
        let service = service(Script::Reply(bundle_json(16, "crimson")));

        let error = service.customize(&template(), &profile(), None).await.expect_err("denied");

        assert!(matches!(
            error,
            CustomizationError::Rejected(ref reason) if reason.starts_with("invalid_palette_color")
        ));
    }

    #[tokio::test]
    async fn prose_only_completion_is_rejected() {
        let service = service(Script::Reply("I cannot help with that.".to_string()));

        let error = service.customize(&template(), &profile(), None).await.expect_err("no json");

        assert!(matches!(error, CustomizationError::Rejected(_)));
    }

    #[tokio::test]
    async fn client_failure_maps_to_unavailable() {
        let service = service(Script::Fail);

        let error = service.customize(&template(), &profile(), None).await.expect_err("fails");

        assert!(matches!(
            error,
            CustomizationError::Unavailable(ref reason) if reason.contains("503")
        ));
    }

    #[tokio::test]
    async fn slow_client_times_out() {
        let service = service(Script::Stall).with_timeout(Duration::from_millis(20));

        let error = service.customize(&template(), &profile(), None).await.expect_err("times out");

        assert_eq!(error, CustomizationError::Timeout(20));
    }
}
