//! Recommendation pipeline: candidate retrieval, evaluation, truncation,
//! enrichment and final ranking, with a fallback list when the run fails.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::{AppConfig, PipelineConfig};
use crate::domain::customization::CustomizationBundle;
use crate::domain::market::TrendSet;
use crate::domain::template::{Template, TemplateId};
use crate::errors::ApplicationError;
use crate::ports::{
    CustomizationService, MarketTrendService, PerformancePredictor, TemplateCatalog,
};

use super::engine::TemplateMatcher;
use super::fallback::fallback_recommendations;
use super::types::{Recommendation, RecommendationRequest};
use super::MAX_RECOMMENDATIONS_LIMIT;

/// External collaborators the pipeline depends on.
#[derive(Clone)]
pub struct PipelineCollaborators {
    pub catalog: Arc<dyn TemplateCatalog>,
    pub customizer: Arc<dyn CustomizationService>,
    pub predictor: Arc<dyn PerformancePredictor>,
    pub trends: Arc<dyn MarketTrendService>,
}

pub struct RecommendationPipeline {
    collaborators: PipelineCollaborators,
    matcher: TemplateMatcher,
    config: PipelineConfig,
}

impl RecommendationPipeline {
    pub fn new(
        collaborators: PipelineCollaborators,
        matcher: TemplateMatcher,
        config: PipelineConfig,
    ) -> Self {
        Self { collaborators, matcher, config }
    }

    pub fn from_config(collaborators: PipelineCollaborators, config: &AppConfig) -> Self {
        Self::new(
            collaborators,
            TemplateMatcher::from_config(&config.scoring),
            config.pipeline.clone(),
        )
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Number of recommendations the request asks for, within
    /// `1..=MAX_RECOMMENDATIONS_LIMIT`.
    pub fn requested_count(&self, request: &RecommendationRequest) -> usize {
        request
            .max_recommendations
            .unwrap_or(self.config.max_recommendations)
            .clamp(1, MAX_RECOMMENDATIONS_LIMIT)
    }

    /// Ranked recommendations for the request.
    ///
    /// Never fails: when the run cannot complete, one synthetic fallback per
    /// requested slot is returned instead.
    pub async fn recommend(&self, request: &RecommendationRequest) -> Vec<Recommendation> {
        match self.try_recommend(request).await {
            Ok(recommendations) => recommendations,
            Err(error) => {
                let count = self.requested_count(request);
                warn!(
                    event_name = "pipeline.fallback",
                    correlation_id = %request.correlation_id,
                    error = %error,
                    fallback_count = count,
                    "recommendation pipeline failed; returning fallback recommendations"
                );
                fallback_recommendations(count)
            }
        }
    }

    /// Same as [`recommend`](Self::recommend) but surfaces whole-run failures.
    pub async fn try_recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<Recommendation>, ApplicationError> {
        let correlation_id = request.correlation_id.as_str();
        let requested = self.requested_count(request);
        info!(
            event_name = "pipeline.start",
            correlation_id,
            business = %request.profile.name,
            requested,
            "starting template recommendation"
        );

        request.profile.validate()?;

        let trends = self.fetch_trends(request).await;
        let candidates = self.collaborators.catalog.candidates(&request.profile).await?;
        info!(
            event_name = "pipeline.candidates.retrieved",
            correlation_id,
            candidate_count = candidates.len(),
            "retrieved candidate templates"
        );

        let mut evaluated: Vec<(Template, Recommendation)> = Vec::with_capacity(candidates.len());
        for template in candidates {
            match self.matcher.evaluate(
                &template,
                &request.profile,
                trends.as_ref(),
                request.brand.as_ref(),
            ) {
                Ok(recommendation) => {
                    debug!(
                        event_name = "pipeline.candidate.evaluated",
                        correlation_id,
                        template_id = %template.id,
                        match_score = recommendation.match_score,
                        confidence = recommendation.confidence,
                        "candidate evaluated"
                    );
                    evaluated.push((template, recommendation));
                }
                Err(error) => warn!(
                    event_name = "pipeline.candidate.dropped",
                    correlation_id,
                    template_id = %template.id,
                    error = %error,
                    "dropping candidate that failed evaluation"
                ),
            }
        }

        let alternatives: Vec<Vec<TemplateId>> = evaluated
            .iter()
            .take(requested)
            .map(|(template, _)| self.alternatives_for(template, &evaluated))
            .collect();
        evaluated.truncate(requested);

        let mut recommendations = Vec::with_capacity(evaluated.len());
        for ((template, recommendation), alternatives) in evaluated.into_iter().zip(alternatives) {
            let recommendation = recommendation.with_alternatives(alternatives);
            let recommendation = self.customize(&template, recommendation, request).await;
            let recommendation = self.predict(&template, recommendation, request).await;
            recommendations.push(recommendation);
        }

        recommendations.sort_by(|left, right| right.match_score.cmp(&left.match_score));

        info!(
            event_name = "pipeline.complete",
            correlation_id,
            recommendation_count = recommendations.len(),
            top_score = recommendations.first().map(|rec| rec.match_score),
            "template recommendation complete"
        );
        Ok(recommendations)
    }

    /// Evaluate one catalog template by id, without truncation or fallback.
    pub async fn evaluate_template(
        &self,
        id: &TemplateId,
        request: &RecommendationRequest,
    ) -> Result<Recommendation, ApplicationError> {
        request.profile.validate()?;

        let template = self.collaborators.catalog.get_by_id(id).await?;
        let trends = self.fetch_trends(request).await;
        let recommendation = self.matcher.evaluate(
            &template,
            &request.profile,
            trends.as_ref(),
            request.brand.as_ref(),
        )?;

        let recommendation = self.customize(&template, recommendation, request).await;
        Ok(self.predict(&template, recommendation, request).await)
    }

    async fn fetch_trends(&self, request: &RecommendationRequest) -> Option<TrendSet> {
        match self
            .collaborators
            .trends
            .trends(request.profile.sector, request.market.as_deref())
            .await
        {
            Ok(trends) => trends,
            Err(error) => {
                warn!(
                    event_name = "pipeline.trends.unavailable",
                    correlation_id = %request.correlation_id,
                    error = %error,
                    "market trends unavailable; scoring without trend data"
                );
                None
            }
        }
    }

    fn alternatives_for(
        &self,
        template: &Template,
        evaluated: &[(Template, Recommendation)],
    ) -> Vec<TemplateId> {
        evaluated
            .iter()
            .filter(|(other, _)| other.category == template.category && other.id != template.id)
            .map(|(other, _)| other.id.clone())
            .take(self.config.max_alternatives)
            .collect()
    }

    async fn customize(
        &self,
        template: &Template,
        recommendation: Recommendation,
        request: &RecommendationRequest,
    ) -> Recommendation {
        if !self.config.customize {
            return recommendation;
        }

        match self
            .collaborators
            .customizer
            .customize(template, &request.profile, request.brand.as_ref())
            .await
        {
            Ok(bundle) => recommendation.with_customization(bundle),
            Err(error) => {
                warn!(
                    event_name = "pipeline.customization.degraded",
                    correlation_id = %request.correlation_id,
                    template_id = %template.id,
                    error = %error,
                    "customization failed; using default bundle"
                );
                recommendation.with_customization(CustomizationBundle::default_bundle())
            }
        }
    }

    async fn predict(
        &self,
        template: &Template,
        recommendation: Recommendation,
        request: &RecommendationRequest,
    ) -> Recommendation {
        if !self.config.predict_performance {
            return recommendation;
        }

        match self.collaborators.predictor.predict(template, &request.profile).await {
            Ok(metrics) => recommendation.with_performance(metrics),
            Err(error) => {
                warn!(
                    event_name = "pipeline.prediction.degraded",
                    correlation_id = %request.correlation_id,
                    template_id = %template.id,
                    error = %error,
                    "performance prediction failed; keeping recommendation unchanged"
                );
                recommendation
            }
        }
    }
}

impl std::fmt::Debug for RecommendationPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecommendationPipeline")
            .field("matcher", &self.matcher)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::domain::market::{MarketTrend, TrendSet};
    use crate::domain::profile::{
        AgeRange, BudgetEnvelope, BusinessCategory, BusinessGoal, BusinessProfile, DeviceType,
        DigitalSavviness, GoalType, IndustrySector, TargetAudience, TimelineFlexibility,
    };
    use crate::domain::template::ComplexityTier;
    use crate::matching::PerformanceMetrics;
    use crate::ports::{
        DefaultCustomizationService, HeuristicPerformancePredictor, InMemoryTemplateCatalog,
        PredictionError, StaticTrendService, TrendError,
    };

    struct UnavailableTrends;

    #[async_trait]
    impl MarketTrendService for UnavailableTrends {
        async fn trends(
            &self,
            _sector: IndustrySector,
            _market: Option<&str>,
        ) -> Result<Option<TrendSet>, TrendError> {
            Err(TrendError::Unavailable("trend feed offline".to_owned()))
        }
    }

    struct UnavailablePredictor;

    #[async_trait]
    impl PerformancePredictor for UnavailablePredictor {
        async fn predict(
            &self,
            _template: &Template,
            _profile: &BusinessProfile,
        ) -> Result<PerformanceMetrics, PredictionError> {
            Err(PredictionError::Unavailable("model not loaded".to_owned()))
        }
    }

    fn profile() -> BusinessProfile {
        BusinessProfile {
            name: "Acme Analytics".to_string(),
            sector: IndustrySector::Technology,
            category: BusinessCategory::Saas,
            vertical: None,
            audience: TargetAudience {
                age_range: AgeRange::new(25, 45),
                digital_savviness: DigitalSavviness::High,
                primary_device: DeviceType::Desktop,
            },
            goals: vec![BusinessGoal::new(GoalType::Conversion, 10)],
            constraints: Vec::new(),
            budget: BudgetEnvelope::with_total(6_000.0),
            timeline: TimelineFlexibility::Moderate,
            design_preferences: None,
        }
    }

    fn saas(id: &str) -> Template {
        Template::new(id, id, BusinessCategory::Saas, ComplexityTier::Moderate)
    }

    fn pipeline_with(
        templates: Vec<Template>,
        trends: Arc<dyn MarketTrendService>,
        predictor: Arc<dyn PerformancePredictor>,
    ) -> RecommendationPipeline {
        RecommendationPipeline::new(
            PipelineCollaborators {
                catalog: Arc::new(InMemoryTemplateCatalog::new(templates)),
                customizer: Arc::new(DefaultCustomizationService),
                predictor,
                trends,
            },
            TemplateMatcher::new(),
            PipelineConfig::default(),
        )
    }

    #[tokio::test]
    async fn alternatives_list_other_templates_of_the_same_category() {
        let templates = vec![
            saas("a"),
            saas("b"),
            Template::new("blog", "Blog", BusinessCategory::Blog, ComplexityTier::Simple),
            saas("c"),
            saas("d"),
            saas("e"),
        ];
        let pipeline = pipeline_with(
            templates,
            Arc::new(StaticTrendService::new()),
            Arc::new(HeuristicPerformancePredictor),
        );
        let request = RecommendationRequest::new(profile()).with_max_recommendations(2);

        let recommendations = pipeline.try_recommend(&request).await.expect("pipeline runs");

        assert_eq!(recommendations.len(), 2);
        let first = recommendations
            .iter()
            .find(|rec| rec.template_id.as_str() == "a")
            .expect("template a retained");
        let ids: Vec<_> = first.alternatives.iter().map(TemplateId::as_str).collect();
        assert_eq!(ids, vec!["b", "c", "d"]);
    }

    #[tokio::test]
    async fn trend_and_prediction_failures_degrade_without_dropping() {
        let pipeline = pipeline_with(
            vec![saas("a")],
            Arc::new(UnavailableTrends),
            Arc::new(UnavailablePredictor),
        );
        let request = RecommendationRequest::new(profile());

        let recommendations = pipeline.try_recommend(&request).await.expect("pipeline runs");

        assert_eq!(recommendations.len(), 1);
        assert!(recommendations[0].performance.is_none());
        assert!(recommendations[0].customization.is_some());
        assert_eq!(recommendations[0].criterion_scores.trend_fit, 70);
    }

    #[tokio::test]
    async fn trend_data_feeds_trend_fit() {
        let mut template = saas("a");
        template.capabilities = template.capabilities.with_trends(["ai_assistants"]);
        let trends = StaticTrendService::new().with_sector(
            IndustrySector::Technology,
            TrendSet::new(vec![
                MarketTrend::new("ai_assistants", "AI assistants").with_relevance(96.0)
            ]),
        );
        let pipeline = pipeline_with(
            vec![template],
            Arc::new(trends),
            Arc::new(HeuristicPerformancePredictor),
        );

        let recommendation = pipeline
            .evaluate_template(&TemplateId::new("a"), &RecommendationRequest::new(profile()))
            .await
            .expect("template evaluates");

        assert_eq!(recommendation.criterion_scores.trend_fit, 96);
        assert!(recommendation.performance.is_some());
    }

    #[tokio::test]
    async fn zero_requested_is_clamped_to_one() {
        let pipeline = pipeline_with(
            vec![saas("a"), saas("b")],
            Arc::new(StaticTrendService::new()),
            Arc::new(HeuristicPerformancePredictor),
        );
        let request = RecommendationRequest::new(profile()).with_max_recommendations(0);

        assert_eq!(pipeline.requested_count(&request), 1);
        assert_eq!(pipeline.recommend(&request).await.len(), 1);
    }
}
