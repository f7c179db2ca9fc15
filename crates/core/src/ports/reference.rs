//! Deterministic reference collaborators used when no external service is wired in.

use std::collections::HashMap;

use async_trait::async_trait;

use super::{
    CustomizationError, CustomizationService, MarketTrendService, PerformancePredictor,
    PredictionError, TrendError,
};
use crate::domain::customization::{ColorPalette, CustomizationBundle};
use crate::domain::market::{MarketTrend, TrendSet};
use crate::domain::profile::{BrandIdentity, BusinessProfile, IndustrySector};
use crate::domain::template::{ComplexityTier, Template};
use crate::matching::PerformanceMetrics;

/// Trend data keyed by sector; sectors without an entry have no trend data.
#[derive(Debug, Clone, Default)]
pub struct StaticTrendService {
    trends: HashMap<IndustrySector, TrendSet>,
}

impl StaticTrendService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sector(mut self, sector: IndustrySector, trends: TrendSet) -> Self {
        self.trends.insert(sector, trends);
        self
    }

    pub fn seeded() -> Self {
        Self::new()
            .with_sector(
                IndustrySector::Technology,
                TrendSet::new(vec![
                    MarketTrend::new("ai_assistants", "AI assistants").with_relevance(92.0),
                    MarketTrend::new("interactive_demos", "Interactive demos").with_relevance(85.0),
                    MarketTrend::new("dark_mode", "Dark mode"),
                ]),
            )
            .with_sector(
                IndustrySector::Retail,
                TrendSet::new(vec![
                    MarketTrend::new("social_commerce", "Social commerce").with_relevance(90.0),
                    MarketTrend::new("one_click_checkout", "One-click checkout")
                        .with_relevance(88.0),
                    MarketTrend::new("video_hero", "Video hero sections").with_relevance(70.0),
                ]),
            )
            .with_sector(
                IndustrySector::Healthcare,
                TrendSet::new(vec![
                    MarketTrend::new("telehealth", "Telehealth booking").with_relevance(94.0),
                    MarketTrend::new("accessibility_first", "Accessibility first"),
                ]),
            )
    }
}

#[async_trait]
impl MarketTrendService for StaticTrendService {
    async fn trends(
        &self,
        sector: IndustrySector,
        _market: Option<&str>,
    ) -> Result<Option<TrendSet>, TrendError> {
        Ok(self.trends.get(&sector).cloned())
    }
}

/// Customizer that starts from the default bundle and applies brand colours and
/// the business name without calling any external service.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCustomizationService;

#[async_trait]
impl CustomizationService for DefaultCustomizationService {
    async fn customize(
        &self,
        _template: &Template,
        profile: &BusinessProfile,
        brand: Option<&BrandIdentity>,
    ) -> Result<CustomizationBundle, CustomizationError> {
        let mut bundle = CustomizationBundle::default_bundle();

        if let Some(brand) = brand {
            let defaults = bundle.palette.clone();
            let mut colors = brand.primary_colors.iter().cloned();
            bundle.palette = ColorPalette {
                primary: colors.next().unwrap_or(defaults.primary),
                secondary: colors.next().unwrap_or(defaults.secondary),
                accent: colors.next().unwrap_or(defaults.accent),
                ..defaults
            };
            if let Some(style) = &brand.style {
                bundle.imagery.style = format!("{style} photography");
            }
        }

        if !profile.name.trim().is_empty() {
            bundle.content.headline = format!("{}, built for what you do best", profile.name);
        }

        Ok(bundle)
    }
}

/// Predicts performance from the complexity tier and optimization flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicPerformancePredictor;

impl HeuristicPerformancePredictor {
    fn load_time_secs(tier: ComplexityTier) -> f64 {
        match tier {
            ComplexityTier::Simple => 1.2,
            ComplexityTier::Moderate => 1.8,
            ComplexityTier::Complex => 2.6,
            ComplexityTier::Enterprise => 3.4,
        }
    }
}

#[async_trait]
impl PerformancePredictor for HeuristicPerformancePredictor {
    async fn predict(
        &self,
        template: &Template,
        _profile: &BusinessProfile,
    ) -> Result<PerformanceMetrics, PredictionError> {
        let flags = template.optimization;
        let load_time_secs = Self::load_time_secs(template.complexity);

        let mobile_score: u8 = if flags.mobile { 90 } else { 60 };
        let accessibility_score: u8 = if flags.accessibility { 90 } else { 65 };
        let seo_score: u8 = if flags.seo { 88 } else { 60 };
        let speed_score = (100.0 - load_time_secs * 15.0).clamp(0.0, 100.0);

        let quality = (f64::from(mobile_score)
            + f64::from(accessibility_score)
            + f64::from(seo_score)
            + speed_score)
            / 4.0;

        Ok(PerformanceMetrics {
            load_time_secs,
            quality_score: quality.round() as u8,
            mobile_score,
            accessibility_score,
            seo_score,
        })
    }
}
