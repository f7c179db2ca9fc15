//! Collaborator ports consumed by the recommendation pipeline.
//!
//! Retrieval, customization, performance prediction and market trends are the
//! only operations that may block; everything else in the engine is synchronous.

mod catalog;
mod reference;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::customization::CustomizationBundle;
use crate::domain::market::TrendSet;
use crate::domain::profile::{BrandIdentity, BusinessProfile, IndustrySector};
use crate::domain::template::{Template, TemplateId};
use crate::matching::PerformanceMetrics;

pub use catalog::InMemoryTemplateCatalog;
pub use reference::{
    DefaultCustomizationService, HeuristicPerformancePredictor, StaticTrendService,
};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("template `{0}` not found")]
    NotFound(TemplateId),
    #[error("template catalog unavailable: {0}")]
    Unavailable(String),
    #[error("template catalog data is malformed: {0}")]
    Malformed(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CustomizationError {
    #[error("customization service unavailable: {0}")]
    Unavailable(String),
    #[error("customization timed out after {0}ms")]
    Timeout(u64),
    #[error("customization response rejected: {0}")]
    Rejected(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PredictionError {
    #[error("performance predictor unavailable: {0}")]
    Unavailable(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TrendError {
    #[error("market trend service unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait TemplateCatalog: Send + Sync {
    /// Candidate templates for the profile, in catalog order.
    async fn candidates(&self, profile: &BusinessProfile) -> Result<Vec<Template>, CatalogError>;
    async fn get_by_id(&self, id: &TemplateId) -> Result<Template, CatalogError>;
}

#[async_trait]
pub trait CustomizationService: Send + Sync {
    async fn customize(
        &self,
        template: &Template,
        profile: &BusinessProfile,
        brand: Option<&BrandIdentity>,
    ) -> Result<CustomizationBundle, CustomizationError>;
}

#[async_trait]
pub trait PerformancePredictor: Send + Sync {
    async fn predict(
        &self,
        template: &Template,
        profile: &BusinessProfile,
    ) -> Result<PerformanceMetrics, PredictionError>;
}

#[async_trait]
pub trait MarketTrendService: Send + Sync {
    /// `Ok(None)` means no trend data exists, which is a valid state.
    async fn trends(
        &self,
        sector: IndustrySector,
        market: Option<&str>,
    ) -> Result<Option<TrendSet>, TrendError>;
}
