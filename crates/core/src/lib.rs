pub mod config;
pub mod domain;
pub mod errors;
pub mod matching;
pub mod ports;
pub mod telemetry;

pub use config::{AppConfig, LoadOptions};
pub use domain::customization::CustomizationBundle;
pub use domain::market::{MarketTrend, TrendSet};
pub use domain::profile::{BrandIdentity, BusinessProfile};
pub use domain::template::{Template, TemplateId};
pub use errors::{ApplicationError, DomainError};
pub use matching::{
    PipelineCollaborators, Recommendation, RecommendationPipeline, RecommendationRequest,
    TemplateMatcher,
};
pub use ports::{
    CatalogError, CustomizationError, CustomizationService, MarketTrendService,
    PerformancePredictor, PredictionError, TemplateCatalog, TrendError,
};
