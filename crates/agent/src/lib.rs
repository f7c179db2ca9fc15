//! Model-backed customization for template recommendations.
//!
//! The model only drafts palette, typography and copy. Every draft passes
//! through [`guardrails::BundleGuardrails`] before it is attached to a
//! recommendation, and any failure is reported as a
//! [`sitefit_core::CustomizationError`] so the pipeline can fall back to the
//! default bundle.

pub mod customization;
pub mod guardrails;
pub mod llm;

pub use customization::LlmCustomizationService;
pub use guardrails::{BundleGuardrails, GuardrailDecision};
pub use llm::LlmClient;
