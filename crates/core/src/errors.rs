use thiserror::Error;

use crate::domain::template::TemplateId;
use crate::ports::CatalogError;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid business profile: {0}")]
    InvalidProfile(String),
    #[error("invalid template `{template_id}`: {reason}")]
    InvalidTemplate { template_id: TemplateId, reason: String },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("template `{0}` not found")]
    TemplateNotFound(TemplateId),
    #[error("catalog failure: {0}")]
    Catalog(String),
}

impl From<CatalogError> for ApplicationError {
    fn from(error: CatalogError) -> Self {
        match error {
            CatalogError::NotFound(id) => Self::TemplateNotFound(id),
            other => Self::Catalog(other.to_string()),
        }
    }
}

impl ApplicationError {
    /// Whether the failure originates outside this process.
    pub fn is_external(&self) -> bool {
        matches!(self, Self::Catalog(_))
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::template::TemplateId;
    use crate::errors::{ApplicationError, DomainError};
    use crate::ports::CatalogError;

    #[test]
    fn domain_error_converts_into_application_error() {
        let error = ApplicationError::from(DomainError::InvalidTemplate {
            template_id: TemplateId::new("tpl-1"),
            reason: "template name is empty".to_owned(),
        });

        assert!(matches!(error, ApplicationError::Domain(DomainError::InvalidTemplate { .. })));
        assert_eq!(error.to_string(), "invalid template `tpl-1`: template name is empty");
        assert!(!error.is_external());
    }

    #[test]
    fn catalog_errors_are_external() {
        let error = ApplicationError::Catalog("connection refused".to_owned());
        assert!(error.is_external());
        assert_eq!(error.to_string(), "catalog failure: connection refused");
    }

    #[test]
    fn missing_templates_keep_their_id() {
        let error = ApplicationError::from(CatalogError::NotFound(TemplateId::new("tpl-9")));
        assert_eq!(error, ApplicationError::TemplateNotFound(TemplateId::new("tpl-9")));

        let error = ApplicationError::from(CatalogError::Unavailable("timeout".to_owned()));
        assert_eq!(error.to_string(), "catalog failure: template catalog unavailable: timeout");
    }
}
