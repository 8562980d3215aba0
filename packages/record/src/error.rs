//! Error types for field lookups.

/// Errors raised while looking fields up by tag annotation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// No field's annotation under `tag` equals `name`.
    #[error("no field tagged {tag}:\"{name}\"")]
    FieldNotFound { tag: String, name: String },

    /// A listing found no field annotated under `tag`.
    #[error("no fields carry a {tag} tag")]
    NoTaggedFields { tag: String },
}

impl IndexError {
    pub(crate) fn field_not_found(tag: &str, name: &str) -> Self {
        IndexError::FieldNotFound {
            tag: tag.to_string(),
            name: name.to_string(),
        }
    }

    pub(crate) fn no_tagged_fields(tag: &str) -> Self {
        IndexError::NoTaggedFields {
            tag: tag.to_string(),
        }
    }
}
