//! Error taxonomy for model mutations and queries.
//!
//! Every rejected mutation returns a [`ModelError`]. Both variants carry
//! enough context (the offending field, the element id) for a caller to
//! build an actionable message, and neither leaves partial state behind.

use std::fmt;

use thiserror::Error;

use crate::identifier::{EntityId, MemberId, RelationshipId};

/// The user-facing field a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Name,
    DataType,
    ReturnType,
    Visibility,
    Kind,
    Nesting,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Title => "title",
            Self::Name => "name",
            Self::DataType => "data type",
            Self::ReturnType => "return type",
            Self::Visibility => "visibility",
            Self::Kind => "kind",
            Self::Nesting => "nesting",
        };
        f.write_str(name)
    }
}

/// A reference to a model element, used for error context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementRef {
    Entity(EntityId),
    Member { entity: EntityId, member: MemberId },
    Relationship(RelationshipId),
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entity(id) => write!(f, "{id}"),
            Self::Member { entity, member } => write!(f, "{member} of {entity}"),
            Self::Relationship(id) => write!(f, "{id}"),
        }
    }
}

impl From<EntityId> for ElementRef {
    fn from(id: EntityId) -> Self {
        Self::Entity(id)
    }
}

impl From<RelationshipId> for ElementRef {
    fn from(id: RelationshipId) -> Self {
        Self::Relationship(id)
    }
}

/// Errors raised by model mutations and lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A field value violates the model invariants; nothing was changed.
    #[error("invalid {field}{}: {reason}", subject_suffix(.subject))]
    Validation {
        field: Field,
        subject: Option<ElementRef>,
        reason: String,
    },

    /// The referenced element does not exist.
    #[error("{0} does not exist")]
    NotFound(ElementRef),
}

fn subject_suffix(subject: &Option<ElementRef>) -> String {
    subject
        .map(|subject| format!(" of {subject}"))
        .unwrap_or_default()
}

impl ModelError {
    /// Creates a validation error without an element subject.
    pub fn validation(field: Field, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            subject: None,
            reason: reason.into(),
        }
    }

    /// Attaches the element a validation error refers to.
    ///
    /// Not-found errors are returned unchanged.
    pub fn with_subject(self, element: impl Into<ElementRef>) -> Self {
        match self {
            Self::Validation { field, reason, .. } => Self::Validation {
                field,
                subject: Some(element.into()),
                reason,
            },
            other => other,
        }
    }

    /// Creates a not-found error for the given element.
    pub fn not_found(element: impl Into<ElementRef>) -> Self {
        Self::NotFound(element.into())
    }

    /// Returns `true` for validation failures.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Returns `true` for lookups of missing elements.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns the rejected field of a validation failure.
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::Validation { field, .. } => Some(*field),
            Self::NotFound(_) => None,
        }
    }
}

/// Trims `value` and rejects it when nothing is left.
///
/// # Examples
///
/// ```
/// use umbra_core::error::{Field, require_text};
///
/// assert_eq!(require_text(Field::Name, "  speak ").unwrap(), "speak");
/// assert!(require_text(Field::Name, "   ").is_err());
/// ```
pub fn require_text(field: Field, value: &str) -> Result<String, ModelError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ModelError::validation(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}
