use std::{fmt, str};

use serde::{Deserialize, Serialize};

use crate::error::{Field, ModelError};

/// The kind tag of a diagram entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Class,
    Interface,
    Package,
}

impl EntityKind {
    /// The keyword that opens the generated declaration.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Package => "package",
        }
    }

    /// Classes and interfaces own members; packages own nested entities.
    pub fn holds_members(self) -> bool {
        !matches!(self, Self::Package)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl str::FromStr for EntityKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "class" => Ok(Self::Class),
            "interface" => Ok(Self::Interface),
            "package" => Ok(Self::Package),
            _ => Err(ModelError::validation(
                Field::Kind,
                format!("unknown entity kind `{s}`"),
            )),
        }
    }
}

/// The kind of a directed relationship between two entities.
///
/// Only [`RelationshipKind::Inheritance`] affects the generated declaration;
/// the other kinds show up as trace comments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipKind {
    #[default]
    Association,
    Aggregation,
    Composition,
    Inheritance,
}

impl RelationshipKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Association,
        Self::Aggregation,
        Self::Composition,
        Self::Inheritance,
    ];

    /// The capitalized name used in trace comments.
    pub fn name(self) -> &'static str {
        match self {
            Self::Association => "Association",
            Self::Aggregation => "Aggregation",
            Self::Composition => "Composition",
            Self::Inheritance => "Inheritance",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl str::FromStr for RelationshipKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                ModelError::validation(Field::Kind, format!("unknown relationship kind `{s}`"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_kind_keywords() {
        assert_eq!(EntityKind::Class.keyword(), "class");
        assert_eq!(EntityKind::Interface.to_string(), "interface");
        assert_eq!("package".parse::<EntityKind>().unwrap(), EntityKind::Package);
        assert!("struct".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_only_packages_reject_members() {
        assert!(EntityKind::Class.holds_members());
        assert!(EntityKind::Interface.holds_members());
        assert!(!EntityKind::Package.holds_members());
    }

    #[test]
    fn test_relationship_kind_parse_is_case_insensitive() {
        assert_eq!(
            "inheritance".parse::<RelationshipKind>().unwrap(),
            RelationshipKind::Inheritance
        );
        assert_eq!(
            "Composition".parse::<RelationshipKind>().unwrap(),
            RelationshipKind::Composition
        );
        let err = "dependency".parse::<RelationshipKind>().unwrap_err();
        assert_eq!(err.field(), Some(Field::Kind));
    }

    #[test]
    fn test_relationship_kind_display() {
        assert_eq!(RelationshipKind::Association.to_string(), "Association");
        assert_eq!(RelationshipKind::default(), RelationshipKind::Association);
    }
}
