use std::{fmt, str};

use serde::{Deserialize, Serialize};

use crate::error::{Field, ModelError, require_text};

/// Access modifier of a member.
///
/// Parsing accepts exactly the keywords `public`, `private` and `protected`;
/// anything else is a [`ModelError::Validation`] on [`Field::Visibility`].
///
/// # Examples
///
/// ```
/// use umbra_core::semantic::Visibility;
///
/// let visibility: Visibility = "protected".parse().unwrap();
/// assert_eq!(visibility.symbol(), '#');
/// assert!("friend".parse::<Visibility>().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
    Protected,
}

impl Visibility {
    /// The keyword form, as emitted by code generation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Protected => "protected",
        }
    }

    /// The UML marker form.
    pub fn symbol(self) -> char {
        match self {
            Self::Public => '+',
            Self::Private => '-',
            Self::Protected => '#',
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl str::FromStr for Visibility {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            "protected" => Ok(Self::Protected),
            _ => Err(ModelError::validation(
                Field::Visibility,
                format!("`{s}` is not one of public, private, protected"),
            )),
        }
    }
}

/// A typed field of a class or interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    visibility: Visibility,
    name: String,
    data_type: String,
}

impl Attribute {
    /// Returns the visibility.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Returns the trimmed name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the trimmed data type.
    pub fn data_type(&self) -> &str {
        &self.data_type
    }
}

/// A behavior of a class or interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    visibility: Visibility,
    name: String,
    return_type: String,
}

impl Operation {
    /// Returns the visibility.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Returns the trimmed name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the trimmed return type.
    pub fn return_type(&self) -> &str {
        &self.return_type
    }
}

/// An attribute or operation owned by an entity.
///
/// Constructors and setters validate their input; a rejected value leaves
/// the member untouched.
///
/// # Examples
///
/// ```
/// use umbra_core::semantic::{Member, Visibility};
///
/// let name = Member::attribute(Visibility::Public, "name", "String").unwrap();
/// let speak = Member::operation(Visibility::Public, "speak", "void").unwrap();
///
/// assert_eq!(name.to_string(), "+ name: String");
/// assert_eq!(speak.to_string(), "+ speak(): void");
/// assert!(Member::attribute(Visibility::Private, "  ", "int").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Attribute(Attribute),
    Operation(Operation),
}

impl Member {
    /// Creates a validated attribute.
    pub fn attribute(
        visibility: Visibility,
        name: &str,
        data_type: &str,
    ) -> Result<Self, ModelError> {
        Ok(Self::Attribute(Attribute {
            visibility,
            name: require_text(Field::Name, name)?,
            data_type: require_text(Field::DataType, data_type)?,
        }))
    }

    /// Creates a validated operation.
    pub fn operation(
        visibility: Visibility,
        name: &str,
        return_type: &str,
    ) -> Result<Self, ModelError> {
        Ok(Self::Operation(Operation {
            visibility,
            name: require_text(Field::Name, name)?,
            return_type: require_text(Field::ReturnType, return_type)?,
        }))
    }

    /// Returns the visibility of either variant.
    pub fn visibility(&self) -> Visibility {
        match self {
            Self::Attribute(attribute) => attribute.visibility,
            Self::Operation(operation) => operation.visibility,
        }
    }

    /// Returns the name of either variant.
    pub fn name(&self) -> &str {
        match self {
            Self::Attribute(attribute) => &attribute.name,
            Self::Operation(operation) => &operation.name,
        }
    }

    /// Returns the data type of an attribute or the return type of an operation.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Attribute(attribute) => &attribute.data_type,
            Self::Operation(operation) => &operation.return_type,
        }
    }

    /// Returns the field that [`Member::type_name`] maps to.
    pub fn type_field(&self) -> Field {
        match self {
            Self::Attribute(_) => Field::DataType,
            Self::Operation(_) => Field::ReturnType,
        }
    }

    /// Returns `true` for operations.
    pub fn is_operation(&self) -> bool {
        matches!(self, Self::Operation(_))
    }

    /// Sets the visibility from its keyword form.
    pub fn set_visibility(&mut self, marker: &str) -> Result<(), ModelError> {
        let visibility: Visibility = marker.parse()?;
        match self {
            Self::Attribute(attribute) => attribute.visibility = visibility,
            Self::Operation(operation) => operation.visibility = visibility,
        }
        Ok(())
    }

    /// Renames the member.
    pub fn rename(&mut self, name: &str) -> Result<(), ModelError> {
        let name = require_text(Field::Name, name)?;
        match self {
            Self::Attribute(attribute) => attribute.name = name,
            Self::Operation(operation) => operation.name = name,
        }
        Ok(())
    }

    /// Replaces the data type (attribute) or return type (operation).
    pub fn set_type_name(&mut self, type_name: &str) -> Result<(), ModelError> {
        let type_name = require_text(self.type_field(), type_name)?;
        match self {
            Self::Attribute(attribute) => attribute.data_type = type_name,
            Self::Operation(operation) => operation.return_type = type_name,
        }
        Ok(())
    }
}

/// Renders the UML member notation accepted by `umbra-parser`.
impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attribute(attribute) => write!(
                f,
                "{} {}: {}",
                attribute.visibility.symbol(),
                attribute.name,
                attribute.data_type
            ),
            Self::Operation(operation) => write!(
                f,
                "{} {}(): {}",
                operation.visibility.symbol(),
                operation.name,
                operation.return_type
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_round_trip() {
        for keyword in ["public", "private", "protected"] {
            let visibility: Visibility = keyword.parse().unwrap();
            assert_eq!(visibility.as_str(), keyword);
        }
    }

    #[test]
    fn test_visibility_rejects_markers_and_case() {
        for marker in ["+", "Public", " public", "internal", ""] {
            let err = marker.parse::<Visibility>().unwrap_err();
            assert_eq!(err.field(), Some(Field::Visibility), "marker {marker:?}");
        }
    }

    #[test]
    fn test_attribute_trims_fields() {
        let member = Member::attribute(Visibility::Private, "  age ", " int ").unwrap();
        assert_eq!(member.name(), "age");
        assert_eq!(member.type_name(), "int");
        assert!(!member.is_operation());
    }

    #[test]
    fn test_operation_requires_return_type() {
        let err = Member::operation(Visibility::Public, "run", " ").unwrap_err();
        assert_eq!(err.field(), Some(Field::ReturnType));
    }

    #[test]
    fn test_attribute_requires_name_before_type() {
        let err = Member::attribute(Visibility::Public, "", "").unwrap_err();
        assert_eq!(err.field(), Some(Field::Name));
    }

    #[test]
    fn test_set_visibility_keeps_prior_value_on_error() {
        let mut member = Member::attribute(Visibility::Protected, "id", "long").unwrap();
        assert!(member.set_visibility("package").is_err());
        assert_eq!(member.visibility(), Visibility::Protected);

        member.set_visibility("private").unwrap();
        assert_eq!(member.visibility(), Visibility::Private);
    }

    #[test]
    fn test_rename_and_set_type() {
        let mut member = Member::operation(Visibility::Public, "speak", "void").unwrap();
        member.rename("shout").unwrap();
        member.set_type_name("String").unwrap();
        assert_eq!(member.to_string(), "+ shout(): String");

        let err = member.set_type_name("").unwrap_err();
        assert_eq!(err.field(), Some(Field::ReturnType));
        assert_eq!(member.type_name(), "String");
    }

    #[test]
    fn test_display_notation() {
        let member = Member::attribute(Visibility::Protected, "items", "List<Item>").unwrap();
        assert_eq!(member.to_string(), "# items: List<Item>");
    }
}
