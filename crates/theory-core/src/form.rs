//! Form model: the values of every field on a theory task request.
//!
//! Endpoint fields follow the `<endpoint><Role>` naming convention
//! (`fromLocation`, `toDepartment`, …). That name is what configuration
//! files use to address a field, see [`FieldId::from_str`].

use std::fmt;
use std::str::FromStr;

/// Which end of the task a location field describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Endpoint {
    From,
    To,
}

/// The part of a location an endpoint field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Location,
    Building,
    Department,
}

/// Identifies one field of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldId {
    Name,
    Extension,
    Endpoint(Endpoint, Role),
    Category,
    Description,
}

/// Tab order of the form.
pub const FIELD_ORDER: [FieldId; 10] = [
    FieldId::Name,
    FieldId::Extension,
    FieldId::Endpoint(Endpoint::From, Role::Location),
    FieldId::Endpoint(Endpoint::From, Role::Building),
    FieldId::Endpoint(Endpoint::From, Role::Department),
    FieldId::Endpoint(Endpoint::To, Role::Location),
    FieldId::Endpoint(Endpoint::To, Role::Building),
    FieldId::Endpoint(Endpoint::To, Role::Department),
    FieldId::Category,
    FieldId::Description,
];

impl FieldId {
    /// Position of this field in [`FIELD_ORDER`].
    pub fn index(self) -> usize {
        FIELD_ORDER
            .iter()
            .position(|f| *f == self)
            .unwrap_or_default()
    }

    /// Human-readable label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            FieldId::Name => "Name",
            FieldId::Extension => "Extension",
            FieldId::Endpoint(_, Role::Location) => "Location",
            FieldId::Endpoint(_, Role::Building) => "Building",
            FieldId::Endpoint(_, Role::Department) => "Department",
            FieldId::Category => "Category",
            FieldId::Description => "Description",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldId::Name => write!(f, "name"),
            FieldId::Extension => write!(f, "extension"),
            FieldId::Category => write!(f, "category"),
            FieldId::Description => write!(f, "description"),
            FieldId::Endpoint(endpoint, role) => {
                let endpoint = match endpoint {
                    Endpoint::From => "from",
                    Endpoint::To => "to",
                };
                let role = match role {
                    Role::Location => "Location",
                    Role::Building => "Building",
                    Role::Department => "Department",
                };
                write!(f, "{endpoint}{role}")
            }
        }
    }
}

/// Returned when a configuration names a field that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown form field: {0:?}")]
pub struct FieldNameError(pub String);

impl FromStr for FieldId {
    type Err = FieldNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FIELD_ORDER
            .iter()
            .copied()
            .find(|f| f.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FieldNameError(s.to_string()))
    }
}

impl<'de> serde::Deserialize<'de> for FieldId {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

/// Current value of every field.
///
/// A value is *chosen* when it was taken from a record (a commit or a
/// companion fill) rather than typed. Only chosen values narrow other
/// fields' searches; typing into a field clears the mark.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    values: [String; FIELD_ORDER.len()],
    chosen: [bool; FIELD_ORDER.len()],
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FieldId) -> &str {
        &self.values[field.index()]
    }

    /// Typed text. Clears the chosen mark.
    pub fn set(&mut self, field: FieldId, value: impl Into<String>) {
        self.values[field.index()] = value.into();
        self.chosen[field.index()] = false;
    }

    /// A value taken from a record.
    pub fn choose(&mut self, field: FieldId, value: impl Into<String>) {
        self.values[field.index()] = value.into();
        self.chosen[field.index()] = true;
    }

    /// The field's value if it was chosen from a record and is not blank.
    pub fn chosen(&self, field: FieldId) -> Option<&str> {
        (self.chosen[field.index()] && !self.is_empty(field)).then(|| self.get(field))
    }

    /// A field counts as empty when it holds only whitespace.
    pub fn is_empty(&self, field: FieldId) -> bool {
        self.get(field).trim().is_empty()
    }

    /// Write `value` only if the field is currently empty. Never overwrites
    /// what the user typed. Returns whether the field was written.
    pub fn fill_if_empty(&mut self, field: FieldId, value: &str) -> bool {
        if value.trim().is_empty() || !self.is_empty(field) {
            return false;
        }
        self.choose(field, value);
        true
    }

    /// Start a new task: blank every field.
    pub fn clear(&mut self) {
        self.values.iter_mut().for_each(String::clear);
        self.chosen = Default::default();
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &str)> {
        FIELD_ORDER
            .iter()
            .copied()
            .zip(self.values.iter().map(String::as_str))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
