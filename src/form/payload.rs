use serde::Serialize;

use crate::core::value::Value;
use crate::form::attributes::Attributes;
use crate::form::location::Location;
use crate::form::photo::PhotoRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Category,
    Attributes,
    Description,
    Price,
    Photos,
    Location,
    User,
}

/// A value reported by a section to the aggregator: `(field, value)`, where
/// `field` is `None` for sections that report a single value.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionChange {
    pub section: Section,
    pub field: Option<String>,
    pub value: Value,
}

impl SectionChange {
    pub fn new(section: Section, field: Option<String>, value: Value) -> Self {
        Self {
            section,
            field,
            value,
        }
    }

    pub fn whole(section: Section, value: impl Into<Value>) -> Self {
        Self::new(section, None, value.into())
    }

    pub fn field(section: Section, field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(section, Some(field.into()), value.into())
    }
}

/// Where a widget reports its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeTarget {
    section: Section,
    field: Option<String>,
}

impl ChangeTarget {
    pub fn whole(section: Section) -> Self {
        Self {
            section,
            field: None,
        }
    }

    pub fn field(section: Section, field: impl Into<String>) -> Self {
        Self {
            section,
            field: Some(field.into()),
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn change(&self, value: impl Into<Value>) -> SectionChange {
        SectionChange::new(self.section, self.field.clone(), value.into())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormPayload {
    pub category: String,
    pub title: String,
    pub description: String,
    pub price: String,
    pub photos: Vec<PhotoRef>,
    pub attributes: Attributes,
    pub location: Location,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserDetails {
    pub name: String,
    pub phone: String,
}
