use crate::form::location::Location;
use crate::form::photo::PhotoRef;

/// A committed value travelling from a widget to the aggregator.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    None,
    Text(String),
    Photos(Vec<PhotoRef>),
    Location(Location),
}

impl Value {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Text(v) => v.is_empty(),
            Self::Photos(v) => v.is_empty(),
            Self::Location(v) => v.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Location> for Value {
    fn from(value: Location) -> Self {
        Self::Location(value)
    }
}

impl From<Vec<PhotoRef>> for Value {
    fn from(value: Vec<PhotoRef>) -> Self {
        Self::Photos(value)
    }
}
