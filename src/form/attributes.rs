use indexmap::IndexMap;
use serde::Serialize;

pub const PROPERTY_TYPES: &[&str] = &[
    "Flats / Apartments",
    "Independent / Builder Floors",
    "Farm House",
    "House & Villa",
];
pub const ROOM_COUNTS: &[&str] = &["1", "2", "3", "4", "4+"];
pub const FURNISHING: &[&str] = &["Furnished", "Semi-Furnished", "Unfurnished"];
pub const PROJECT_STATUS: &[&str] = &["New Launch", "Ready to Move", "Under Construction"];
pub const LISTED_BY: &[&str] = &["Builder", "Dealer", "Owner"];
pub const CAR_PARKING: &[&str] = &["0", "1", "2", "3", "3+"];
pub const FACING: &[&str] = &[
    "North",
    "South",
    "East",
    "West",
    "North-East",
    "North-West",
    "South-East",
    "South-West",
];

pub const PROJECT_NAME_MAX: usize = 70;

/// How an attribute is captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// Row of option buttons.
    Choice,
    /// Dropdown with a "Select ..." placeholder.
    Dropdown,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKey {
    PropertyType,
    Bhk,
    Bathrooms,
    Furnishing,
    ProjectStatus,
    ListedBy,
    SuperBuiltupArea,
    CarpetArea,
    Maintenance,
    TotalFloors,
    FloorNo,
    CarParking,
    Facing,
    ProjectName,
}

impl AttributeKey {
    /// Display order of the attribute section.
    pub const ALL: [AttributeKey; 14] = [
        Self::PropertyType,
        Self::Bhk,
        Self::Bathrooms,
        Self::Furnishing,
        Self::ProjectStatus,
        Self::ListedBy,
        Self::SuperBuiltupArea,
        Self::CarpetArea,
        Self::Maintenance,
        Self::TotalFloors,
        Self::FloorNo,
        Self::CarParking,
        Self::Facing,
        Self::ProjectName,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::PropertyType => "propertyType",
            Self::Bhk => "bhk",
            Self::Bathrooms => "bathrooms",
            Self::Furnishing => "furnishing",
            Self::ProjectStatus => "projectStatus",
            Self::ListedBy => "listedBy",
            Self::SuperBuiltupArea => "superBuiltupArea",
            Self::CarpetArea => "carpetArea",
            Self::Maintenance => "maintenance",
            Self::TotalFloors => "totalFloors",
            Self::FloorNo => "floorNo",
            Self::CarParking => "carParking",
            Self::Facing => "facing",
            Self::ProjectName => "projectName",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::PropertyType => "Type",
            Self::Bhk => "BHK",
            Self::Bathrooms => "Bathrooms",
            Self::Furnishing => "Furnishing",
            Self::ProjectStatus => "Project Status",
            Self::ListedBy => "Listed by",
            Self::SuperBuiltupArea => "Super Builtup area sqft",
            Self::CarpetArea => "Carpet Area sqft",
            Self::Maintenance => "Maintenance (Monthly)",
            Self::TotalFloors => "Total Floors",
            Self::FloorNo => "Floor No",
            Self::CarParking => "Car Parking",
            Self::Facing => "Facing",
            Self::ProjectName => "Project Name",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.name() == name)
    }

    pub fn is_required(self) -> bool {
        matches!(
            self,
            Self::PropertyType | Self::SuperBuiltupArea | Self::CarpetArea
        )
    }

    pub fn kind(self) -> AttributeKind {
        match self {
            Self::PropertyType
            | Self::Bhk
            | Self::Bathrooms
            | Self::Furnishing
            | Self::ProjectStatus
            | Self::ListedBy
            | Self::CarParking => AttributeKind::Choice,
            Self::Facing => AttributeKind::Dropdown,
            Self::SuperBuiltupArea
            | Self::CarpetArea
            | Self::Maintenance
            | Self::TotalFloors
            | Self::FloorNo
            | Self::ProjectName => AttributeKind::Text,
        }
    }

    pub fn options(self) -> &'static [&'static str] {
        match self {
            Self::PropertyType => PROPERTY_TYPES,
            Self::Bhk | Self::Bathrooms => ROOM_COUNTS,
            Self::Furnishing => FURNISHING,
            Self::ProjectStatus => PROJECT_STATUS,
            Self::ListedBy => LISTED_BY,
            Self::CarParking => CAR_PARKING,
            Self::Facing => FACING,
            _ => &[],
        }
    }

    pub fn max_len(self) -> Option<usize> {
        match self {
            Self::ProjectName => Some(PROJECT_NAME_MAX),
            _ => None,
        }
    }
}

/// Attribute name to value, in the order values were first reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Attributes(IndexMap<String, String>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Missing attributes read as the empty string.
    pub fn get(&self, name: &str) -> &str {
        self.0.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn value(&self, key: AttributeKey) -> &str {
        self.get(key.name())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{AttributeKey, AttributeKind, Attributes};

    #[test]
    fn names_round_trip_through_the_catalog() {
        for key in AttributeKey::ALL {
            assert_eq!(AttributeKey::from_name(key.name()), Some(key));
        }
        assert_eq!(AttributeKey::from_name("colour"), None);
    }

    #[test]
    fn only_type_and_areas_are_required() {
        let required: Vec<&str> = AttributeKey::ALL
            .into_iter()
            .filter(|key| key.is_required())
            .map(AttributeKey::name)
            .collect();
        assert_eq!(required, vec!["propertyType", "superBuiltupArea", "carpetArea"]);
    }

    #[test]
    fn choice_attributes_have_options() {
        for key in AttributeKey::ALL {
            let has_options = !key.options().is_empty();
            assert_eq!(has_options, key.kind() != AttributeKind::Text, "{}", key.name());
        }
    }

    #[test]
    fn missing_attributes_read_empty_and_updates_overwrite() {
        let mut attributes = Attributes::new();
        assert_eq!(attributes.value(AttributeKey::Bhk), "");
        attributes.set("bhk", "2");
        attributes.set("bhk", "3");
        assert_eq!(attributes.get("bhk"), "3");
        assert_eq!(attributes.len(), 1);
    }
}
