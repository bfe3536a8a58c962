use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Read-only source of the cascading location options.
pub trait LocationLookup: Send + Sync {
    fn states(&self) -> Vec<String>;
    fn cities(&self, state: &str) -> Vec<String>;
    fn neighborhoods(&self, city: &str) -> Vec<String>;
}

/// Lookup backed by in-memory tables, usually loaded from config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticLookup {
    #[serde(default)]
    pub cities_by_state: IndexMap<String, Vec<String>>,
    #[serde(default)]
    pub neighborhoods_by_city: IndexMap<String, Vec<String>>,
}

impl StaticLookup {
    pub fn new(
        cities_by_state: IndexMap<String, Vec<String>>,
        neighborhoods_by_city: IndexMap<String, Vec<String>>,
    ) -> Self {
        Self {
            cities_by_state,
            neighborhoods_by_city,
        }
    }
}

impl Default for StaticLookup {
    fn default() -> Self {
        let cities_by_state = table(&[
            ("Delhi", &["Delhi"]),
            (
                "Uttar Pradesh",
                &["Allahabad", "Agra", "Lucknow", "Kanpur", "Varanasi", "Noida", "Ghaziabad"],
            ),
            ("Maharashtra", &["Mumbai", "Pune", "Nagpur", "Thane", "Nashik"]),
            ("Karnataka", &["Bangalore", "Mysore", "Hubli", "Mangalore"]),
            ("Tamil Nadu", &["Chennai", "Coimbatore", "Madurai", "Salem"]),
            ("Telangana", &["Hyderabad", "Warangal", "Nizamabad"]),
        ]);
        let neighborhoods_by_city = table(&[
            (
                "Delhi",
                &["Connaught Place", "Karol Bagh", "Dwarka", "Rohini", "Meera Bagh"],
            ),
            (
                "Allahabad",
                &["Civil Lines", "Georgetown", "Neta Nagar", "Katra", "Tagore Town"],
            ),
            ("Mumbai", &["Andheri", "Bandra", "Juhu", "Colaba", "Worli"]),
            (
                "Bangalore",
                &["Koramangala", "Indiranagar", "Whitefield", "Jayanagar", "JP Nagar"],
            ),
            (
                "Hyderabad",
                &["Banjara Hills", "Jubilee Hills", "Hitech City", "Gachibowli", "Secunderabad"],
            ),
        ]);
        Self::new(cities_by_state, neighborhoods_by_city)
    }
}

impl LocationLookup for StaticLookup {
    fn states(&self) -> Vec<String> {
        self.cities_by_state.keys().cloned().collect()
    }

    fn cities(&self, state: &str) -> Vec<String> {
        self.cities_by_state.get(state).cloned().unwrap_or_default()
    }

    fn neighborhoods(&self, city: &str) -> Vec<String> {
        self.neighborhoods_by_city
            .get(city)
            .cloned()
            .unwrap_or_default()
    }
}

fn table(rows: &[(&str, &[&str])]) -> IndexMap<String, Vec<String>> {
    rows.iter()
        .map(|(key, values)| {
            (
                key.to_string(),
                values.iter().map(|value| value.to_string()).collect(),
            )
        })
        .collect()
}
