use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::form::lookup::LocationLookup;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub neighborhood: String,
}

impl Location {
    pub fn new(
        state: impl Into<String>,
        city: impl Into<String>,
        neighborhood: impl Into<String>,
    ) -> Self {
        Self {
            state: state.into(),
            city: city.into(),
            neighborhood: neighborhood.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty() && self.city.is_empty() && self.neighborhood.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationProgress {
    Idle,
    StateChosen,
    CityChosen,
    NeighborhoodChosen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationMode {
    #[default]
    List,
    CurrentLocation,
}

/// Cascading state → city → neighborhood selection plus the current-location tab.
///
/// Every mutating call returns the triple that should be reported upward.
#[derive(Clone)]
pub struct LocationSelection {
    lookup: Arc<dyn LocationLookup>,
    mode: LocationMode,
    manual: Location,
    current: Location,
}

impl LocationSelection {
    /// `current` is what the current-location tab shows until a detection
    /// result replaces it.
    pub fn new(lookup: Arc<dyn LocationLookup>, current: Location) -> Self {
        Self {
            lookup,
            mode: LocationMode::default(),
            manual: Location::default(),
            current,
        }
    }

    pub fn mode(&self) -> LocationMode {
        self.mode
    }

    pub fn manual(&self) -> &Location {
        &self.manual
    }

    pub fn current(&self) -> &Location {
        &self.current
    }

    pub fn progress(&self) -> LocationProgress {
        if self.manual.state.is_empty() {
            LocationProgress::Idle
        } else if self.manual.city.is_empty() {
            LocationProgress::StateChosen
        } else if self.manual.neighborhood.is_empty() {
            LocationProgress::CityChosen
        } else {
            LocationProgress::NeighborhoodChosen
        }
    }

    pub fn state_options(&self) -> Vec<String> {
        self.lookup.states()
    }

    pub fn city_options(&self) -> Vec<String> {
        if self.manual.state.is_empty() {
            return Vec::new();
        }
        self.lookup.cities(&self.manual.state)
    }

    pub fn neighborhood_options(&self) -> Vec<String> {
        if self.manual.city.is_empty() {
            return Vec::new();
        }
        self.lookup.neighborhoods(&self.manual.city)
    }

    pub fn select_state(&mut self, state: impl Into<String>) -> Location {
        self.manual.state = state.into();
        self.manual.city.clear();
        self.manual.neighborhood.clear();
        debug!(state = %self.manual.state, "location state selected");
        self.active()
    }

    pub fn select_city(&mut self, city: impl Into<String>) -> Location {
        self.manual.city = city.into();
        self.manual.neighborhood.clear();
        self.active()
    }

    pub fn select_neighborhood(&mut self, neighborhood: impl Into<String>) -> Location {
        self.manual.neighborhood = neighborhood.into();
        self.active()
    }

    /// Switching tabs always re-reports the triple of the newly visible tab.
    pub fn set_mode(&mut self, mode: LocationMode) -> Location {
        self.mode = mode;
        self.active()
    }

    /// Replaces the current location; returns the triple to report when the
    /// current-location tab is visible.
    pub fn resolve_detected(&mut self, location: Location) -> Option<Location> {
        self.current = location;
        (self.mode == LocationMode::CurrentLocation).then(|| self.active())
    }

    pub fn active(&self) -> Location {
        match self.mode {
            LocationMode::List => self.manual.clone(),
            LocationMode::CurrentLocation => self.current.clone(),
        }
    }
}
