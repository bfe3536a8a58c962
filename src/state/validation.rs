use std::collections::{HashMap, HashSet};

/// Per-node error bookkeeping. An error is only shown once its node has been
/// touched, either by focus leaving it or by a submit attempt.
#[derive(Debug, Default, Clone)]
pub struct ValidationState {
    errors: HashMap<String, String>,
    touched: HashSet<String>,
}

impl ValidationState {
    pub fn set_error(&mut self, id: impl Into<String>, error: impl Into<String>) {
        self.errors.insert(id.into(), error.into());
    }

    pub fn clear_error(&mut self, id: &str) {
        self.errors.remove(id);
    }

    pub fn touch(&mut self, id: impl Into<String>) {
        self.touched.insert(id.into());
    }

    pub fn is_touched(&self, id: &str) -> bool {
        self.touched.contains(id)
    }

    pub fn visible_error(&self, id: &str) -> Option<&str> {
        if !self.is_touched(id) {
            return None;
        }
        self.errors.get(id).map(String::as_str)
    }

    pub fn visible_errors(&self) -> HashMap<String, String> {
        self.errors
            .iter()
            .filter(|(id, _)| self.touched.contains(id.as_str()))
            .map(|(id, error)| (id.clone(), error.clone()))
            .collect()
    }
}
