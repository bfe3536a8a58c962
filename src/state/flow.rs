use crate::state::step::{Step, StepStatus};

/// Ordered steps with a cursor. Steps never block navigation; a step counts
/// as done once it has been left in either direction.
pub struct Flow {
    steps: Vec<Step>,
    current: usize,
    visited: Vec<bool>,
}

impl Flow {
    pub fn new(steps: Vec<Step>) -> Self {
        let visited = vec![false; steps.len()];
        Self {
            steps,
            current: 0,
            visited,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn steps_mut(&mut self) -> &mut [Step] {
        &mut self.steps
    }

    pub fn status_at(&self, index: usize) -> StepStatus {
        if index == self.current {
            StepStatus::Active
        } else if self.visited.get(index).copied().unwrap_or(false) {
            StepStatus::Done
        } else {
            StepStatus::Pending
        }
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.steps.len()
    }

    pub fn has_prev(&self) -> bool {
        self.current > 0
    }

    pub fn advance(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.leave_current();
        self.current += 1;
        true
    }

    pub fn back(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.leave_current();
        self.current -= 1;
        true
    }

    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.steps.len() || index == self.current {
            return false;
        }
        self.leave_current();
        self.current = index;
        true
    }

    pub fn current_step(&self) -> &Step {
        &self.steps[self.current]
    }

    pub fn current_step_mut(&mut self) -> &mut Step {
        &mut self.steps[self.current]
    }

    fn leave_current(&mut self) {
        if let Some(visited) = self.visited.get_mut(self.current) {
            *visited = true;
        }
    }
}
