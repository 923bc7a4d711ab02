//! Iteration budget value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Ceiling on model-call rounds for one loop run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct IterationBudget(NonZeroUsize);

impl IterationBudget {
    pub const DEFAULT: usize = 5;

    pub fn new(max_iterations: usize) -> Result<Self, DomainError> {
        NonZeroUsize::new(max_iterations)
            .map(Self)
            .ok_or(DomainError::ZeroBudget)
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }
}

impl Default for IterationBudget {
    fn default() -> Self {
        Self(NonZeroUsize::MIN.saturating_add(Self::DEFAULT - 1))
    }
}

impl TryFrom<usize> for IterationBudget {
    type Error = DomainError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<IterationBudget> for usize {
    fn from(budget: IterationBudget) -> Self {
        budget.get()
    }
}

impl std::fmt::Display for IterationBudget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
