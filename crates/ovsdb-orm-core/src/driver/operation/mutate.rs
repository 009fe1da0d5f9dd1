use super::Operation;
use crate::driver::{Condition, Mutation};

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mutate {
    pub table: String,

    #[serde(rename = "where")]
    pub conditions: Vec<Condition>,

    /// Deltas applied, in order, to every matching row
    pub mutations: Vec<Mutation>,
}

impl From<Mutate> for Operation {
    fn from(value: Mutate) -> Self {
        Self::Mutate(value)
    }
}
