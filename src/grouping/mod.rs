// In: src/grouping/mod.rs

//! Hash-based multi-key grouping and the aggregate reducers that consume it.
//!
//! A [`Grouping`] is built once by [`group_by`] and can feed any number of
//! aggregate calls. Groups are kept in first-seen order, and each group's key
//! values are captured when the group is created, so every aggregate sees the
//! same groups in the same order.

pub mod aggregate;
pub mod key;

pub use aggregate::{
    aggregate_count, aggregate_count_with_config, aggregate_mean, aggregate_sum, group_by,
};
pub use key::KeyScalar;

use crate::bridge::Value;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::table::Table;
use crate::types::ColumnType;

/// One group: its captured key tuple and its member rows in ascending order.
#[derive(Debug, Clone)]
pub(crate) struct Group {
    pub(crate) keys: Vec<KeyScalar>,
    pub(crate) rows: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct Grouping {
    /// Shares the source table's chunks, so row indices stay valid.
    pub(crate) table: Table,
    pub(crate) key_names: Vec<String>,
    pub(crate) key_types: Vec<ColumnType>,
    pub(crate) groups: Vec<Group>,
}

impl Grouping {
    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn key_names(&self) -> Vec<&str> {
        self.key_names.iter().map(String::as_str).collect()
    }

    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    /// Row indices of group `i` into [`Grouping::table`].
    pub fn group_rows(&self, i: usize) -> Option<&[usize]> {
        self.groups.get(i).map(|g| g.rows.as_slice())
    }

    /// The captured key values of group `i`, in key order.
    pub fn group_keys(&self, i: usize) -> Option<Vec<Value>> {
        self.groups.get(i).map(|g| {
            g.keys
                .iter()
                .zip(&self.key_types)
                .map(|(key, &dtype)| key.to_value(dtype))
                .collect()
        })
    }

    pub fn count(&self) -> Result<Table> {
        aggregate_count(self)
    }

    pub fn count_with_config(&self, config: &EngineConfig) -> Result<Table> {
        aggregate_count_with_config(self, config)
    }

    pub fn sum(&self, target: &str) -> Result<Table> {
        aggregate_sum(self, target)
    }

    pub fn mean(&self, target: &str) -> Result<Table> {
        aggregate_mean(self, target)
    }
}

#[cfg(test)]
mod tests;
