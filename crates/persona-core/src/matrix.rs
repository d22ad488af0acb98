//! Named, column-ordered feature matrix shared by pair tables and classifiers.

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FeatureMatrix {
    names: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    /// Build a matrix, checking every row against the column count.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] when a row width differs from `names.len()`.
    pub fn new(names: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self, CoreError> {
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != names.len())
        {
            return Err(CoreError::Validation(format!(
                "row {index} has {} values, expected {}",
                row.len(),
                names.len()
            )));
        }
        Ok(Self { names, rows })
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.names.len()
    }

    /// Project onto the named columns, in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] for a name that is not a column.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Self, CoreError> {
        let columns = names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.names
                    .iter()
                    .position(|column| column == name)
                    .ok_or_else(|| CoreError::Validation(format!("unknown feature column '{name}'")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let rows = self
            .rows
            .iter()
            .map(|row| columns.iter().map(|&column| row[column]).collect())
            .collect();

        Ok(Self {
            names: names.iter().map(|name| name.as_ref().to_string()).collect(),
            rows,
        })
    }

    /// Keep only the given rows, in the given order.
    #[must_use]
    pub fn subset(&self, indices: &[usize]) -> Self {
        Self {
            names: self.names.clone(),
            rows: indices
                .iter()
                .filter_map(|&index| self.rows.get(index).cloned())
                .collect(),
        }
    }
}
