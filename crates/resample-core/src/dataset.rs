//! Immutable tabular container for resampling
//!
//! A [`Dataset`] stores named numeric columns of equal length plus an optional
//! group key column. The schema is validated once at construction, so
//! everything downstream (resamplers, statistics) can index columns without
//! re-checking shape or finiteness.
//!
//! Samples produced by resampling are themselves datasets built through
//! [`Dataset::take`]; they share the source schema and group labels.

use crate::{Error, Result};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// One row of a dataset: column name to value, plus an optional group label
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: BTreeMap<String, f64>,
    group: Option<String>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column value to the record
    pub fn with_value(mut self, column: impl Into<String>, value: f64) -> Self {
        self.values.insert(column.into(), value);
        self
    }

    /// Attach a group label to the record
    pub fn with_group(mut self, label: impl Into<String>) -> Self {
        self.group = Some(label.into());
        self
    }

    /// Value of a column, if present
    pub fn get(&self, column: &str) -> Option<f64> {
        self.values.get(column).copied()
    }

    /// Group label, if any
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }
}

/// Group partition of a dataset
///
/// Group ids index `labels`, which are ordered by first appearance in the
/// source dataset. Samples taken from a dataset share the same label table.
#[derive(Debug, Clone, PartialEq)]
struct GroupIndex {
    key: String,
    labels: Arc<Vec<String>>,
    assignment: Vec<usize>,
    members: Vec<Vec<usize>>,
}

impl GroupIndex {
    fn from_labels(key: String, row_labels: Vec<String>) -> Self {
        let mut ids: HashMap<String, usize> = HashMap::new();
        let mut labels = Vec::new();
        let mut assignment = Vec::with_capacity(row_labels.len());

        for label in row_labels {
            let next_id = labels.len();
            let id = *ids.entry(label.clone()).or_insert_with(|| {
                labels.push(label);
                next_id
            });
            assignment.push(id);
        }

        Self::from_assignment(key, Arc::new(labels), assignment)
    }

    fn from_assignment(key: String, labels: Arc<Vec<String>>, assignment: Vec<usize>) -> Self {
        let mut members = vec![Vec::new(); labels.len()];
        for (row, &id) in assignment.iter().enumerate() {
            members[id].push(row);
        }
        Self {
            key,
            labels,
            assignment,
            members,
        }
    }
}

/// A group of rows sharing one label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Group<'a> {
    /// Group label
    pub label: &'a str,
    /// Row indices belonging to the group, ascending
    pub members: &'a [usize],
}

impl Group<'_> {
    /// Number of rows in the group
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the group has no rows
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Immutable column-oriented dataset
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
    n_rows: usize,
    groups: Option<GroupIndex>,
}

impl Dataset {
    /// Build a dataset from named columns
    pub fn from_columns<S: Into<String>>(columns: Vec<(S, Vec<f64>)>) -> Result<Self> {
        columns
            .into_iter()
            .fold(DatasetBuilder::new(), |builder, (name, values)| {
                builder.column(name, values)
            })
            .build()
    }

    /// Build a dataset from row records
    ///
    /// Every record must carry the same column names, and either all records
    /// or none carry a group label. Grouped records use `group_key` as the
    /// name of the label column.
    pub fn from_records(records: &[Record], group_key: Option<&str>) -> Result<Self> {
        let first = records.first().ok_or_else(|| Error::empty_input("Dataset"))?;
        let names: Vec<&String> = first.values.keys().collect();

        let mut columns: Vec<Vec<f64>> = vec![Vec::with_capacity(records.len()); names.len()];
        let mut labels = Vec::with_capacity(records.len());

        for (row, record) in records.iter().enumerate() {
            if record.values.len() != names.len()
                || !record.values.keys().zip(names.iter()).all(|(a, b)| a == *b)
            {
                return Err(Error::InvalidInput(format!(
                    "Record {row} does not match the schema of record 0"
                )));
            }
            for (column, value) in columns.iter_mut().zip(record.values.values()) {
                column.push(*value);
            }
            match (&record.group, group_key) {
                (Some(label), Some(_)) => labels.push(label.clone()),
                (None, None) => {}
                (Some(_), None) => {
                    return Err(Error::InvalidInput(format!(
                        "Record {row} has a group label but no group key was named"
                    )))
                }
                (None, Some(key)) => {
                    return Err(Error::InvalidInput(format!(
                        "Record {row} is missing a label for group key '{key}'"
                    )))
                }
            }
        }

        let mut builder = names
            .into_iter()
            .zip(columns)
            .fold(DatasetBuilder::new(), |builder, (name, values)| {
                builder.column(name.clone(), values)
            });
        if let Some(key) = group_key {
            builder = builder.group_key(key, labels);
        }
        builder.build()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.n_rows
    }

    /// Whether the dataset has no rows
    ///
    /// Constructed datasets are never empty; samples built with [`take`](Self::take)
    /// from an empty index list are.
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    /// Column names in schema order
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Whether a column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Values of a column
    pub fn column(&self, name: &str) -> Result<&[f64]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.columns[i].as_slice())
            .ok_or_else(|| Error::missing_column(name))
    }

    /// Check that every named column exists
    pub fn require_columns(&self, names: &[&str]) -> Result<()> {
        match names.iter().find(|name| !self.has_column(name)) {
            Some(missing) => Err(Error::missing_column(missing)),
            None => Ok(()),
        }
    }

    /// Name of the group key column, if the dataset is grouped
    pub fn group_key_name(&self) -> Option<&str> {
        self.groups.as_ref().map(|g| g.key.as_str())
    }

    /// Whether the dataset carries a group key
    pub fn is_grouped(&self) -> bool {
        self.groups.is_some()
    }

    /// Non-empty groups in first-appearance order of the source dataset
    pub fn groups(&self) -> Vec<Group<'_>> {
        match &self.groups {
            Some(index) => index
                .labels
                .iter()
                .zip(index.members.iter())
                .filter(|(_, members)| !members.is_empty())
                .map(|(label, members)| Group {
                    label: label.as_str(),
                    members: members.as_slice(),
                })
                .collect(),
            None => Vec::new(),
        }
    }

    /// Group label of every row, if grouped
    pub fn group_labels(&self) -> Option<Vec<&str>> {
        self.groups.as_ref().map(|index| {
            index
                .assignment
                .iter()
                .map(|&id| index.labels[id].as_str())
                .collect()
        })
    }

    /// Row count per non-empty group, in group order
    pub fn group_sizes(&self) -> Vec<(String, usize)> {
        self.groups()
            .iter()
            .map(|g| (g.label.to_string(), g.len()))
            .collect()
    }

    /// Build a new dataset from the rows at `indices`, in index order
    ///
    /// Rows may repeat. Schema and group labels are preserved.
    ///
    /// # Panics
    /// Panics if any index is out of bounds.
    pub fn take(&self, indices: &[usize]) -> Dataset {
        let columns = self
            .columns
            .iter()
            .map(|column| indices.iter().map(|&i| column[i]).collect())
            .collect();

        let groups = self.groups.as_ref().map(|index| {
            let assignment = indices.iter().map(|&i| index.assignment[i]).collect();
            GroupIndex::from_assignment(index.key.clone(), Arc::clone(&index.labels), assignment)
        });

        Dataset {
            names: self.names.clone(),
            columns,
            n_rows: indices.len(),
            groups,
        }
    }
}

/// Column-by-column dataset builder
#[derive(Debug, Clone, Default)]
pub struct DatasetBuilder {
    columns: Vec<(String, Vec<f64>)>,
    group_key: Option<(String, Vec<String>)>,
}

impl DatasetBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a numeric column
    pub fn column(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.columns.push((name.into(), values));
        self
    }

    /// Set the group key column
    pub fn group_key<S: Into<String>>(mut self, name: impl Into<String>, labels: Vec<S>) -> Self {
        self.group_key = Some((name.into(), labels.into_iter().map(Into::into).collect()));
        self
    }

    /// Validate the schema and build the dataset
    pub fn build(self) -> Result<Dataset> {
        let n_rows = match self.columns.first() {
            Some((_, values)) => values.len(),
            None => return Err(Error::InvalidInput("Dataset has no columns".to_string())),
        };
        if n_rows == 0 {
            return Err(Error::empty_input("Dataset"));
        }

        let mut names = Vec::with_capacity(self.columns.len());
        let mut columns = Vec::with_capacity(self.columns.len());
        for (name, values) in self.columns {
            if names.contains(&name) {
                return Err(Error::InvalidInput(format!("Duplicate column '{name}'")));
            }
            if values.len() != n_rows {
                return Err(Error::size_mismatch(
                    n_rows,
                    values.len(),
                    &format!("column '{name}'"),
                ));
            }
            if values.iter().any(|v| !v.is_finite()) {
                return Err(Error::non_finite(&format!("column '{name}'")));
            }
            names.push(name);
            columns.push(values);
        }

        let groups = match self.group_key {
            Some((key, labels)) => {
                if labels.len() != n_rows {
                    return Err(Error::size_mismatch(
                        n_rows,
                        labels.len(),
                        &format!("group key '{key}'"),
                    ));
                }
                if names.contains(&key) {
                    return Err(Error::InvalidInput(format!(
                        "Group key '{key}' collides with a numeric column"
                    )));
                }
                Some(GroupIndex::from_labels(key, labels))
            }
            None => None,
        };

        Ok(Dataset {
            names,
            columns,
            n_rows,
            groups,
        })
    }
}
