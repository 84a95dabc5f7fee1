//! FILENAME: core/pivot-engine/src/definition.rs
//! Pivot Definition - The serializable configuration.
//!
//! This module contains all the types needed to DESCRIBE a pivot.
//! These structures are designed to be:
//! - Serializable (for config files and the UI bridge)
//! - Cheap to clone, so every user action can produce a fresh snapshot

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use engine::Column;

// ============================================================================
// AGGREGATION
// ============================================================================

/// Supported aggregation functions for value fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationType {
    Sum,
    #[serde(rename = "avg")]
    Average,
    Count,
    Min,
    Max,
}

impl Default for AggregationType {
    fn default() -> Self {
        AggregationType::Sum
    }
}

impl AggregationType {
    /// Every aggregation in the order the UI offers them.
    pub const ALL: [AggregationType; 5] = [
        AggregationType::Sum,
        AggregationType::Average,
        AggregationType::Count,
        AggregationType::Min,
        AggregationType::Max,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationType::Sum => "sum",
            AggregationType::Average => "avg",
            AggregationType::Count => "count",
            AggregationType::Min => "min",
            AggregationType::Max => "max",
        }
    }

    /// Default aggregation for a column dropped into the Values area:
    /// numbers are summed, everything else is counted.
    pub fn default_for(column: &Column) -> Self {
        if column.is_numeric() {
            AggregationType::Sum
        } else {
            AggregationType::Count
        }
    }
}

impl fmt::Display for AggregationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sum" => Ok(AggregationType::Sum),
            "avg" | "average" => Ok(AggregationType::Average),
            "count" => Ok(AggregationType::Count),
            "min" => Ok(AggregationType::Min),
            "max" => Ok(AggregationType::Max),
            other => Err(format!("unknown aggregation '{}'", other)),
        }
    }
}

// ============================================================================
// FIELD DEFINITIONS
// ============================================================================

/// The four areas a column can be dropped into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PivotRole {
    /// Groups data into chart categories.
    Rows,
    /// Aggregated fields.
    Values,
    /// Splits data into series.
    Columns,
    /// Restricts rows before aggregation.
    Filters,
}

impl PivotRole {
    pub const ALL: [PivotRole; 4] = [
        PivotRole::Rows,
        PivotRole::Values,
        PivotRole::Columns,
        PivotRole::Filters,
    ];
}

/// A reference to a source column within one pivot area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRef {
    /// Source column name.
    pub name: String,

    /// Aggregation function. Only meaningful in the Values area.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<AggregationType>,
}

impl FieldRef {
    pub fn new(name: impl Into<String>) -> Self {
        FieldRef {
            name: name.into(),
            aggregation: None,
        }
    }

    pub fn value(name: impl Into<String>, aggregation: AggregationType) -> Self {
        FieldRef {
            name: name.into(),
            aggregation: Some(aggregation),
        }
    }

    /// The effective aggregation (Sum when unset).
    pub fn aggregation(&self) -> AggregationType {
        self.aggregation.unwrap_or_default()
    }

    /// Label used for value series and axis titles, e.g. "Revenue (sum)".
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.aggregation())
    }
}

// ============================================================================
// MAIN DEFINITION STRUCT
// ============================================================================

/// The complete, serializable pivot configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotConfig {
    /// Fields placed in the Row area (ordered from outer to inner).
    #[serde(default)]
    pub rows: Vec<FieldRef>,

    /// Fields placed in the Values area.
    #[serde(default)]
    pub values: Vec<FieldRef>,

    /// Fields placed in the Column (split) area.
    #[serde(default)]
    pub columns: Vec<FieldRef>,

    /// Fields placed in the Filter area.
    #[serde(default)]
    pub filters: Vec<FieldRef>,
}

impl PivotConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self, role: PivotRole) -> &[FieldRef] {
        match role {
            PivotRole::Rows => &self.rows,
            PivotRole::Values => &self.values,
            PivotRole::Columns => &self.columns,
            PivotRole::Filters => &self.filters,
        }
    }

    fn fields_mut(&mut self, role: PivotRole) -> &mut Vec<FieldRef> {
        match role {
            PivotRole::Rows => &mut self.rows,
            PivotRole::Values => &mut self.values,
            PivotRole::Columns => &mut self.columns,
            PivotRole::Filters => &mut self.filters,
        }
    }

    pub fn contains(&self, role: PivotRole, name: &str) -> bool {
        self.fields(role).iter().any(|f| f.name == name)
    }

    /// Adds a column to an area. Returns false (and changes nothing) when
    /// the column is already in that area.
    pub fn add_field(&mut self, role: PivotRole, column: &Column) -> bool {
        if self.contains(role, &column.name) {
            return false;
        }

        let entry = if role == PivotRole::Values {
            FieldRef::value(column.name.clone(), AggregationType::default_for(column))
        } else {
            FieldRef::new(column.name.clone())
        };
        self.fields_mut(role).push(entry);
        true
    }

    /// Adds a column by name, resolving it against the known columns.
    /// Unknown columns are ignored.
    pub fn add_field_by_name(&mut self, role: PivotRole, name: &str, columns: &[Column]) -> bool {
        match columns.iter().find(|c| c.name == name) {
            Some(column) => self.add_field(role, column),
            None => false,
        }
    }

    /// Removes a column from an area. Returns whether anything was removed.
    pub fn remove_field(&mut self, role: PivotRole, name: &str) -> bool {
        let fields = self.fields_mut(role);
        let before = fields.len();
        fields.retain(|f| f.name != name);
        fields.len() != before
    }

    /// Changes the aggregation of a value field.
    pub fn set_aggregation(&mut self, name: &str, aggregation: AggregationType) -> bool {
        match self.values.iter_mut().find(|f| f.name == name) {
            Some(field) => {
                field.aggregation = Some(aggregation);
                true
            }
            None => false,
        }
    }

    /// Builder-style helper: appends a field unless its name is already
    /// present in that area.
    pub fn with_field(mut self, role: PivotRole, field: FieldRef) -> Self {
        if !self.contains(role, &field.name) {
            self.fields_mut(role).push(field);
        }
        self
    }

    /// A pivot can be aggregated once it has at least one row field and one
    /// value field.
    pub fn is_configured(&self) -> bool {
        !self.rows.is_empty() && !self.values.is_empty()
    }

    pub fn has_column_fields(&self) -> bool {
        !self.columns.is_empty()
    }
}
