use std::fmt;

use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// CellValue – a single cell in a tabular row
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value as produced by the file decoders.
/// `Empty` covers missing cells, nulls, and empty strings alike.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Empty,
}

impl CellValue {
    /// Whether the cell counts as blank for the blank-row filter.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::String(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Empty => Ok(()),
        }
    }
}

// Serialized as the underlying JSON scalar; `Empty` becomes `""` to match
// the decoders' empty-string fill for missing cells.
impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::String(s) => serializer.serialize_str(s),
            CellValue::Integer(i) => serializer.serialize_i64(*i),
            CellValue::Float(v) => serializer.serialize_f64(*v),
            CellValue::Bool(b) => serializer.serialize_bool(*b),
            CellValue::Empty => serializer.serialize_str(""),
        }
    }
}

// ---------------------------------------------------------------------------
// RawRecord – one decoded row, keyed by column name
// ---------------------------------------------------------------------------

/// A decoded row before normalization: (column name, value) pairs in the
/// order the source file presented them. Key sets may be sparse.
pub type RawRecord = Vec<(String, CellValue)>;

// ---------------------------------------------------------------------------
// Dataset – the normalized rows of one uploaded file
// ---------------------------------------------------------------------------

/// The canonical row set for one upload. Column order is fixed at
/// normalization time and every row's values align with `columns`.
/// Never mutated after construction; a new upload replaces it wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Name of the uploaded file (used for summaries and export naming).
    pub file_name: String,
    /// Canonical column order.
    pub columns: Vec<String>,
    /// Row values, one `Vec<CellValue>` per row, aligned with `columns`.
    pub rows: Vec<Vec<CellValue>>,
}

impl Dataset {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Predictions attached to rows
// ---------------------------------------------------------------------------

/// Where a prediction value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Returned by the remote service.
    Service,
    /// Synthesized locally because the service value was unavailable.
    Synthesized,
}

/// One per-row prediction as produced by the client, before merging.
#[derive(Debug, Clone, PartialEq)]
pub struct RowPrediction {
    pub value: f64,
    pub provenance: Provenance,
}

/// A canonical row plus its prediction. Original values are carried
/// unchanged; exactly one numeric prediction field is appended.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedRow {
    pub values: Vec<CellValue>,
    pub prediction: f64,
    pub provenance: Provenance,
}
