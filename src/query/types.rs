//! Query types
//!
//! Field names, operators and literal rendering in the search API's filter
//! syntax: `<field> <op> "<value>"`.

use super::builder::QueryBuilder;
use crate::error::{Error, Result};
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Field Names
// ============================================================================

/// Target reference
pub const TARGET_FIELD: &str = "ref_lid_target";
/// Investigation reference
pub const INVESTIGATION_FIELD: &str = "ref_lid_investigation";
/// Instrument reference
pub const INSTRUMENT_FIELD: &str = "ref_lid_instrument";
/// Instrument host reference
pub const INSTRUMENT_HOST_FIELD: &str = "ref_lid_instrument_host";
/// Observation start time
pub const START_TIME_FIELD: &str = "pds:Time_Coordinates.pds:start_date_time";
/// Observation stop time
pub const STOP_TIME_FIELD: &str = "pds:Time_Coordinates.pds:stop_date_time";
/// Parent collection of a product
pub const PARENT_COLLECTION_FIELD: &str = "ops:Provenance.ops:parent_collection_identifier";
/// Product class
pub const PRODUCT_CLASS_FIELD: &str = "product_class";
/// Collection type
pub const COLLECTION_TYPE_FIELD: &str = "pds:Collection.pds:collection_type";
/// Processing level
pub const PROCESSING_LEVEL_FIELD: &str = "pds:Primary_Result_Summary.pds:processing_level";
/// Product identifier
pub const LIDVID_FIELD: &str = "lidvid";

// ============================================================================
// Operator
// ============================================================================

/// Comparison operator of a clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Ne,
    Like,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Operator {
    /// Keyword used by the filter syntax
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Ne => "ne",
            Operator::Like => "like",
            Operator::Lt => "lt",
            Operator::Le => "le",
            Operator::Gt => "gt",
            Operator::Ge => "ge",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Clause
// ============================================================================

/// Literal on the right-hand side of a clause
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Rendered in double quotes
    Text(String),
    /// Rendered bare
    Number(f64),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Text(s) => write!(f, "\"{s}\""),
            Literal::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::Text(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::Text(s)
    }
}

impl From<f64> for Literal {
    fn from(n: f64) -> Self {
        Literal::Number(n)
    }
}

/// A single `(field, operator, literal)` predicate
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub field: String,
    pub operator: Operator,
    pub value: Literal,
}

impl Clause {
    /// Create a clause
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<Literal>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// `field eq value`
    pub fn eq(field: impl Into<String>, value: impl Into<Literal>) -> Self {
        Self::new(field, Operator::Eq, value)
    }

    /// `field like value`
    pub fn like(field: impl Into<String>, value: impl Into<Literal>) -> Self {
        Self::new(field, Operator::Like, value)
    }

    /// `field le value`
    pub fn le(field: impl Into<String>, value: impl Into<Literal>) -> Self {
        Self::new(field, Operator::Le, value)
    }

    /// `field ge value`
    pub fn ge(field: impl Into<String>, value: impl Into<Literal>) -> Self {
        Self::new(field, Operator::Ge, value)
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.operator, self.value)
    }
}

impl From<Clause> for String {
    fn from(clause: Clause) -> Self {
        clause.to_string()
    }
}

/// Render a datetime as ISO-8601 in UTC with a `Z` suffix
pub fn iso8601_utc<Tz: TimeZone>(datetime: &DateTime<Tz>) -> String {
    datetime
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

// ============================================================================
// Processing Level
// ============================================================================

/// Processing level of a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessingLevel {
    Telemetry,
    Raw,
    PartiallyProcessed,
    Calibrated,
    Derived,
}

impl ProcessingLevel {
    /// Every accepted level
    pub const ALL: [ProcessingLevel; 5] = [
        ProcessingLevel::Telemetry,
        ProcessingLevel::Raw,
        ProcessingLevel::PartiallyProcessed,
        ProcessingLevel::Calibrated,
        ProcessingLevel::Derived,
    ];

    /// Lowercase name, as accepted by [`FromStr`]
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingLevel::Telemetry => "telemetry",
            ProcessingLevel::Raw => "raw",
            ProcessingLevel::PartiallyProcessed => "partially-processed",
            ProcessingLevel::Calibrated => "calibrated",
            ProcessingLevel::Derived => "derived",
        }
    }

    /// Title-cased value stored in the registry
    pub fn title(&self) -> &'static str {
        match self {
            ProcessingLevel::Telemetry => "Telemetry",
            ProcessingLevel::Raw => "Raw",
            ProcessingLevel::PartiallyProcessed => "Partially-Processed",
            ProcessingLevel::Calibrated => "Calibrated",
            ProcessingLevel::Derived => "Derived",
        }
    }
}

impl fmt::Display for ProcessingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProcessingLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| Error::invalid_processing_level(s))
    }
}

// ============================================================================
// Product Class
// ============================================================================

/// Class of a PDS4 product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductClass {
    Observational,
    Collection,
    Bundle,
}

impl ProductClass {
    /// Value of the `product_class` property
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductClass::Observational => "Product_Observational",
            ProductClass::Collection => "Product_Collection",
            ProductClass::Bundle => "Product_Bundle",
        }
    }
}

impl fmt::Display for ProductClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "observational" | "product_observational" => Ok(ProductClass::Observational),
            "collection" | "product_collection" => Ok(ProductClass::Collection),
            "bundle" | "product_bundle" => Ok(ProductClass::Bundle),
            _ => Err(Error::invalid_config(
                "product_class",
                format!("unknown product class '{s}'"),
            )),
        }
    }
}

// ============================================================================
// Query
// ============================================================================

/// Accumulated filter clauses and field selection
///
/// Clauses are AND-ed in insertion order, each wrapped in parentheses. A
/// standalone `Query` accepts every predicate; it can be prepared up front
/// and handed to [`Products::with_query`](crate::Products::with_query).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    clauses: Vec<String>,
    fields: Vec<String>,
}

impl Query {
    /// Create an empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a clause
    pub fn push(&mut self, clause: impl Into<String>) {
        self.clauses.push(format!("({})", clause.into()));
    }

    /// Parenthesized clauses in insertion order
    pub fn clauses(&self) -> &[String] {
        &self.clauses
    }

    /// Whether no clause has been added
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Conjunction of all clauses, empty when there is none
    pub fn expression(&self) -> String {
        self.clauses.join(" and ")
    }

    /// Value of the `q` request parameter
    pub fn to_q_param(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(format!("({})", self.expression()))
        }
    }

    /// Replace the selected fields
    pub fn set_fields(&mut self, fields: Vec<String>) {
        self.fields = fields;
    }

    /// Selected fields, empty for all
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Drop every clause and the field selection
    pub fn clear(&mut self) {
        self.clauses.clear();
        self.fields.clear();
    }
}

impl QueryBuilder for Query {
    fn add_clause(&mut self, clause: impl Into<String>) -> Result<&mut Self> {
        self.push(clause);
        Ok(self)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression())
    }
}
