//! # HSA Common Library
//!
//! Shared code for the HSA case-file viewer:
//! - Date token recognition and normalization
//! - Known-anomaly correction of raw traceability text
//! - Traceability log parsing into ordered events
//! - Tabular records, sheets and workbooks
//! - Multi-sheet, multi-term search
//! - Case-file card view
//! - Configuration loading

pub mod anomaly;
pub mod case_file;
pub mod config;
pub mod dates;
pub mod error;
pub mod record;
pub mod search;
pub mod traceability;

pub use error::{Error, Result};
pub use record::{RawRecord, Sheet, Workbook, NOT_AVAILABLE};
pub use search::{FieldScope, SchemaUniverse, SearchQuery, SearchResult};
pub use traceability::{parse_traceability, TraceEvent, TraceabilityParser, TraceabilityResult};
