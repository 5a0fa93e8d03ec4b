//! pawpal-ingest: bulk task import (CSV) into pet/owner aggregates.

pub mod parsers;
pub mod types;

pub use parsers::duration::parse_duration_minutes;
pub use parsers::task_csv::{parse_tasks_csv, parse_tasks_csv_reader};
pub use types::{ImportReport, ImportedTask, SkippedRow};
