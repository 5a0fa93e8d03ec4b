//! Task list CSV import.
//!
//! Expected header (case-insensitive, any column order):
//!   pet,title,duration,priority,category[,frequency][,description]
//!
//! Bad rows are skipped and reported; only I/O and CSV framing errors fail the
//! whole import.

use anyhow::{bail, Context, Result};
use pawpal_core::{Priority, Task, TaskCategory, TaskFrequency};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use super::duration::DurationParser;
use crate::types::{ImportReport, ImportedTask, SkippedRow};

const REQUIRED: [&str; 5] = ["pet", "title", "duration", "priority", "category"];

struct Columns {
    idx: HashMap<String, usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let idx: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim().to_ascii_lowercase(), i))
            .collect();

        let missing: Vec<&str> = REQUIRED
            .iter()
            .copied()
            .filter(|c| !idx.contains_key(*c))
            .collect();
        if !missing.is_empty() {
            bail!("missing required column(s): {}", missing.join(", "));
        }
        Ok(Self { idx })
    }

    fn get<'r>(&self, record: &'r csv::StringRecord, name: &str) -> &'r str {
        self.idx
            .get(name)
            .and_then(|i| record.get(*i))
            .map(str::trim)
            .unwrap_or("")
    }
}

/// Parse a task CSV file.
pub fn parse_tasks_csv(path: impl AsRef<Path>) -> Result<ImportReport> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    parse_tasks_csv_reader(file).with_context(|| format!("parsing {}", path.display()))
}

/// Parse task CSV from any reader.
pub fn parse_tasks_csv_reader<R: Read>(reader: R) -> Result<ImportReport> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = Columns::from_headers(rdr.headers()?)?;
    let durations = DurationParser::new()?;
    let mut report = ImportReport::default();

    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        match parse_row(&columns, &durations, &record) {
            Ok(imported) => report.tasks.push(imported),
            Err(e) => {
                tracing::warn!(line, error = %e, "skipping task row");
                report.skipped.push(SkippedRow {
                    line,
                    reason: e.to_string(),
                });
            }
        }
    }

    tracing::debug!(
        imported = report.tasks.len(),
        skipped = report.skipped.len(),
        "task csv parsed"
    );
    Ok(report)
}

fn parse_row(
    columns: &Columns,
    durations: &DurationParser,
    record: &csv::StringRecord,
) -> Result<ImportedTask> {
    let pet = columns.get(record, "pet");
    if pet.is_empty() {
        bail!("pet is empty");
    }

    let title = columns.get(record, "title");
    let duration = durations.parse(columns.get(record, "duration"))?;
    let priority: Priority = columns.get(record, "priority").parse()?;
    let category: TaskCategory = columns.get(record, "category").parse()?;
    let frequency: TaskFrequency = columns.get(record, "frequency").parse()?;

    let mut task = Task::new(title, duration, priority, category).with_frequency(frequency);
    let description = columns.get(record, "description");
    if !description.is_empty() {
        task = task.with_description(description);
    }
    task.validate()?;

    Ok(ImportedTask {
        pet: pet.to_string(),
        task,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawpal_core::Owner;

    const SAMPLE: &str = "\
Pet,Title,Duration,Priority,Category,Frequency,Description
Mochi,Morning walk,30m,high,walk,daily,Around the block
Mochi,Feed breakfast,10,CRITICAL,feeding,daily,
Whiskers,Litter box,10 min,high,grooming,,Scoop and refresh
Whiskers,Bath,1h,low,grooming,monthly,
";

    #[test]
    fn test_parse_sample() {
        let report = parse_tasks_csv_reader(SAMPLE.as_bytes()).unwrap();
        assert!(report.skipped.is_empty());
        assert_eq!(report.tasks.len(), 4);

        let walk = &report.tasks[0];
        assert_eq!(walk.pet, "Mochi");
        assert_eq!(walk.task.duration_minutes, 30);
        assert_eq!(walk.task.frequency, TaskFrequency::Daily);
        assert_eq!(walk.task.description.as_deref(), Some("Around the block"));

        assert_eq!(report.tasks[1].task.priority, Priority::Critical);
        assert!(report.tasks[1].task.description.is_none());
        assert_eq!(report.tasks[2].task.frequency, TaskFrequency::Once);
        assert_eq!(report.tasks[3].task.duration_minutes, 60);
    }

    #[test]
    fn test_bad_rows_are_skipped_with_line_numbers() {
        let csv = "\
pet,title,duration,priority,category
Rex,Walk,30,high,walk
Rex,Nap,0,low,enrichment
Rex,Bath,20,urgent,grooming
,Feed,5,critical,feeding
Rex,,5,critical,feeding
Rex,Feed,5,critical,feeding
";
        let report = parse_tasks_csv_reader(csv.as_bytes()).unwrap();
        let titles: Vec<&str> = report.tasks.iter().map(|t| t.task.title.as_str()).collect();
        assert_eq!(titles, vec!["Walk", "Feed"]);

        let lines: Vec<u64> = report.skipped.iter().map(|s| s.line).collect();
        assert_eq!(lines, vec![3, 4, 5, 6]);
        assert!(report.skipped[1].reason.contains("urgent"));
    }

    #[test]
    fn test_oversized_duration_skips_only_that_row() {
        let csv = "\
pet,title,duration,priority,category
Rex,Marathon,999999999999999999h,low,walk
Rex,Walk,30,high,walk
";
        let report = parse_tasks_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(report.tasks.len(), 1);
        assert_eq!(report.tasks[0].task.title, "Walk");
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line, 2);
        assert!(report.skipped[0].reason.contains("too large"));
    }

    #[test]
    fn test_missing_columns_fail_the_import() {
        let err = parse_tasks_csv_reader("pet,title,priority\nRex,Walk,high\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("duration"));
        assert!(err.to_string().contains("category"));
    }

    #[test]
    fn test_report_attaches_to_owner_pets() {
        let mut owner = Owner::new("Jordan", 120);
        owner.add_pet(pawpal_core::Pet::new("Mochi", "dog"));

        let report = parse_tasks_csv_reader(SAMPLE.as_bytes()).unwrap();
        let added = report.into_owner_pets(&mut owner);

        assert_eq!(added, 4);
        assert_eq!(owner.pets.len(), 2);
        assert_eq!(owner.pet("Mochi").unwrap().species, "dog");
        assert_eq!(owner.pet("Mochi").unwrap().tasks.len(), 2);
        assert_eq!(owner.pet("Whiskers").unwrap().species, "unknown");
        assert_eq!(owner.calculate_total_task_time(), 110);
    }
}
