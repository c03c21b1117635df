//! Snapshot export/import, CSV pledge import and dated backup files.

use std::{
    cmp::Reverse,
    fs,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};

use crate::{
    core::{store::Store, utils::ensure_dir},
    errors::{LedgerError, Result},
    ledger::{amount::parse_amount_or_zero, Document, Pledge},
    storage::write_atomic,
};

const BACKUP_EXTENSION: &str = "json";
const BACKUP_DATE_FORMAT: &str = "%Y-%m-%d";

/// Pledges parsed from CSV text, plus the lines that were skipped.
#[derive(Debug, Default)]
pub struct CsvImport {
    pub pledges: Vec<Pledge>,
    pub skipped: Vec<LedgerError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CsvImportReport {
    pub imported: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupInfo {
    pub path: PathBuf,
    pub date: NaiveDate,
    pub size_bytes: u64,
}

pub struct ImportService;

impl ImportService {
    /// Serializes the full document so [`ImportService::import_snapshot`] can read it back.
    pub fn export_snapshot(doc: &Document) -> Result<String> {
        Ok(serde_json::to_string_pretty(doc)?)
    }

    /// Parses and shape-checks a snapshot. Nothing is applied to any store.
    pub fn import_snapshot(raw: &str) -> Result<Document> {
        let value: serde_json::Value = serde_json::from_str(raw)
            .map_err(|err| LedgerError::MalformedBackup(err.to_string()))?;
        match value.get("pledges") {
            Some(pledges) if !pledges.is_null() => {}
            _ => {
                return Err(LedgerError::MalformedBackup(
                    "missing top-level `pledges` field".into(),
                ))
            }
        }
        serde_json::from_value(value).map_err(|err| LedgerError::MalformedBackup(err.to_string()))
    }

    /// Reads `name,department,amount` rows after a header line.
    ///
    /// Blank lines are ignored and the first remaining line is the header.
    /// Every other line is parsed on its own, so a broken line never takes
    /// its neighbours with it. Rows without a name or amount are skipped; a
    /// blank department becomes `fallback_department`; the amount is the
    /// field's leading number, or zero.
    pub fn parse_csv_pledges(text: &str, fallback_department: &str) -> CsvImport {
        let mut import = CsvImport::default();
        let rows = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .skip(1);

        for (index, raw) in rows {
            let line = index as u64 + 1;
            let outcome = parse_csv_line(raw, line)
                .and_then(|record| pledge_from_record(&record, line, fallback_department));
            match outcome {
                Ok(pledge) => import.pledges.push(pledge),
                Err(err) => {
                    tracing::debug!(error = %err, "csv line skipped");
                    import.skipped.push(err);
                }
            }
        }
        import
    }

    /// Appends every valid CSV pledge with a fresh id, then persists once.
    pub fn import_csv_pledges(
        store: &mut Store,
        text: &str,
        fallback_department: &str,
    ) -> Result<CsvImportReport> {
        let parsed = Self::parse_csv_pledges(text, fallback_department);
        let report = CsvImportReport {
            imported: parsed.pledges.len(),
            skipped: parsed.skipped.len(),
        };
        for pledge in parsed.pledges {
            store.append(pledge)?;
        }
        store.persist()?;
        tracing::info!(
            imported = report.imported,
            skipped = report.skipped,
            "csv pledges imported"
        );
        Ok(report)
    }

    pub fn backup_file_name(prefix: &str, date: NaiveDate) -> String {
        format!(
            "{}-{}.{}",
            prefix,
            date.format(BACKUP_DATE_FORMAT),
            BACKUP_EXTENSION
        )
    }

    /// Writes a snapshot of `doc` into `dir`, replacing any backup from the same day.
    pub fn write_backup(
        doc: &Document,
        dir: &Path,
        prefix: &str,
        date: NaiveDate,
    ) -> Result<PathBuf> {
        ensure_dir(dir)?;
        let path = dir.join(Self::backup_file_name(prefix, date));
        let json = Self::export_snapshot(doc)?;
        write_atomic(&path, &json)?;
        tracing::info!(path = %path.display(), "backup written");
        Ok(path)
    }

    /// Backups in `dir` named `<prefix>-YYYY-MM-DD.json`, newest first.
    pub fn list_backups(dir: &Path, prefix: &str) -> Result<Vec<BackupInfo>> {
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            let Some(date) = parse_backup_date(file_name, prefix) else {
                continue;
            };
            let size_bytes = entry.metadata().map(|meta| meta.len()).unwrap_or(0);
            entries.push(BackupInfo {
                path,
                date,
                size_bytes,
            });
        }
        entries.sort_by_key(|info| Reverse(info.date));
        Ok(entries)
    }

    /// Reads a backup file and validates it as a snapshot.
    pub fn read_backup(path: &Path) -> Result<Document> {
        let bytes = fs::read(path)?;
        let raw = String::from_utf8(bytes)
            .map_err(|err| LedgerError::MalformedBackup(format!("file is not UTF-8: {err}")))?;
        Self::import_snapshot(&raw)
    }
}

fn parse_csv_line(raw: &str, line: u64) -> Result<StringRecord> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(raw.as_bytes());
    match reader.records().next() {
        Some(Ok(record)) => Ok(record),
        Some(Err(err)) => Err(LedgerError::MalformedCsvLine {
            line,
            reason: err.to_string(),
        }),
        None => Err(LedgerError::MalformedCsvLine {
            line,
            reason: "empty row".into(),
        }),
    }
}

fn pledge_from_record(
    record: &StringRecord,
    line: u64,
    fallback_department: &str,
) -> Result<Pledge> {
    let name = record.get(0).unwrap_or("");
    let department = record.get(1).unwrap_or("");
    let amount = record.get(2).unwrap_or("");
    if name.is_empty() {
        return Err(LedgerError::MalformedCsvLine {
            line,
            reason: "missing name".into(),
        });
    }
    if amount.is_empty() {
        return Err(LedgerError::MalformedCsvLine {
            line,
            reason: "missing amount".into(),
        });
    }
    let department = if department.is_empty() {
        fallback_department
    } else {
        department
    };
    Ok(Pledge::new(name, department, parse_amount_or_zero(amount)))
}

fn parse_backup_date(file_name: &str, prefix: &str) -> Option<NaiveDate> {
    let stem = file_name
        .strip_prefix(prefix)?
        .strip_prefix('-')?
        .strip_suffix(&format!(".{}", BACKUP_EXTENSION))?;
    NaiveDate::parse_from_str(stem, BACKUP_DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Expense, Transaction};
    use tempfile::TempDir;

    #[test]
    fn header_only_file_imports_nothing() {
        let parsed = ImportService::parse_csv_pledges("name,department,amount\n", "Guests");
        assert!(parsed.pledges.is_empty());
        assert!(parsed.skipped.is_empty());
    }

    #[test]
    fn csv_rows_are_trimmed_and_defaulted() {
        let text = "name,dept,amount\n  Ann , Eagles , 100 \nBen,,50\nCara,Youth,lots\n\n";
        let parsed = ImportService::parse_csv_pledges(text, "Guests");
        let rows: Vec<(&str, &str, f64)> = parsed
            .pledges
            .iter()
            .map(|p| (p.name.as_str(), p.department.as_str(), p.amount))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("Ann", "Eagles", 100.0),
                ("Ben", "Guests", 50.0),
                ("Cara", "Youth", 0.0)
            ]
        );
        assert!(parsed.pledges.iter().all(|p| p.id.is_blank()));
    }

    #[test]
    fn rows_missing_name_or_amount_are_skipped() {
        let text = "name,dept,amount\n,Eagles,100\nDan,Youth\nEve,Youth,\nFay,Youth,5";
        let parsed = ImportService::parse_csv_pledges(text, "Guests");
        assert_eq!(parsed.pledges.len(), 1);
        assert_eq!(parsed.pledges[0].name, "Fay");
        assert_eq!(parsed.skipped.len(), 3);
        assert!(matches!(
            parsed.skipped[0],
            LedgerError::MalformedCsvLine { line: 2, .. }
        ));
    }

    #[test]
    fn quoted_names_may_contain_commas() {
        let text = "name,dept,amount\n\"Smith, John\",Eagles,20\n";
        let parsed = ImportService::parse_csv_pledges(text, "Guests");
        assert_eq!(parsed.pledges[0].name, "Smith, John");
    }

    #[test]
    fn stray_quote_only_costs_its_own_line() {
        let text = "name,department,amount\n\"Ann,Eagles,100\nBen,Youth,50\nCara,Youth,20\n";
        let parsed = ImportService::parse_csv_pledges(text, "Guests");
        let names: Vec<&str> = parsed.pledges.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ben", "Cara"]);
        assert_eq!(parsed.skipped.len(), 1);
        assert!(matches!(
            parsed.skipped[0],
            LedgerError::MalformedCsvLine { line: 2, .. }
        ));
    }

    #[test]
    fn amounts_keep_their_leading_number() {
        let text = "name,department,amount\nAnn,Eagles,100 KES\nBen,Youth,250.50/=\n";
        let parsed = ImportService::parse_csv_pledges(text, "Guests");
        let amounts: Vec<f64> = parsed.pledges.iter().map(|p| p.amount).collect();
        assert_eq!(amounts, vec![100.0, 250.5]);
    }

    #[test]
    fn skipped_lines_report_their_position_in_the_file() {
        let text = "\nname,dept,amount\n\nAnn,Eagles,10\n\n,Youth,5\r\n";
        let parsed = ImportService::parse_csv_pledges(text, "Guests");
        assert_eq!(parsed.pledges.len(), 1);
        assert!(matches!(
            parsed.skipped.as_slice(),
            [LedgerError::MalformedCsvLine { line: 6, .. }]
        ));
    }

    #[test]
    fn backup_that_is_not_utf8_is_malformed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dcd-backup-2024-01-01.json");
        fs::write(&path, [0xff, 0xfe, b'{', b'}']).unwrap();
        assert!(matches!(
            ImportService::read_backup(&path),
            Err(LedgerError::MalformedBackup(_))
        ));
    }

    #[test]
    fn snapshot_without_pledges_is_rejected() {
        for raw in ["{}", "{\"pledges\": null}", "[]", "not json", "{\"pledges\": 5}"] {
            let err = ImportService::import_snapshot(raw).unwrap_err();
            assert!(
                matches!(err, LedgerError::MalformedBackup(_)),
                "{raw} produced {err:?}"
            );
        }
    }

    #[test]
    fn backups_are_dated_and_listed_newest_first() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("backups");
        let doc = Document {
            pledges: vec![Pledge::new("Ann", "Eagles", 10.0).with_id("p1")],
            transactions: vec![Transaction::new("Ann", "Eagles", 10.0, "2024-02-01").with_id("t1")],
            expenses: vec![Expense::new("Tea", 2.0, "2024-02-02").with_id("e1")],
        };
        let older = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let newer = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let first = ImportService::write_backup(&doc, &dir, "dcd-backup", older).unwrap();
        ImportService::write_backup(&doc, &dir, "dcd-backup", newer).unwrap();
        fs::write(dir.join("notes.txt"), "ignore me").unwrap();

        assert!(first.ends_with("dcd-backup-2024-02-01.json"));
        let listed = ImportService::list_backups(&dir, "dcd-backup").unwrap();
        let dates: Vec<NaiveDate> = listed.iter().map(|info| info.date).collect();
        assert_eq!(dates, vec![newer, older]);
        assert_eq!(ImportService::read_backup(&first).unwrap(), doc);
    }
}
