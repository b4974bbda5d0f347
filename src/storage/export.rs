use crate::parser::{JobRecord, CSV_HEADERS};
use crate::{ScraperError, ScraperResult};
use log::info;
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// `.json` selects JSON; every other extension, or none, is CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ExportFormat::Json,
            _ => ExportFormat::Csv,
        }
    }
}

pub fn write_csv<W: Write>(records: &[JobRecord], writer: W) -> ScraperResult<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(CSV_HEADERS)?;
    for record in records {
        writer.serialize(record)?;
    }

    writer.flush()?;
    Ok(())
}

pub fn read_csv<R: Read>(reader: R) -> ScraperResult<Vec<JobRecord>> {
    let mut reader = csv::Reader::from_reader(reader);

    let headers = reader.headers()?;
    if headers.iter().ne(CSV_HEADERS) {
        return Err(ScraperError::Unexpected(format!(
            "unexpected CSV header: {:?}",
            headers.iter().collect::<Vec<_>>()
        )));
    }

    reader
        .deserialize()
        .map(|row| row.map_err(ScraperError::from))
        .collect()
}

pub fn write_json<W: Write>(records: &[JobRecord], mut writer: W) -> ScraperResult<()> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Writes the records to `path`, creating parent directories. An empty
/// result set is refused rather than producing a header-only file.
pub fn save<P: AsRef<Path>>(records: &[JobRecord], path: P) -> ScraperResult<ExportFormat> {
    if records.is_empty() {
        return Err(ScraperError::NothingToSave);
    }

    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let format = ExportFormat::from_path(path);
    let file = BufWriter::new(File::create(path)?);
    match format {
        ExportFormat::Csv => write_csv(records, file)?,
        ExportFormat::Json => write_json(records, file)?,
    }

    info!(
        "Saved {} jobs to {} ({:?})",
        records.len(),
        path.display(),
        format
    );
    Ok(format)
}

pub fn load_csv<P: AsRef<Path>>(path: P) -> ScraperResult<Vec<JobRecord>> {
    read_csv(File::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{NOT_AVAILABLE, NO_LINK};

    fn sample() -> Vec<JobRecord> {
        vec![
            JobRecord::new("Acme", "Rust, Tokio", "https://x.co/1"),
            JobRecord::new("Comma, Inc.", NOT_AVAILABLE, "/jobs?id=2&ref=\"feed\""),
            JobRecord::new(NOT_AVAILABLE, "Line\nbreak", NO_LINK),
        ]
    }

    #[test]
    fn test_csv_round_trip() {
        let records = sample();
        let mut buffer = Vec::new();
        write_csv(&records, &mut buffer).unwrap();

        let text = String::from_utf8(buffer.clone()).unwrap();
        assert!(text.starts_with("Company Name,Required Skills,More Info\n"));

        let back = read_csv(buffer.as_slice()).unwrap();
        assert_eq!(back, records);
    }

    #[test]
    fn test_csv_header_written_for_empty_list() {
        let mut buffer = Vec::new();
        write_csv(&[], &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Company Name,Required Skills,More Info\n"
        );
    }

    #[test]
    fn test_read_rejects_foreign_header() {
        let data = "company,skills,link\nAcme,Rust,/x\n";
        let err = read_csv(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("unexpected CSV header"));
    }

    #[test]
    fn test_json_export_uses_column_names() {
        let mut buffer = Vec::new();
        write_json(&sample()[..1], &mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value[0]["Company Name"], "Acme");
        assert_eq!(value[0]["Required Skills"], "Rust, Tokio");
        assert_eq!(value[0]["More Info"], "https://x.co/1");
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ExportFormat::from_path(Path::new("jobs.json")), ExportFormat::Json);
        assert_eq!(ExportFormat::from_path(Path::new("jobs.JSON")), ExportFormat::Json);
        assert_eq!(ExportFormat::from_path(Path::new("jobs.csv")), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_path(Path::new("jobs")), ExportFormat::Csv);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/jobs.csv");

        let format = save(&sample(), &path).unwrap();
        assert_eq!(format, ExportFormat::Csv);
        assert_eq!(load_csv(&path).unwrap(), sample());
    }

    #[test]
    fn test_save_refuses_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs.csv");
        let err = save(&[], &path).unwrap_err();
        assert!(matches!(err, ScraperError::NothingToSave));
        assert!(!path.exists());
    }
}
