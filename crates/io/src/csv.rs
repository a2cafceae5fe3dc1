// CSV load/save for reference and output tables

use std::path::Path;

use predcheck_engine::{OutputTable, RawTable, SanityError};

/// Load a delimited file with a header row.
///
/// Every record must have as many fields as the header.
pub fn load_table(path: &Path, delimiter: u8) -> Result<RawTable, SanityError> {
    let content = decode_file(path).map_err(|message| SanityError::Load {
        path: path.to_path_buf(),
        message,
    })?;
    parse_table(&content, delimiter).map_err(|message| SanityError::Load {
        path: path.to_path_buf(),
        message,
    })
}

/// Decode a prediction file as text. Bytes that are not valid UTF-8 are
/// read as Windows-1252, which never fails.
fn decode_file(path: &Path) -> Result<String, String> {
    let bytes = std::fs::read(path).map_err(|e| e.to_string())?;

    String::from_utf8(bytes).or_else(|invalid| {
        let (text, _, _) = encoding_rs::WINDOWS_1252.decode(invalid.as_bytes());
        Ok(text.into_owned())
    })
}

fn parse_table(content: &str, delimiter: u8) -> Result<RawTable, String> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| e.to_string())?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| e.to_string())?;
        records.push(record.iter().map(|f| f.to_string()).collect());
    }

    Ok(RawTable { headers, records })
}

/// Write the table (header row first) to `path`.
///
/// The file is rendered in memory and written in one call, so nothing is
/// created when rendering fails.
pub fn write_table(table: &OutputTable, path: &Path, delimiter: u8) -> Result<(), SanityError> {
    let write_err = |message: String| SanityError::Write {
        path: path.to_path_buf(),
        message,
    };

    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(table.headers()).map_err(|e| write_err(e.to_string()))?;
    for record in table.records() {
        writer.write_record(&record).map_err(|e| write_err(e.to_string()))?;
    }

    let bytes = writer.into_inner().map_err(|e| write_err(e.to_string()))?;
    std::fs::write(path, bytes).map_err(|e| write_err(e.to_string()))
}
