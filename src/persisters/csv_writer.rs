use std::{fs::File, io::Write};

use csv::Writer;

use crate::{error::Result, model::raw_row::RawRow};

/// Columns starting with this prefix are computed in-session and never exported.
const DERIVED_COLUMN_PREFIX: &str = "__";

pub struct CsvWriter {}

impl CsvWriter {
    pub fn save_rows_to_csv<'a>(
        headers: &[String],
        rows: impl IntoIterator<Item = &'a RawRow>,
        file_name: &str,
    ) -> Result<()> {
        let file = File::create(file_name)?;
        Self::write_rows(headers, rows, file)?;
        log::info!("Exported filtered ratings to {}", file_name);
        Ok(())
    }

    pub fn rows_to_string<'a>(
        headers: &[String],
        rows: impl IntoIterator<Item = &'a RawRow>,
    ) -> Result<String> {
        let mut buffer = vec![];
        Self::write_rows(headers, rows, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Writes the source columns back in their original order. Columns are
    /// matched by position, so repeated header names keep their own values.
    pub fn write_rows<'a, W: Write>(
        headers: &[String],
        rows: impl IntoIterator<Item = &'a RawRow>,
        out: W,
    ) -> Result<()> {
        let exported: Vec<usize> = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !h.starts_with(DERIVED_COLUMN_PREFIX))
            .map(|(i, _)| i)
            .collect();

        let mut wrt = Writer::from_writer(out);
        wrt.write_record(exported.iter().map(|&i| headers[i].as_str()))?;
        for row in rows {
            wrt.write_record(exported.iter().map(|&i| row.value_at(i).unwrap_or("")))?;
        }
        wrt.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::csv_loader::CsvLoader;

    #[test]
    fn export_keeps_source_columns_and_drops_derived_ones() {
        let headers = vec!["Title".to_string(), "__idx".to_string(), "Genres".to_string()];
        let rows = vec![RawRow::from_pairs(&[
            ("Title", "Heat"),
            ("__idx", "0"),
            ("Genres", "Crime, Drama"),
        ])];

        let text = CsvWriter::rows_to_string(&headers, &rows).unwrap();

        assert_eq!(text, "Title,Genres\nHeat,\"Crime, Drama\"\n");
    }

    #[test]
    fn repeated_headers_keep_their_own_values() {
        let table = CsvLoader::parse_text("Title,Note,Note\nHeat,a,b\n").unwrap();

        let text = CsvWriter::rows_to_string(&table.headers, &table.rows).unwrap();

        assert_eq!(text, "Title,Note,Note\nHeat,a,b\n");
    }

    #[test]
    fn exported_file_parses_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.csv");
        let headers = vec!["Title".to_string(), "Year".to_string()];
        let rows = vec![
            RawRow::from_pairs(&[("Title", "Alien"), ("Year", "1979")]),
            RawRow::from_pairs(&[("Title", "\"Quoted\" title"), ("Year", "")]),
        ];

        CsvWriter::save_rows_to_csv(&headers, &rows, path.to_str().unwrap()).unwrap();
        let table = CsvLoader::parse_text(&CsvLoader::read_file(&path).unwrap()).unwrap();

        assert_eq!(table.rows, rows);
    }
}
