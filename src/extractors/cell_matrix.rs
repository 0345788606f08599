// src/extractors/cell_matrix.rs
use crate::chain::record::{CandidateEntry, ParsedEntry};

/// One extracted table cell; `None` where the extractor found no text.
pub type Cell = Option<String>;

/// Rows of cells as produced by the table extractor, header row first.
pub type TableMatrix = Vec<Vec<Cell>>;

// Alternatives in priority order: the first one present in the header wins.
const DATE_HEADERS: &[&str] = &["DATED", "DATE", "FILED"];
const RECORDING_HEADERS: &[&str] = &["RECORDING", "BOOK-PAGE", "BOOK_PAGE", "BOOK/PAGE", "BK/PG"];

/// Collapses internal line breaks and runs of whitespace into single spaces.
fn clean_cell(cell: &Cell) -> String {
    cell.as_deref()
        .map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}

fn normalize_header(cell: &Cell) -> String {
    clean_cell(cell).to_uppercase().trim_end_matches(':').trim_end().to_string()
}

/// Resolved column indices of a chain table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ChainColumns {
    date: usize,
    recording: usize,
    grantor: usize,
    grantee: usize,
    instrument: usize,
}

impl ChainColumns {
    /// `None` when any of the five columns is missing, i.e. this is not a chain table.
    fn resolve(header: &[String]) -> Option<Self> {
        let position = |name: &str| header.iter().position(|h| h == name);
        let first_of = |names: &[&str]| names.iter().find_map(|&name| position(name));

        Some(Self {
            date: first_of(DATE_HEADERS)?,
            recording: first_of(RECORDING_HEADERS)?,
            grantor: position("GRANTOR")?,
            grantee: position("GRANTEE")?,
            instrument: position("INSTRUMENT")?,
        })
    }
}

/// Maps pre-extracted table grids to chain entries.
#[derive(Debug, Default)]
pub struct CellMatrixExtractor;

impl CellMatrixExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Entries from every chain table, in table then row order.
    pub fn extract_tables(&self, tables: &[TableMatrix]) -> Vec<ParsedEntry> {
        tables
            .iter()
            .enumerate()
            .flat_map(|(idx, table)| {
                let entries = self.extract_table(table);
                tracing::debug!("Table {} produced {} entries", idx + 1, entries.len());
                entries
            })
            .collect()
    }

    pub fn extract_table(&self, table: &TableMatrix) -> Vec<ParsedEntry> {
        let Some((header_row, rows)) = table.split_first() else {
            return Vec::new();
        };

        let header: Vec<String> = header_row.iter().map(normalize_header).collect();
        let Some(columns) = ChainColumns::resolve(&header) else {
            tracing::debug!("Skipping table without chain columns: {:?}", header);
            return Vec::new();
        };

        rows.iter()
            .filter(|row| {
                let matches = row.len() == header.len();
                if !matches {
                    tracing::debug!("Skipping row with {} cells (header has {})", row.len(), header.len());
                }
                matches
            })
            .filter_map(|row| {
                let cells: Vec<String> = row.iter().map(clean_cell).collect();
                CandidateEntry {
                    date_string: cells[columns.date].clone(),
                    grantor: cells[columns.grantor].clone(),
                    grantee: cells[columns.grantee].clone(),
                    instrument: cells[columns.instrument].clone(),
                    book_page: cells[columns.recording].clone(),
                    remark: String::new(),
                    source_line: cells.join(" | "),
                }
                .into_entry()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[Option<&str>]) -> Vec<Cell> {
        values.iter().map(|v| v.map(str::to_string)).collect()
    }

    fn chain_table() -> TableMatrix {
        vec![
            cells(&[Some("Grantor:"), Some("Grantee:"), Some("Instrument"), Some("Dated:"), Some("Recording:")]),
            cells(&[Some("SMITH JOHN"), Some("DOE\nJANE"), Some("WARRANTY\nDEED"), Some("01/10/2024"), Some("1234-567")]),
            cells(&[None, Some("FIRST BANK"), Some("DEED OF TRUST"), Some("01/10/2024"), Some("1234-568")]),
        ]
    }

    #[test]
    fn test_chain_table_rows_become_entries() {
        let entries = CellMatrixExtractor::new().extract_table(&chain_table());
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].grantee(), "DOE JANE");
        assert_eq!(entries[0].instrument(), "WARRANTY DEED");
        assert_eq!(entries[1].grantor(), "");
        assert_eq!(entries[1].grantee(), "FIRST BANK");
        assert_eq!(entries[1].source_line(), " | FIRST BANK | DEED OF TRUST | 01/10/2024 | 1234-568");
    }

    #[test]
    fn test_header_alternatives_resolve_in_priority_order() {
        let table = vec![
            cells(&[Some("FILED"), Some("DATE"), Some("GRANTOR"), Some("GRANTEE"), Some("INSTRUMENT"), Some("BK/PG"), Some("BOOK\nPAGE")]),
            cells(&[Some("02/02/2022"), Some("01/15/2022"), Some("A"), Some("B"), Some("DEED"), Some("12-34"), Some("ignored")]),
        ];
        let entries = CellMatrixExtractor::new().extract_table(&table);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date_string(), "01/15/2022");
        assert_eq!(entries[0].book_page(), "12-34");
    }

    #[test]
    fn test_non_chain_tables_skipped() {
        let tax_table = vec![
            cells(&[Some("YEAR"), Some("AMOUNT"), Some("PAID")]),
            cells(&[Some("2024"), Some("1,200.00"), Some("YES")]),
        ];
        let missing_recording = vec![
            cells(&[Some("DATED"), Some("GRANTOR"), Some("GRANTEE"), Some("INSTRUMENT")]),
            cells(&[Some("01/10/2024"), Some("A"), Some("B"), Some("DEED")]),
        ];
        let extractor = CellMatrixExtractor::new();
        assert!(extractor.extract_table(&tax_table).is_empty());
        assert!(extractor.extract_table(&missing_recording).is_empty());
        assert!(extractor.extract_table(&Vec::new()).is_empty());
    }

    #[test]
    fn test_invalid_rows_skipped() {
        let mut table = chain_table();
        table.push(cells(&[Some("X"), Some("Y"), Some("DEED"), Some("01/10/2024")])); // ragged
        table.push(cells(&[Some("X"), Some("Y"), Some("DEED"), Some("99/99/2024"), Some("1-2")]));
        table.push(cells(&[None, None, Some("DEED"), Some("01/10/2024"), Some("1-2")]));
        table.push(cells(&[Some("X"), Some("Y"), Some("DEED"), Some("01/10/2024"), None]));

        let entries = CellMatrixExtractor::new().extract_table(&table);
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_tables_concatenate_in_order() {
        let mut second = chain_table();
        second.truncate(2);
        if let Some(cell) = second[1].get_mut(4) {
            *cell = Some("9999-1".to_string());
        }

        let entries = CellMatrixExtractor::new().extract_tables(&[chain_table(), second]);
        let pages: Vec<&str> = entries.iter().map(|e| e.book_page()).collect();
        assert_eq!(pages, vec!["1234-567", "1234-568", "9999-1"]);
    }
}
