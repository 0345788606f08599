// src/extractors/columns.rs
//! Fixed-width column boundaries derived from a table header line.

/// Columns of a recorder's chain table, in the header spelling the extractor emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Grantor,
    Grantee,
    Instrument,
    Dated,
    Recording,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::Grantor,
        Column::Grantee,
        Column::Instrument,
        Column::Dated,
        Column::Recording,
    ];

    pub fn header_token(self) -> &'static str {
        match self {
            Column::Grantor => "GRANTOR",
            Column::Grantee => "GRANTEE",
            Column::Instrument => "INSTRUMENT",
            Column::Dated => "DATED",
            Column::Recording => "RECORDING",
        }
    }
}

/// Ordered `(column, start)` pairs; offsets are in characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    columns: Vec<(Column, usize)>,
}

impl ColumnLayout {
    /// True for a line carrying the GRANTOR, GRANTEE and INSTRUMENT tokens.
    pub fn is_header(line: &str) -> bool {
        line.contains("GRANTOR") && line.contains("GRANTEE") && line.contains("INSTRUMENT")
    }

    /// Builds the layout from a header line. Returns `None` if the line is not a header.
    pub fn from_header(line: &str) -> Option<Self> {
        if !Self::is_header(line) {
            return None;
        }

        let mut columns: Vec<(Column, usize)> = Column::ALL
            .iter()
            .filter_map(|&column| {
                line.find(column.header_token())
                    .map(|byte_idx| (column, line[..byte_idx].chars().count()))
            })
            .collect();
        columns.sort_by_key(|&(_, start)| start);

        Some(Self { columns })
    }

    pub fn start_of(&self, column: Column) -> Option<usize> {
        self.columns.iter().find(|(c, _)| *c == column).map(|&(_, start)| start)
    }

    /// Character span `[start, end)` of a column; `end` is `None` for the last column.
    pub fn span_of(&self, column: Column) -> Option<(usize, Option<usize>)> {
        let idx = self.columns.iter().position(|(c, _)| *c == column)?;
        let start = self.columns[idx].1;
        let end = self.columns.get(idx + 1).map(|&(_, next)| next);
        Some((start, end))
    }

    /// Trimmed text of `line` under `column`. Undefined columns and short lines give "".
    pub fn slice<'a>(&self, line: &'a str, column: Column) -> &'a str {
        match self.span_of(column) {
            Some((start, end)) => slice_chars(line, start, end).trim(),
            None => "",
        }
    }
}

fn slice_chars(line: &str, start: usize, end: Option<usize>) -> &str {
    let begin = byte_index(line, start);
    let finish = end.map_or(line.len(), |end| byte_index(line, end));
    if begin >= finish {
        return "";
    }
    &line[begin..finish]
}

fn byte_index(line: &str, char_idx: usize) -> usize {
    line.char_indices()
        .nth(char_idx)
        .map_or(line.len(), |(byte_idx, _)| byte_idx)
}
