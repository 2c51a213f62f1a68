//! Delimited text reader with delimiter detection.

use crate::error::{Result, TypesiftError};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Lines inspected when detecting the delimiter.
const SNIFF_LINES: usize = 10;

/// Reader settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the first record names the columns.
    pub has_header: bool,
    /// Maximum data rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Column-major cell text.
#[derive(Debug, Clone)]
pub(crate) struct Columns {
    pub names: Vec<String>,
    pub cells: Vec<Vec<String>>,
    pub row_count: usize,
    pub delimiter: u8,
}

/// Read delimited bytes into columns. Short rows are padded with empty
/// cells and long rows truncated to the header width.
pub(crate) fn read_columns(bytes: &[u8], config: &ReaderConfig) -> Result<Columns> {
    let delimiter = match config.delimiter {
        Some(d) => d,
        None => detect_delimiter(bytes)?,
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .quote(config.quote)
        .flexible(true)
        .from_reader(bytes);
    let mut records = reader.byte_records();

    let first = records
        .next()
        .transpose()?
        .ok_or_else(|| TypesiftError::EmptyData("no records found".to_string()))?;

    let (names, first_row) = if config.has_header {
        (first.iter().map(lossy).collect::<Vec<_>>(), None)
    } else {
        let names = (1..=first.len()).map(|i| format!("column_{i}")).collect();
        (names, Some(first))
    };

    if names.is_empty() {
        return Err(TypesiftError::EmptyData("no columns found".to_string()));
    }

    let width = names.len();
    let mut cells: Vec<Vec<String>> = vec![Vec::new(); width];
    let mut row_count = 0;

    for record in first_row.into_iter().map(Ok).chain(records) {
        if config.max_rows.is_some_and(|max| row_count >= max) {
            break;
        }
        let record = record?;
        for (index, column) in cells.iter_mut().enumerate() {
            column.push(record.get(index).map(lossy).unwrap_or_default());
        }
        row_count += 1;
    }

    tracing::debug!(
        columns = width,
        rows = row_count,
        delimiter = %(delimiter as char),
        "read delimited input"
    );

    Ok(Columns {
        names,
        cells,
        row_count,
        delimiter,
    })
}

/// Cell text; bytes that are not UTF-8 become U+FFFD.
fn lossy(field: &[u8]) -> String {
    String::from_utf8_lossy(field).into_owned()
}

/// Pick the delimiter whose per-line count is highest and most consistent
/// over the first few non-blank lines. Falls back to a comma.
pub(crate) fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let text = String::from_utf8_lossy(bytes);
    let lines: Vec<&str> = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(SNIFF_LINES)
        .collect();

    if lines.is_empty() {
        return Err(TypesiftError::EmptyData("no lines to analyze".to_string()));
    }

    let best = DELIMITERS
        .iter()
        .filter_map(|&delimiter| {
            let counts: Vec<usize> = lines
                .iter()
                .map(|line| count_unquoted(line, delimiter))
                .collect();
            let first = counts[0];
            if first == 0 {
                return None;
            }
            let consistent = counts.iter().all(|&c| c == first);
            let score = if consistent { first * 1000 } else { first };
            Some((score, delimiter))
        })
        // Earlier delimiters win ties
        .fold(None, |best: Option<(usize, u8)>, candidate| match best {
            Some(b) if b.0 >= candidate.0 => Some(b),
            _ => Some(candidate),
        });

    Ok(best.map_or(b',', |(_, delimiter)| delimiter))
}

/// Count delimiter occurrences outside double quotes.
fn count_unquoted(line: &str, delimiter: u8) -> usize {
    let delimiter = delimiter as char;
    let mut in_quotes = false;
    line.chars()
        .filter(|&ch| {
            if ch == '"' {
                in_quotes = !in_quotes;
            }
            ch == delimiter && !in_quotes
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter_csv() {
        assert_eq!(detect_delimiter(b"a,b,c\n1,2,3\n4,5,6").unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        assert_eq!(detect_delimiter(b"a\tb\tc\n1\t2\t3").unwrap(), b'\t');
    }

    #[test]
    fn test_detect_delimiter_ignores_quoted() {
        let data = b"name;note\n\"Smith, J\";ok\n\"Doe, A\";fine";
        assert_eq!(detect_delimiter(data).unwrap(), b';');
    }

    #[test]
    fn test_detect_delimiter_single_column() {
        assert_eq!(detect_delimiter(b"value\n1\n2").unwrap(), b',');
        assert!(detect_delimiter(b"\n  \n").is_err());
    }

    #[test]
    fn test_read_with_header() {
        let columns = read_columns(b"id,name\n1,Alice\n2,Bob", &ReaderConfig::default()).unwrap();
        assert_eq!(columns.names, vec!["id", "name"]);
        assert_eq!(columns.row_count, 2);
        assert_eq!(columns.cells[1], vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_read_without_header() {
        let config = ReaderConfig {
            has_header: false,
            ..ReaderConfig::default()
        };
        let columns = read_columns(b"1,a\n2,b\n", &config).unwrap();
        assert_eq!(columns.names, vec!["column_1", "column_2"]);
        assert_eq!(columns.cells[0], vec!["1", "2"]);
    }

    #[test]
    fn test_ragged_rows_and_max_rows() {
        let config = ReaderConfig {
            max_rows: Some(2),
            ..ReaderConfig::default()
        };
        let columns = read_columns(b"a,b\n1\n2,3,4\n5,6", &config).unwrap();
        assert_eq!(columns.row_count, 2);
        assert_eq!(columns.cells[0], vec!["1", "2"]);
        assert_eq!(columns.cells[1], vec!["", "3"]);
    }

    #[test]
    fn test_non_utf8_input() {
        let data = b"nom;r\xe9gion\nA;\xcele-de-France\nB;Bretagne\n";
        assert_eq!(detect_delimiter(data).unwrap(), b';');

        let columns = read_columns(data, &ReaderConfig::default()).unwrap();
        assert_eq!(columns.names, vec!["nom", "r\u{FFFD}gion"]);
        assert_eq!(columns.row_count, 2);
        assert_eq!(columns.cells[1][1], "Bretagne");
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            read_columns(b"", &ReaderConfig { delimiter: Some(b','), ..ReaderConfig::default() }),
            Err(TypesiftError::EmptyData(_))
        ));
    }
}
