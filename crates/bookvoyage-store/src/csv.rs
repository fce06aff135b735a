//! Minimal RFC 4180 reader and writer.
//!
//! Handles quoted fields with embedded delimiters, doubled quotes and line
//! breaks. Rows are kept as raw strings; typing happens in the loader.

use bookvoyage_core::{Error, Result};

/// A parsed table: one header row plus data rows.
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<CsvRow>,
}

/// One data row with the 1-based line number it started on.
#[derive(Debug, Clone)]
pub struct CsvRow {
    pub line: usize,
    pub fields: Vec<String>,
}

impl CsvTable {
    /// Column position by exact header name.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Fail with `MissingData` naming every absent column.
    pub fn require_columns(&self, table: &str, names: &[&str]) -> Result<()> {
        let missing: Vec<&str> = names
            .iter()
            .copied()
            .filter(|n| self.column(n).is_none())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingData(format!(
                "{table} table is missing required columns: {}",
                missing.join(", ")
            )))
        }
    }
}

impl CsvRow {
    /// Cell at `col`, or `None` when the column is absent, the row is short
    /// or the cell is empty.
    pub fn cell(&self, col: Option<usize>) -> Option<&str> {
        col.and_then(|c| self.fields.get(c))
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// Parse CSV text. The first record is the header row.
pub fn parse(content: &str) -> Result<CsvTable> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut records = Records::new(content);

    let headers = match records.next_record()? {
        Some((_, fields)) => fields.into_iter().map(|h| h.trim().to_string()).collect(),
        None => return Err(Error::MissingData("table is empty".into())),
    };

    let mut rows = Vec::new();
    while let Some((line, fields)) = records.next_record()? {
        // Blank line.
        if fields.len() == 1 && fields[0].is_empty() {
            continue;
        }
        rows.push(CsvRow { line, fields });
    }

    Ok(CsvTable { headers, rows })
}

struct Records<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
}

impl<'a> Records<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            chars: content.chars().peekable(),
            line: 1,
        }
    }

    fn next_record(&mut self) -> Result<Option<(usize, Vec<String>)>> {
        if self.chars.peek().is_none() {
            return Ok(None);
        }

        let start_line = self.line;
        let mut fields = Vec::new();
        let mut field = String::new();
        let mut in_quotes = false;

        while let Some(c) = self.chars.next() {
            if in_quotes {
                match c {
                    '"' if self.chars.peek() == Some(&'"') => {
                        self.chars.next();
                        field.push('"');
                    }
                    '"' => in_quotes = false,
                    '\n' => {
                        self.line += 1;
                        field.push(c);
                    }
                    _ => field.push(c),
                }
                continue;
            }

            match c {
                '"' if field.is_empty() => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut field)),
                '\r' if self.chars.peek() == Some(&'\n') => {}
                '\n' => {
                    self.line += 1;
                    fields.push(field);
                    return Ok(Some((start_line, fields)));
                }
                _ => field.push(c),
            }
        }

        if in_quotes {
            return Err(Error::InvalidData(format!(
                "unterminated quoted field starting on line {start_line}"
            )));
        }
        fields.push(field);
        Ok(Some((start_line, fields)))
    }
}

/// Quote a field when it contains a delimiter, quote or line break.
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Append one record, newline-terminated.
pub fn write_record<S: AsRef<str>>(out: &mut String, fields: &[S]) {
    let line: Vec<String> = fields.iter().map(|f| escape_field(f.as_ref())).collect();
    out.push_str(&line.join(","));
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let table = parse("a,b,c\n1,2,3\n4,,6\n").unwrap();
        assert_eq!(table.headers, vec!["a", "b", "c"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].fields, vec!["4", "", "6"]);
        assert_eq!(table.rows[1].cell(Some(1)), None);
        assert_eq!(table.rows[1].cell(Some(2)), Some("6"));
    }

    #[test]
    fn test_parse_quoted_fields() {
        let content = "title,description\r\n\"Dune\",\"Spice, sand \"\"and\"\" worms\nPart two\"\nEmma,x\n";
        let table = parse(content).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].fields[0], "Dune");
        assert_eq!(table.rows[0].fields[1], "Spice, sand \"and\" worms\nPart two");
        assert_eq!(table.rows[0].line, 2);
        assert_eq!(table.rows[1].line, 4);
    }

    #[test]
    fn test_parse_without_trailing_newline_and_bom() {
        let table = parse("\u{feff}id,name\n1,x").unwrap();
        assert_eq!(table.headers[0], "id");
        assert_eq!(table.rows[0].fields, vec!["1", "x"]);
    }

    #[test]
    fn test_unterminated_quote_is_invalid() {
        let err = parse("a\n\"open").unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_require_columns_lists_missing() {
        let table = parse("work_id,rating\n").unwrap();
        let err = table
            .require_columns("reviews", &["work_id", "rating", "review_text"])
            .unwrap_err();
        match err {
            Error::MissingData(msg) => assert!(msg.contains("review_text")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_write_record_quotes_when_needed() {
        let mut out = String::new();
        write_record(&mut out, &["plain", "a,b", "say \"hi\"", "two\nlines"]);
        assert_eq!(out, "plain,\"a,b\",\"say \"\"hi\"\"\",\"two\nlines\"\n");
    }

    #[test]
    fn test_written_records_parse_back() {
        let mut out = String::new();
        write_record(&mut out, &["h1", "h2"]);
        write_record(&mut out, &["x, y", "\"z\""]);
        let table = parse(&out).unwrap();
        assert_eq!(table.rows[0].fields, vec!["x, y", "\"z\""]);
    }
}
