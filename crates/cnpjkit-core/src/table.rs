//! In-memory rectangular table exchanged with the spreadsheet layer.

use std::fmt;

/// Header row plus string cells. An empty string is an empty cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row, padding or truncating it to the header width.
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the column named exactly `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All cells of the column named `name`, in row order.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(idx).map(String::as_str).unwrap_or(""))
                .collect(),
        )
    }

    /// The first `n` rows, same columns.
    pub fn head(&self, n: usize) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.columns.join(" | "))?;
        for row in &self.rows {
            writeln!(f, "{}", row.join(" | "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut t = Table::new(["Empresa", "CNPJ"]);
        t.push_row(["A", "12.345.678/0001-95"]);
        t.push_row(["B"]);
        t.push_row(["C", "1", "extra"]);
        t
    }

    #[test]
    fn rows_match_header_width() {
        let t = sample();
        assert!(t.rows.iter().all(|r| r.len() == 2));
        assert_eq!(t.rows[1][1], "");
    }

    #[test]
    fn column_lookup_is_case_sensitive() {
        let t = sample();
        assert_eq!(t.column("CNPJ").unwrap(), vec!["12.345.678/0001-95", "", "1"]);
        assert!(t.column("cnpj").is_none());
    }

    #[test]
    fn head_takes_prefix() {
        let t = sample();
        assert_eq!(t.head(2).len(), 2);
        assert_eq!(t.head(10).len(), 3);
        assert_eq!(t.head(0).columns, t.columns);
    }

    #[test]
    fn display_renders_rows() {
        let mut t = Table::new(["CNPJ com Erro"]);
        t.push_row(["00000000000001"]);
        assert_eq!(t.to_string(), "CNPJ com Erro\n00000000000001\n");
    }
}
