//! Column-aligned table output.

use console::measure_text_width;

/// A borderless table whose columns are padded to the widest cell.
///
/// Widths are measured on the displayed text, so styled cells line up.
#[derive(Debug)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    column_widths: Vec<usize>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        let headers: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
        let column_widths = headers.iter().map(|h| measure_text_width(h)).collect();

        Self {
            headers,
            rows: Vec::new(),
            column_widths,
        }
    }

    /// Add a row; cells past the header count are dropped.
    pub fn add_row(&mut self, row: Vec<String>) {
        let mut row = row;
        row.truncate(self.headers.len());

        for (width, cell) in self.column_widths.iter_mut().zip(&row) {
            *width = (*width).max(measure_text_width(cell));
        }

        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the header and rows, one line each.
    pub fn render_lines(&self) -> Vec<String> {
        std::iter::once(&self.headers)
            .chain(&self.rows)
            .map(|row| self.render_row(row))
            .collect()
    }

    fn render_row(&self, row: &[String]) -> String {
        let last = self.column_widths.len().saturating_sub(1);
        let mut line = String::new();

        for (i, width) in self.column_widths.iter().enumerate() {
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            line.push_str(cell);
            if i < last {
                let padding = width.saturating_sub(measure_text_width(cell));
                line.push_str(&" ".repeat(padding + 2));
            }
        }

        line.trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_empty_renders_header() {
        let table = Table::new(&["MIME TYPE", "LABEL"]);
        assert!(table.is_empty());
        assert_eq!(table.render_lines(), vec!["MIME TYPE  LABEL"]);
    }

    #[test]
    fn table_pads_to_widest_cell() {
        let mut table = Table::new(&["A", "B"]);
        table.add_row(vec!["longer".into(), "x".into()]);
        table.add_row(vec!["s".into(), "y".into()]);

        assert_eq!(table.row_count(), 2);
        assert_eq!(
            table.render_lines(),
            vec!["A       B", "longer  x", "s       y"]
        );
    }

    #[test]
    fn table_ignores_styling_when_measuring() {
        let mut table = Table::new(&["A", "B"]);
        table.add_row(vec!["\u{1b}[1mbold\u{1b}[0m".into(), "x".into()]);
        let lines = table.render_lines();
        assert!(lines[0].starts_with("A     B"));
        assert!(lines[1].ends_with("bold\u{1b}[0m  x"));
    }
}
