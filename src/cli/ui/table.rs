use crate::cli::ui::style::UiStyle;

#[derive(Debug, Clone)]
pub struct TableColumn {
    pub header: String,
    pub width: usize,
    pub align_right: bool,
}

impl TableColumn {
    pub fn new(header: impl Into<String>, width: usize) -> Self {
        Self {
            header: header.into(),
            width,
            align_right: false,
        }
    }

    /// Right-aligned column for amounts and percentages.
    pub fn numeric(header: impl Into<String>, width: usize) -> Self {
        Self {
            align_right: true,
            ..Self::new(header, width)
        }
    }

    fn pad(&self, cell: &str) -> String {
        let cell = truncate(cell, self.width);
        if self.align_right {
            format!("{:>width$}", cell, width = self.width)
        } else {
            format!("{:<width$}", cell, width = self.width)
        }
    }
}

/// Read-only table rendered with padded columns.
#[derive(Debug, Clone)]
pub struct Table {
    pub title: Option<String>,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(title: Option<&str>, columns: Vec<TableColumn>) -> Self {
        Self {
            title: title.map(str::to_string),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row<S: Into<String>>(&mut self, cells: Vec<S>) {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub struct TableRenderer;

impl TableRenderer {
    pub fn render_lines(table: &Table, style: &UiStyle) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(title) = &table.title {
            lines.push(style.header(title));
        }
        let total_width = table
            .columns
            .iter()
            .map(|column| column.width + 1)
            .sum::<usize>();
        let header = table
            .columns
            .iter()
            .map(|column| column.pad(&column.header))
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(style.header(header.trim_end()));
        lines.push(style.horizontal_line(total_width));
        for row in &table.rows {
            let line = table
                .columns
                .iter()
                .enumerate()
                .map(|(index, column)| column.pad(row.get(index).map(String::as_str).unwrap_or("")))
                .collect::<Vec<_>>()
                .join(" ");
            lines.push(line.trim_end().to_string());
        }
        lines
    }

    pub fn render(table: &Table, style: &UiStyle) {
        for line in Self::render_lines(table, style) {
            println!("{line}");
        }
    }
}

fn truncate(cell: &str, width: usize) -> String {
    if cell.chars().count() <= width {
        return cell.to_string();
    }
    let mut shortened: String = cell.chars().take(width.saturating_sub(1)).collect();
    shortened.push('~');
    shortened
}
