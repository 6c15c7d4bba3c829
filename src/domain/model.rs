use crate::utils::error::{AnnotateError, Result};
use serde::Serialize;

pub const ID_COLUMN: &str = "ID";
pub const IMAGE_COLUMN: &str = "Image Src";
pub const PRIMARY_COLOR_COLUMN: &str = "Primary Color";
pub const SECONDARY_COLOR_COLUMN: &str = "Secondary Color";

/// Up to two dominant colors of a product. An empty string means undetermined.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColorResult {
    pub primary: String,
    pub secondary: String,
}

impl ColorResult {
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }

    pub fn is_undetermined(&self) -> bool {
        self.primary.is_empty() && self.secondary.is_empty()
    }
}

/// One input row; fields are aligned with the owning table's headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnLayout {
    id: usize,
    image: usize,
    primary: usize,
    secondary: usize,
}

/// Ordered product table carrying the two derived color columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Record>,
    layout: ColumnLayout,
}

impl Table {
    /// Checks the required columns and prepares the color columns, all cells empty.
    ///
    /// A color column already present in the input is reused in place rather
    /// than duplicated. Short rows are padded so every record spans all headers.
    pub fn new(mut headers: Vec<String>, mut rows: Vec<Record>) -> Result<Self> {
        let missing: Vec<String> = [ID_COLUMN, IMAGE_COLUMN]
            .into_iter()
            .filter(|name| column_index(&headers, name).is_none())
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(AnnotateError::SchemaError {
                required: vec![ID_COLUMN.to_string(), IMAGE_COLUMN.to_string()],
                missing,
            });
        }

        let primary = ensure_column(&mut headers, PRIMARY_COLOR_COLUMN);
        let secondary = ensure_column(&mut headers, SECONDARY_COLOR_COLUMN);

        let layout = ColumnLayout {
            id: column_index(&headers, ID_COLUMN).unwrap_or_default(),
            image: column_index(&headers, IMAGE_COLUMN).unwrap_or_default(),
            primary,
            secondary,
        };

        for row in &mut rows {
            row.fields.resize(headers.len(), String::new());
            row.fields[layout.primary].clear();
            row.fields[layout.secondary].clear();
        }

        Ok(Self {
            headers,
            rows,
            layout,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn id(&self, row: usize) -> Option<&str> {
        self.cell(row, self.layout.id)
    }

    pub fn image_url(&self, row: usize) -> Option<&str> {
        self.cell(row, self.layout.image)
    }

    pub fn colors(&self, row: usize) -> Option<ColorResult> {
        Some(ColorResult::new(
            self.cell(row, self.layout.primary)?,
            self.cell(row, self.layout.secondary)?,
        ))
    }

    pub fn set_colors(&mut self, row: usize, colors: ColorResult) {
        if let Some(record) = self.rows.get_mut(row) {
            record.fields[self.layout.primary] = colors.primary;
            record.fields[self.layout.secondary] = colors.secondary;
        }
    }

    fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.fields.get(column))
            .map(String::as_str)
    }
}

fn column_index(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

fn ensure_column(headers: &mut Vec<String>, name: &str) -> usize {
    column_index(headers, name).unwrap_or_else(|| {
        headers.push(name.to_string());
        headers.len() - 1
    })
}

/// Counters gathered while annotating a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnnotationStats {
    pub total: usize,
    pub unreachable: usize,
    pub undetermined: usize,
    pub annotated: usize,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub table: Table,
    pub stats: AnnotationStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn record(fields: &[&str]) -> Record {
        Record {
            fields: fields.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_new_appends_color_columns() {
        let table = Table::new(
            headers(&["ID", "Title", "Image Src"]),
            vec![record(&["1", "Shirt", "https://img/1.png"])],
        )
        .unwrap();

        assert_eq!(
            table.headers(),
            &["ID", "Title", "Image Src", "Primary Color", "Secondary Color"]
        );
        assert_eq!(table.id(0), Some("1"));
        assert_eq!(table.image_url(0), Some("https://img/1.png"));
        assert_eq!(table.colors(0), Some(ColorResult::default()));
    }

    #[test]
    fn test_new_reports_missing_columns() {
        let err = Table::new(headers(&["Handle", "Image Src"]), vec![]).unwrap_err();
        match err {
            AnnotateError::SchemaError { missing, .. } => assert_eq!(missing, vec!["ID"]),
            other => panic!("unexpected error: {other:?}"),
        }

        // 欄位名稱區分大小寫
        assert!(Table::new(headers(&["id", "image src"]), vec![]).is_err());
    }

    #[test]
    fn test_existing_color_columns_are_reset_in_place() {
        let table = Table::new(
            headers(&["ID", "Primary Color", "Image Src"]),
            vec![record(&["7", "stale", "https://img/7.png"])],
        )
        .unwrap();

        assert_eq!(
            table.headers(),
            &["ID", "Primary Color", "Image Src", "Secondary Color"]
        );
        assert_eq!(table.rows()[0].fields, vec!["7", "", "https://img/7.png", ""]);
    }

    #[test]
    fn test_set_colors_targets_one_row() {
        let mut table = Table::new(
            headers(&["ID", "Image Src"]),
            vec![record(&["1", "a"]), record(&["2", "b"])],
        )
        .unwrap();

        table.set_colors(1, ColorResult::new("red", "blue"));
        table.set_colors(5, ColorResult::new("ignored", ""));

        assert_eq!(table.colors(0), Some(ColorResult::default()));
        assert_eq!(table.colors(1), Some(ColorResult::new("red", "blue")));
        assert_eq!(table.len(), 2);
    }
}
