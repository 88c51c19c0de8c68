use super::{normalize, FieldRecord, ABSENT_VALUE};

/// How one table cell becomes record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// Cleaned through the number normalizer.
    Numeric { cell: usize, field: &'static str },
    /// Trimmed only (team or country names).
    Text { cell: usize, field: &'static str },
    /// `"A:B"` split into goals-for and goals-against, both normalized.
    Goals {
        cell: usize,
        scored: &'static str,
        conceded: &'static str,
    },
}

/// Ordered columns of a table plus the cell count a data row must have.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub columns: &'static [Column],
    pub min_cells: usize,
}

impl ColumnSpec {
    /// Field names in output order.
    pub fn fields(&self) -> Vec<&'static str> {
        self.columns
            .iter()
            .flat_map(|column| match *column {
                Column::Numeric { field, .. } | Column::Text { field, .. } => vec![field],
                Column::Goals {
                    scored, conceded, ..
                } => vec![scored, conceded],
            })
            .collect()
    }
}

/// Maps one table row; rows shorter than `spec.min_cells` (section headers) give `None`.
pub fn map_row<S: AsRef<str>>(cells: &[S], spec: &ColumnSpec) -> Option<FieldRecord> {
    if cells.len() < spec.min_cells {
        return None;
    }

    let mut record = FieldRecord::new();
    for column in spec.columns {
        match *column {
            Column::Numeric { cell, field } => {
                record.insert(field, normalize(cells.get(cell)?.as_ref()));
            }
            Column::Text { cell, field } => {
                record.insert(field, cells.get(cell)?.as_ref().trim());
            }
            Column::Goals {
                cell,
                scored,
                conceded,
            } => {
                let raw = cells.get(cell)?.as_ref();
                let mut sides = raw.splitn(2, ':');
                let goals_for = sides.next().map(normalize);
                let goals_against = sides.next().map(normalize);
                record.insert(scored, goals_for.unwrap_or_else(|| ABSENT_VALUE.to_string()));
                record.insert(
                    conceded,
                    goals_against.unwrap_or_else(|| ABSENT_VALUE.to_string()),
                );
            }
        }
    }
    Some(record)
}

/// Maps every row that has enough cells, preserving input order.
pub fn map_rows(rows: &[Vec<String>], spec: &ColumnSpec) -> Vec<FieldRecord> {
    rows.iter().filter_map(|row| map_row(row, spec)).collect()
}
