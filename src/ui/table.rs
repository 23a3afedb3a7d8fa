use tabled::{Table, Tabled, settings::Style};

/// One written table in the end-of-run summary
#[derive(Debug, Clone, Tabled)]
pub struct TableSummary {
    #[tabled(rename = "Table")]
    pub table: String,
    #[tabled(rename = "Rows")]
    pub rows: usize,
    #[tabled(rename = "Magnitudes")]
    pub magnitudes: String,
}

impl TableSummary {
    /// `mags` are the first and last magnitude written, if any rows were
    pub fn new(table: impl Into<String>, rows: usize, mags: Option<(f64, f64)>) -> Self {
        let magnitudes = match mags {
            Some((first, last)) => format!("{:.2} to {:.2}", first, last),
            None => "-".to_string(),
        };
        Self {
            table: table.into(),
            rows,
            magnitudes,
        }
    }
}

pub fn summary_table(rows: &[TableSummary]) -> String {
    if rows.is_empty() {
        return String::new();
    }
    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_table() {
        let rendered = summary_table(&[
            TableSummary::new("stars_h3_0", 100, Some((-26.7, 1.25))),
            TableSummary::new("stars_h3_1", 0, None),
        ]);
        assert!(rendered.contains("stars_h3_0"));
        assert!(rendered.contains("-26.70 to 1.25"));
        assert!(rendered.contains("Magnitudes"));
        assert!(summary_table(&[]).is_empty());
    }
}
