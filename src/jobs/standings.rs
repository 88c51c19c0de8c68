use crate::browser::Browser;
use crate::error::{Result, ScraperError};
use crate::extract::{map_rows, Column, ColumnSpec, FieldRecord};
pub use crate::log_info;

pub const ANCHOR: &str = "table.items";
const ROWS: &str = "table.items > tbody > tr:not(.bg_blau_20)";
const CELLS: &str = "td";

pub const HEADER: &[&str] = &[
    "Siralama",
    "Takim",
    "Mac",
    "Galibiyet",
    "Beraberlik",
    "Maglubiyet",
    "Attigi_Gol",
    "Yedigi_Gol",
    "Averaj",
    "Puan",
];

// Cell 1 holds the club crest.
pub const COLUMNS: ColumnSpec = ColumnSpec {
    columns: &[
        Column::Numeric { cell: 0, field: "Siralama" },
        Column::Text { cell: 2, field: "Takim" },
        Column::Numeric { cell: 3, field: "Mac" },
        Column::Numeric { cell: 4, field: "Galibiyet" },
        Column::Numeric { cell: 5, field: "Beraberlik" },
        Column::Numeric { cell: 6, field: "Maglubiyet" },
        Column::Goals {
            cell: 7,
            scored: "Attigi_Gol",
            conceded: "Yedigi_Gol",
        },
        Column::Numeric { cell: 8, field: "Averaj" },
        Column::Numeric { cell: 9, field: "Puan" },
    ],
    min_cells: 10,
};

pub async fn extract(browser: &dyn Browser) -> Result<Vec<FieldRecord>> {
    let rows = browser.get_rows(ROWS, CELLS).await?;
    if rows.is_empty() {
        return Err(ScraperError::NoRows.into());
    }
    log_info!("[standings] Found {} teams", rows.len());

    let records = map_rows(&rows, &COLUMNS);
    for record in &records {
        log_info!("[standings] Processed {}", record.get("Takim").unwrap_or_default());
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::fake::FakeBrowser;

    const URL: &str = "https://example.com/standings";

    fn page(rows: &str) -> String {
        format!(
            r#"<html><body><table class="items"><thead><tr><th>#</th></tr></thead>
               <tbody>{}</tbody></table></body></html>"#,
            rows
        )
    }

    fn row(rank: u32, team: &str, goals: &str, points: u32) -> String {
        format!(
            "<tr><td>{}</td><td><img alt=''></td><td><a>{}</a></td><td>38</td><td>20</td>\
             <td>10</td><td>8</td><td>{}</td><td>+15</td><td>{}</td></tr>",
            rank, team, goals, points
        )
    }

    #[test]
    fn columns_match_header() {
        assert_eq!(COLUMNS.fields(), HEADER.to_vec());
    }

    #[tokio::test]
    async fn extracts_rows_in_order() {
        let html = page(&format!(
            "{}{}<tr class=\"bg_blau_20\"><td>x</td></tr>{}",
            row(1, "Galatasaray", "92:26", 102),
            row(2, "Fenerbahçe", "99:31", 99),
            row(3, "Trabzonspor", "1.001:45", 67)
        ));
        let mut browser = FakeBrowser::new().with_page(URL, &html);
        browser.navigate(URL).await.unwrap();

        let records = extract(&browser).await.unwrap();
        assert_eq!(records.len(), 3);

        let teams: Vec<_> = records.iter().map(|r| r.get("Takim").unwrap()).collect();
        assert_eq!(teams, vec!["Galatasaray", "Fenerbahçe", "Trabzonspor"]);

        let first = &records[0];
        assert_eq!(first.get("Siralama"), Some("1"));
        assert_eq!(first.get("Attigi_Gol"), Some("92"));
        assert_eq!(first.get("Yedigi_Gol"), Some("26"));
        assert_eq!(first.get("Averaj"), Some("15"));
        assert_eq!(first.get("Puan"), Some("102"));
        assert_eq!(records[2].get("Attigi_Gol"), Some("1001"));
    }

    #[tokio::test]
    async fn empty_table_is_an_error() {
        let mut browser = FakeBrowser::new().with_page(URL, &page(""));
        browser.navigate(URL).await.unwrap();
        assert!(extract(&browser).await.is_err());
    }
}
