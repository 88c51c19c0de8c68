use super::{JobKind, ScrapeJob};
use crate::browser::Browser;
use crate::config::{render_url, Config};
use crate::error::{Result, ScraperError};
use crate::extract::{map_rows, Column, ColumnSpec, FieldRecord};
pub use crate::log_info;

pub const ANCHOR: &str = "table.items";
const ROWS: &str = "table.items > tbody > tr";
const CELLS: &str = "td";

pub const HEADER: &[&str] = &[
    "Siralama",
    "Onceki_Siralama",
    "Ulke",
    "Toplam",
    "Sampiyonlar_Ligi",
    "Avrupa_Ligi",
    "Konferans_Ligi",
    "Devam_Edenler",
    "20_21",
    "21_22",
    "22_23",
    "23_24",
    "24_25",
    "Toplam_Puan",
];

pub const COLUMNS: ColumnSpec = ColumnSpec {
    columns: &[
        Column::Numeric { cell: 0, field: "Siralama" },
        Column::Numeric { cell: 1, field: "Onceki_Siralama" },
        Column::Text { cell: 2, field: "Ulke" },
        Column::Numeric { cell: 3, field: "Toplam" },
        Column::Numeric { cell: 4, field: "Sampiyonlar_Ligi" },
        Column::Numeric { cell: 5, field: "Avrupa_Ligi" },
        Column::Numeric { cell: 6, field: "Konferans_Ligi" },
        Column::Numeric { cell: 7, field: "Devam_Edenler" },
        Column::Numeric { cell: 8, field: "20_21" },
        Column::Numeric { cell: 9, field: "21_22" },
        Column::Numeric { cell: 10, field: "22_23" },
        Column::Numeric { cell: 11, field: "23_24" },
        Column::Numeric { cell: 12, field: "24_25" },
        Column::Numeric { cell: 13, field: "Toplam_Puan" },
    ],
    min_cells: 14,
};

pub fn job(config: &Config) -> ScrapeJob {
    let kind = JobKind::Uefa;
    let screenshot_dir = config.output.screenshot_dir.join(kind.dir());
    ScrapeJob {
        kind,
        label: format!("uefa coefficients {}", config.uefa_season),
        url: render_url(&config.urls.uefa, None, config.uefa_season),
        data_path: config
            .output
            .data_dir
            .join(kind.dir())
            .join("uefa_coefficients.csv"),
        screenshot_path: screenshot_dir.join("uefa_coefficients.png"),
        error_screenshot_path: screenshot_dir.join("error_uefa.png"),
    }
}

pub async fn extract(browser: &dyn Browser) -> Result<Vec<FieldRecord>> {
    let rows = browser.get_rows(ROWS, CELLS).await?;
    if rows.is_empty() {
        return Err(ScraperError::NoRows.into());
    }
    log_info!("[uefa] Found {} rows", rows.len());

    let records = map_rows(&rows, &COLUMNS);
    for record in &records {
        log_info!("[uefa] Processed {}", record.get("Ulke").unwrap_or_default());
    }
    Ok(records)
}
