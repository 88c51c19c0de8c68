use crate::browser::Browser;
use crate::error::Result;
use crate::extract::{extract as extract_labelled, CountPattern, ExtractionPattern, FieldRecord};
pub use crate::{log_debug, log_info};

pub const ANCHOR: &str = "div.large-8.columns";
const HEADLINES: &str = "div.large-8.columns div.headline";
const TEXT_BLOCKS: &str = "div.large-8.columns div.text";

pub const HEADER: &[&str] = &[
    "Giden_Sayisi",
    "Gelen_Sayisi",
    "Transfer_Geliri",
    "Kulup_Basina_Gelir",
    "Oyuncu_Basina_Gelir",
    "Transfer_Gideri",
    "Kulup_Basina_Gider",
    "Oyuncu_Basina_Gider",
    "Toplam_Bilanco",
    "Kulup_Basina_Bilanco",
    "Oyuncu_Basina_Bilanco",
];

const COUNT_LABELS: &[(&str, &str)] = &[
    ("Giden_Sayisi", "Gidenler:"),
    ("Gelen_Sayisi", "Gelenler:"),
];

const AMOUNT_LABELS: &[(&str, &str)] = &[
    ("Transfer_Geliri", "Transfer gelir:"),
    ("Kulup_Basina_Gelir", "Kulüp başına gelir:"),
    ("Oyuncu_Basina_Gelir", "Oyuncu başına gelir:"),
    ("Transfer_Gideri", "Transfer giderleri:"),
    ("Kulup_Basina_Gider", "Kulüp başına giderler:"),
    ("Oyuncu_Basina_Gider", "Oyuncu başına giderler:"),
    ("Toplam_Bilanco", "Toplam bilanço:"),
    ("Kulup_Basina_Bilanco", "Kulüp başına bilanço:"),
    ("Oyuncu_Basina_Bilanco", "Oyuncu başına bilanço:"),
];

/// Compiled label patterns for the transfer balance page.
pub struct BalancePatterns {
    counts: Vec<CountPattern>,
    amounts: Vec<ExtractionPattern>,
}

impl BalancePatterns {
    pub fn new() -> Result<Self> {
        let counts = COUNT_LABELS
            .iter()
            .map(|&(field, label)| CountPattern::new(field, label))
            .collect::<Result<Vec<_>>>()?;
        let amounts = AMOUNT_LABELS
            .iter()
            .map(|&(field, label)| ExtractionPattern::new(field, label))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { counts, amounts })
    }

    /// Counts from the headlines, then amounts from the text blocks.
    ///
    /// Unmatched labels are left out, so an unrelated page gives an empty record.
    pub fn balance<S: AsRef<str>>(&self, headlines: &[S], blocks: &[S]) -> FieldRecord {
        let mut record = FieldRecord::new();
        for pattern in &self.counts {
            if let Some(count) = pattern.find(headlines) {
                record.insert(pattern.field(), count);
            }
        }
        for (field, value) in extract_labelled(blocks, &self.amounts).iter() {
            record.insert(field, value);
        }
        for pattern in &self.amounts {
            if !record.contains(pattern.field()) {
                log_debug!("[transfers] No match for `{}`", pattern.label());
            }
        }
        record
    }
}

pub async fn extract(browser: &dyn Browser) -> Result<Vec<FieldRecord>> {
    let patterns = BalancePatterns::new()?;
    let headlines = browser.get_all_text(HEADLINES).await?;
    let blocks = browser.get_all_text(TEXT_BLOCKS).await?;

    let record = patterns.balance(&headlines, &blocks);
    if record.is_empty() {
        return Ok(Vec::new());
    }

    log_info!("[transfers] Transfer balance:");
    for (field, value) in record.iter() {
        log_info!("[transfers] {}: {}", field, value);
    }
    Ok(vec![record])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::fake::FakeBrowser;

    const URL: &str = "https://example.com/transfers";

    const PAGE: &str = r#"
        <div class="large-8 columns">
          <div class="box">
            <div class="headline">Gidenler: 301</div>
            <div class="text">Transfer gelir: 238.850.000 €
              Kulüp başına gelir: 11.942.500 €
              Oyuncu başına gelir: 793.522 €</div>
          </div>
          <div class="box">
            <div class="headline">Gelenler: 290</div>
            <div class="text">Transfer giderleri: 215.390.000 €
              Kulüp başına giderler: 10.769.500 €
              Oyuncu başına giderler: 742.724 €</div>
          </div>
          <div class="box">
            <div class="text">Toplam bilanço: 23.460.000 €
              Kulüp başına bilanço: 1.173.000 €
              Oyuncu başına bilanço: -50.798 €</div>
          </div>
        </div>
    "#;

    #[test]
    fn counts_come_from_headlines_only() {
        let patterns = BalancePatterns::new().unwrap();
        let record = patterns.balance(
            &["Gidenler: 12 oyuncu", "Gelenler: 7 oyuncu"],
            &["Transfer gelir: 5.000.000 €"],
        );
        assert_eq!(record.get("Giden_Sayisi"), Some("12"));
        assert_eq!(record.get("Gelen_Sayisi"), Some("7"));
        assert_eq!(record.get("Transfer_Geliri"), Some("5000000"));
        assert!(!record.contains("Toplam_Bilanco"));
    }

    #[test]
    fn nothing_matched_gives_empty_record() {
        let patterns = BalancePatterns::new().unwrap();
        let empty: [&str; 0] = [];
        assert!(patterns.balance(&empty, &["Sayfa bulunamadı"]).is_empty());
    }

    #[tokio::test]
    async fn extracts_full_balance_from_page() {
        let mut browser = FakeBrowser::new().with_page(URL, PAGE);
        browser.navigate(URL).await.unwrap();

        let records = extract(&browser).await.unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.len(), HEADER.len());
        assert_eq!(record.get("Giden_Sayisi"), Some("301"));
        assert_eq!(record.get("Gelen_Sayisi"), Some("290"));
        assert_eq!(record.get("Transfer_Geliri"), Some("238850000"));
        assert_eq!(record.get("Kulup_Basina_Gider"), Some("10769500"));
        assert_eq!(record.get("Toplam_Bilanco"), Some("23460000"));
        assert_eq!(record.get("Oyuncu_Basina_Bilanco"), Some("-50798"));
    }

    #[tokio::test]
    async fn unrelated_page_yields_no_records() {
        let mut browser =
            FakeBrowser::new().with_page(URL, "<div class='large-8 columns'><p>Boş</p></div>");
        browser.navigate(URL).await.unwrap();
        assert!(extract(&browser).await.unwrap().is_empty());
    }
}
