use crate::error::{Result, ScraperError};
use scraper::{ElementRef, Html, Selector};

pub fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| ScraperError::SelectorError(format!("{}: {}", selector, e)).into())
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

pub fn contains(html: &str, selector: &str) -> Result<bool> {
    let selector = parse_selector(selector)?;
    let document = Html::parse_document(html);
    let found = document.select(&selector).next().is_some();
    Ok(found)
}

pub fn first_text(html: &str, selector: &str) -> Result<Option<String>> {
    let selector = parse_selector(selector)?;
    let document = Html::parse_document(html);
    let text = document.select(&selector).next().map(element_text);
    Ok(text)
}

pub fn all_text(html: &str, selector: &str) -> Result<Vec<String>> {
    let selector = parse_selector(selector)?;
    let document = Html::parse_document(html);
    let texts = document.select(&selector).map(element_text).collect();
    Ok(texts)
}

pub fn rows(html: &str, row_selector: &str, cell_selector: &str) -> Result<Vec<Vec<String>>> {
    let row_selector = parse_selector(row_selector)?;
    let cell_selector = parse_selector(cell_selector)?;
    let document = Html::parse_document(html);
    let rows = document
        .select(&row_selector)
        .map(|row| row.select(&cell_selector).map(element_text).collect())
        .collect();
    Ok(rows)
}
