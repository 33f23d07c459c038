//! Narrow document query helpers
//!
//! Extraction code asks for text and elements through these functions so that
//! selector handling and "missing element" errors live in one place.

use scraper::{ElementRef, Html, Selector};

use crate::error::{Result, ScrapeError};

/// Compile a CSS selector
pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Validation(format!("Invalid selector {css}: {e:?}")))
}

/// Text content of an element exactly as it appears in the document
pub fn element_raw_text(element: &ElementRef) -> String {
    element.text().collect::<String>()
}

/// Whitespace-trimmed text content of an element
pub fn element_text(element: &ElementRef) -> String {
    element_raw_text(element).trim().to_string()
}

/// Text of the first element matching `css`.
///
/// # Errors
/// `ScrapeError::ElementNotFound` when nothing matches
pub fn select_text(document: &Html, css: &str) -> Result<String> {
    let sel = selector(css)?;
    document
        .select(&sel)
        .next()
        .map(|el| element_text(&el))
        .ok_or_else(|| ScrapeError::ElementNotFound(css.to_string()))
}

/// All elements matching `css`, in document order
pub fn select_all<'a>(document: &'a Html, css: &str) -> Result<Vec<ElementRef<'a>>> {
    let sel = selector(css)?;
    Ok(document.select(&sel).collect())
}

/// `(text, href)` pairs for every anchor matching `css` that has an href.
///
/// The text is left untouched; the href is trimmed.
pub fn select_links(document: &Html, css: &str) -> Result<Vec<(String, String)>> {
    Ok(select_all(document, css)?
        .iter()
        .filter_map(|a| {
            let href = a.value().attr("href")?;
            Some((element_raw_text(a), href.trim().to_string()))
        })
        .collect())
}
