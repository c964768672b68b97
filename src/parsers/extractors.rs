use crate::error::SearchError;
use crate::utils::collapse_whitespace;
use scraper::{ElementRef, Selector};

/// Pulls one field value out of a listing item.
///
/// Implementations return `None` when the structural marker they look for is
/// absent or empty; they never fail.
pub trait FieldExtractor: Send + Sync {
    fn extract(&self, item: ElementRef<'_>) -> Option<String>;
}

/// Compile a selector, reporting which field it belongs to on failure
pub fn compile_selector(field: &'static str, selector: &str) -> Result<Selector, SearchError> {
    Selector::parse(selector).map_err(|e| SearchError::InvalidSelector {
        field,
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// Whitespace-normalized text of the first descendant matching a selector
#[derive(Debug)]
pub struct TextOf {
    selector: Selector,
}

impl TextOf {
    pub fn new(field: &'static str, selector: &str) -> Result<Self, SearchError> {
        Ok(Self {
            selector: compile_selector(field, selector)?,
        })
    }
}

impl FieldExtractor for TextOf {
    fn extract(&self, item: ElementRef<'_>) -> Option<String> {
        let element = item.select(&self.selector).next()?;
        let text = collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "));
        if text.is_empty() { None } else { Some(text) }
    }
}

/// Attribute value of the first descendant matching a selector that carries the attribute
#[derive(Debug)]
pub struct AttrOf {
    selector: Selector,
    attr: &'static str,
}

impl AttrOf {
    pub fn new(field: &'static str, selector: &str, attr: &'static str) -> Result<Self, SearchError> {
        Ok(Self {
            selector: compile_selector(field, selector)?,
            attr,
        })
    }
}

impl FieldExtractor for AttrOf {
    fn extract(&self, item: ElementRef<'_>) -> Option<String> {
        item.select(&self.selector)
            .filter_map(|e| e.value().attr(self.attr))
            .map(str::trim)
            .find(|v| !v.is_empty())
            .map(str::to_string)
    }
}
