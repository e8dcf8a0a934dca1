//! Open Graph metadata extraction from HTML

use crate::types::ScrapResult;
use scraper::{Html, Selector};

/// Extract Open Graph fields from an HTML document
///
/// Pure function: the same input always yields the same output. Tags
/// absent from the document yield `None` rather than an error, and the
/// lenient parser means even badly malformed input degrades to a result
/// with all fields absent instead of failing.
pub fn extract_opengraph(html: &str) -> ScrapResult {
    let document = Html::parse_document(html);

    ScrapResult {
        title: meta_content(&document, "og:title"),
        url: meta_content(&document, "og:url"),
        og_type: meta_content(&document, "og:type"),
        image: meta_content(&document, "og:image"),
        description: meta_content(&document, "og:description"),
        // og:article:author, as emitted by article-style pages
        author: meta_content(&document, "og:article:author"),
    }
}

/// Read the content attribute of the first meta tag with the given property
fn meta_content(document: &Html, property: &str) -> Option<String> {
    let selector = Selector::parse(&format!(r#"meta[property="{}"]"#, property)).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(str::to_string)
}
