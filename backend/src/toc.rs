use lazy_static::lazy_static;
use scraper::{Html, Selector};

use crate::errors::ExtractError;

lazy_static! {
    static ref LINK_SELECTOR: Selector = Selector::parse("a[href]").unwrap();
}

/// Chapter numbers listed in a table of contents, in TOC order, each number once.
///
/// Only links whose href starts with `stem` count. The chapter number is the last
/// whitespace-separated word of the link text with every non-digit removed,
/// e.g. "ምዕራፍ 12" or "Chapter 12." gives 12.
pub fn toc_chapter_numbers(html: &str, stem: &str) -> Result<Vec<u32>, ExtractError> {
    let document = Html::parse_document(html);
    let mut numbers: Vec<u32> = Vec::new();

    for link in document.select(&LINK_SELECTOR) {
        let href = link.value().attr("href").unwrap_or_default();
        if !href.starts_with(stem) {
            continue;
        }

        let text = link.text().collect::<String>();
        let last_word = text.split_whitespace().last().unwrap_or_default();
        let digits: String = last_word.chars().filter(|c| c.is_ascii_digit()).collect();

        let number: u32 = digits.parse().map_err(|_| ExtractError::TocChapterNumber {
            href: href.to_string(),
            text: text.trim().to_string(),
        })?;

        if numbers.contains(&number) {
            tracing::debug!("Chapter {} listed twice in TOC, href: {}", number, href);
            continue;
        }
        numbers.push(number);
    }

    Ok(numbers)
}
