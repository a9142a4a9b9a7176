use lazy_static::lazy_static;
use scraper::{Html, Selector};

use crate::logger;
use crate::types::Verse;
use crate::{VERSE_FONT_FACE, VERSE_JOIN_GLYPH, VERSE_NUMBER_ARTIFACT};

lazy_static! {
    static ref P_SELECTOR: Selector = Selector::parse("p").unwrap();
    static ref VERSE_FONT_SELECTOR: Selector =
        Selector::parse(&format!(r#"font[face="{}"]"#, VERSE_FONT_FACE)).unwrap();
}

/// Split the plain text of one verse paragraph into its label and text.
///
/// The first whitespace-separated token holds the verse number. Numbers of a
/// combined verse are joined with '፤' in the source, these become a hyphenated
/// label: "5፤6" to "5-6". Returns None when no verse number remains.
pub fn normalize_verse(fragment: &str) -> Option<Verse> {
    let cleaned = fragment.replace(VERSE_NUMBER_ARTIFACT, "");
    let mut tokens = cleaned.split_whitespace();

    let number_field = tokens.next()?;

    let segments: Vec<&str> = number_field
        .split(VERSE_JOIN_GLYPH)
        .filter(|s| !s.is_empty())
        .collect();

    if segments.is_empty() {
        return None;
    }

    let label = segments.join("-");
    let text = tokens.collect::<Vec<&str>>().join(" ");

    Some(Verse { label, text })
}

/// Text of the verse font run in each paragraph, in document order.
///
/// Paragraphs without the verse font are skipped.
pub fn verse_fragments(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .select(&P_SELECTOR)
        .filter_map(|p| p.select(&VERSE_FONT_SELECTOR).next())
        .map(|font| font.text().collect::<String>().trim().to_string())
        .collect()
}

/// All verses of a chapter document, in document order.
pub fn extract_verses(html: &str) -> Vec<Verse> {
    verse_fragments(html)
        .into_iter()
        .filter_map(|fragment| {
            let verse = normalize_verse(&fragment);
            if verse.is_none() {
                logger::debug(&format!("Skipped fragment without a verse number: '{}'", fragment));
            }
            verse
        })
        .collect()
}
