use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::types::ResolvedTitle;
use crate::UNKNOWN_BOOK;

/// A book code with its canonical source-language and target-language names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookMapping {
    pub code: String,
    pub source_name: String,
    pub target_name: String,
}

/// Read-only lookup from book code to [`BookMapping`], keeping the canonical book order.
#[derive(Debug, Clone)]
pub struct BookMappingTable {
    entries: Vec<BookMapping>,
    index: HashMap<String, usize>,
}

impl BookMappingTable {
    /// Codes are stored lowercase. A later entry with the same code replaces the earlier one.
    pub fn new(entries: Vec<BookMapping>) -> Self {
        let mut table = BookMappingTable {
            entries: Vec::with_capacity(entries.len()),
            index: HashMap::new(),
        };

        for mut m in entries {
            m.code = m.code.to_lowercase();
            match table.index.get(&m.code) {
                Some(&idx) => table.entries[idx] = m,
                None => {
                    table.index.insert(m.code.clone(), table.entries.len());
                    table.entries.push(m);
                }
            }
        }

        table
    }

    pub fn from_tuples(tuples: &[(&str, &str, &str)]) -> Self {
        Self::new(
            tuples
                .iter()
                .map(|(code, source_name, target_name)| BookMapping {
                    code: code.to_string(),
                    source_name: source_name.to_string(),
                    target_name: target_name.to_string(),
                })
                .collect(),
        )
    }

    pub fn get(&self, code: &str) -> Option<&BookMapping> {
        self.index
            .get(&code.to_lowercase())
            .map(|&idx| &self.entries[idx])
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    /// Resolve a book code to its title pair.
    ///
    /// An unknown code resolves to `(code, "Unknown Book")` with `mapped` set to false.
    /// The caller decides how to report it, the lookup itself has no side effects.
    pub fn resolve(&self, code: &str) -> ResolvedTitle {
        match self.get(code) {
            Some(m) => ResolvedTitle {
                source: m.source_name.clone(),
                target: m.target_name.clone(),
                mapped: true,
            },
            None => ResolvedTitle {
                source: code.to_string(),
                target: UNKNOWN_BOOK.to_string(),
                mapped: false,
            },
        }
    }

    /// Codes in canonical book order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|m| m.code.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &BookMapping> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// (code, English name, Amharic name)
pub static DEFAULT_BOOK_MAPPINGS: [(&str, &str, &str); 66] = [
    ("gen", "Genesis", "ዘፍጥረት"),
    ("exo", "Exodus", "ዘጸአት"),
    ("lev", "Leviticus", "ዘሌዋውያን"),
    ("num", "Numbers", "ዘኍልቍ"),
    ("deu", "Deuteronomy", "ዘዳግም"),
    ("jos", "Joshua", "መጽሐፈ ኢያሱ"),
    ("jdg", "Judges", "መጽሐፈ መሳፍንት"),
    ("rut", "Ruth", "መጽሐፈ ሩት"),
    ("1sa", "1 Samuel", "1ኛ ሳሙኤል"),
    ("2sa", "2 Samuel", "2ኛ ሳሙኤል"),
    ("1ki", "1 Kings", "1ኛ ነገሥት"),
    ("2ki", "2 Kings", "2ኛ ነገሥት"),
    ("1ch", "1 Chronicles", "1ኛ ዜና መዋዕል"),
    ("2ch", "2 Chronicles", "2ኛ ዜና መዋዕል"),
    ("ezr", "Ezra", "መጽሐፈ ዕዝራ"),
    ("neh", "Nehemiah", "መጽሐፈ ነህምያ"),
    ("est", "Esther", "መጽሐፈ አስቴር"),
    ("job", "Job", "መጽሐፈ ኢዮብ"),
    ("psa", "Psalms", "መዝሙረ ዳዊት"),
    ("pro", "Proverbs", "መጽሐፈ ምሳሌ"),
    ("ecc", "Ecclesiastes", "መጽሐፈ መክብብ"),
    ("sos", "Song of Solomon", "መኃልየ መኃልይ ዘሰሎሞን"),
    ("isa", "Isaiah", "ትንቢተ ኢሳይያስ"),
    ("jer", "Jeremiah", "ትንቢተ ኤርምያስ"),
    ("lam", "Lamentations", "ሰቆቃወ ኤርምያስ"),
    ("eze", "Ezekiel", "ትንቢተ ሕዝቅኤል"),
    ("dan", "Daniel", "ትንቢተ ዳንኤል"),
    ("hos", "Hosea", "ትንቢተ ሆሴዕ"),
    ("joe", "Joel", "ትንቢተ ኢዮኤል"),
    ("amo", "Amos", "ትንቢተ አሞጽ"),
    ("oba", "Obadiah", "ትንቢተ አብድዩ"),
    ("jon", "Jonah", "ትንቢተ ዮናስ"),
    ("mic", "Micah", "ትንቢተ ሚክያስ"),
    ("nah", "Nahum", "ትንቢተ ናሆም"),
    ("hab", "Habakkuk", "ትንቢተ ዕንባቆም"),
    ("zep", "Zephaniah", "ትንቢተ ሶፎንያስ"),
    ("hag", "Haggai", "ትንቢተ ሐጌ"),
    ("zec", "Zechariah", "ትንቢተ ዘካርያስ"),
    ("mal", "Malachi", "ትንቢተ ሚልክያስ"),
    ("mat", "Matthew", "የማቴዎስ ወንጌል"),
    ("mar", "Mark", "የማርቆስ ወንጌል"),
    ("luk", "Luke", "የሉቃስ ወንጌል"),
    ("joh", "John", "የዮሐንስ ወንጌል"),
    ("act", "Acts", "የሐዋርያት ሥራ"),
    ("rom", "Romans", "የሮሜ መልእክት"),
    ("1co", "1 Corinthians", "1ኛ ወደ ቆሮንቶስ ሰዎች"),
    ("2co", "2 Corinthians", "2ኛ ወደ ቆሮንቶስ ሰዎች"),
    ("gal", "Galatians", "የገላትያ መልእክት"),
    ("eph", "Ephesians", "የኤፌሶን መልእክት"),
    ("php", "Philippians", "የፊልጵስዩስ መልእክት"),
    ("col", "Colossians", "የቆላስይስ መልእክት"),
    ("1th", "1 Thessalonians", "1ኛ ወደ ተሰሎንቄ ሰዎች"),
    ("2th", "2 Thessalonians", "2ኛ ወደ ተሰሎንቄ ሰዎች"),
    ("1ti", "1 Timothy", "1ኛ ወደ ጢሞቴዎስ"),
    ("2ti", "2 Timothy", "2ኛ ወደ ጢሞቴዎስ"),
    ("tit", "Titus", "የቲቶ መልእክት"),
    ("phi", "Philemon", "የፊልሞና መልእክት"),
    ("heb", "Hebrews", "ወደ ዕብራውያን"),
    ("jam", "James", "የያዕቆብ መልእክት"),
    ("1pe", "1 Peter", "1ኛ የጴጥሮስ መልእክት"),
    ("2pe", "2 Peter", "2ኛ የጴጥሮስ መልእክት"),
    ("1jo", "1 John", "1ኛ የዮሐንስ መልእክት"),
    ("2jo", "2 John", "2ኛ የዮሐንስ መልእክት"),
    ("3jo", "3 John", "3ኛ የዮሐንስ መልእክት"),
    ("jud", "Jude", "የይሁዳ መልእክት"),
    ("rev", "Revelation", "የዮሐንስ ራእይ"),
];

lazy_static! {
    static ref DEFAULT_TABLE: BookMappingTable = BookMappingTable::from_tuples(&DEFAULT_BOOK_MAPPINGS);
}

/// The built-in English / Amharic table.
pub fn default_table() -> &'static BookMappingTable {
    &DEFAULT_TABLE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_every_default_code() {
        let table = default_table();
        assert_eq!(table.len(), 66);

        for (code, source_name, target_name) in DEFAULT_BOOK_MAPPINGS.iter() {
            let t = table.resolve(code);
            assert_eq!(t.source, *source_name);
            assert_eq!(t.target, *target_name);
            assert!(t.mapped);
        }
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let t = default_table().resolve("GEN");
        assert_eq!(t.source, "Genesis");
        assert_eq!(t.target, "ዘፍጥረት");
    }

    #[test]
    fn test_resolve_unknown_code() {
        for code in ["tob", "1ma", "xyz", ""] {
            let t = default_table().resolve(code);
            assert_eq!(t.source, code);
            assert_eq!(t.target, UNKNOWN_BOOK);
            assert!(!t.mapped);
        }
    }

    #[test]
    fn test_resolve_unknown_code_keeps_original_case() {
        let t = default_table().resolve("Tob");
        assert_eq!(t.source, "Tob");
        assert_eq!(t.target, UNKNOWN_BOOK);
    }

    #[test]
    fn test_custom_table() {
        let table = BookMappingTable::from_tuples(&[
            ("TOB", "Tobit", "መጽሐፈ ጦቢት"),
            ("gen", "Genesis", "ዘፍጥረት"),
        ]);
        assert_eq!(table.codes().collect::<Vec<_>>(), vec!["tob", "gen"]);
        assert_eq!(table.resolve("tob").source, "Tobit");
        assert!(!table.resolve("exo").mapped);
    }

    #[test]
    fn test_duplicate_code_replaces_entry() {
        let table = BookMappingTable::from_tuples(&[
            ("gen", "Genesis", "a"),
            ("exo", "Exodus", "b"),
            ("gen", "Genesis", "c"),
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve("gen").target, "c");
        assert_eq!(table.codes().collect::<Vec<_>>(), vec!["gen", "exo"]);
    }

    #[test]
    fn test_default_codes_order() {
        let codes: Vec<&str> = default_table().codes().collect();
        assert_eq!(codes.first(), Some(&"gen"));
        assert_eq!(codes.last(), Some(&"rev"));
    }
}
