use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tunebook_core::{Database, HeaderField, Tune, TuneId};

/// Number of tunes stored for one book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookCount {
    pub book: i64,
    pub count: usize,
}

/// Number of tunes written in one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyCount {
    pub key: String,
    pub count: usize,
}

/// In-memory snapshot of the `tunes` relation.
#[derive(Debug, Clone, Default)]
pub struct TuneTable {
    tunes: Vec<Tune>,
}

impl TuneTable {
    /// Load every stored tune.
    pub fn load(db: &Database) -> tunebook_core::Result<Self> {
        let tunes = db.load_all()?;
        log::debug!("Loaded {} tune(s) into the query table", tunes.len());
        Ok(Self { tunes })
    }

    #[must_use]
    pub fn from_tunes(tunes: Vec<Tune>) -> Self {
        Self { tunes }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tunes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tunes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tune> {
        self.tunes.iter()
    }

    #[must_use]
    pub fn find(&self, id: TuneId) -> Option<&Tune> {
        self.tunes.iter().find(|tune| tune.id == id)
    }

    /// Every tune from one book, in stored order.
    #[must_use]
    pub fn by_book(&self, book: i64) -> Vec<&Tune> {
        self.tunes.iter().filter(|tune| tune.book == book).collect()
    }

    /// Tunes whose rhythm contains `term`, ignoring case and surrounding
    /// whitespace in `term`.
    #[must_use]
    pub fn by_rhythm(&self, term: &str) -> Vec<&Tune> {
        self.containing(HeaderField::Rhythm, term)
    }

    /// Tunes whose title contains `term`, ignoring case and surrounding
    /// whitespace in `term`.
    #[must_use]
    pub fn search_title(&self, term: &str) -> Vec<&Tune> {
        self.containing(HeaderField::Title, term)
    }

    // An absent value is searched as "", so it only matches an empty term.
    fn containing(&self, field: HeaderField, term: &str) -> Vec<&Tune> {
        let needle = term.trim().to_lowercase();
        self.tunes
            .iter()
            .filter(|tune| {
                tune.header(field)
                    .unwrap_or_default()
                    .to_lowercase()
                    .contains(&needle)
            })
            .collect()
    }

    /// Tune counts per book, by ascending book number.
    #[must_use]
    pub fn counts_per_book(&self) -> Vec<BookCount> {
        let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
        for tune in &self.tunes {
            *counts.entry(tune.book).or_default() += 1;
        }
        counts
            .into_iter()
            .map(|(book, count)| BookCount { book, count })
            .collect()
    }

    /// The `n` most common keys, most frequent first.
    ///
    /// Keys with equal counts keep the order in which they were first seen.
    /// Tunes without a key are not counted.
    #[must_use]
    pub fn top_keys(&self, n: usize) -> Vec<KeyCount> {
        let mut counts: Vec<KeyCount> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for key in self.tunes.iter().filter_map(|tune| tune.key.as_deref()) {
            if let Some(&slot) = index.get(key) {
                counts[slot].count += 1;
            } else {
                index.insert(key, counts.len());
                counts.push(KeyCount {
                    key: key.to_string(),
                    count: 1,
                });
            }
        }

        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts.truncate(n);
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tune(id: i64, book: i64, title: Option<&str>, rhythm: Option<&str>, key: Option<&str>) -> Tune {
        Tune {
            id: TuneId::new(id),
            book,
            source_name: String::from("test.abc"),
            reference: id.to_string(),
            title: title.map(str::to_string),
            rhythm: rhythm.map(str::to_string),
            meter: None,
            key: key.map(str::to_string),
            body: format!("X:{id}"),
        }
    }

    fn sample() -> TuneTable {
        TuneTable::from_tunes(vec![
            tune(1, 2, Some("The Kesh"), Some("jig"), Some("G")),
            tune(2, 1, Some("Drowsy Maggie"), Some("Reel"), Some("Edor")),
            tune(3, 2, Some("Cooley's"), Some("reel"), Some("Edor")),
            tune(4, 1, None, None, Some("G")),
            tune(5, 3, Some("The Butterfly"), Some("slip jig"), None),
            tune(6, 2, Some("Out on the Ocean"), Some("Jig"), Some("G")),
        ])
    }

    fn ids(tunes: &[&Tune]) -> Vec<i64> {
        tunes.iter().map(|t| t.id.as_i64()).collect()
    }

    #[test]
    fn test_by_book() {
        let table = sample();
        assert_eq!(ids(&table.by_book(2)), vec![1, 3, 6]);
        assert!(table.by_book(99).is_empty());
    }

    #[test]
    fn test_by_rhythm_ignores_case() {
        let table = sample();
        assert_eq!(ids(&table.by_rhythm("REEL")), ids(&table.by_rhythm("reel")));
        assert_eq!(ids(&table.by_rhythm("reel")), vec![2, 3]);
    }

    #[test]
    fn test_by_rhythm_is_substring_match() {
        let table = sample();
        assert_eq!(ids(&table.by_rhythm("  jig ")), vec![1, 5, 6]);
    }

    #[test]
    fn test_empty_term_matches_absent_values() {
        let table = sample();
        assert_eq!(table.by_rhythm("").len(), table.len());
        assert_eq!(ids(&table.search_title("   ")), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_search_title() {
        let table = sample();
        assert_eq!(ids(&table.search_title("the")), vec![1, 5, 6]);
        assert_eq!(ids(&table.search_title("MAGGIE")), vec![2]);
        assert!(table.search_title("nothing like this").is_empty());
    }

    #[test]
    fn test_counts_per_book_ascending() {
        let table = sample();
        assert_eq!(
            table.counts_per_book(),
            vec![
                BookCount { book: 1, count: 2 },
                BookCount { book: 2, count: 3 },
                BookCount { book: 3, count: 1 },
            ]
        );
    }

    #[test]
    fn test_top_keys_skips_absent_and_orders_ties_by_first_seen() {
        let table = sample();
        let keys = table.top_keys(10);
        assert_eq!(
            keys,
            vec![
                KeyCount { key: String::from("G"), count: 3 },
                KeyCount { key: String::from("Edor"), count: 2 },
            ]
        );

        let tied = TuneTable::from_tunes(vec![
            tune(1, 1, None, None, Some("A")),
            tune(2, 1, None, None, Some("D")),
            tune(3, 1, None, None, Some("D")),
            tune(4, 1, None, None, Some("A")),
            tune(5, 1, None, None, Some("Bm")),
        ]);
        let top = tied.top_keys(2);
        assert_eq!(top[0].key, "A");
        assert_eq!(top[1].key, "D");
        assert_eq!(top.len(), 2);
    }

    #[test]
    fn test_find() {
        let table = sample();
        assert_eq!(
            table.find(TuneId::new(3)).and_then(|t| t.title.as_deref()),
            Some("Cooley's")
        );
        assert!(table.find(TuneId::new(42)).is_none());
    }

    #[test]
    fn test_queries_on_empty_table() {
        let table = TuneTable::default();
        assert!(table.is_empty());
        assert!(table.by_book(1).is_empty());
        assert!(table.by_rhythm("reel").is_empty());
        assert!(table.search_title("").is_empty());
        assert!(table.counts_per_book().is_empty());
        assert!(table.top_keys(10).is_empty());
    }

    #[test]
    fn test_absent_field_across_table_yields_empty() {
        let table = TuneTable::from_tunes((1..=3).map(|i| tune(i, 1, None, None, None)).collect());
        assert!(table.by_rhythm("reel").is_empty());
        assert!(table.search_title("kesh").is_empty());
        assert!(table.top_keys(5).is_empty());
    }

    #[test]
    fn test_results_serialize() {
        let json = serde_json::to_string(&BookCount { book: 1, count: 2 }).unwrap();
        assert_eq!(json, r#"{"book":1,"count":2}"#);
    }
}
