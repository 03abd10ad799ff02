use serde::{Deserialize, Serialize};

use crate::model::ids::TuneId;

/// One of the four header lines lifted out of a tune's notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeaderField {
    Title,
    Rhythm,
    Meter,
    Key,
}

impl HeaderField {
    pub const ALL: [Self; 4] = [Self::Title, Self::Rhythm, Self::Meter, Self::Key];

    /// The two-character line prefix that carries this field.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Title => "T:",
            Self::Rhythm => "R:",
            Self::Meter => "M:",
            Self::Key => "K:",
        }
    }

    /// Match a notation line against the header markers.
    ///
    /// Returns the field and the trimmed text after the marker.
    #[must_use]
    pub fn parse_line(line: &str) -> Option<(Self, &str)> {
        Self::ALL.into_iter().find_map(|field| {
            line.strip_prefix(field.marker())
                .map(|rest| (field, rest.trim()))
        })
    }
}

/// A tune as produced by the parser, before the store has given it an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTune {
    /// Book (collection) the source file was loaded from.
    pub book: i64,

    /// Base name of the file the tune came from.
    pub source_name: String,

    /// Text after the tune's `X:` marker, trimmed. May be empty.
    pub reference: String,

    pub title: Option<String>,
    pub rhythm: Option<String>,
    pub meter: Option<String>,
    pub key: Option<String>,

    /// Every line of the tune, `X:` line included, joined with `\n`.
    pub body: String,
}

impl NewTune {
    #[must_use]
    pub fn new(book: i64, source_name: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            book,
            source_name: source_name.into(),
            reference: reference.into(),
            title: None,
            rhythm: None,
            meter: None,
            key: None,
            body: String::new(),
        }
    }

    /// Record a header value unless the field already holds a non-empty one.
    ///
    /// An empty value counts as unset, so the first non-empty header of a
    /// kind wins. Returns `true` when the value was stored.
    pub fn set_header_if_unset(&mut self, field: HeaderField, value: &str) -> bool {
        let slot = self.slot_mut(field);
        if slot.as_deref().is_some_and(|current| !current.is_empty()) {
            return false;
        }
        *slot = Some(value.to_string());
        true
    }

    fn slot_mut(&mut self, field: HeaderField) -> &mut Option<String> {
        match field {
            HeaderField::Title => &mut self.title,
            HeaderField::Rhythm => &mut self.rhythm,
            HeaderField::Meter => &mut self.meter,
            HeaderField::Key => &mut self.key,
        }
    }
}

/// A tune row read back from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tune {
    pub id: TuneId,
    pub book: i64,
    pub source_name: String,
    pub reference: String,
    pub title: Option<String>,
    pub rhythm: Option<String>,
    pub meter: Option<String>,
    pub key: Option<String>,
    pub body: String,
}

impl Tune {
    /// Attach a store id to a parsed tune.
    #[must_use]
    pub fn from_new(id: TuneId, tune: NewTune) -> Self {
        Self {
            id,
            book: tune.book,
            source_name: tune.source_name,
            reference: tune.reference,
            title: tune.title,
            rhythm: tune.rhythm,
            meter: tune.meter,
            key: tune.key,
            body: tune.body,
        }
    }

    #[must_use]
    pub fn header(&self, field: HeaderField) -> Option<&str> {
        match field {
            HeaderField::Title => self.title.as_deref(),
            HeaderField::Rhythm => self.rhythm.as_deref(),
            HeaderField::Meter => self.meter.as_deref(),
            HeaderField::Key => self.key.as_deref(),
        }
    }
}
