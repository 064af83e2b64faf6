//! Keyword tables used by the risk classifier.
//!
//! Matching is case-insensitive substring containment against text that the
//! caller has already lower-cased. Tables are plain data so they can be
//! swapped or extended without touching classification logic.

/// A named, fixed set of lexical markers.
#[derive(Debug, Clone, Copy)]
pub struct KeywordSet {
    name: &'static str,
    terms: &'static [&'static str],
}

impl KeywordSet {
    pub const fn new(name: &'static str, terms: &'static [&'static str]) -> Self {
        Self { name, terms }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn terms(&self) -> &'static [&'static str] {
        self.terms
    }

    /// True if any term occurs in `lowered`.
    pub fn matches(&self, lowered: &str) -> bool {
        self.terms.iter().any(|term| lowered.contains(term))
    }

    /// Number of distinct terms present in `lowered`.
    ///
    /// Each term counts at most once regardless of repetitions.
    pub fn hits(&self, lowered: &str) -> usize {
        self.terms.iter().filter(|term| lowered.contains(*term)).count()
    }
}

pub const POSITIVE_MARKERS: KeywordSet = KeywordSet::new(
    "positive",
    &["happy", "hope", "good", "better", "relieved"],
);

pub const NEGATIVE_MARKERS: KeywordSet = KeywordSet::new(
    "negative",
    &[
        "sad",
        "depressed",
        "anxious",
        "lonely",
        "hopeless",
        "suicide",
        "kill",
        "die",
        "worthless",
        "tired",
    ],
);

/// Self-harm and suicidal ideation phrases.
pub const CRISIS_MARKERS: KeywordSet = KeywordSet::new(
    "crisis",
    &[
        "suicide",
        "suicidal",
        "kill myself",
        "end it all",
        "end my life",
        "not worth living",
        "no reason to live",
        "harm myself",
        "hurt myself",
        "self harm",
        "cut myself",
        "overdose",
        "take pills",
        "jump off",
        "hang myself",
        "no point",
        "better off dead",
        "world without me",
        "want to die",
    ],
);

/// Temporal immediacy and finality language.
pub const HIGH_RISK_MARKERS: KeywordSet = KeywordSet::new(
    "high_risk",
    &[
        "plan",
        "method",
        "tonight",
        "today",
        "soon",
        "final",
        "last time",
        "goodbye",
        "farewell",
    ],
);

/// The full set of tables the classifier consults.
#[derive(Debug, Clone, Copy)]
pub struct Lexicon {
    pub positive: KeywordSet,
    pub negative: KeywordSet,
    pub crisis: KeywordSet,
    pub high_risk: KeywordSet,
}

impl Lexicon {
    pub const fn standard() -> Self {
        Self {
            positive: POSITIVE_MARKERS,
            negative: NEGATIVE_MARKERS,
            crisis: CRISIS_MARKERS,
            high_risk: HIGH_RISK_MARKERS,
        }
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::standard()
    }
}
