//! Document data model: tokens, mention spans, clusters.
//!
//! A [`Document`] owns its tokens. Cluster membership is stored on tokens as
//! indices into [`Document::clusters`], so a token can belong to several
//! clusters ("her" inside "her brother").
//!
//! # Invariant
//!
//! Concatenating `text + whitespace` over all tokens reproduces the input text
//! exactly. Leading whitespace becomes a [`Tag::Space`] token.

use serde::{Deserialize, Serialize};

use crate::mention::Mention;

/// Coarse word class assigned by the tagger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    /// Whitespace-only token (leading whitespace)
    Space,
    /// Punctuation
    Punct,
    /// Numeral
    Number,
    /// Personal or possessive pronoun
    Pronoun,
    /// Article or quantifier ("the", "a", "these")
    Determiner,
    /// "and", "or"
    Coordinator,
    /// Genitive clitic "'s"
    Possessive,
    /// Preposition, auxiliary, adverb, frequent verb
    Function,
    /// Capitalized name-like word
    Proper,
    /// Any other word (nouns, adjectives, unlisted verbs)
    #[default]
    Word,
}

/// A single token of the input text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Surface text
    pub text: String,
    /// Whitespace following the token (may be empty)
    pub whitespace: String,
    /// Start character offset (inclusive)
    pub start: usize,
    /// End character offset (exclusive)
    pub end: usize,
    /// Sentence index, starting at 0
    pub sentence: usize,
    /// Word class
    pub tag: Tag,
    /// True if the token lies inside a mention of some cluster
    pub in_coref: bool,
    /// Indices into [`Document::clusters`], in cluster order
    pub clusters: Vec<usize>,
}

impl Token {
    /// Create an untagged token.
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        whitespace: impl Into<String>,
        start: usize,
        end: usize,
        sentence: usize,
    ) -> Self {
        Self {
            text: text.into(),
            whitespace: whitespace.into(),
            start,
            end,
            sentence,
            tag: Tag::default(),
            in_coref: false,
            clusters: Vec::new(),
        }
    }

    /// Lower-cased surface text.
    #[must_use]
    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }

    /// Text followed by its whitespace.
    #[must_use]
    pub fn text_with_ws(&self) -> String {
        format!("{}{}", self.text, self.whitespace)
    }

    /// True for tokens that carry no word (space, punctuation).
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self.tag, Tag::Space | Tag::Punct)
    }
}

/// A mention span projected onto the text, as exposed in clusters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Surface text (internal whitespace preserved, trailing stripped)
    pub text: String,
    /// First token index
    pub start_token: usize,
    /// One past the last token index
    pub end_token: usize,
    /// Start character offset
    pub start: usize,
    /// End character offset
    pub end: usize,
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// A coreference cluster: mentions of one entity plus its main mention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    /// Index of the cluster in the document
    pub id: usize,
    /// Most representative mention
    pub main: Span,
    /// All mentions, in document order
    pub mentions: Vec<Span>,
}

impl Cluster {
    /// Number of mentions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mentions.len()
    }

    /// True if the cluster has no mentions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mentions.is_empty()
    }

    /// True if any mention covers token `index`.
    #[must_use]
    pub fn covers_token(&self, index: usize) -> bool {
        self.mentions
            .iter()
            .any(|m| m.start_token <= index && index < m.end_token)
    }
}

/// Formats as `main: [m1, m2, ...]`.
impl std::fmt::Display for Cluster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mentions: Vec<&str> = self.mentions.iter().map(|m| m.text.as_str()).collect();
        write!(f, "{}: [{}]", self.main.text, mentions.join(", "))
    }
}

/// A parsed and (optionally) resolved document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Document {
    text: String,
    tokens: Vec<Token>,
    #[serde(skip)]
    mentions: Vec<Mention>,
    clusters: Vec<Cluster>,
    has_coref: bool,
    resolved: Option<String>,
}

impl Document {
    /// Create a document from its text and tokens.
    #[must_use]
    pub fn new(text: impl Into<String>, tokens: Vec<Token>) -> Self {
        Self {
            text: text.into(),
            tokens,
            ..Default::default()
        }
    }

    /// The original input text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Tokens in order.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Mutable tokens (for tagging stages).
    pub fn tokens_mut(&mut self) -> &mut [Token] {
        &mut self.tokens
    }

    /// Detected mentions, sorted by (start, end) token.
    #[must_use]
    pub fn mentions(&self) -> &[Mention] {
        &self.mentions
    }

    /// Coreference clusters, ordered by first mention.
    #[must_use]
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// True if at least one cluster was found.
    #[must_use]
    pub fn has_coref(&self) -> bool {
        self.has_coref
    }

    /// Text with every mention replaced by its cluster's main mention.
    ///
    /// Equal to the input when no coreference stage ran or nothing was found.
    #[must_use]
    pub fn resolved_text(&self) -> &str {
        self.resolved.as_deref().unwrap_or(&self.text)
    }

    /// Surface text of tokens `start..end`, without the trailing whitespace.
    #[must_use]
    pub fn span_text(&self, start: usize, end: usize) -> String {
        let mut out = String::new();
        for (i, token) in self.tokens[start..end].iter().enumerate() {
            out.push_str(&token.text);
            if start + i + 1 < end {
                out.push_str(&token.whitespace);
            }
        }
        out
    }

    /// Build a [`Span`] for tokens `start..end`.
    #[must_use]
    pub fn span(&self, start: usize, end: usize) -> Span {
        Span {
            text: self.span_text(start, end),
            start_token: start,
            end_token: end,
            start: self.tokens[start].start,
            end: self.tokens[end - 1].end,
        }
    }

    /// Main-mention texts of every cluster containing `token`.
    #[must_use]
    pub fn main_mentions_for(&self, token: &Token) -> Vec<&str> {
        token
            .clusters
            .iter()
            .filter_map(|&c| self.clusters.get(c))
            .map(|c| c.main.text.as_str())
            .collect()
    }

    pub(crate) fn set_mentions(&mut self, mentions: Vec<Mention>) {
        self.mentions = mentions;
    }

    /// Install clusters, annotate tokens, and record the resolved text.
    pub(crate) fn set_coref(&mut self, clusters: Vec<Cluster>, resolved: String) {
        for token in &mut self.tokens {
            token.in_coref = false;
            token.clusters.clear();
        }
        for cluster in &clusters {
            for mention in &cluster.mentions {
                for token in &mut self.tokens[mention.start_token..mention.end_token] {
                    token.in_coref = true;
                    if !token.clusters.contains(&cluster.id) {
                        token.clusters.push(cluster.id);
                    }
                }
            }
        }
        self.has_coref = !clusters.is_empty();
        self.clusters = clusters;
        self.resolved = Some(resolved);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        // "She loves him."
        let tokens = vec![
            Token::new("She", " ", 0, 3, 0),
            Token::new("loves", " ", 4, 9, 0),
            Token::new("him", "", 10, 13, 0),
            Token::new(".", "", 13, 14, 0),
        ];
        Document::new("She loves him.", tokens)
    }

    #[test]
    fn test_span_text_strips_trailing_whitespace() {
        let d = doc();
        assert_eq!(d.span_text(0, 2), "She loves");
        let span = d.span(0, 2);
        assert_eq!(span.start, 0);
        assert_eq!(span.end, 9);
    }

    #[test]
    fn test_resolved_text_defaults_to_input() {
        let d = doc();
        assert!(!d.has_coref());
        assert_eq!(d.resolved_text(), "She loves him.");
    }

    #[test]
    fn test_set_coref_annotates_tokens() {
        let mut d = doc();
        let cluster = Cluster {
            id: 0,
            main: d.span(0, 1),
            mentions: vec![d.span(0, 1), d.span(2, 3)],
        };
        d.set_coref(vec![cluster], "She loves She.".into());

        assert!(d.has_coref());
        assert!(d.tokens()[0].in_coref);
        assert!(!d.tokens()[1].in_coref);
        assert_eq!(d.tokens()[2].clusters, vec![0]);
        assert_eq!(d.main_mentions_for(&d.tokens()[2]), vec!["She"]);
        assert_eq!(d.resolved_text(), "She loves She.");
    }

    #[test]
    fn test_cluster_display() {
        let d = doc();
        let cluster = Cluster {
            id: 0,
            main: d.span(0, 1),
            mentions: vec![d.span(0, 1), d.span(2, 3)],
        };
        assert_eq!(cluster.to_string(), "She: [She, him]");
        assert!(cluster.covers_token(2));
        assert!(!cluster.covers_token(1));
    }
}
