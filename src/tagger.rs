//! Lexicon-driven word-class tagger.
//!
//! Exploits cheap structural signals first (whitespace, punctuation, digits,
//! capitalization) and falls back to closed word lists. Capitalized words that
//! open a sentence are names unless the lexicon knows their lower-cased form.

use crate::lexicon::{self, Lexicon};
use crate::token::{Tag, Token};

/// Assigns a [`Tag`] to every token.
#[derive(Debug, Clone, Copy)]
pub struct Tagger<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> Tagger<'a> {
    /// Create a tagger backed by `lexicon`.
    #[must_use]
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    /// Tag tokens in place.
    pub fn tag(&self, tokens: &mut [Token]) {
        let mut sentence_start = true;
        let mut last_sentence = usize::MAX;

        for i in 0..tokens.len() {
            if tokens[i].sentence != last_sentence {
                last_sentence = tokens[i].sentence;
                sentence_start = true;
            }

            let prev = if i > 0 { Some(tokens[i - 1].tag) } else { None };
            let tag = self.classify(&tokens[i], prev, sentence_start);
            tokens[i].tag = tag;

            // Opening quotes and brackets keep the next word sentence-initial.
            if !matches!(tag, Tag::Space | Tag::Punct) {
                sentence_start = false;
            }
        }
    }

    fn classify(&self, token: &Token, prev: Option<Tag>, sentence_start: bool) -> Tag {
        let text = token.text.as_str();
        let Some(first) = text.chars().next() else {
            return Tag::Space;
        };

        if text.chars().all(char::is_whitespace) {
            return Tag::Space;
        }
        if !text.chars().any(char::is_alphanumeric) {
            return Tag::Punct;
        }
        if first.is_ascii_digit() {
            return Tag::Number;
        }

        let lower = token.lower();
        if matches!(lower.as_str(), "'s" | "’s") {
            return match prev {
                Some(Tag::Proper | Tag::Word) => Tag::Possessive,
                _ => Tag::Function,
            };
        }

        // All-caps acronyms ("US", "NASA") are names, not pronouns.
        let is_acronym = text.chars().count() > 1 && text.chars().all(|c| c.is_uppercase() || c == '.');
        if is_acronym {
            return Tag::Proper;
        }

        if lexicon::pronoun(&lower).is_some() {
            return Tag::Pronoun;
        }
        if lexicon::is_coordinator(&lower) {
            return Tag::Coordinator;
        }
        if lexicon::determiner(&lower).is_some() {
            return Tag::Determiner;
        }
        if lexicon::is_function_word(&lower) {
            return Tag::Function;
        }

        if first.is_uppercase() {
            if sentence_start && self.lexicon.is_known_noun(&lower) {
                return Tag::Word;
            }
            return Tag::Proper;
        }

        if lexicon::is_adverb(&lower) {
            return Tag::Function;
        }
        Tag::Word
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::Tokenizer;

    fn tags(text: &str) -> Vec<(String, Tag)> {
        let lexicon = Lexicon::builtin();
        let mut tokens = Tokenizer::new().tokenize(text);
        Tagger::new(&lexicon).tag(&mut tokens);
        tokens.into_iter().map(|t| (t.text, t.tag)).collect()
    }

    fn tag_of(text: &str, word: &str) -> Tag {
        tags(text)
            .into_iter()
            .find(|(w, _)| w == word)
            .map(|(_, t)| t)
            .unwrap()
    }

    #[test]
    fn test_basic_classes() {
        let t = tags("My sister has a dog. She loves him.");
        let expected = [
            Tag::Pronoun,
            Tag::Word,
            Tag::Function,
            Tag::Determiner,
            Tag::Word,
            Tag::Punct,
            Tag::Pronoun,
            Tag::Function,
            Tag::Pronoun,
            Tag::Punct,
        ];
        let got: Vec<Tag> = t.into_iter().map(|(_, tag)| tag).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_sentence_initial_names() {
        assert_eq!(tag_of("Deepika too has a dog.", "Deepika"), Tag::Proper);
        assert_eq!(tag_of("Coronavirus quickly spread.", "Coronavirus"), Tag::Proper);
        assert_eq!(tag_of("Coronavirus quickly spread.", "quickly"), Tag::Function);
        // Known common noun at sentence start stays a common noun.
        assert_eq!(tag_of("Dogs bark.", "Dogs"), Tag::Word);
    }

    #[test]
    fn test_quote_keeps_sentence_start() {
        assert_eq!(tag_of("\"Sisters are great.\"", "Sisters"), Tag::Word);
    }

    #[test]
    fn test_possessive_clitic() {
        assert_eq!(tag_of("Jane's dog", "'s"), Tag::Possessive);
        assert_eq!(tag_of("it's late", "'s"), Tag::Function);
    }

    #[test]
    fn test_acronym_is_not_pronoun() {
        assert_eq!(tag_of("They moved to the US.", "US"), Tag::Proper);
        assert_eq!(tag_of("Call us today.", "us"), Tag::Pronoun);
    }

    #[test]
    fn test_coordinator_and_numbers() {
        assert_eq!(tag_of("Ana and Tom", "and"), Tag::Coordinator);
        assert_eq!(tag_of("In 1916, a man", "1916"), Tag::Number);
        assert_eq!(tag_of("In 1916, a man", ","), Tag::Punct);
    }
}
