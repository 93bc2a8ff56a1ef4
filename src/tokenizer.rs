//! Whitespace-preserving tokenizer.
//!
//! Text is cut into whitespace-delimited chunks; each chunk is then split into
//! leading punctuation, a core, and trailing punctuation. The core is further
//! split at clitics ("did|n't", "Feltman|'s") and at internal punctuation that
//! does not join two word characters ("waiters|/|musicians" but "time-sharing",
//! "1,000", "O'Brien").
//!
//! Whitespace is attached to the last token of its chunk, so
//! `tokens.map(text + whitespace).concat() == input` holds for every input.

use crate::lexicon;
use crate::token::{Tag, Token};

/// Clitics split off the end of a word. Longest first.
const CLITICS: &[&str] = &[
    "n't", "n’t", "'re", "’re", "'ve", "’ve", "'ll", "’ll", "'s", "’s", "'d", "’d", "'m", "’m",
];

/// Rule-based English tokenizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    /// Create a tokenizer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Split `text` into tokens with character offsets and sentence ids.
    #[must_use]
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut sentence = 0usize;
        let mut pending_break = false;
        let mut char_pos = 0usize;

        let lead_len = text.len() - text.trim_start().len();
        if lead_len > 0 {
            let lead = &text[..lead_len];
            let n = lead.chars().count();
            let mut token = Token::new(lead, "", 0, n, 0);
            token.tag = Tag::Space;
            tokens.push(token);
            char_pos = n;
        }

        let mut byte = lead_len;
        while byte < text.len() {
            let rest = &text[byte..];
            let chunk_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
            let chunk = &rest[..chunk_len];
            let after = &rest[chunk_len..];
            let ws_len = after.len() - after.trim_start().len();
            let whitespace = &after[..ws_len];

            let pieces = split_chunk(chunk);
            let last = pieces.len().saturating_sub(1);
            for (i, piece) in pieces.into_iter().enumerate() {
                if pending_break && !is_closing(piece) {
                    sentence += 1;
                    pending_break = false;
                }
                let ws = if i == last { whitespace } else { "" };
                let len = piece.chars().count();
                tokens.push(Token::new(piece, ws, char_pos, char_pos + len, sentence));
                char_pos += len + ws.chars().count();
                if is_sentence_final(piece) {
                    pending_break = true;
                }
            }

            byte += chunk_len + ws_len;
        }

        tokens
    }
}

fn is_sentence_final(piece: &str) -> bool {
    matches!(piece, "." | "!" | "?" | "…")
}

fn is_closing(piece: &str) -> bool {
    matches!(piece, "\"" | "'" | ")" | "]" | "”" | "’" | "»")
}

/// Split one whitespace-free chunk into token slices.
fn split_chunk(chunk: &str) -> Vec<&str> {
    let mut prefixes = Vec::new();
    let mut suffixes = Vec::new();
    let mut core = chunk;

    while let Some(c) = core.chars().next() {
        if c.is_alphanumeric() {
            break;
        }
        let n = c.len_utf8();
        prefixes.push(&core[..n]);
        core = &core[n..];
    }

    while let Some(c) = core.chars().next_back() {
        if c.is_alphanumeric() || (c == '.' && lexicon::is_abbreviation(core)) {
            break;
        }
        let n = c.len_utf8();
        suffixes.push(&core[core.len() - n..]);
        core = &core[..core.len() - n];
    }

    let mut pieces = prefixes;
    if !core.is_empty() {
        split_core(core, &mut pieces);
    }
    pieces.extend(suffixes.into_iter().rev());
    pieces
}

/// Split a core (starts and ends with a word character, or is an
/// abbreviation) at clitics and internal punctuation.
fn split_core<'a>(core: &'a str, out: &mut Vec<&'a str>) {
    if core.ends_with('.') && lexicon::is_abbreviation(core) {
        out.push(core);
        return;
    }

    // `to_ascii_lowercase` keeps byte offsets aligned with `core`.
    let lower = core.to_ascii_lowercase();
    for clitic in CLITICS {
        if lower.len() > clitic.len() && lower.ends_with(clitic) {
            let at = core.len() - clitic.len();
            split_internal(&core[..at], out);
            out.push(&core[at..]);
            return;
        }
    }

    split_internal(core, out);
}

fn split_internal<'a>(stem: &'a str, out: &mut Vec<&'a str>) {
    let chars: Vec<(usize, char)> = stem.char_indices().collect();
    let mut start = 0;

    for (k, &(b, c)) in chars.iter().enumerate() {
        if c.is_alphanumeric() {
            continue;
        }
        let prev = k.checked_sub(1).map(|p| chars[p].1);
        let next = chars.get(k + 1).map(|x| x.1);
        let joins = match c {
            '-' => prev.is_some_and(char::is_alphanumeric) && next.is_some_and(char::is_alphanumeric),
            '.' | ',' => {
                prev.is_some_and(|p| p.is_ascii_digit()) && next.is_some_and(|n| n.is_ascii_digit())
            }
            '\'' | '’' => prev.is_some_and(char::is_alphabetic) && next.is_some_and(char::is_alphabetic),
            _ => false,
        };
        if joins {
            continue;
        }
        if b > start {
            out.push(&stem[start..b]);
        }
        let end = b + c.len_utf8();
        out.push(&stem[b..end]);
        start = end;
    }

    if start < stem.len() {
        out.push(&stem[start..]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(text: &str) -> Vec<String> {
        Tokenizer::new()
            .tokenize(text)
            .into_iter()
            .map(|t| t.text)
            .collect()
    }

    fn roundtrip(text: &str) -> String {
        Tokenizer::new()
            .tokenize(text)
            .iter()
            .map(|t| t.text_with_ws())
            .collect()
    }

    #[test]
    fn test_simple_sentence() {
        assert_eq!(
            texts("My sister has a dog. She loves him."),
            vec!["My", "sister", "has", "a", "dog", ".", "She", "loves", "him", "."]
        );
    }

    #[test]
    fn test_clitics() {
        assert_eq!(
            texts("Eva didn't go to Feltman's."),
            vec!["Eva", "did", "n't", "go", "to", "Feltman", "'s", "."]
        );
    }

    #[test]
    fn test_quotes_and_commas() {
        assert_eq!(
            texts("\"I like her\", said Adam."),
            vec!["\"", "I", "like", "her", "\"", ",", "said", "Adam", "."]
        );
    }

    #[test]
    fn test_internal_joiners() {
        assert_eq!(texts("time-sharing"), vec!["time-sharing"]);
        assert_eq!(texts("1,000.50"), vec!["1,000.50"]);
        assert_eq!(texts("waiters/musicians"), vec!["waiters", "/", "musicians"]);
        assert_eq!(texts("O'Brien"), vec!["O'Brien"]);
    }

    #[test]
    fn test_abbreviations_keep_period() {
        assert_eq!(texts("Mt. Corno"), vec!["Mt.", "Corno"]);
        assert_eq!(texts("Mr. Trump."), vec!["Mr.", "Trump", "."]);
    }

    #[test]
    fn test_sentence_ids() {
        let tokens = Tokenizer::new().tokenize("A dog. It barks! Why? \"Yes.\" Ok");
        let sentence_of = |s: &str| tokens.iter().find(|t| t.text == s).unwrap().sentence;
        assert_eq!(sentence_of("dog"), 0);
        assert_eq!(sentence_of("It"), 1);
        assert_eq!(sentence_of("Why"), 2);
        assert_eq!(sentence_of("Yes"), 3);
        assert_eq!(sentence_of("Ok"), 4);
        // The closing quote stays with its sentence.
        let closing = tokens.iter().filter(|t| t.text == "\"").nth(1).unwrap();
        assert_eq!(closing.sentence, 3);
    }

    #[test]
    fn test_abbreviation_does_not_end_sentence() {
        let tokens = Tokenizer::new().tokenize("Mr. Trump left.");
        assert!(tokens.iter().all(|t| t.sentence == 0));
    }

    #[test]
    fn test_offsets_are_chars() {
        let tokens = Tokenizer::new().tokenize("Zoë met Ana.");
        assert_eq!(tokens[0].start, 0);
        assert_eq!(tokens[0].end, 3);
        assert_eq!(tokens[1].start, 4);
        assert_eq!(tokens[2].start, 8);
    }

    #[test]
    fn test_roundtrip_preserves_whitespace() {
        for text in [
            "",
            "   ",
            "  leading and trailing  ",
            "Tabs\tand\nnewlines\n\n",
            "Punctuation!?... (nested) [brackets]",
            "Unicode “quotes” and ’apostrophes’",
        ] {
            assert_eq!(roundtrip(text), text);
        }
    }

    #[test]
    fn test_leading_whitespace_token() {
        let tokens = Tokenizer::new().tokenize("  Hi");
        assert_eq!(tokens[0].text, "  ");
        assert_eq!(tokens[0].tag, Tag::Space);
        assert_eq!(tokens[1].start, 2);
    }
}
