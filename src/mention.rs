//! Mention detection over tagged tokens.
//!
//! Mentions come in four kinds:
//! - **Pronoun**: "she", "him", "their"
//! - **Proper**: runs of capitalized tokens ("Paul Allen", "Mr. Trump")
//! - **Nominal**: determiner- or possessor-led noun phrases ("a dog",
//!   "her brother", "Jane's dog")
//! - **Group**: two mentions joined by a coordinator ("Eva and Martha")
//!
//! What gets detected depends on the [`ModelSize`]; see its docs.
//!
//! # Example
//!
//! ```rust
//! use corefview::{Model, ModelSize, Pipeline};
//! use corefview::mention::MentionKind;
//!
//! let pipeline = Pipeline::new(Model::builtin(ModelSize::Medium));
//! let doc = pipeline.run("My sister has a dog.").unwrap();
//! let kinds: Vec<MentionKind> = doc.mentions().iter().map(|m| m.kind).collect();
//! assert_eq!(kinds, vec![MentionKind::Pronoun, MentionKind::Nominal, MentionKind::Nominal]);
//! ```

use serde::{Deserialize, Serialize};

use crate::lexicon::{self, Animacy, Gender, Lexicon, Number, Person, Possession};
use crate::model::ModelSize;
use crate::token::{Tag, Token};

/// Type of referring expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MentionKind {
    /// Proper name ("Paul Allen")
    Proper,
    /// Coordinated mentions ("Eva and Martha")
    Group,
    /// Common noun phrase ("a dog", "her brother")
    Nominal,
    /// Pronoun ("she", "his")
    Pronoun,
}

impl MentionKind {
    /// Rank used to pick a cluster's main mention; lower is more representative.
    #[must_use]
    pub fn representativeness(self) -> u8 {
        match self {
            MentionKind::Proper => 0,
            MentionKind::Group | MentionKind::Nominal => 1,
            MentionKind::Pronoun => 2,
        }
    }
}

/// A detected mention with agreement features.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mention {
    /// First token index
    pub start: usize,
    /// One past the last token index
    pub end: usize,
    /// Head token index (last noun of the phrase)
    pub head: usize,
    /// Kind of referring expression
    pub kind: MentionKind,
    /// Gender
    pub gender: Gender,
    /// Number
    pub number: Number,
    /// Animacy
    pub animacy: Animacy,
    /// Grammatical person
    pub person: Person,
    /// Definite noun phrase ("the virus", "her brother")
    pub definite: bool,
    /// Possessive pronoun ("his", determiner "her", "theirs")
    pub possessive: bool,
    /// Token span of the possessor for possessed phrases ("her" in "her brother")
    pub possessor: Option<(usize, usize)>,
    /// Sentence index of the first token
    pub sentence: usize,
}

impl Mention {
    /// True if the two mentions share at least one token.
    #[must_use]
    pub fn overlaps(&self, other: &Mention) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Token span.
    #[must_use]
    pub fn span(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    /// True for pronoun mentions.
    #[must_use]
    pub fn is_pronoun(&self) -> bool {
        self.kind == MentionKind::Pronoun
    }
}

/// Detects mentions for one model size.
#[derive(Debug, Clone, Copy)]
pub struct MentionDetector<'a> {
    size: ModelSize,
    lexicon: &'a Lexicon,
}

impl<'a> MentionDetector<'a> {
    /// Create a detector.
    #[must_use]
    pub fn new(size: ModelSize, lexicon: &'a Lexicon) -> Self {
        Self { size, lexicon }
    }

    /// Detect mentions in tagged tokens, sorted by `(start, end)`.
    #[must_use]
    pub fn detect(&self, tokens: &[Token]) -> Vec<Mention> {
        let nominals = self.size >= ModelSize::Medium;
        let mut mentions: Vec<Mention> = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            match tokens[i].tag {
                Tag::Pronoun => {
                    let lower = tokens[i].lower();
                    let Some(info) = lexicon::pronoun(&lower) else {
                        i += 1;
                        continue;
                    };
                    let opens_phrase =
                        matches!(info.possession, Possession::Determiner | Possession::Ambiguous);
                    // Possession is decided on every model; only medium and
                    // up turn the possessed phrase into a mention.
                    let np_end = if opens_phrase {
                        noun_phrase_end(tokens, i + 1)
                    } else {
                        None
                    };
                    let possessive = match info.possession {
                        Possession::Determiner | Possession::Standalone => true,
                        Possession::Ambiguous => np_end.is_some(),
                        Possession::None => false,
                    };
                    mentions.push(Mention {
                        start: i,
                        end: i + 1,
                        head: i,
                        kind: MentionKind::Pronoun,
                        gender: info.gender,
                        number: info.number,
                        animacy: Animacy::Unknown,
                        person: info.person,
                        definite: true,
                        possessive,
                        possessor: None,
                        sentence: tokens[i].sentence,
                    });
                    if let Some(end) = np_end.filter(|_| nominals) {
                        mentions.push(self.nominal(tokens, i, end, true, Number::Unknown, Some((i, i + 1))));
                        i = end;
                    } else {
                        i += 1;
                    }
                }
                Tag::Determiner if nominals => {
                    let info = lexicon::determiner(&tokens[i].lower());
                    match (info, noun_phrase_end(tokens, i + 1)) {
                        (Some(det), Some(end)) => {
                            mentions.push(self.nominal(tokens, i, end, det.definite, det.number, None));
                            i = end;
                        }
                        _ => i += 1,
                    }
                }
                Tag::Possessive if nominals => {
                    let possessor = mentions.iter().rposition(|m| m.end == i && !m.is_pronoun());
                    match (possessor, noun_phrase_end(tokens, i + 1)) {
                        (Some(p), Some(end)) => {
                            let owner = mentions[p].span();
                            mentions.push(self.nominal(tokens, owner.0, end, true, Number::Unknown, Some(owner)));
                            i = end;
                        }
                        _ => i += 1,
                    }
                }
                Tag::Proper => {
                    let end = proper_run_end(tokens, i);
                    let single_non_referring =
                        end == i + 1 && lexicon::is_non_referring(&tokens[i].lower());
                    if !single_non_referring {
                        mentions.push(self.proper(tokens, i, end));
                    }
                    i = end;
                }
                Tag::Word if self.size == ModelSize::Large => {
                    match noun_phrase_end(tokens, i) {
                        Some(end) if self.lexicon.is_known_noun(&tokens[end - 1].lower()) => {
                            mentions.push(self.nominal(tokens, i, end, false, Number::Unknown, None));
                            i = end;
                        }
                        _ => i += 1,
                    }
                }
                _ => i += 1,
            }
        }

        if nominals {
            let groups = coordinations(tokens, &mentions);
            mentions.extend(groups);
        }

        mentions.sort_by_key(|m| (m.start, m.end));
        mentions.dedup_by_key(|m| (m.start, m.end));
        mentions
    }

    fn proper(&self, tokens: &[Token], start: usize, end: usize) -> Mention {
        let gender = lexicon::title_gender(&tokens[start].lower());
        let place = start > 0
            && tokens[start - 1].tag == Tag::Function
            && lexicon::is_locative(&tokens[start - 1].lower());
        Mention {
            start,
            end,
            head: end - 1,
            kind: MentionKind::Proper,
            gender,
            number: Number::Singular,
            animacy: if place { Animacy::Inanimate } else { Animacy::Unknown },
            person: Person::Third,
            definite: true,
            possessive: false,
            possessor: None,
            sentence: tokens[start].sentence,
        }
    }

    /// Build a nominal mention over `start..end`. The head is the last token;
    /// agreement comes from the last common noun (so "their friend Jenny"
    /// is a person).
    fn nominal(
        &self,
        tokens: &[Token],
        start: usize,
        end: usize,
        definite: bool,
        det_number: Number,
        possessor: Option<(usize, usize)>,
    ) -> Mention {
        let head = end - 1;
        let feature_word = (start..end)
            .rev()
            .find(|&k| tokens[k].tag == Tag::Word)
            .map(|k| tokens[k].lower());

        let (gender, number, animacy) = match feature_word {
            Some(word) => {
                let animacy = self.lexicon.animacy(&word);
                let gender = match self.lexicon.gender(&word) {
                    Gender::Unknown if animacy == Animacy::Inanimate => Gender::Neuter,
                    g => g,
                };
                let number = match det_number {
                    Number::Unknown => self.lexicon.number(&word),
                    n => n,
                };
                (gender, number, animacy)
            }
            // All-name phrase ("the Adriatic Sea")
            None => (Gender::Unknown, Number::Singular, Animacy::Unknown),
        };

        Mention {
            start,
            end,
            head,
            kind: MentionKind::Nominal,
            gender,
            number,
            animacy,
            person: Person::Third,
            definite,
            possessive: false,
            possessor,
            sentence: tokens[start].sentence,
        }
    }
}

/// End of a noun phrase body starting at `from`, or `None` if empty.
///
/// Absorbs names and content words. A participle ("-ing", "-ed") is absorbed
/// only when another plain content word follows it ("a wide-ranging
/// investigation" but not "pressures facing Michael").
fn noun_phrase_end(tokens: &[Token], from: usize) -> Option<usize> {
    let mut k = from;
    while k < tokens.len() {
        match tokens[k].tag {
            Tag::Proper => k += 1,
            Tag::Word => {
                if is_participle(&tokens[k].lower()) {
                    let modifies_next = tokens
                        .get(k + 1)
                        .is_some_and(|n| n.tag == Tag::Word && !is_participle(&n.lower()));
                    if !modifies_next {
                        break;
                    }
                }
                k += 1;
            }
            _ => break,
        }
    }
    (k > from).then_some(k)
}

fn is_participle(lower: &str) -> bool {
    let n = lower.chars().count();
    (n > 4 && lower.ends_with("ing")) || (n > 3 && lower.ends_with("ed"))
}

fn proper_run_end(tokens: &[Token], from: usize) -> usize {
    let mut k = from;
    while k < tokens.len() && tokens[k].tag == Tag::Proper {
        k += 1;
    }
    k
}

/// Group mentions for "X and Y" where X and Y are adjacent top-level,
/// non-pronoun mentions.
fn coordinations(tokens: &[Token], mentions: &[Mention]) -> Vec<Mention> {
    let mut top: Vec<&Mention> = mentions
        .iter()
        .filter(|m| !m.is_pronoun())
        .filter(|m| {
            !mentions
                .iter()
                .any(|o| o.span() != m.span() && o.start <= m.start && m.end <= o.end)
        })
        .collect();
    top.sort_by_key(|m| (m.start, m.end));

    let mut groups = Vec::new();
    for pair in top.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let joined = tokens.get(a.end).is_some_and(|t| t.tag == Tag::Coordinator) && b.start == a.end + 1;
        if !joined {
            continue;
        }
        groups.push(Mention {
            start: a.start,
            end: b.end,
            head: b.head,
            kind: MentionKind::Group,
            gender: Gender::Unknown,
            number: Number::Plural,
            animacy: Animacy::Unknown,
            person: Person::Third,
            definite: true,
            possessive: false,
            possessor: None,
            sentence: a.sentence,
        });
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagger::Tagger;
    use crate::tokenizer::Tokenizer;

    fn detect(text: &str, size: ModelSize) -> (Vec<Token>, Vec<Mention>) {
        let lexicon = Lexicon::builtin();
        let mut tokens = Tokenizer::new().tokenize(text);
        Tagger::new(&lexicon).tag(&mut tokens);
        let mentions = MentionDetector::new(size, &lexicon).detect(&tokens);
        (tokens, mentions)
    }

    fn texts(text: &str, size: ModelSize) -> Vec<String> {
        let (tokens, mentions) = detect(text, size);
        mentions
            .iter()
            .map(|m| {
                tokens[m.start..m.end]
                    .iter()
                    .map(|t| t.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }

    #[test]
    fn test_medium_mentions() {
        assert_eq!(
            texts("My sister has a dog. She loves him.", ModelSize::Medium),
            vec!["My", "My sister", "a dog", "She", "him"]
        );
    }

    #[test]
    fn test_small_skips_nominals() {
        assert_eq!(
            texts("My sister has a dog. She loves him.", ModelSize::Small),
            vec!["My", "She", "him"]
        );
    }

    #[test]
    fn test_large_adds_bare_nominals() {
        let text = "The virus mostly affects elderly people.";
        assert_eq!(texts(text, ModelSize::Medium), vec!["The virus"]);
        assert_eq!(texts(text, ModelSize::Large), vec!["The virus", "elderly people"]);
    }

    #[test]
    fn test_possessive_pronoun_opens_phrase() {
        let (_, mentions) = detect("Ana is older but her brother is taller.", ModelSize::Medium);
        let her = mentions.iter().find(|m| m.is_pronoun()).unwrap();
        assert!(her.possessive);
        let brother = mentions.iter().find(|m| m.kind == MentionKind::Nominal).unwrap();
        assert_eq!(brother.possessor, Some(her.span()));
        assert_eq!(brother.gender, Gender::Masculine);
        assert_eq!(brother.animacy, Animacy::Person);
        assert!(brother.definite);
    }

    #[test]
    fn test_small_model_still_marks_possession() {
        let (_, mentions) = detect("Jane told her friend that she was about to go.", ModelSize::Small);
        assert_eq!(mentions.len(), 3);
        assert!(mentions.iter().all(|m| m.kind != MentionKind::Nominal));
        let her = mentions.iter().find(|m| m.gender == Gender::Feminine && m.possessive);
        assert!(her.is_some());
        let (_, mentions) = detect("They invited her to the party.", ModelSize::Small);
        assert!(mentions.iter().all(|m| !m.possessive));
    }

    #[test]
    fn test_object_her_is_not_possessive() {
        let (_, mentions) = detect("They invited her to the party.", ModelSize::Medium);
        let her = mentions.iter().find(|m| m.kind == MentionKind::Pronoun && m.gender == Gender::Feminine).unwrap();
        assert!(!her.possessive);
    }

    #[test]
    fn test_coordination_group() {
        let (_, mentions) = detect("Ana and Tom are siblings.", ModelSize::Medium);
        let group = mentions.iter().find(|m| m.kind == MentionKind::Group).unwrap();
        assert_eq!(group.span(), (0, 3));
        assert_eq!(group.number, Number::Plural);
        assert_eq!(mentions.len(), 3);
    }

    #[test]
    fn test_genitive_phrase() {
        assert_eq!(
            texts("Jane's dog barked.", ModelSize::Medium),
            vec!["Jane", "Jane 's dog"]
        );
    }

    #[test]
    fn test_participle_boundaries() {
        assert_eq!(
            texts("a dog named Teddy", ModelSize::Medium),
            vec!["a dog", "Teddy"]
        );
        assert_eq!(
            texts("a wide-ranging investigation", ModelSize::Medium),
            vec!["a wide-ranging investigation"]
        );
    }

    #[test]
    fn test_titles_and_months() {
        let (_, mentions) = detect("Mrs. Allen was born in January.", ModelSize::Medium);
        assert_eq!(mentions.len(), 1);
        assert_eq!(mentions[0].gender, Gender::Feminine);
        assert_eq!(mentions[0].span(), (0, 2));
    }

    #[test]
    fn test_names_after_locatives_are_places() {
        let (_, mentions) = detect("Paul Allen was born in Seattle.", ModelSize::Small);
        assert_eq!(mentions[0].animacy, Animacy::Unknown);
        assert_eq!(mentions[1].animacy, Animacy::Inanimate);
    }

    #[test]
    fn test_inanimate_nominal_is_neuter() {
        let (_, mentions) = detect("Sam has a Parker pen.", ModelSize::Medium);
        let pen = mentions.iter().find(|m| m.kind == MentionKind::Nominal).unwrap();
        assert_eq!(pen.gender, Gender::Neuter);
        assert_eq!(pen.animacy, Animacy::Inanimate);
        assert!(!pen.definite);
    }
}
