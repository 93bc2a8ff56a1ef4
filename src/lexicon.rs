//! Word lists and agreement features.
//!
//! Everything the tagger and the resolver know about English words lives here:
//! pronouns, determiners, function words, titles, and noun classes used for
//! gender/number/animacy agreement.
//!
//! # Gender
//!
//! Gender comes from pronouns, gendered common nouns ("sister", "uncle") and
//! honorifics ("Mr.", "Mrs."). Personal names never carry gender: "Mary" and
//! "John" are `Gender::Unknown` and can take any personal pronoun.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// =============================================================================
// Agreement features
// =============================================================================

/// Grammatical gender of a mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// he/him, "brother", "Mr."
    Masculine,
    /// she/her, "sister", "Mrs."
    Feminine,
    /// it/its, inanimate nouns
    Neuter,
    /// Names, "they", animals, unknown nouns
    #[default]
    Unknown,
}

impl Gender {
    /// Two genders agree unless both are known and different.
    #[must_use]
    pub fn agrees(self, other: Gender) -> bool {
        self == Gender::Unknown || other == Gender::Unknown || self == other
    }
}

/// Grammatical number of a mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Number {
    /// One referent
    Singular,
    /// Several referents
    Plural,
    /// "you", "sheep"
    #[default]
    Unknown,
}

impl Number {
    /// Two numbers agree unless both are known and different.
    #[must_use]
    pub fn agrees(self, other: Number) -> bool {
        self == Number::Unknown || other == Number::Unknown || self == other
    }
}

/// Animacy class of a nominal head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Animacy {
    /// "sister", "employee", "people"
    Person,
    /// "dog", "kittens"
    Animal,
    /// "pen", "virus"
    Inanimate,
    /// Proper names, pronouns
    #[default]
    Unknown,
}

/// Grammatical person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Person {
    /// I, we
    First,
    /// you
    Second,
    /// everything else
    #[default]
    Third,
}

// =============================================================================
// Pronouns
// =============================================================================

/// How a pronoun relates to possession.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Possession {
    /// he, him, they
    None,
    /// my, his, its, their: can open a noun phrase
    Determiner,
    /// her: possessive only when a noun phrase follows
    Ambiguous,
    /// mine, hers, theirs
    Standalone,
}

/// Lexical features of a pronoun.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PronounInfo {
    /// Grammatical person
    pub person: Person,
    /// Grammatical number
    pub number: Number,
    /// Grammatical gender
    pub gender: Gender,
    /// Possessive behavior
    pub possession: Possession,
}

const fn pron(person: Person, number: Number, gender: Gender, possession: Possession) -> PronounInfo {
    PronounInfo {
        person,
        number,
        gender,
        possession,
    }
}

/// Look up a lower-cased word in the pronoun table.
#[must_use]
pub fn pronoun(lower: &str) -> Option<PronounInfo> {
    use Gender::*;
    use Number::{Plural, Singular};
    use Person::*;
    use Possession as P;

    let info = match lower {
        "i" | "me" | "myself" => pron(First, Singular, Unknown, P::None),
        "my" => pron(First, Singular, Unknown, P::Determiner),
        "mine" => pron(First, Singular, Unknown, P::Standalone),
        "we" | "us" | "ourselves" => pron(First, Plural, Unknown, P::None),
        "our" => pron(First, Plural, Unknown, P::Determiner),
        "ours" => pron(First, Plural, Unknown, P::Standalone),
        "you" | "yourself" | "yourselves" => pron(Second, Number::Unknown, Unknown, P::None),
        "your" => pron(Second, Number::Unknown, Unknown, P::Determiner),
        "yours" => pron(Second, Number::Unknown, Unknown, P::Standalone),
        "he" | "him" | "himself" => pron(Third, Singular, Masculine, P::None),
        "his" => pron(Third, Singular, Masculine, P::Determiner),
        "she" | "herself" => pron(Third, Singular, Feminine, P::None),
        "her" => pron(Third, Singular, Feminine, P::Ambiguous),
        "hers" => pron(Third, Singular, Feminine, P::Standalone),
        "it" | "itself" => pron(Third, Singular, Neuter, P::None),
        "its" => pron(Third, Singular, Neuter, P::Determiner),
        "they" | "them" | "themselves" | "themself" => pron(Third, Plural, Unknown, P::None),
        "their" => pron(Third, Plural, Unknown, P::Determiner),
        "theirs" => pron(Third, Plural, Unknown, P::Standalone),
        // Neopronouns: singular, no gender assumption
        "xe" | "xem" | "xemself" | "ze" | "zirself" | "hirself" | "ey" | "em" | "emself"
        | "fae" | "faeself" => pron(Third, Singular, Unknown, P::None),
        "xyr" | "zir" | "hir" | "eir" | "faer" => pron(Third, Singular, Unknown, P::Determiner),
        "xyrs" | "zirs" | "hirs" | "eirs" | "faers" => {
            pron(Third, Singular, Unknown, P::Standalone)
        }
        _ => return None,
    };
    Some(info)
}

/// Pronouns excluded from resolution when the blacklist is enabled.
pub const BLACKLIST: &[&str] = &["i", "me", "my", "you", "your"];

/// True if `lower` is a blacklisted first/second-person pronoun.
#[must_use]
pub fn is_blacklisted(lower: &str) -> bool {
    BLACKLIST.contains(&lower)
}

// =============================================================================
// Determiners
// =============================================================================

/// Lexical features of a determiner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeterminerInfo {
    /// "the", "this": refers back to something known
    pub definite: bool,
    /// Number the determiner imposes on its noun phrase
    pub number: Number,
}

/// Look up a lower-cased word in the determiner table.
#[must_use]
pub fn determiner(lower: &str) -> Option<DeterminerInfo> {
    let (definite, number) = match lower {
        "the" => (true, Number::Unknown),
        "this" | "that" | "each" | "every" | "either" | "neither" => (true, Number::Singular),
        "these" | "those" | "both" | "all" => (true, Number::Plural),
        "a" | "an" | "another" => (false, Number::Singular),
        "many" | "several" | "few" => (false, Number::Plural),
        "some" | "any" | "no" | "much" => (false, Number::Unknown),
        _ => return None,
    };
    Some(DeterminerInfo { definite, number })
}

// =============================================================================
// Function words
// =============================================================================

static FUNCTION_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // Prepositions
        "about", "above", "across", "after", "against", "along", "among", "around", "as", "at",
        "before", "behind", "below", "beneath", "beside", "besides", "between", "beyond", "by",
        "despite", "down", "during", "except", "for", "from", "in", "inside", "into", "like",
        "near", "of", "off", "on", "onto", "out", "outside", "over", "past", "since", "through",
        "throughout", "till", "to", "toward", "towards", "under", "until", "up", "upon", "via",
        "with", "within", "without",
        // Conjunctions, subordinators, wh-words
        "but", "so", "yet", "because", "although", "though", "while", "whereas", "if",
        "unless", "whether", "than", "when", "where", "why", "how", "what", "which", "who",
        "whom", "whose",
        // Adverbs and particles
        "also", "too", "not", "n't", "n’t", "very", "always", "never", "often", "just", "even",
        "still", "already", "more", "most", "less", "least", "well", "there", "here", "then",
        "now", "again", "ago", "yes", "please", "only", "ever", "soon", "once", "twice",
        // Auxiliaries and clitics
        "am", "is", "are", "was", "were", "be", "been", "being", "'re", "'ve", "'ll", "'d",
        "'m", "’re", "’ve", "’ll", "’d", "’m", "have", "has", "had", "having", "do", "does",
        "did", "done", "doing", "can", "could", "will", "would", "shall", "should", "may",
        "might", "must", "ought",
        // Frequent verbs
        "say", "says", "said", "tell", "tells", "told", "go", "goes", "went", "gone", "get",
        "gets", "got", "make", "makes", "made", "take", "takes", "took", "see", "sees", "saw",
        "come", "comes", "came", "know", "knows", "knew", "think", "thinks", "thought", "want",
        "wants", "wanted", "love", "loves", "loved", "feel", "feels", "felt", "give", "gives",
        "gave", "find", "finds", "found", "run", "runs", "ran", "spread", "spreads", "affect",
        "affects", "affected", "catch", "catches", "caught", "invite", "invites", "invited",
        "attend", "attends", "attended", "befriend", "befriends", "befriended", "share",
        "shares", "shared", "use", "uses", "used", "develop", "develops", "developed",
        "include", "includes", "included", "including", "pursue", "pursues", "pursued",
        "encourage", "encourages", "encouraged", "undercut", "charging", "looking",
        "bordering", "named", "called", "born", "working", "writing", "growing", "facing",
        "keep", "keeps", "kept", "let", "lets", "seem", "seems", "seemed", "become", "becomes",
        "became", "leave", "leaves", "left", "put", "puts", "mean", "means", "meant", "help",
        "helps", "helped", "live", "lives", "lived", "buy", "buys", "bought", "sell", "sells",
        "sold", "work", "works", "worked", "play", "plays", "played", "believe", "believes",
        "believed", "bring", "brings", "brought", "write", "writes", "wrote", "read", "reads",
        "meet", "meets", "met", "lead", "leads", "led", "speak", "speaks", "spoke", "spend",
        "spends", "spent", "grow", "grows", "grew", "win", "wins", "won", "send", "sends",
        "sent", "stay", "stays", "stayed", "remain", "remains", "remained", "wait", "waits",
        "waited", "die", "dies", "died", "hate", "hates", "hated", "adore", "adores",
        "adored", "owns", "owned",
    ]
    .into_iter()
    .collect()
});

/// True if `lower` is a closed-class word or a frequent verb.
///
/// Function words end noun phrases and never head a mention.
#[must_use]
pub fn is_function_word(lower: &str) -> bool {
    FUNCTION_WORDS.contains(lower)
}

/// Words ending in "-ly" that are not adverbs.
const LY_NOUNS_AND_ADJECTIVES: &[&str] = &[
    "elderly", "friendly", "lonely", "lovely", "early", "daily", "ugly", "silly", "holy",
    "costly", "deadly", "likely", "lively", "family", "supply", "reply", "ally", "belly",
    "jelly", "rally", "bully", "fly", "assembly", "anomaly", "monopoly",
];

/// True if `lower` looks like an adverb ("quickly", "mostly").
#[must_use]
pub fn is_adverb(lower: &str) -> bool {
    lower.len() > 3 && lower.ends_with("ly") && !LY_NOUNS_AND_ADJECTIVES.contains(&lower)
}

/// Coordinating conjunctions that join mentions into a group.
#[must_use]
pub fn is_coordinator(lower: &str) -> bool {
    matches!(lower, "and" | "or" | "nor")
}

// =============================================================================
// Titles, abbreviations, non-referring names
// =============================================================================

/// Honorifics and titles that precede names.
#[must_use]
pub fn is_title(lower: &str) -> bool {
    matches!(
        lower.trim_end_matches('.'),
        "mr" | "mrs" | "ms" | "miss" | "mx" | "dr" | "prof" | "sir" | "madam" | "president"
            | "senator" | "governor" | "judge" | "captain" | "general"
    )
}

/// Gender signalled by an honorific, if any.
#[must_use]
pub fn title_gender(lower: &str) -> Gender {
    match lower.trim_end_matches('.') {
        "mr" | "sir" => Gender::Masculine,
        "mrs" | "ms" | "miss" | "madam" => Gender::Feminine,
        _ => Gender::Unknown,
    }
}

const ABBREVIATIONS: &[&str] = &[
    "mr.", "mrs.", "ms.", "mx.", "dr.", "prof.", "mt.", "st.", "jr.", "sr.", "inc.", "corp.",
    "ltd.", "co.", "vs.", "etc.", "e.g.", "i.e.", "jan.", "feb.", "mar.", "apr.", "aug.",
    "sep.", "sept.", "oct.", "nov.", "dec.", "no.", "gen.", "gov.", "sen.", "rep.", "capt.",
];

/// True if `word` (with its trailing period) is an abbreviation whose period
/// belongs to the word: "Mr.", "Mt.", "U.S.", "J.".
#[must_use]
pub fn is_abbreviation(word: &str) -> bool {
    if !word.ends_with('.') {
        return false;
    }
    let lower = word.to_lowercase();
    if ABBREVIATIONS.contains(&lower.as_str()) {
        return true;
    }
    // Initials: "J." and dotted acronyms: "U.S.", "U.K."
    let stem = &word[..word.len() - 1];
    !stem.is_empty()
        && stem
            .split('.')
            .all(|part| part.chars().count() == 1 && part.chars().all(char::is_alphabetic))
}

/// Prepositions after which a proper name is read as a place
/// ("born in Seattle", "near Mt. Corno").
#[must_use]
pub fn is_locative(lower: &str) -> bool {
    matches!(
        lower,
        "in" | "at" | "near" | "from" | "into" | "across" | "inside" | "outside" | "throughout"
            | "within" | "toward" | "towards"
    )
}

/// Capitalized words that do not introduce referents (months, weekdays).
#[must_use]
pub fn is_non_referring(lower: &str) -> bool {
    matches!(
        lower,
        "january" | "february" | "march" | "april" | "may" | "june" | "july" | "august"
            | "september" | "october" | "november" | "december" | "monday" | "tuesday"
            | "wednesday" | "thursday" | "friday" | "saturday" | "sunday"
    )
}

// =============================================================================
// Noun classes
// =============================================================================

static MALE_NOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "man", "men", "boy", "boys", "brother", "brothers", "father", "fathers", "dad", "son",
        "sons", "husband", "husbands", "uncle", "uncles", "nephew", "nephews", "king", "kings",
        "prince", "gentleman", "gentlemen", "grandfather", "grandson", "actor", "boyfriend",
        "stepfather", "stepson",
    ]
    .into_iter()
    .collect()
});

static FEMALE_NOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "woman", "women", "girl", "girls", "sister", "sisters", "mother", "mothers", "mom",
        "mum", "daughter", "daughters", "wife", "wives", "aunt", "aunts", "niece", "nieces",
        "queen", "queens", "princess", "lady", "ladies", "grandmother", "granddaughter",
        "actress", "girlfriend", "stepmother", "stepdaughter",
    ]
    .into_iter()
    .collect()
});

static PERSON_NOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "person", "people", "child", "children", "kid", "kids", "baby", "babies", "friend",
        "friends", "sibling", "siblings", "parent", "parents", "cousin", "cousins", "owner",
        "owners", "star", "stars", "employee", "employees", "employer", "employers", "client",
        "clients", "entrepreneur", "entrepreneurs", "president", "waiter", "waiters",
        "musician", "musicians", "teacher", "teachers", "student", "students", "doctor",
        "doctors", "nurse", "nurses", "lawyer", "lawyers", "worker", "workers", "member",
        "members", "author", "authors", "writer", "writers", "singer", "singers", "player",
        "players", "leader", "leaders", "manager", "managers", "boss", "neighbor",
        "neighbors", "neighbour", "neighbours", "colleague", "colleagues", "partner",
        "partners", "founder", "founders", "scientist", "scientists", "engineer", "engineers",
        "officer", "officers", "director", "directors", "chairman", "ceo", "spokesperson",
        "guest", "guests", "host", "customer", "customers", "patient", "patients", "boyfriend",
        "girlfriend", "spouse", "team", "crowd",
    ]
    .into_iter()
    .collect()
});

static ANIMAL_NOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "dog", "dogs", "puppy", "puppies", "cat", "cats", "kitten", "kittens", "sheep",
        "animal", "animals", "horse", "horses", "bird", "birds", "cow", "cows", "pet", "pets",
        "fish", "mouse", "mice", "lion", "lions", "tiger", "tigers", "bear", "bears", "rabbit",
        "rabbits", "fox", "foxes", "wolf", "wolves", "parrot", "hamster",
    ]
    .into_iter()
    .collect()
});

static IRREGULAR_PLURALS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "people", "men", "women", "children", "mice", "geese", "teeth", "feet", "police",
        "gentlemen", "wives", "wolves", "ladies", "babies", "puppies", "data",
    ]
    .into_iter()
    .collect()
});

/// Nouns with the same singular and plural form.
const INVARIANT_NOUNS: &[&str] = &["sheep", "fish", "deer", "series", "species", "news"];

/// Extra noun lists merged into the built-in lexicon when a model is loaded.
///
/// Read from `<lexicon_dir>/<size>.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconExtension {
    /// Masculine nouns (imply `Animacy::Person`)
    pub male: Vec<String>,
    /// Feminine nouns (imply `Animacy::Person`)
    pub female: Vec<String>,
    /// Gender-neutral person nouns
    pub person: Vec<String>,
    /// Animal nouns
    pub animal: Vec<String>,
    /// Irregular plural forms
    pub plural: Vec<String>,
}

impl LexiconExtension {
    /// Total number of words in the extension.
    #[must_use]
    pub fn len(&self) -> usize {
        self.male.len() + self.female.len() + self.person.len() + self.animal.len() + self.plural.len()
    }

    /// True if the extension adds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Noun lexicon: built-in lists plus any loaded extension.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    male: HashSet<String>,
    female: HashSet<String>,
    person: HashSet<String>,
    animal: HashSet<String>,
    plural: HashSet<String>,
}

fn lowered(words: Vec<String>) -> impl Iterator<Item = String> {
    words.into_iter().map(|w| w.trim().to_lowercase()).filter(|w| !w.is_empty())
}

impl Lexicon {
    /// The built-in lexicon with no extension.
    #[must_use]
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Merge extra word lists into this lexicon.
    pub fn extend(&mut self, ext: LexiconExtension) {
        self.male.extend(lowered(ext.male));
        self.female.extend(lowered(ext.female));
        self.person.extend(lowered(ext.person));
        self.animal.extend(lowered(ext.animal));
        self.plural.extend(lowered(ext.plural));
    }

    fn is_male(&self, lower: &str) -> bool {
        MALE_NOUNS.contains(lower) || self.male.contains(lower)
    }

    fn is_female(&self, lower: &str) -> bool {
        FEMALE_NOUNS.contains(lower) || self.female.contains(lower)
    }

    /// Gender of a common noun.
    #[must_use]
    pub fn gender(&self, lower: &str) -> Gender {
        if self.is_male(lower) {
            Gender::Masculine
        } else if self.is_female(lower) {
            Gender::Feminine
        } else {
            Gender::Unknown
        }
    }

    /// Animacy of a common noun. Unlisted nouns are inanimate.
    #[must_use]
    pub fn animacy(&self, lower: &str) -> Animacy {
        if self.is_male(lower)
            || self.is_female(lower)
            || PERSON_NOUNS.contains(lower)
            || self.person.contains(lower)
        {
            Animacy::Person
        } else if ANIMAL_NOUNS.contains(lower) || self.animal.contains(lower) {
            Animacy::Animal
        } else {
            Animacy::Inanimate
        }
    }

    /// Number of a common noun, from irregular forms or the "-s" suffix.
    #[must_use]
    pub fn number(&self, lower: &str) -> Number {
        if INVARIANT_NOUNS.contains(&lower) {
            return Number::Unknown;
        }
        if IRREGULAR_PLURALS.contains(lower) || self.plural.contains(lower) {
            return Number::Plural;
        }
        let regular_plural = lower.chars().count() > 3
            && lower.ends_with('s')
            && !lower.ends_with("ss")
            && !lower.ends_with("us")
            && !lower.ends_with("is");
        if regular_plural {
            Number::Plural
        } else {
            Number::Singular
        }
    }

    /// True if the noun is listed in any class (person, animal, gendered).
    #[must_use]
    pub fn is_known_noun(&self, lower: &str) -> bool {
        self.animacy(lower) != Animacy::Inanimate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pronoun_features() {
        let she = pronoun("she").unwrap();
        assert_eq!(she.gender, Gender::Feminine);
        assert_eq!(she.number, Number::Singular);
        assert_eq!(she.person, Person::Third);

        let their = pronoun("their").unwrap();
        assert_eq!(their.number, Number::Plural);
        assert_eq!(their.possession, Possession::Determiner);

        assert_eq!(pronoun("her").unwrap().possession, Possession::Ambiguous);
        assert_eq!(pronoun("my").unwrap().person, Person::First);
        assert!(pronoun("dog").is_none());
    }

    #[test]
    fn test_neopronouns_have_no_gender() {
        for word in ["xe", "zir", "fae", "ey"] {
            let info = pronoun(word).unwrap();
            assert_eq!(info.gender, Gender::Unknown, "{word}");
            assert_eq!(info.person, Person::Third, "{word}");
        }
    }

    #[test]
    fn test_blacklist() {
        assert!(is_blacklisted("my"));
        assert!(is_blacklisted("you"));
        assert!(!is_blacklisted("she"));
        assert!(!is_blacklisted("we"));
    }

    #[test]
    fn test_agreement() {
        assert!(Gender::Feminine.agrees(Gender::Unknown));
        assert!(!Gender::Feminine.agrees(Gender::Masculine));
        assert!(!Gender::Neuter.agrees(Gender::Feminine));
        assert!(Number::Plural.agrees(Number::Unknown));
        assert!(!Number::Plural.agrees(Number::Singular));
    }

    #[test]
    fn test_noun_classes() {
        let lex = Lexicon::builtin();
        assert_eq!(lex.gender("sister"), Gender::Feminine);
        assert_eq!(lex.gender("brother"), Gender::Masculine);
        assert_eq!(lex.gender("friend"), Gender::Unknown);
        assert_eq!(lex.animacy("star"), Animacy::Person);
        assert_eq!(lex.animacy("dog"), Animacy::Animal);
        assert_eq!(lex.animacy("pen"), Animacy::Inanimate);
    }

    #[test]
    fn test_number() {
        let lex = Lexicon::builtin();
        assert_eq!(lex.number("dog"), Number::Singular);
        assert_eq!(lex.number("cats"), Number::Plural);
        assert_eq!(lex.number("people"), Number::Plural);
        assert_eq!(lex.number("virus"), Number::Singular);
        assert_eq!(lex.number("business"), Number::Singular);
        assert_eq!(lex.number("sheep"), Number::Unknown);
    }

    #[test]
    fn test_extension_merges_lowercased() {
        let mut lex = Lexicon::builtin();
        assert_eq!(lex.animacy("goat"), Animacy::Inanimate);
        lex.extend(LexiconExtension {
            animal: vec!["Goat".into(), "  ".into()],
            female: vec!["ewe".into()],
            ..Default::default()
        });
        assert_eq!(lex.animacy("goat"), Animacy::Animal);
        assert_eq!(lex.gender("ewe"), Gender::Feminine);
        assert_eq!(lex.animacy("ewe"), Animacy::Person);
    }

    #[test]
    fn test_abbreviations() {
        assert!(is_abbreviation("Mr."));
        assert!(is_abbreviation("Mt."));
        assert!(is_abbreviation("U.S."));
        assert!(is_abbreviation("J."));
        assert!(!is_abbreviation("dog."));
        assert!(!is_abbreviation("Mr"));
    }

    #[test]
    fn test_adverbs() {
        assert!(is_adverb("quickly"));
        assert!(is_adverb("mostly"));
        assert!(!is_adverb("elderly"));
        assert!(!is_adverb("family"));
        assert!(!is_adverb("fly"));
    }

    #[test]
    fn test_locatives() {
        assert!(is_locative("in"));
        assert!(is_locative("near"));
        assert!(!is_locative("with"));
    }

    #[test]
    fn test_titles() {
        assert!(is_title("Mr.".to_lowercase().as_str()));
        assert!(is_title("president"));
        assert_eq!(title_gender("mrs."), Gender::Feminine);
        assert_eq!(title_gender("dr."), Gender::Unknown);
    }
}
