//! Mention-pair coreference resolution.
//!
//! Every mention looks back over earlier mentions, scores each compatible
//! candidate, and links to the best one if its score clears `1 - greedyness`.
//! Links merge into clusters; each cluster then gets a main mention and the
//! document gets a resolved text where every other mention is replaced by it.
//!
//! # Scoring
//!
//! | Anaphor | Antecedent | Score |
//! |---------|------------|-------|
//! | pronoun | proper / nominal / pronoun | 0.80 / 0.75 / 0.70 minus distance |
//! | proper | proper or nominal with the same name words | 0.95 (equal), 0.85 (subset) |
//! | definite nominal | same text / same head | 0.90 / 0.80 |
//! | definite person nominal | proper name | 0.65 minus distance |
//!
//! Distance costs 0.08 per sentence and 0.01 per intervening mention.
//! Agreement (person, gender, number, animacy) is a hard filter, as is the
//! rule that a possessed phrase ("her brother") never joins its possessor's
//! cluster, nor a member of a possessing group ("their friend" and "Martha"
//! in "Eva and Martha ... their friend").
//!
//! Clusters whose main mention is a pronoun are left as written in the
//! resolved text.

use std::cmp::Reverse;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::lexicon::{self, Animacy, Gender, Person};
use crate::mention::{Mention, MentionKind};
use crate::pipeline::Stage;
use crate::token::{Cluster, Document, Tag, Token};
use crate::{Error, Result};

/// Resolver tuning values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorefParams {
    /// Willingness to link, in `[0, 1]`. Links need a score above `1 - greedyness`.
    pub greedyness: f64,
    /// How many earlier mentions are considered as antecedents.
    pub max_dist: usize,
    /// Extended look-back for non-pronoun mentions sharing a head word.
    pub max_dist_match: usize,
    /// Never resolve "i", "me", "my", "you", "your".
    pub blacklist: bool,
}

impl Default for CorefParams {
    fn default() -> Self {
        Self {
            greedyness: 0.5,
            max_dist: 50,
            max_dist_match: 500,
            blacklist: true,
        }
    }
}

impl CorefParams {
    /// Check that the values are usable.
    ///
    /// # Errors
    ///
    /// `Error::InvalidInput` if greedyness is not a number in `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if !self.greedyness.is_finite() || !(0.0..=1.0).contains(&self.greedyness) {
            return Err(Error::invalid_input(format!(
                "greedyness must be within [0, 1], got {}",
                self.greedyness
            )));
        }
        Ok(())
    }

    fn threshold(&self) -> f64 {
        1.0 - self.greedyness
    }
}

/// The coreference stage, named `"coref"`.
#[derive(Debug, Clone, Default)]
pub struct CorefStage {
    params: CorefParams,
}

impl CorefStage {
    /// Stage name.
    pub const NAME: &'static str = "coref";

    /// Create a stage with the given parameters.
    #[must_use]
    pub fn new(params: CorefParams) -> Self {
        Self { params }
    }

    /// Parameters this stage was created with.
    #[must_use]
    pub fn params(&self) -> &CorefParams {
        &self.params
    }
}

impl Stage for CorefStage {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn process(&self, doc: &mut Document) -> Result<()> {
        self.params.validate()?;
        let resolver = Resolver {
            tokens: doc.tokens(),
            mentions: doc.mentions(),
            params: &self.params,
        };
        let groups = resolver.link();
        let mains: Vec<usize> = groups.iter().map(|g| resolver.main_of(g)).collect();
        let resolved = resolver.resolved_text(&groups, &mains);

        let clusters: Vec<Cluster> = groups
            .iter()
            .zip(&mains)
            .enumerate()
            .map(|(id, (members, &main))| {
                let mentions = doc.mentions();
                Cluster {
                    id,
                    main: doc.span(mentions[main].start, mentions[main].end),
                    mentions: members
                        .iter()
                        .map(|&m| doc.span(mentions[m].start, mentions[m].end))
                        .collect(),
                }
            })
            .collect();

        log::debug!(
            "[Coref] {} mentions, {} clusters (greedyness={})",
            doc.mentions().len(),
            clusters.len(),
            self.params.greedyness
        );
        doc.set_coref(clusters, resolved);
        Ok(())
    }
}

struct Resolver<'a> {
    tokens: &'a [Token],
    mentions: &'a [Mention],
    params: &'a CorefParams,
}

impl Resolver<'_> {
    /// Link mentions and return clusters as sorted mention-index lists,
    /// ordered by first mention.
    fn link(&self) -> Vec<Vec<usize>> {
        let n = self.mentions.len();
        let excluded: Vec<bool> = self.mentions.iter().map(|m| self.is_excluded(m)).collect();
        let mut cluster_of: Vec<Option<usize>> = vec![None; n];
        let mut clusters: Vec<Vec<usize>> = Vec::new();
        let reach = self.params.max_dist.max(self.params.max_dist_match);

        for i in 0..n {
            if excluded[i] {
                continue;
            }
            let anaphor = &self.mentions[i];
            let owners: Vec<usize> = anaphor
                .possessor
                .and_then(|span| self.mentions.iter().position(|m| m.span() == span))
                .map(|p| match cluster_of[p] {
                    Some(c) => clusters[c].clone(),
                    None => vec![p],
                })
                .unwrap_or_default();

            let mut best: Option<(usize, f64)> = None;
            for j in (i.saturating_sub(reach)..i).rev() {
                if excluded[j] || !self.in_window(i, j) {
                    continue;
                }
                let antecedent = &self.mentions[j];
                if anaphor.overlaps(antecedent) {
                    continue;
                }
                if self.is_owned_by(j, &owners) {
                    continue;
                }
                if !compatible(anaphor, antecedent) {
                    continue;
                }
                let Some(score) = self.score(i, j) else {
                    continue;
                };
                // Nearest candidate wins ties.
                if best.map_or(true, |(_, b)| score > b) {
                    best = Some((j, score));
                }
            }

            let Some((j, score)) = best else {
                continue;
            };
            if score <= self.params.threshold() {
                continue;
            }
            log::trace!("[Coref] link {i} -> {j} ({score:.2})");
            match cluster_of[j] {
                Some(c) => {
                    clusters[c].push(i);
                    cluster_of[i] = Some(c);
                }
                None => {
                    cluster_of[j] = Some(clusters.len());
                    cluster_of[i] = Some(clusters.len());
                    clusters.push(vec![j, i]);
                }
            }
        }

        for members in &mut clusters {
            members.sort_unstable();
        }
        clusters.sort_by_key(|members| members[0]);
        clusters
    }

    /// True if mention `j` is one of `owners` or sits inside an owning group
    /// ("Martha" in "Eva and Martha" owning "their friend").
    fn is_owned_by(&self, j: usize, owners: &[usize]) -> bool {
        let m = &self.mentions[j];
        owners.iter().any(|&o| {
            let owner = &self.mentions[o];
            o == j || (owner.kind == MentionKind::Group && owner.start <= m.start && m.end <= owner.end)
        })
    }

    fn is_excluded(&self, m: &Mention) -> bool {
        self.params.blacklist && m.is_pronoun() && lexicon::is_blacklisted(&self.tokens[m.start].lower())
    }

    fn in_window(&self, i: usize, j: usize) -> bool {
        let dist = i - j;
        if dist <= self.params.max_dist {
            return true;
        }
        let (a, b) = (&self.mentions[i], &self.mentions[j]);
        dist <= self.params.max_dist_match
            && !a.is_pronoun()
            && !b.is_pronoun()
            && self.tokens[a.head].lower() == self.tokens[b.head].lower()
    }

    fn penalty(&self, i: usize, j: usize) -> f64 {
        let (a, b) = (&self.mentions[i], &self.mentions[j]);
        let sentences = a.sentence.saturating_sub(b.sentence) as f64;
        let gap = (i - j - 1) as f64;
        0.08 * sentences + 0.01 * gap
    }

    fn score(&self, i: usize, j: usize) -> Option<f64> {
        let (a, b) = (&self.mentions[i], &self.mentions[j]);
        match a.kind {
            MentionKind::Pronoun => {
                if a.person != Person::Third {
                    return b.is_pronoun().then(|| 0.9 - self.penalty(i, j));
                }
                let mut score = match b.kind {
                    MentionKind::Proper => 0.8,
                    MentionKind::Nominal | MentionKind::Group => 0.75,
                    MentionKind::Pronoun => 0.7,
                };
                if is_gendered(a.gender) && b.animacy == Animacy::Animal {
                    score -= 0.1;
                }
                if a.gender == Gender::Neuter && b.kind == MentionKind::Proper && b.animacy == Animacy::Unknown {
                    score -= 0.2;
                }
                Some(score - self.penalty(i, j))
            }
            MentionKind::Proper => {
                if matches!(b.kind, MentionKind::Pronoun | MentionKind::Group) {
                    return None;
                }
                let (x, y) = (self.name_words(a), self.name_words(b));
                if x.is_empty() || y.is_empty() {
                    None
                } else if x == y {
                    Some(0.95)
                } else if x.is_subset(&y) || y.is_subset(&x) {
                    Some(0.85)
                } else {
                    None
                }
            }
            MentionKind::Nominal | MentionKind::Group => {
                if !a.definite || b.is_pronoun() {
                    return None;
                }
                let sentences = a.sentence.saturating_sub(b.sentence) as f64;
                if self.content_words(a) == self.content_words(b) {
                    Some(0.9)
                } else if self.tokens[a.head].lower() == self.tokens[b.head].lower() {
                    Some(0.8 - 0.02 * sentences)
                } else if a.animacy == Animacy::Person
                    && b.kind == MentionKind::Proper
                    && b.animacy != Animacy::Inanimate
                {
                    Some(0.65 - self.penalty(i, j))
                } else {
                    None
                }
            }
        }
    }

    /// Lower-cased words of a mention without determiners, pronouns,
    /// possessive markers, titles, and punctuation.
    fn content_words(&self, m: &Mention) -> Vec<String> {
        self.tokens[m.start..m.end]
            .iter()
            .filter(|t| {
                !matches!(
                    t.tag,
                    Tag::Determiner | Tag::Pronoun | Tag::Possessive | Tag::Punct | Tag::Space
                )
            })
            .map(|t| t.lower().trim_end_matches('.').to_string())
            .filter(|w| !w.is_empty() && !lexicon::is_title(w))
            .collect()
    }

    fn name_words(&self, m: &Mention) -> HashSet<String> {
        self.content_words(m).into_iter().collect()
    }

    /// First proper mention, else first nominal, else first mention.
    fn main_of(&self, members: &[usize]) -> usize {
        members
            .iter()
            .copied()
            .min_by_key(|&m| (self.mentions[m].kind.representativeness(), m))
            .unwrap_or_default()
    }

    fn main_text(&self, mention: usize) -> String {
        let m = &self.mentions[mention];
        let mut out = String::new();
        for (k, token) in self.tokens[m.start..m.end].iter().enumerate() {
            out.push_str(&token.text);
            if m.start + k + 1 < m.end {
                out.push_str(&token.whitespace);
            }
        }
        out
    }

    /// Replace every non-main mention with its cluster's main mention.
    /// Outer mentions go first; mentions inside a replaced span are skipped.
    fn resolved_text(&self, clusters: &[Vec<usize>], mains: &[usize]) -> String {
        let mut pending: Vec<(usize, usize)> = clusters
            .iter()
            .zip(mains)
            .flat_map(|(members, &main)| {
                members
                    .iter()
                    .filter(move |&&m| m != main)
                    .map(move |&m| (m, main))
            })
            .collect();
        pending.sort_by_key(|&(m, _)| (self.mentions[m].start, Reverse(self.mentions[m].end)));

        let mut replacement: Vec<Option<String>> = vec![None; self.tokens.len()];
        for (m, main) in pending {
            // Clusters led by a pronoun keep their original text.
            if self.mentions[main].is_pronoun() {
                continue;
            }
            let mention = &self.mentions[m];
            if replacement[mention.start..mention.end].iter().any(Option::is_some) {
                continue;
            }
            let mut text = self.main_text(main);
            if mention.possessive {
                text.push_str("'s");
            }
            text.push_str(&self.tokens[mention.end - 1].whitespace);
            for slot in &mut replacement[mention.start..mention.end] {
                *slot = Some(String::new());
            }
            replacement[mention.start] = Some(text);
        }

        self.tokens
            .iter()
            .zip(replacement)
            .map(|(token, rep)| rep.unwrap_or_else(|| token.text_with_ws()))
            .collect()
    }
}

fn is_gendered(gender: Gender) -> bool {
    matches!(gender, Gender::Masculine | Gender::Feminine)
}

/// Hard agreement filter between an anaphor and a candidate antecedent.
fn compatible(a: &Mention, b: &Mention) -> bool {
    if a.person != b.person || !a.gender.agrees(b.gender) || !a.number.agrees(b.number) {
        return false;
    }
    if a.is_pronoun() && is_gendered(a.gender) && b.animacy == Animacy::Inanimate {
        return false;
    }
    if a.is_pronoun() && a.gender == Gender::Neuter && b.animacy == Animacy::Person {
        return false;
    }
    let known = |x: Animacy| x != Animacy::Unknown;
    if !a.is_pronoun() && !b.is_pronoun() && known(a.animacy) && known(b.animacy) {
        return a.animacy == b.animacy;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Model, ModelSize};
    use crate::pipeline::Pipeline;

    fn resolve_sized(text: &str, size: ModelSize, params: CorefParams) -> Document {
        let mut pipeline = Pipeline::new(Model::builtin(size));
        pipeline.set_stage(Box::new(CorefStage::new(params)));
        pipeline.run(text).unwrap()
    }

    fn resolve_with(text: &str, params: CorefParams) -> Document {
        resolve_sized(text, ModelSize::Medium, params)
    }

    fn resolve(text: &str) -> Document {
        resolve_with(text, CorefParams::default())
    }

    fn listing(doc: &Document) -> Vec<String> {
        doc.clusters().iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_sister_and_dog() {
        let doc = resolve("My sister has a dog. She loves him.");
        assert!(doc.has_coref());
        assert_eq!(listing(&doc), vec!["My sister: [My sister, She]", "a dog: [a dog, him]"]);
        assert_eq!(doc.resolved_text(), "My sister has a dog. My sister loves a dog.");
    }

    #[test]
    fn test_possessor_never_joins_its_own_phrase() {
        let doc = resolve("Ana and Tom are siblings. Ana is older but her brother is taller.");
        assert_eq!(
            listing(&doc),
            vec!["Ana: [Ana, Ana, her]", "Tom: [Tom, her brother]"]
        );
        assert_eq!(
            doc.resolved_text(),
            "Ana and Tom are siblings. Ana is older but Tom is taller."
        );
    }

    #[test]
    fn test_possessive_pronoun_gets_genitive() {
        let doc = resolve("Paul Allen was born in Seattle. His father worked there.");
        assert!(doc.resolved_text().starts_with("Paul Allen was born in Seattle. Paul Allen's father"));
    }

    #[test]
    fn test_zero_greedyness_links_nothing() {
        let doc = resolve_with(
            "My sister has a dog. She loves him.",
            CorefParams {
                greedyness: 0.0,
                ..Default::default()
            },
        );
        assert!(!doc.has_coref());
        assert_eq!(doc.resolved_text(), doc.text());
        assert!(doc.tokens().iter().all(|t| !t.in_coref));
    }

    #[test]
    fn test_blacklist_controls_first_person() {
        let text = "I told my friend that I would come.";
        let doc = resolve(text);
        assert!(!doc.has_coref());

        let doc = resolve_with(
            text,
            CorefParams {
                blacklist: false,
                ..Default::default()
            },
        );
        assert!(doc.has_coref());
        assert_eq!(doc.clusters()[0].main.text, "I");
        assert_eq!(doc.resolved_text(), text);
    }

    #[test]
    fn test_small_model_keeps_genitive() {
        let doc = resolve_sized(
            "Jane told her friend that she was about to go to college.",
            ModelSize::Small,
            CorefParams::default(),
        );
        assert_eq!(listing(&doc), vec!["Jane: [Jane, her, she]"]);
        assert_eq!(
            doc.resolved_text(),
            "Jane told Jane's friend that Jane was about to go to college."
        );
    }

    #[test]
    fn test_pronoun_led_cluster_keeps_text() {
        let text = "They sold their car and their house.";
        for size in ModelSize::ALL {
            let doc = resolve_sized(text, size, CorefParams::default());
            assert_eq!(listing(&doc), vec!["They: [They, their, their]"], "{size}");
            assert_eq!(doc.resolved_text(), text, "{size}");
        }
    }

    #[test]
    fn test_group_members_never_own_their_possession() {
        let doc = resolve(
            "Eva and Martha didn't want their friend Jenny to feel lonely so they invited her to the party.",
        );
        for cluster in doc.clusters() {
            let has_friend = cluster.mentions.iter().any(|m| m.text == "their friend Jenny");
            let has_owner = cluster
                .mentions
                .iter()
                .any(|m| ["Eva", "Martha", "Eva and Martha"].contains(&m.text.as_str()));
            assert!(!(has_friend && has_owner), "{cluster}");
        }
        assert!(doc
            .resolved_text()
            .contains("want Eva and Martha's friend Jenny to feel lonely"));
    }

    #[test]
    fn test_max_dist_limits_lookback() {
        let text = "Ana has a pen. It is red. She smiles.";
        assert_eq!(listing(&resolve(text)), vec!["Ana: [Ana, She]", "a pen: [a pen, It]"]);

        let doc = resolve_with(
            text,
            CorefParams {
                max_dist: 2,
                max_dist_match: 2,
                ..Default::default()
            },
        );
        assert_eq!(listing(&doc), vec!["a pen: [a pen, It]"]);
    }

    #[test]
    fn test_subject_name_outranks_place() {
        let doc = resolve("Paul Allen was born in Seattle. He moved to Boston.");
        assert_eq!(listing(&doc), vec!["Paul Allen: [Paul Allen, He]"]);
    }

    #[test]
    fn test_it_prefers_things_over_people() {
        let doc = resolve("Sam bought a pen. It was expensive.");
        assert_eq!(listing(&doc), vec!["a pen: [a pen, It]"]);
    }

    #[test]
    fn test_token_annotations() {
        let doc = resolve("My sister has a dog. She loves him.");
        let she = doc.tokens().iter().find(|t| t.text == "She").unwrap();
        assert!(she.in_coref);
        assert_eq!(doc.main_mentions_for(she), vec!["My sister"]);
        let has = doc.tokens().iter().find(|t| t.text == "has").unwrap();
        assert!(!has.in_coref);
    }

    #[test]
    fn test_invalid_greedyness_rejected() {
        let mut pipeline = Pipeline::new(Model::builtin(ModelSize::Small));
        pipeline.set_stage(Box::new(CorefStage::new(CorefParams {
            greedyness: 1.5,
            ..Default::default()
        })));
        assert!(pipeline.run("She smiled.").unwrap_err().is_client_error());
    }
}
