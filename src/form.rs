//! The submission form: mode, paragraph, and tuning sliders.
//!
//! Slider ranges are enforced here, at the boundary: anything that reaches
//! the resolver has passed [`validate_params`].

use serde::{Deserialize, Serialize};

use crate::coref::CorefParams;
use crate::{Error, Result};

/// Fixed example paragraphs offered in example mode.
pub const EXAMPLE_PARAGRAPHS: [&str; 14] = [
    "My sister has a dog. She loves him.",
    "Deepika too has a dog. The movie star has always been fond of animals.",
    "Sam has a Parker pen. He loves writing with it.",
    "Coronavirus quickly spread worldwide in 2020. The virus mostly affects elderly people. They can easily catch it.",
    "Eva and Martha didn't want their friend Jenny to feel lonely so they invited her to the party.",
    "Jane told her friend that she was about to go to college.",
    "In 1916, a Polish American employee of Feltman's named Nathan Handwerker was encouraged by Eddie Cantor and Jimmy Durante, both working as waiters/musicians, to go into business in competition with his former employer. Handwerker undercut Feltman's by charging five cents for a hot dog when his former employer was charging ten.",
    "A dog named Teddy ran to his owner Jane. Jane loves her dog very much.",
    "Ana and Tom are siblings. Ana is older but her brother is taller.",
    "Angelica has three kittens. Her cats are very cute.",
    "\"I like her\", said Adam about Julia.",
    "Paul Allen was born on January 21, 1953, in Seattle, Washington, to Kenneth Sam Allen and Edna Faye Allen. Allen attended Lakeside School, a private school in Seattle, where he befriended Bill Gates, two years younger, with whom he shared an enthusiasm for computers. Paul and Bill used a teletype terminal at their high school, Lakeside, to develop their programming skills on several time-sharing computer systems.",
    "The legal pressures facing Michael Cohen are growing in a wide-ranging investigation of his personal business affairs and his work on behalf of his former client, President Trump. In addition to his work for Mr. Trump, he pursued his own business interests, including ventures in real estate, personal loans and investments in taxi medallions.",
    "We are looking for a region of central Italy bordering the Adriatic Sea. The area is mostly mountainous and includes Mt. Corno, the highest peak of the mountain range. It also includes many sheep and an Italian entrepreneur has an idea about how to make a little money of them.",
];

/// How the paragraph is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Pick one of [`EXAMPLE_PARAGRAPHS`]
    #[default]
    ExampleParagraph,
    /// Free text
    OwnParagraph,
}

impl Mode {
    /// Both modes, in display order.
    pub const ALL: [Mode; 2] = [Mode::ExampleParagraph, Mode::OwnParagraph];

    /// Raw option value, as sent by the form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::ExampleParagraph => "example_paragraph",
            Mode::OwnParagraph => "own_paragraph",
        }
    }

    /// Human-readable radio label.
    #[must_use]
    pub fn label(self) -> &'static str {
        mode_label(self.as_str())
    }
}

/// Radio label for a raw mode value. Anything but `example_paragraph`
/// reads as free text.
#[must_use]
pub fn mode_label(raw: &str) -> &'static str {
    if raw == "example_paragraph" {
        "Select an example paragraph."
    } else {
        "Type your own paragraph."
    }
}

/// A bounded, stepped slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slider<T> {
    /// Field name
    pub name: &'static str,
    /// Smallest value
    pub min: T,
    /// Largest value
    pub max: T,
    /// Step between values
    pub step: T,
    /// Initial value
    pub default: T,
    /// Help text shown next to the slider
    pub help: &'static str,
}

/// Greedyness slider.
pub const GREEDYNESS: Slider<f64> = Slider {
    name: "greedyness",
    min: 0.0,
    max: 1.0,
    step: 0.01,
    default: 0.5,
    help: "A number between 0 and 1 determining how greedy the model is about making coreference decisions (more greedy means more coreference links). The default value is 0.5.",
};

/// Max-distance slider.
pub const MAX_DIST: Slider<usize> = Slider {
    name: "max_dist",
    min: 25,
    max: 100,
    step: 5,
    default: 50,
    help: "How many mentions back to look when considering possible antecedents of the current mention. Decreasing the value will cause the system to run faster but less accurately. The default value is 50.",
};

/// Max-distance-for-matching slider.
pub const MAX_DIST_MATCH: Slider<usize> = Slider {
    name: "max_dist_match",
    min: 250,
    max: 1000,
    step: 50,
    default: 500,
    help: "The system will consider linking the current mention to a preceding one further than `max_dist` away if they share a noun or proper noun. In this case, it looks `max_dist_match` away instead. The default value is 500.",
};

impl Slider<f64> {
    /// Check `value` lies in range and on a step.
    ///
    /// # Errors
    ///
    /// `Error::InvalidInput` otherwise.
    pub fn check(&self, value: f64) -> Result<f64> {
        if !value.is_finite() || value < self.min || value > self.max {
            return Err(Error::invalid_input(format!(
                "{} must be within [{}, {}], got {value}",
                self.name, self.min, self.max
            )));
        }
        let steps = (value - self.min) / self.step;
        if (steps - steps.round()).abs() > 1e-6 {
            return Err(Error::invalid_input(format!(
                "{} must be a multiple of {}, got {value}",
                self.name, self.step
            )));
        }
        Ok(value)
    }
}

impl Slider<usize> {
    /// Check `value` lies in range and on a step.
    ///
    /// # Errors
    ///
    /// `Error::InvalidInput` otherwise.
    pub fn check(&self, value: usize) -> Result<usize> {
        if value < self.min || value > self.max {
            return Err(Error::invalid_input(format!(
                "{} must be within [{}, {}], got {value}",
                self.name, self.min, self.max
            )));
        }
        if (value - self.min) % self.step != 0 {
            return Err(Error::invalid_input(format!(
                "{} must be a multiple of {}, got {value}",
                self.name, self.step
            )));
        }
        Ok(value)
    }
}

/// Check resolver parameters against the slider ranges.
///
/// # Errors
///
/// `Error::InvalidInput` naming the first offending field.
pub fn validate_params(params: &CorefParams) -> Result<()> {
    GREEDYNESS.check(params.greedyness)?;
    MAX_DIST.check(params.max_dist)?;
    MAX_DIST_MATCH.check(params.max_dist_match)?;
    Ok(())
}

/// Raw form fields as submitted. Missing sliders take the configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormInput {
    /// Paragraph source
    #[serde(default)]
    pub mode: Mode,
    /// Index into [`EXAMPLE_PARAGRAPHS`] (example mode)
    pub example: Option<usize>,
    /// Free text (own mode)
    pub text: Option<String>,
    /// Greedyness slider
    pub greedyness: Option<f64>,
    /// Max-distance slider
    pub max_dist: Option<usize>,
    /// Max-distance-for-matching slider
    pub max_dist_match: Option<usize>,
}

/// A validated submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    /// Paragraph source
    pub mode: Mode,
    /// Index of the chosen example, in example mode
    pub example: Option<usize>,
    /// Text to resolve
    pub paragraph: String,
    /// Resolver parameters (blacklist always on)
    pub params: CorefParams,
}

impl FormInput {
    /// Validate into a [`Submission`].
    ///
    /// Example mode resolves one of the fixed paragraphs (the first one when
    /// no index is sent); own mode passes the text through unchanged.
    ///
    /// # Errors
    ///
    /// `Error::InvalidInput` for an unknown example index or a slider value
    /// outside its range or step.
    pub fn validate(&self, defaults: &CorefParams) -> Result<Submission> {
        let (example, paragraph) = match self.mode {
            Mode::ExampleParagraph => {
                let index = self.example.unwrap_or(0);
                let text = EXAMPLE_PARAGRAPHS.get(index).ok_or_else(|| {
                    Error::invalid_input(format!(
                        "example must be below {}, got {index}",
                        EXAMPLE_PARAGRAPHS.len()
                    ))
                })?;
                (Some(index), (*text).to_string())
            }
            Mode::OwnParagraph => (None, self.text.clone().unwrap_or_default()),
        };

        let params = CorefParams {
            greedyness: self.greedyness.unwrap_or(defaults.greedyness),
            max_dist: self.max_dist.unwrap_or(defaults.max_dist),
            max_dist_match: self.max_dist_match.unwrap_or(defaults.max_dist_match),
            blacklist: true,
        };
        validate_params(&params)?;

        Ok(Submission {
            mode: self.mode,
            example,
            paragraph,
            params,
        })
    }
}
