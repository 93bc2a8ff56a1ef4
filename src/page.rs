//! The single HTML page: title, mode radio, form, and results.

use crate::coref::CorefParams;
use crate::form::{Mode, Submission, EXAMPLE_PARAGRAPHS, GREEDYNESS, MAX_DIST, MAX_DIST_MATCH};
use crate::render::{html_escape, Rendering};

/// Page title.
pub const TITLE: &str = "Coreference Resolution Demo";

const STYLE: &str = r#"
body{font:16px/1.5 sans-serif;max-width:960px;margin:0 auto;padding:16px;color:#262730}
h1{font-size:28px;margin:8px 0 16px}
form{margin:0 0 16px}
fieldset{border:1px solid #ddd;padding:8px 12px;margin:8px 0}
select,textarea{width:100%;font:inherit}
textarea{min-height:120px}
.slider{margin:8px 0}
.slider small{display:block;color:#777}
.caption{font-size:13px;color:#777}
.clusters{white-space:pre-wrap;background:#f6f6f6;padding:8px}
"#;

/// Values the form is filled with.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    /// Selected mode
    pub mode: Mode,
    /// Selected example index
    pub example: usize,
    /// Free text
    pub text: String,
    /// Slider positions
    pub params: CorefParams,
}

impl FormState {
    /// Empty form in `mode` with sliders at `defaults`.
    #[must_use]
    pub fn new(mode: Mode, defaults: CorefParams) -> Self {
        Self {
            mode,
            example: 0,
            text: String::new(),
            params: defaults,
        }
    }

    /// Form echoing a submission.
    #[must_use]
    pub fn from_submission(submission: &Submission) -> Self {
        let (example, text) = match submission.mode {
            Mode::ExampleParagraph => (submission.example.unwrap_or(0), String::new()),
            Mode::OwnParagraph => (0, submission.paragraph.clone()),
        };
        Self {
            mode: submission.mode,
            example,
            text,
            params: submission.params,
        }
    }
}

fn mode_selector(current: Mode) -> String {
    let mut html = String::from("<form method='get' action='/'>\n<fieldset><legend>Choose mode:</legend>\n");
    for mode in Mode::ALL {
        let checked = if mode == current { " checked" } else { "" };
        html.push_str(&format!(
            "<label><input type='radio' name='mode' value='{}'{checked} onchange='this.form.submit()'> {}</label><br>\n",
            mode.as_str(),
            html_escape(mode.label())
        ));
    }
    html.push_str("<noscript><button type='submit'>Switch</button></noscript>\n</fieldset>\n</form>\n");
    html
}

fn paragraph_field(state: &FormState) -> String {
    let mut html = String::from("<label for='paragraph'>Paragraph:</label>\n");
    match state.mode {
        Mode::ExampleParagraph => {
            html.push_str("<select id='paragraph' name='example'>\n");
            for (i, text) in EXAMPLE_PARAGRAPHS.iter().enumerate() {
                let selected = if i == state.example { " selected" } else { "" };
                html.push_str(&format!(
                    "<option value='{i}'{selected}>{}</option>\n",
                    html_escape(text)
                ));
            }
            html.push_str("</select>\n");
        }
        Mode::OwnParagraph => {
            html.push_str(&format!(
                "<textarea id='paragraph' name='text'>{}</textarea>\n",
                html_escape(&state.text)
            ));
        }
    }
    html
}

fn slider(name: &str, min: String, max: String, step: String, value: String, help: &str) -> String {
    format!(
        "<div class='slider'><label for='{name}'>{name}: <output id='{name}-value'>{value}</output></label><br>\
         <input type='range' id='{name}' name='{name}' min='{min}' max='{max}' step='{step}' value='{value}' \
         oninput=\"document.getElementById('{name}-value').value=this.value\">\
         <small>{}</small></div>\n",
        html_escape(help)
    )
}

fn sliders(params: &CorefParams) -> String {
    let mut html = String::from("<fieldset><legend>Settings</legend>\n");
    html.push_str(&slider(
        GREEDYNESS.name,
        GREEDYNESS.min.to_string(),
        GREEDYNESS.max.to_string(),
        GREEDYNESS.step.to_string(),
        format!("{:.2}", params.greedyness),
        GREEDYNESS.help,
    ));
    for (s, value) in [(MAX_DIST, params.max_dist), (MAX_DIST_MATCH, params.max_dist_match)] {
        html.push_str(&slider(
            s.name,
            s.min.to_string(),
            s.max.to_string(),
            s.step.to_string(),
            value.to_string(),
            s.help,
        ));
    }
    html.push_str("</fieldset>\n");
    html
}

/// Render the full page, with results when a submission was resolved.
#[must_use]
pub fn render_page(state: &FormState, result: Option<&Rendering>) -> String {
    let mut html = String::with_capacity(8 * 1024);
    html.push_str(&format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset='UTF-8'>\n<title>{TITLE}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n<h1>{TITLE}</h1>\n"
    ));
    html.push_str(&mode_selector(state.mode));

    html.push_str("<form method='post' action='/resolve'>\n");
    html.push_str(&format!("<input type='hidden' name='mode' value='{}'>\n", state.mode.as_str()));
    html.push_str(&paragraph_field(state));
    html.push_str(&sliders(&state.params));
    html.push_str("<button type='submit'>Resolve</button>\n</form>\n");

    if let Some(rendering) = result {
        html.push_str("<section id='results'>\n");
        html.push_str(&rendering.results_html());
        html.push_str("</section>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}
