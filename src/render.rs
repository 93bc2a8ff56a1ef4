//! Rendering of resolved documents.
//!
//! Three outputs per document:
//!
//! 1. a YES/NO indicator of whether any coreference was found,
//! 2. the original text with every coreferent token highlighted, its tooltip
//!    listing the main mention of each cluster the token belongs to,
//! 3. the resolved text, plus the cluster listing when coreference was found.
//!
//! HTML output is escaped. Without coreference the highlighted text is the
//! (escaped) input itself.

use serde::Serialize;

use crate::token::{Cluster, Document, Token};

/// Indicator color when coreference was found.
pub const YES_COLOR: &str = "#17B169";
/// Indicator color when no coreference was found.
pub const NO_COLOR: &str = "#E94547";

const HIGHLIGHT_STYLE: &str = "background: yellow; padding: 4px;";
const TEXT_STYLE: &str = "line-height: 32px;";

/// Caption under the highlighted text.
pub const HIGHLIGHT_CAPTION: &str = "Note: Hover on each highlighted word to see the most representative mentions in all the coreference clusters that contain the word.";
/// Caption under the cluster listing.
pub const CLUSTERS_CAPTION: &str = "Note: Each coreference cluster is showing the most representative mention in the cluster, followed by all the mentions in the cluster.";

/// Escape text for HTML element content and single- or double-quoted attributes.
#[must_use]
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `**Any coreferences found?** YES|NO` as HTML.
#[must_use]
pub fn indicator_html(found: bool) -> String {
    let (color, word) = if found { (YES_COLOR, "YES") } else { (NO_COLOR, "NO") };
    format!("<strong>Any coreferences found?</strong> <span style='color: {color};'>{word}</span>")
}

/// Main-mention texts of every cluster containing `token`, comma-joined.
#[must_use]
pub fn tooltip(doc: &Document, token: &Token) -> String {
    doc.main_mentions_for(token).join(", ")
}

/// Original text with coreferent tokens wrapped in highlighted spans.
#[must_use]
pub fn highlight_html(doc: &Document) -> String {
    if !doc.has_coref() {
        return html_escape(doc.text());
    }
    let mut out = String::with_capacity(doc.text().len() * 2);
    for token in doc.tokens() {
        if token.in_coref {
            out.push_str(&format!(
                "<span title='{}' style='{HIGHLIGHT_STYLE}'>{}</span>",
                html_escape(&tooltip(doc, token)),
                html_escape(&token.text)
            ));
        } else {
            out.push_str(&html_escape(&token.text));
        }
        out.push_str(&token.whitespace);
    }
    out
}

/// Original text with coreferent tokens marked for a terminal.
///
/// With `color`, tokens get a yellow background; otherwise each
/// coreferent token is bracketed (`[She]`).
#[must_use]
pub fn highlight_text(doc: &Document, color: bool) -> String {
    let mut out = String::with_capacity(doc.text().len() * 2);
    for token in doc.tokens() {
        match (token.in_coref, color) {
            (true, true) => out.push_str(&format!("\x1b[30;43m{}\x1b[0m", token.text)),
            (true, false) => out.push_str(&format!("[{}]", token.text)),
            (false, _) => out.push_str(&token.text),
        }
        out.push_str(&token.whitespace);
    }
    out
}

/// Clusters as `[main: [m1, m2], main: [m1, m2]]`.
#[must_use]
pub fn cluster_listing(clusters: &[Cluster]) -> String {
    let items: Vec<String> = clusters.iter().map(ToString::to_string).collect();
    format!("[{}]", items.join(", "))
}

/// Everything the results view shows for one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rendering {
    /// Input text
    pub text: String,
    /// True if at least one cluster was found
    pub found: bool,
    /// Highlighted original text (HTML)
    pub highlighted_html: String,
    /// Text with mentions replaced by their main mention
    pub resolved_text: String,
    /// Clusters in document order
    pub clusters: Vec<Cluster>,
}

impl Rendering {
    /// Render a resolved document.
    #[must_use]
    pub fn from_document(doc: &Document) -> Self {
        Self {
            text: doc.text().to_string(),
            found: doc.has_coref(),
            highlighted_html: highlight_html(doc),
            resolved_text: doc.resolved_text().to_string(),
            clusters: doc.clusters().to_vec(),
        }
    }

    /// Cluster listing, `[main: [m1, m2], ...]`.
    #[must_use]
    pub fn cluster_listing(&self) -> String {
        cluster_listing(&self.clusters)
    }

    /// The results section of the page as an HTML fragment.
    #[must_use]
    pub fn results_html(&self) -> String {
        let mut html = String::new();
        html.push_str(&format!("<p>{}</p>\n", indicator_html(self.found)));

        html.push_str("<p><strong>Resolution:</strong></p>\n");
        html.push_str(&format!(
            "<div class='text' style='{TEXT_STYLE}'>{}</div><br>\n",
            self.highlighted_html
        ));
        if self.found {
            html.push_str(&format!("<p class='caption'>{HIGHLIGHT_CAPTION}</p>\n"));
        }

        html.push_str("<p><strong>Resolved Text:</strong></p>\n");
        html.push_str(&format!(
            "<div class='text' style='{TEXT_STYLE}'>{}</div><br>\n",
            html_escape(&self.resolved_text)
        ));

        if self.found {
            html.push_str("<p><strong>Coreference Clusters:</strong></p>\n");
            html.push_str(&format!(
                "<pre class='clusters'>{}</pre>\n",
                html_escape(&self.cluster_listing())
            ));
            html.push_str(&format!("<p class='caption'>{CLUSTERS_CAPTION}</p>\n"));
        }
        html
    }
}
