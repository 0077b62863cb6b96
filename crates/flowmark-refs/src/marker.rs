//! The marker text format.

use std::fmt;
use std::ops::Range;

use flowmark_types::StateId;

/// Opening of every workflow marker.
pub const MARKER_PREFIX: &str = "{{renderer workflow,";

const MARKER_SUFFIX: &str = "}}";

/// A reference from text to a workflow state.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MarkerRef {
    /// Label at the time the marker was written.
    pub label: String,
    /// Encoded state id, if the marker carries one.
    pub token: Option<String>,
}

impl MarkerRef {
    /// A marker with an explicit token.
    pub fn new(label: impl Into<String>, token: Option<String>) -> Self {
        Self {
            label: label.into(),
            token,
        }
    }

    /// A marker pointing at state `id`.
    pub fn for_state(id: StateId, label: impl Into<String>) -> Self {
        Self::new(label, Some(id.to_token()))
    }

    /// The id named by the token, or [`StateId::UNKNOWN`] when the token is
    /// missing or undecodable.
    pub fn state_id(&self) -> StateId {
        self.token
            .as_deref()
            .map_or(StateId::UNKNOWN, StateId::from_token)
    }

    /// Find the first well-formed marker in `text`.
    pub fn parse(text: &str) -> Option<Self> {
        locate(text).map(|(_, marker)| marker)
    }

    /// The marker as embedded text.
    pub fn render(&self) -> String {
        match &self.token {
            Some(token) => format!("{MARKER_PREFIX} {}, {token}{MARKER_SUFFIX}", self.label),
            None => format!("{MARKER_PREFIX} {}{MARKER_SUFFIX}", self.label),
        }
    }
}

impl fmt::Display for MarkerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Rewrite `content` so it starts with `marker`.
///
/// If `content` already holds a marker, everything up to and including it is
/// replaced and the text after it is kept. Otherwise the marker is prepended.
pub fn replace_marker(content: &str, marker: &MarkerRef) -> String {
    match locate(content) {
        Some((span, _)) => format!("{}{}", marker.render(), &content[span.end..]),
        None => format!("{} {content}", marker.render()).trim_end().to_string(),
    }
}

/// Byte span and contents of the first well-formed marker.
fn locate(text: &str) -> Option<(Range<usize>, MarkerRef)> {
    let mut from = 0;
    while let Some(offset) = text[from..].find(MARKER_PREFIX) {
        let start = from + offset;
        let body_start = start + MARKER_PREFIX.len();
        let body_len = text[body_start..].find(MARKER_SUFFIX)?;
        let end = body_start + body_len + MARKER_SUFFIX.len();
        if let Some(marker) = parse_body(&text[body_start..body_start + body_len]) {
            return Some((start..end, marker));
        }
        from = body_start;
    }
    None
}

/// `LABEL` or `LABEL, TOKEN`; the label must be non-blank.
fn parse_body(body: &str) -> Option<MarkerRef> {
    if body.contains('}') {
        return None;
    }
    let mut parts = body.split(',');
    let label = parts.next()?.trim();
    let token = parts.next().map(str::trim);
    if label.is_empty() || parts.next().is_some() {
        return None;
    }
    match token {
        Some("") => None,
        token => Some(MarkerRef::new(label, token.map(str::to_string))),
    }
}
