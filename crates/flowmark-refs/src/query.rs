//! State queries: a query block that lists every text block carrying a
//! marker for one of the selected labels.

use crate::marker::MARKER_PREFIX;

const QUERY_BEGIN: &str = "#+BEGIN_QUERY";
const QUERY_END: &str = "#+END_QUERY";

/// Build a query block matching markers for any of `labels`.
///
/// Returns `None` when no label is selected. A blank title is omitted.
///
/// # Examples
///
/// ```
/// use flowmark_refs::state_query;
///
/// let query = state_query(&["TODO"], Some("Open")).unwrap();
/// assert!(query.starts_with("#+BEGIN_QUERY"));
/// assert!(query.contains(r#"[:h2 "Open"]"#));
/// assert!(query.contains(r#""{{renderer workflow, TODO,""#));
/// ```
pub fn state_query<S: AsRef<str>>(labels: &[S], title: Option<&str>) -> Option<String> {
    if labels.is_empty() {
        return None;
    }
    let title = match title.map(str::trim).filter(|t| !t.is_empty()) {
        Some(title) => format!("[:h2 \"{}\"]", quoted(title)),
        None => "\"\"".to_string(),
    };
    let clauses: Vec<String> = labels
        .iter()
        .map(|label| {
            format!(
                "[(clojure.string/includes? ?content \"{MARKER_PREFIX} {},\")]",
                escaped_label(label.as_ref())
            )
        })
        .collect();
    Some(format!(
        "{QUERY_BEGIN}
{{
  :title {title}
  :query [:find (pull ?b [*])
          :where
          [?b :block/content ?content]
          [(clojure.string/includes? ?content \"{QUERY_BEGIN}\") ?query]
          [(not ?query)]
          (or
            {})]
}}
{QUERY_END}",
        clauses.join("\n            ")
    ))
}

/// Escape a label for use inside a query string literal.
fn escaped_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for c in label.chars() {
        match c {
            ':' | '.' => {
                out.push_str("\\\\");
                out.push(c);
            }
            '"' => out.push_str("\\\""),
            c => out.push(c),
        }
    }
    out
}

fn quoted(text: &str) -> String {
    text.replace('"', "\\\"")
}
