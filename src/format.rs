//! Answer formatting
//!
//! Turns the backend's free-form answer text into a small, fixed subset of
//! HTML: line breaks, bold spans and bullet lists. Nothing else is
//! interpreted, and everything the backend sends is escaped first so the only
//! tags in the output are the ones produced here.
//!
//! The pipeline runs in order:
//!
//! 1. [`escape_html`]
//! 2. [`bold_spans`] over the whole text, so a span may cross a newline
//! 3. [`line_breaks`] splits into [`Fragment`]s
//! 4. [`list_items`] marks bullet lines
//! 5. [`balance_bold`] closes a span at the end of each line it is open on
//! 6. [`group_lists`] wraps each run of items in a single list
//! 7. [`render`]

#[cfg(test)]
mod proptests;

use regex::Regex;
use std::sync::LazyLock;

/// `**bold**`, non-greedy so the first closing pair wins
static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\*\*(.*?)\*\*").unwrap());

/// A bullet line: optional indent, `*` or `-`, at least one space, content
static LIST_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[*-]\s+(.*)$").unwrap());

/// A piece of formatted output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Inline text (already escaped, may contain `<strong>` spans)
    Text(String),
    /// A `<br>` line break
    Break,
    /// A bullet item not yet placed in a list
    Item(String),
    /// A grouped run of bullet items
    List(Vec<String>),
}

/// Format an answer for display.
///
/// Total and deterministic: every input yields a string, and the same input
/// always yields the same string.
#[must_use]
pub fn format_answer(raw: &str) -> String {
    let escaped = escape_html(raw);
    let emphasised = bold_spans(&escaped);
    let fragments = balance_bold(list_items(line_breaks(&emphasised)));
    render(&group_lists(fragments))
}

/// Escape the characters that would otherwise be read as markup
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Replace `**text**` with `<strong>text</strong>`
#[must_use]
pub fn bold_spans(text: &str) -> String {
    BOLD_RE.replace_all(text, "<strong>$1</strong>").into_owned()
}

/// Split text into lines separated by [`Fragment::Break`].
///
/// Blank and whitespace-only lines contribute only their breaks.
#[must_use]
pub fn line_breaks(text: &str) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            fragments.push(Fragment::Break);
        }
        let line = line.strip_suffix('\r').unwrap_or(line);
        if !line.trim().is_empty() {
            fragments.push(Fragment::Text(line.to_string()));
        }
    }
    fragments
}

/// Turn bullet lines into [`Fragment::Item`]s, stripping the marker
#[must_use]
pub fn list_items(fragments: Vec<Fragment>) -> Vec<Fragment> {
    fragments
        .into_iter()
        .map(|fragment| match fragment {
            Fragment::Text(line) => match LIST_ITEM_RE.captures(&line) {
                Some(caps) => Fragment::Item(caps[1].to_string()),
                None => Fragment::Text(line),
            },
            other => other,
        })
        .collect()
}

/// Close `<strong>` at the end of every line it is still open on and reopen
/// it at the start of the next one.
///
/// A bold span that crosses a newline would otherwise straddle a `<li>` or
/// `<ul>` boundary once lists are grouped.
#[must_use]
pub fn balance_bold(fragments: Vec<Fragment>) -> Vec<Fragment> {
    let mut open = false;
    let mut out = Vec::with_capacity(fragments.len());
    for fragment in fragments {
        out.push(match fragment {
            Fragment::Text(line) => Fragment::Text(balance_line(&line, &mut open)),
            Fragment::Item(line) => Fragment::Item(balance_line(&line, &mut open)),
            Fragment::List(items) => Fragment::List(
                items
                    .iter()
                    .map(|item| balance_line(item, &mut open))
                    .collect(),
            ),
            Fragment::Break => Fragment::Break,
        });
    }
    out
}

fn balance_line(line: &str, open: &mut bool) -> String {
    let mut out = String::with_capacity(line.len() + 17);
    if *open {
        out.push_str("<strong>");
    }
    out.push_str(line);

    // Spans never nest, so the last tag on the line decides
    match (line.rfind("<strong>"), line.rfind("</strong>")) {
        (Some(start), Some(end)) => *open = start > end,
        (Some(_), None) => *open = true,
        (None, Some(_)) => *open = false,
        (None, None) => {}
    }

    if *open {
        out.push_str("</strong>");
    }
    out
}

/// Wrap each run of consecutive items in exactly one [`Fragment::List`].
///
/// Items separated only by breaks belong to the same run. Breaks touching a
/// run are dropped. An existing `List` is treated as a run that is already
/// open, so grouping grouped output changes nothing.
#[must_use]
pub fn group_lists(fragments: Vec<Fragment>) -> Vec<Fragment> {
    let mut out = Vec::with_capacity(fragments.len());
    let mut run: Vec<String> = Vec::new();

    for fragment in fragments {
        match fragment {
            Fragment::Item(item) => {
                if run.is_empty() {
                    drop_trailing_breaks(&mut out);
                }
                run.push(item);
            }
            Fragment::List(items) => {
                if run.is_empty() {
                    drop_trailing_breaks(&mut out);
                }
                run.extend(items);
            }
            Fragment::Break => {
                if run.is_empty() {
                    out.push(Fragment::Break);
                }
            }
            Fragment::Text(text) => {
                if !run.is_empty() {
                    out.push(Fragment::List(std::mem::take(&mut run)));
                }
                out.push(Fragment::Text(text));
            }
        }
    }

    if !run.is_empty() {
        out.push(Fragment::List(run));
    }
    out
}

fn drop_trailing_breaks(out: &mut Vec<Fragment>) {
    while matches!(out.last(), Some(Fragment::Break)) {
        out.pop();
    }
}

/// Render fragments to markup
#[must_use]
pub fn render(fragments: &[Fragment]) -> String {
    let mut out = String::new();
    for fragment in fragments {
        match fragment {
            Fragment::Text(text) => out.push_str(text),
            Fragment::Break => out.push_str("<br>"),
            Fragment::Item(item) => {
                out.push_str("<li>");
                out.push_str(item);
                out.push_str("</li>");
            }
            Fragment::List(items) => {
                out.push_str("<ul>");
                for item in items {
                    out.push_str("<li>");
                    out.push_str(item);
                    out.push_str("</li>");
                }
                out.push_str("</ul>");
            }
        }
    }
    out
}
