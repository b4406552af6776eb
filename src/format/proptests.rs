//! Property-based tests for answer formatting
//!
//! - Formatting is deterministic and never panics
//! - Backend text can never introduce tags of its own
//! - Lists are balanced, never nested and never touch a `<br>`
//! - Every tag is closed inside the element that opened it
//! - Grouping is idempotent

use super::*;
use proptest::prelude::*;

/// Tags the formatter is allowed to emit
const OWN_TAGS: &[&str] = &[
    "<br>",
    "<strong>",
    "</strong>",
    "<ul>",
    "</ul>",
    "<li>",
    "</li>",
];

/// Answer-like text: words, bullets, bold markers, newlines and markup chars
fn arb_answer() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            "[a-zA-Z0-9 .,:=]{1,12}",
            Just("\n".to_string()),
            Just("**".to_string()),
            Just("* ".to_string()),
            Just("- ".to_string()),
            Just("  ".to_string()),
            Just("<".to_string()),
            Just(">".to_string()),
            Just("&".to_string()),
        ],
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

fn arb_fragment() -> impl Strategy<Value = Fragment> {
    prop_oneof![
        "[a-z]{1,5}".prop_map(Fragment::Text),
        Just(Fragment::Break),
        "[a-z]{0,5}".prop_map(Fragment::Item),
        proptest::collection::vec("[a-z]{0,5}", 1..3).prop_map(Fragment::List),
    ]
}

fn strip_own_tags(markup: &str) -> String {
    OWN_TAGS
        .iter()
        .fold(markup.to_string(), |acc, tag| acc.replace(tag, ""))
}

/// Whether every opened tag is closed in reverse order
fn tags_nest(markup: &str) -> bool {
    let mut stack: Vec<&str> = Vec::new();
    let mut rest = markup;
    while let Some(pos) = rest.find('<') {
        rest = &rest[pos..];
        let Some(tag) = OWN_TAGS.iter().find(|tag| rest.starts_with(**tag)) else {
            return false;
        };
        rest = &rest[tag.len()..];
        match *tag {
            "<br>" => {}
            closing if closing.starts_with("</") => {
                if stack.pop().map(|open| &open[1..]) != Some(&closing[2..]) {
                    return false;
                }
            }
            opening => stack.push(opening),
        }
    }
    stack.is_empty()
}

proptest! {
    #[test]
    fn prop_deterministic(raw in any::<String>()) {
        prop_assert_eq!(format_answer(&raw), format_answer(&raw));
    }

    #[test]
    fn prop_only_own_tags(raw in arb_answer()) {
        let stripped = strip_own_tags(&format_answer(&raw));
        prop_assert!(!stripped.contains('<'), "stray tag in {:?}", stripped);
        prop_assert!(!stripped.contains('>'), "stray tag in {:?}", stripped);
    }

    #[test]
    fn prop_lists_balanced_and_flat(raw in arb_answer()) {
        let out = format_answer(&raw);
        prop_assert_eq!(out.matches("<ul>").count(), out.matches("</ul>").count());
        prop_assert!(!out.contains("<ul><ul>"));
        prop_assert!(!out.contains("</ul><ul>"));
        prop_assert!(!out.contains("<br><ul>"));
        prop_assert!(!out.contains("</ul><br>"));
        prop_assert!(!out.contains("</li><br>"));
    }

    #[test]
    fn prop_tags_nest(raw in arb_answer()) {
        let out = format_answer(&raw);
        prop_assert!(tags_nest(&out), "mis-nested markup: {:?}", out);
    }

    #[test]
    fn prop_every_item_is_in_a_list(raw in arb_answer()) {
        let grouped = group_lists(balance_bold(list_items(line_breaks(&bold_spans(&escape_html(&raw))))));
        prop_assert!(!grouped.iter().any(|f| matches!(f, Fragment::Item(_))));
    }

    #[test]
    fn prop_no_newlines_survive(raw in arb_answer()) {
        prop_assert!(!format_answer(&raw).contains('\n'));
    }

    #[test]
    fn prop_group_lists_idempotent(fragments in proptest::collection::vec(arb_fragment(), 0..20)) {
        let once = group_lists(fragments);
        let twice = group_lists(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_text_without_markers_has_no_list(raw in "[a-zA-Z0-9 .,\n]{0,80}") {
        let out = format_answer(&raw);
        prop_assert!(!out.contains("<ul>"));
        prop_assert!(!out.contains("<strong>"));
    }
}
