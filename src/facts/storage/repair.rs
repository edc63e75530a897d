//! Fix-ups for the JSON printed by `lshw -json`.
//!
//! Depending on version and on how many devices match a class, `lshw` may
//! print a bare object instead of an array, a dangling `},` at the end, or
//! sibling objects with no comma between them. Each fix-up is a separate
//! step and they run in a fixed order: the comma fix relies on the array
//! brackets already being in place.

use serde_json::Value;

use crate::error::{FactsError, Result};

type Step = fn(&str) -> String;

const STEPS: [Step; 4] = [
    trim,
    strip_trailing_comma,
    wrap_in_array,
    insert_missing_commas,
];

/// Apply every fix-up in order.
pub fn repair(raw: &str) -> String {
    STEPS
        .iter()
        .fold(raw.to_string(), |text, step| step(&text))
}

/// Repair `raw` and decode it as a JSON array of documents.
pub fn decode_documents(class: &'static str, raw: &str) -> Result<Vec<Value>> {
    let text = repair(raw);
    serde_json::from_str(&text).map_err(|source| FactsError::Decode { class, source })
}

pub fn trim(text: &str) -> String {
    text.trim().to_string()
}

/// `...},` at the very end becomes `...}`. Nothing else is touched.
pub fn strip_trailing_comma(text: &str) -> String {
    match text.strip_suffix("},") {
        Some(head) => format!("{}}}", head),
        None => text.to_string(),
    }
}

pub fn wrap_in_array(text: &str) -> String {
    if text.starts_with('[') {
        text.to_string()
    } else {
        format!("[{}]", text)
    }
}

/// Turn `}` followed only by whitespace and then `{` into `},{`.
///
/// Braces inside string literals are left alone.
pub fn insert_missing_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut chars = text.char_indices().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some((idx, c)) = chars.next() {
        out.push(c);

        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '}' => {
                let rest = &text[idx + c.len_utf8()..];
                if rest.trim_start().starts_with('{') {
                    out.push(',');
                    // Drop the whitespace run; the `{` is pushed next round.
                    while chars.next_if(|(_, ws)| ws.is_whitespace()).is_some() {}
                }
            }
            _ => {}
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn separate_objects_without_brackets_or_commas() {
        let docs = decode_documents("disk", "{\"a\":1}\n{\"b\":2}").unwrap();
        assert_eq!(docs, vec![json!({"a": 1}), json!({"b": 2})]);
    }

    #[test]
    fn single_bare_object_is_wrapped() {
        assert_eq!(repair("{\"x\":1}"), "[{\"x\":1}]");
        let docs = decode_documents("storage", "  {\"x\":1}\n").unwrap();
        assert_eq!(docs, vec![json!({"x": 1})]);
    }

    #[test]
    fn dangling_comma_after_last_object_is_dropped() {
        let raw = "{\"a\":1},\n{\"b\":2},\n";
        let docs = decode_documents("disk", raw).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1], json!({"b": 2}));
    }

    #[test]
    fn comma_before_closing_bracket_is_not_repaired() {
        // Only a trailing `},` at end of text is rewritten.
        assert_eq!(strip_trailing_comma("[{\"a\":1},{\"b\":2},]"), "[{\"a\":1},{\"b\":2},]");
        let err = decode_documents("disk", "[{\"a\":1},{\"b\":2},]").unwrap_err();
        assert!(matches!(err, FactsError::Decode { class: "disk", .. }));
    }

    #[test]
    fn well_formed_array_passes_through() {
        let raw = "[\n  {\"id\": \"disk\", \"children\": [{\"id\": \"volume:0\"}]}\n]\n";
        let docs = decode_documents("disk", raw).unwrap();
        assert_eq!(docs, vec![json!({"id": "disk", "children": [{"id": "volume:0"}]})]);
    }

    #[test]
    fn missing_commas_inside_brackets() {
        let raw = "[\n{\n \"id\" : \"sata\"\n}\n  {\n \"id\" : \"nvme\"\n}\n]";
        let docs = decode_documents("storage", raw).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1]["id"], "nvme");
    }

    #[test]
    fn braces_in_strings_are_left_alone() {
        let text = "[{\"desc\":\"} {\"}]";
        assert_eq!(insert_missing_commas(text), text);
    }

    #[test]
    fn empty_output_is_an_empty_list() {
        assert!(decode_documents("disk", " \n").unwrap().is_empty());
    }

    #[test]
    fn unrepairable_text_is_a_decode_error() {
        let err = decode_documents("storage", "WARNING: you should run this program as super-user.")
            .unwrap_err();
        assert!(matches!(err, FactsError::Decode { class: "storage", .. }));
    }
}
