use super::{CallKind, PatternCall};
use crate::types::REST;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NOTE_CALL: Regex = Regex::new(r#"note\s*\(\s*["']([^"']+)["']\s*\)"#)
        .expect("note call regex is valid");
    static ref SOUND_CALL: Regex = Regex::new(
        r#"s\s*\(\s*["']([^"']+)["']\s*\)|sound\s*\(\s*["']([^"']+)["']\s*\)"#
    )
    .expect("sound call regex is valid");
}

/// Select the pattern call to play from `code`.
///
/// A `note(...)` call takes priority over any `s(...)`/`sound(...)` call,
/// wherever each appears. Returns `None` when neither is present.
pub fn extract(code: &str) -> Option<PatternCall> {
    if let Some(caps) = NOTE_CALL.captures(code) {
        let body = caps.get(1)?.as_str();
        return Some(PatternCall {
            kind: CallKind::Note,
            body: body.to_string(),
            tokens: split_tokens(body),
        });
    }

    let caps = SOUND_CALL.captures(code)?;
    let body = caps.get(1).or_else(|| caps.get(2))?.as_str();
    Some(PatternCall {
        kind: CallKind::Sound,
        body: body.to_string(),
        tokens: split_tokens(body),
    })
}

/// Split a pattern body on whitespace, dropping rests
pub fn split_tokens(body: &str) -> Vec<String> {
    body.split_whitespace()
        .filter(|token| *token != REST)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_call_drops_rests() {
        let call = extract(r#"note("c4 ~ e4 ~")"#).unwrap();
        assert_eq!(call.kind, CallKind::Note);
        assert_eq!(call.tokens, vec!["c4", "e4"]);
        assert_eq!(call.body, "c4 ~ e4 ~");
    }

    #[test]
    fn test_sound_call() {
        let call = extract(r#"s("bd sd bd sd")"#).unwrap();
        assert_eq!(call.kind, CallKind::Sound);
        assert_eq!(call.tokens, vec!["bd", "sd", "bd", "sd"]);
    }

    #[test]
    fn test_long_sound_form_and_single_quotes() {
        let call = extract("sound('hh oh')").unwrap();
        assert_eq!(call.kind, CallKind::Sound);
        assert_eq!(call.tokens, vec!["hh", "oh"]);
    }

    #[test]
    fn test_note_call_wins_even_when_later() {
        let code = "s(\"bd sd\")\nnote(\"c3 e3 g3\")";
        let call = extract(code).unwrap();
        assert_eq!(call.kind, CallKind::Note);
        assert_eq!(call.tokens, vec!["c3", "e3", "g3"]);
    }

    #[test]
    fn test_chained_sound_does_not_override_note() {
        let call = extract(r#"note("c2 ~ c2 ~ e2 ~ g1 ~").sound("sawtooth").lpf(400)"#).unwrap();
        assert_eq!(call.kind, CallKind::Note);
        assert_eq!(call.tokens, vec!["c2", "c2", "e2", "g1"]);
    }

    #[test]
    fn test_whitespace_inside_call() {
        let call = extract("note (  \"a4   b4\"  )").unwrap();
        assert_eq!(call.tokens, vec!["a4", "b4"]);
    }

    #[test]
    fn test_first_call_only() {
        let call = extract(r#"stack(s("bd sd"), s("hh*8"))"#).unwrap();
        assert_eq!(call.tokens, vec!["bd", "sd"]);
    }

    #[test]
    fn test_operators_flow_through_uninterpreted() {
        let call = extract(r#"s("bd(3,8) [sd hh]*2")"#).unwrap();
        assert_eq!(call.tokens, vec!["bd(3,8)", "[sd", "hh]*2"]);
    }

    #[test]
    fn test_no_call() {
        assert!(extract("").is_none());
        assert!(extract("stack()").is_none());
        assert!(extract(r#"note(c4)"#).is_none());
    }

    #[test]
    fn test_all_rests_yields_empty_note_call() {
        let call = extract(r#"note("~ ~")"#).unwrap();
        assert_eq!(call.kind, CallKind::Note);
        assert!(call.is_empty());
    }
}
