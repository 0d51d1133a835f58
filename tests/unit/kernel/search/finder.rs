use super::*;
use crate::kernel::services::ports::SearchError;

fn spans(matches: &[Match]) -> Vec<(usize, usize)> {
    matches.iter().map(|m| (m.start, m.end)).collect()
}

#[test]
fn test_literal_search_insensitive() {
    let matches = find("foo bar foo baz foo", "foo", false, false).unwrap();
    assert_eq!(spans(&matches), vec![(0, 3), (8, 11), (16, 19)]);
}

#[test]
fn test_case_insensitive() {
    let matches = find("Hello HELLO hello", "hello", false, false).unwrap();
    assert_eq!(matches.len(), 3);

    let matches = find("Hello HELLO hello", "hello", true, false).unwrap();
    assert_eq!(spans(&matches), vec![(12, 17)]);
}

#[test]
fn test_literal_does_not_double_count_overlaps() {
    let matches = find("aaaa", "aa", false, false).unwrap();
    assert_eq!(spans(&matches), vec![(0, 2), (2, 4)]);

    let matches = find("aaa", "aa", true, false).unwrap();
    assert_eq!(spans(&matches), vec![(0, 2)]);
}

#[test]
fn test_line_numbers() {
    let matches = find("line1\nline2 hello\nline3", "hello", true, false).unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].start, 12);
    assert_eq!(matches[0].line, 1);
    assert_eq!(matches[0].col, 6);
}

#[test]
fn test_offsets_are_chars_not_bytes() {
    let matches = find("héllo wörld héllo", "héllo", true, false).unwrap();
    assert_eq!(spans(&matches), vec![(0, 5), (12, 17)]);
    assert_eq!(matches[1].col, 12);
}

#[test]
fn test_case_fold_non_ascii() {
    let matches = find("ÄBC äbc", "äbc", false, false).unwrap();
    assert_eq!(spans(&matches), vec![(0, 3), (4, 7)]);
}

#[test]
fn test_case_fold_final_sigma() {
    let text = "ΟΔΟΣ οδος";

    let sensitive = find(text, "ΟΔΟΣ", true, false).unwrap();
    assert_eq!(spans(&sensitive), vec![(0, 4)]);

    for query in ["ΟΔΟΣ", "οδος", "οδοσ"] {
        let insensitive = find(text, query, false, false).unwrap();
        assert_eq!(spans(&insensitive), vec![(0, 4), (5, 9)], "query {query}");
    }
}

#[test]
fn test_insensitive_spans_equal_query_when_lowercased() {
    let texts = [
        "The quick brown Fox jumps over the lazy fox",
        "fOx\nFOX\nfox and foxes",
        "no match here",
        "",
    ];
    for text in texts {
        let matches = find(text, "Fox", false, false).unwrap();
        let chars: Vec<char> = text.chars().collect();
        let mut last_end = 0;
        for m in &matches {
            assert!(m.start >= last_end);
            assert!(m.start < m.end);
            let slice: String = chars[m.start..m.end].iter().collect();
            assert_eq!(slice.to_lowercase(), "fox");
            last_end = m.end;
        }

        // case-sensitive hits are exact and a subset of the insensitive ones
        for m in find(text, "fox", true, false).unwrap() {
            let slice: String = chars[m.start..m.end].iter().collect();
            assert_eq!(slice, "fox");
            assert!(matches.contains(&m));
        }
    }
}

#[test]
fn test_regex_search() {
    let matches = find("a1 b22 c333", r"\d+", true, true).unwrap();
    assert_eq!(spans(&matches), vec![(1, 2), (4, 6), (8, 11)]);
}

#[test]
fn test_regex_case_flag() {
    assert_eq!(find("Foo foo FOO", "foo", false, true).unwrap().len(), 3);
    assert_eq!(find("Foo foo FOO", "foo", true, true).unwrap().len(), 1);
}

#[test]
fn test_regex_zero_length_matches_terminate() {
    let matches = find("abc", "x*", false, true).unwrap();
    assert_eq!(spans(&matches), vec![(0, 0), (1, 1), (2, 2), (3, 3)]);

    let matches = find("aab", "a*", true, true).unwrap();
    assert_eq!(spans(&matches), vec![(0, 2), (2, 2), (3, 3)]);
}

#[test]
fn test_regex_zero_length_steps_whole_chars() {
    let matches = find("é", "", false, false).unwrap();
    assert!(matches.is_empty());

    let matches = find("éa", "b?", true, true).unwrap();
    assert_eq!(spans(&matches), vec![(0, 0), (1, 1), (2, 2)]);
}

#[test]
fn test_invalid_regex() {
    let err = find("text", "(", false, true).unwrap_err();
    assert!(matches!(err, SearchError::InvalidRegex(_)));
}

#[test]
fn test_empty_pattern() {
    assert!(find("hello", "", false, false).unwrap().is_empty());
    assert!(find("hello", "", false, true).unwrap().is_empty());

    let config = SearchConfig::literal("", true);
    assert!(config.find_all("hello").is_empty());
}

#[test]
fn test_literal_pattern_with_regex_metachars() {
    let matches = find("a.b a+b (x)", "(x)", true, false).unwrap();
    assert_eq!(spans(&matches), vec![(8, 11)]);
    assert!(!SearchConfig::literal("(x)", true).is_regex());
}

#[test]
fn test_pick_current() {
    let matches = find("foo bar foo baz foo", "foo", false, false).unwrap();

    assert_eq!(pick_current(&matches, 0), Some(0));
    assert_eq!(pick_current(&matches, 5), Some(1));
    assert_eq!(pick_current(&matches, 8), Some(1));
    assert_eq!(pick_current(&matches, 17), Some(2));
    assert_eq!(pick_current(&matches, 100), Some(2));
    assert_eq!(pick_current(&[], 0), None);
}
