//! Shared regular sub-patterns for the line grammar.
//!
//! Every statement pattern is assembled from the fragments below and
//! compiled once. Fragments that capture take a group name so that the
//! same fragment can appear several times in one statement.

use std::sync::LazyLock;

use regex::Regex;

/// Line start.
pub const LINE_START: &str = r"^\s*";

/// Line end, a trailing `//` comment is allowed.
pub const LINE_END: &str = r"(?://.*)?\s*$";

/// Bare token (identifier or numeral) surrounded by optional whitespace.
pub fn token(group: &str) -> String {
    format!(r"\s*(?P<{group}>[a-zA-Z0-9_]+)\s*")
}

/// Statement terminator.
pub fn statement_end() -> String {
    format!(r";\s*{LINE_END}")
}

/// Parenthesized raw argument list, split later by [`split_args`].
pub fn arg_list(group: &str) -> String {
    format!(r"\s*\((?P<{group}>.*)\)\s*")
}

/// Optional single index `[N]`.
pub fn single_index(group: &str) -> String {
    format!(r"(?:\[{}\])?\s*", token(group))
}

/// Optional range index `[HI:LO]` or `[N]`.
pub fn range_index(hi: &str, lo: &str) -> String {
    format!(r"(?:\[{}(?::{})?\])?\s*", token(hi), token(lo))
}

fn compile(pattern: String) -> Regex {
    Regex::new(&pattern).expect("statement grammar is a valid regex")
}

pub static BLANK: LazyLock<Regex> = LazyLock::new(|| compile(format!(r"{LINE_START}$")));

pub static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| compile(format!(r"{LINE_START}(?:;\s*)?{LINE_END}")));

pub static NAMESPACE: LazyLock<Regex> = LazyLock::new(|| {
    compile(format!(
        "{LINE_START}namespace{}{}",
        token("name"),
        statement_end()
    ))
});

pub static CONST: LazyLock<Regex> = LazyLock::new(|| {
    compile(format!(
        "{LINE_START}const{}={}{}",
        token("name"),
        token("value"),
        statement_end()
    ))
});

pub static TYPE: LazyLock<Regex> = LazyLock::new(|| {
    compile(format!(
        "{LINE_START}type{}={}{}{}",
        token("name"),
        token("family"),
        arg_list("args"),
        statement_end()
    ))
});

pub static CREATE: LazyLock<Regex> = LazyLock::new(|| {
    compile(format!(
        "{LINE_START}create{}={}{}{}",
        token("name"),
        token("type"),
        single_index("size"),
        statement_end()
    ))
});

pub static CONNECT: LazyLock<Regex> = LazyLock::new(|| {
    compile(format!(
        "{LINE_START}connect{}{}->{}{}{}",
        token("client"),
        range_index("start", "end"),
        token("manager"),
        single_index("index"),
        statement_end()
    ))
});

/// Re-tokenizes a raw argument list.
///
/// A blank list has no arguments. Otherwise the list is split on commas and
/// each position keeps its place, so `f(a, , b)` yields an empty middle
/// token. Words separated only by whitespace are split apart as well.
pub fn split_args(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    let mut args = Vec::new();
    for segment in raw.split(',') {
        let segment = segment.trim();
        if segment.is_empty() {
            args.push(String::new());
        } else {
            args.extend(segment.split_whitespace().map(str::to_string));
        }
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_comment_lines() {
        assert!(BLANK.is_match(""));
        assert!(BLANK.is_match("   \t"));
        assert!(!BLANK.is_match("// note"));
        assert!(COMMENT.is_match("// note"));
        assert!(COMMENT.is_match("   ;  // empty statement"));
        assert!(!COMMENT.is_match("const A = 1;"));
    }

    #[test]
    fn statement_end_allows_trailing_comment() {
        let caps = CONST.captures("const L1WN = 8;  // ways").expect("match");
        assert_eq!(&caps["name"], "L1WN");
        assert_eq!(&caps["value"], "8");
        assert!(!CONST.is_match("const L1WN = 8"));
    }

    #[test]
    fn connect_captures_optional_parts() {
        let caps = CONNECT.captures("connect l1[3:2] -> llc[1];").expect("match");
        assert_eq!(&caps["client"], "l1");
        assert_eq!(&caps["start"], "3");
        assert_eq!(&caps["end"], "2");
        assert_eq!(&caps["manager"], "llc");
        assert_eq!(&caps["index"], "1");

        let caps = CONNECT.captures("connect llc -> mem;").expect("match");
        assert!(caps.name("start").is_none());
        assert!(caps.name("end").is_none());
        assert!(caps.name("index").is_none());
    }

    #[test]
    fn type_captures_raw_argument_list() {
        let caps = TYPE
            .captures("type l1_type = CacheArrayNorm(6, 8, meta, data);")
            .expect("match");
        assert_eq!(&caps["family"], "CacheArrayNorm");
        assert_eq!(&caps["args"], "6, 8, meta, data");
    }

    #[test]
    fn splits_argument_lists() {
        assert!(split_args("").is_empty());
        assert!(split_args("  ").is_empty());
        assert_eq!(split_args("a, b,c"), vec!["a", "b", "c"]);
        assert_eq!(split_args("meta, , idx"), vec!["meta", "", "idx"]);
        assert_eq!(split_args("meta,"), vec!["meta", ""]);
        assert_eq!(split_args("a b, c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn long_argument_lists_are_not_truncated() {
        let raw = (0..500).map(|i| format!("arg{i}")).collect::<Vec<_>>().join(", ");
        assert_eq!(split_args(&raw).len(), 500);
    }
}
