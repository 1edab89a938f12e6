//! Match patterns for textual assertions
//!
//! Written as `<mode>:<text>`:
//! - `exact:` the whole text must be equal
//! - `prefix:` the text must start with the given head
//! - `glob:` `*` matches any run, `?` one character, everything else is literal
//! - `regex:` a `regex` crate expression, anchored at both ends
//!
//! A string without a known mode is read as a glob.

use std::fmt;

use regex::Regex;

use crate::common::{Error, Result};

#[derive(Debug, Clone)]
enum Matcher {
    Exact(String),
    Prefix(String),
    Compiled(Regex),
}

/// A parsed match pattern
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    matcher: Matcher,
}

impl Pattern {
    pub fn parse(source: &str) -> Result<Self> {
        let matcher = match source.split_once(':') {
            Some(("exact", text)) => Matcher::Exact(text.to_string()),
            Some(("prefix", text)) => Matcher::Prefix(text.to_string()),
            Some(("glob", text)) => Matcher::Compiled(compile(source, &glob_to_regex(text))?),
            Some(("regex", text)) => Matcher::Compiled(compile(source, &format!("^(?:{text})$"))?),
            _ => Matcher::Compiled(compile(source, &glob_to_regex(source))?),
        };
        Ok(Self {
            source: source.to_string(),
            matcher,
        })
    }

    pub fn matches(&self, text: &str) -> bool {
        match &self.matcher {
            Matcher::Exact(expected) => text == expected,
            Matcher::Prefix(head) => text.starts_with(head.as_str()),
            Matcher::Compiled(re) => re.is_match(text),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn compile(source: &str, expression: &str) -> Result<Regex> {
    Regex::new(expression).map_err(|e| Error::invalid_pattern(source, e))
}

fn glob_to_regex(glob: &str) -> String {
    let mut expression = String::with_capacity(glob.len() + 8);
    expression.push_str("(?s)^");
    let mut literal = [0u8; 4];
    for c in glob.chars() {
        match c {
            '*' => expression.push_str(".*"),
            '?' => expression.push('.'),
            _ => expression.push_str(&regex::escape(c.encode_utf8(&mut literal))),
        }
    }
    expression.push('$');
    expression
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact() {
        let p = Pattern::parse("exact:EventObject[source=a]").unwrap();
        assert!(p.matches("EventObject[source=a]"));
        assert!(!p.matches("EventObject[source=a] "));
    }

    #[test]
    fn test_prefix() {
        let p = Pattern::parse("prefix:EventObject[source=Source@").unwrap();
        assert!(p.matches("EventObject[source=Source@7f00]"));
        assert!(!p.matches("xEventObject[source=Source@7f00]"));
    }

    #[test]
    fn test_glob_treats_brackets_literally() {
        let p = Pattern::parse("glob:EventObject[source=Source@*]").unwrap();
        assert!(p.matches("EventObject[source=Source@0x55d0c]"));
        assert!(p.matches("EventObject[source=Source@]"));
        assert!(!p.matches("EventObject[source=Other@1]"));
        assert!(!p.matches("EventObject[source=Source@1"));
    }

    #[test]
    fn test_glob_question_mark() {
        let p = Pattern::parse("glob:a?c").unwrap();
        assert!(p.matches("abc"));
        assert!(!p.matches("ac"));
    }

    #[test]
    fn test_bare_string_is_glob() {
        let p = Pattern::parse("Event*").unwrap();
        assert!(p.matches("EventObject"));
        assert!(!p.matches("AnEvent"));
    }

    #[test]
    fn test_regex_is_anchored() {
        let p = Pattern::parse(r"regex:EventObject\[source=Source@0x[0-9a-f]+\]").unwrap();
        assert!(p.matches("EventObject[source=Source@0x1f]"));
        assert!(!p.matches("EventObject[source=Source@0x1f] trailing"));
    }

    #[test]
    fn test_invalid_regex() {
        let err = Pattern::parse("regex:(unclosed").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
    }

    #[test]
    fn test_display_keeps_source() {
        assert_eq!(Pattern::parse("prefix:abc").unwrap().to_string(), "prefix:abc");
    }
}
