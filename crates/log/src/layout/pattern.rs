//! Conversion pattern parser

use crate::core::{LogError, LogResult};

/// One piece of a compiled pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    Literal(String),
    Level,
    Timestamp,
    /// Keep the last `n` segments of the target, or all of it
    Logger(Option<usize>),
    Message,
    Newline,
    /// Error chain of the `error` field, one line per cause
    ErrorChain,
}

/// A parsed layout pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub(crate) segments: Vec<Segment>,
}

impl Pattern {
    /// Parse a conversion pattern such as `[%level] %d %logger{4}: %msg%n%ex`
    pub fn parse(source: &str) -> LogResult<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }

            if chars.next_if(|&(_, next)| next == '%').is_some() {
                literal.push('%');
                continue;
            }

            let mut word = String::new();
            while let Some((_, next)) = chars.next_if(|&(_, next)| next.is_ascii_alphabetic()) {
                word.push(next);
            }
            if word.is_empty() {
                return Err(LogError::layout(
                    source,
                    format!("dangling '%' at offset {offset}"),
                ));
            }

            let option = if chars.next_if(|&(_, next)| next == '{').is_some() {
                let mut option = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((_, next)) => option.push(next),
                        None => {
                            return Err(LogError::layout(
                                source,
                                format!("unclosed '{{' after '%{word}' at offset {offset}"),
                            ));
                        }
                    }
                }
                Some(option)
            } else {
                None
            };

            let segment = Self::conversion(source, &word, option.as_deref(), offset)?;
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(segment);
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    fn conversion(
        source: &str,
        word: &str,
        option: Option<&str>,
        offset: usize,
    ) -> LogResult<Segment> {
        let segment = match word {
            "level" | "p" => Segment::Level,
            "d" | "date" => Segment::Timestamp,
            "logger" | "c" => {
                let depth = option
                    .map(|raw| {
                        raw.trim()
                            .parse::<usize>()
                            .ok()
                            .filter(|&n| n > 0)
                            .ok_or_else(|| {
                                LogError::layout(
                                    source,
                                    format!("'%{word}{{{raw}}}' needs a positive segment count"),
                                )
                            })
                    })
                    .transpose()?;
                return Ok(Segment::Logger(depth));
            }
            "msg" | "m" | "message" => Segment::Message,
            "n" => Segment::Newline,
            "ex" | "throwable" => Segment::ErrorChain,
            _ => {
                return Err(LogError::layout(
                    source,
                    format!("unknown conversion '%{word}' at offset {offset}"),
                ));
            }
        };

        if let Some(raw) = option {
            return Err(LogError::layout(
                source,
                format!("'%{word}' takes no option, got '{{{raw}}}'"),
            ));
        }
        Ok(segment)
    }
}

/// Keep the last `depth` segments of a `::` or `.` separated name
pub(crate) fn truncate_logger(target: &str, depth: usize) -> &str {
    let separator = if target.contains("::") { "::" } else { "." };
    match target.rmatch_indices(separator).nth(depth.saturating_sub(1)) {
        Some((index, _)) => &target[index + separator.len()..],
        None => target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_parse_default_pattern() {
        let pattern = Pattern::parse(crate::config::DEFAULT_PATTERN).unwrap();
        assert_eq!(
            pattern.segments,
            vec![
                Segment::Literal("[".into()),
                Segment::Level,
                Segment::Literal("] ".into()),
                Segment::Timestamp,
                Segment::Literal(" ".into()),
                Segment::Logger(Some(4)),
                Segment::Literal(": ".into()),
                Segment::Message,
                Segment::Newline,
                Segment::ErrorChain,
            ]
        );
    }

    #[test]
    fn test_parse_aliases_and_escape() {
        let pattern = Pattern::parse("%p|%c|%m 100%%").unwrap();
        assert_eq!(
            pattern.segments,
            vec![
                Segment::Level,
                Segment::Literal("|".into()),
                Segment::Logger(None),
                Segment::Literal("|".into()),
                Segment::Message,
                Segment::Literal(" 100%".into()),
            ]
        );
    }

    #[rstest]
    #[case("%bogus", "unknown conversion '%bogus'")]
    #[case("oops %", "dangling '%'")]
    #[case("%logger{4", "unclosed")]
    #[case("%logger{0}", "positive segment count")]
    #[case("%logger{x}", "positive segment count")]
    #[case("%msg{2}", "takes no option")]
    fn test_parse_errors(#[case] source: &str, #[case] expected: &str) {
        let err = Pattern::parse(source).unwrap_err();
        assert!(
            err.to_string().contains(expected),
            "'{source}' gave '{err}'"
        );
    }

    #[rstest]
    #[case("a::b::c::d::e::f", 4, "c::d::e::f")]
    #[case("a::b", 4, "a::b")]
    #[case("lumen_log", 4, "lumen_log")]
    #[case("a::b::c", 1, "c")]
    #[case("org.acme.jvm.persistence.repo", 4, "acme.jvm.persistence.repo")]
    #[case("a::b::c::d", 4, "a::b::c::d")]
    fn test_truncate_logger(#[case] target: &str, #[case] depth: usize, #[case] expected: &str) {
        assert_eq!(truncate_logger(target, depth), expected);
    }
}
