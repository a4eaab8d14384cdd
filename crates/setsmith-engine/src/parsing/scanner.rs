use regex::Regex;
use std::sync::LazyLock;

/// Matches one physical setfile line: leading indent, then either a bare
/// `tag:` (group open) or `key: value`. The group alternative is tried
/// first, so a line like `a: b:` reads as a group open with tag `a: b`.
static LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<indent>[ \t]*)(?:(?P<group>.*?):$|(?P<key>.*?): (?P<value>.*)$)")
        .expect("Invalid line pattern")
});

/// Classification of a single line, containing only local facts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `<indent><tag>:` with nothing after the colon.
    GroupOpen { indent: &'a str, tag: &'a str },
    /// `<indent><key>: <value>`. An empty value is spelled `key: ` with a
    /// trailing space; a bare `key:` is always a group open.
    KeyValue {
        indent: &'a str,
        key: &'a str,
        value: &'a str,
    },
    /// Neither pattern matched.
    Malformed,
}

/// Classifies one physical line, with or without its `\n` terminator.
pub fn classify(line: &str) -> LineKind<'_> {
    let content = line.strip_suffix('\n').unwrap_or(line);
    let Some(caps) = LINE_PATTERN.captures(content) else {
        return LineKind::Malformed;
    };
    let indent = caps.name("indent").map_or("", |m| m.as_str());
    if let Some(tag) = caps.name("group") {
        return LineKind::GroupOpen {
            indent,
            tag: tag.as_str(),
        };
    }
    match (caps.name("key"), caps.name("value")) {
        (Some(key), Some(value)) => LineKind::KeyValue {
            indent,
            key: key.as_str(),
            value: value.as_str(),
        },
        _ => LineKind::Malformed,
    }
}

/// Returns the leading run of tabs and spaces of a line.
pub fn leading_indent(line: &str) -> &str {
    let rest = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - rest.len()]
}
