use std::fmt;

/// One space-delimited token of a kernel command line, with its byte span in
/// the line it was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub start: usize,
    pub end: usize,
    pub kind: TokenKind<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'a> {
    /// `name`
    Flag(&'a str),
    /// `name=value`. Only the first `=` separates, so `root=UUID=x` has
    /// value `UUID=x`.
    Assignment { name: &'a str, value: &'a str },
}

impl<'a> Token<'a> {
    pub fn name(&self) -> &'a str {
        match self.kind {
            TokenKind::Flag(name) => name,
            TokenKind::Assignment { name, .. } => name,
        }
    }

    /// `None` for a bare flag.
    pub fn value(&self) -> Option<&'a str> {
        match self.kind {
            TokenKind::Flag(_) => None,
            TokenKind::Assignment { value, .. } => Some(value),
        }
    }
}

impl fmt::Display for TokenKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TokenKind::Flag(name) => f.write_str(name),
            TokenKind::Assignment { name, value } => write!(f, "{name}={value}"),
        }
    }
}

fn classify(text: &str) -> TokenKind<'_> {
    match text.split_once('=') {
        Some((name, value)) => TokenKind::Assignment { name, value },
        None => TokenKind::Flag(text),
    }
}

/// Split a command line on spaces. Runs of spaces produce no empty tokens;
/// the spans let callers splice replacements without touching the spacing
/// around them.
pub fn tokenize(line: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut offset = 0;
    for part in line.split(' ') {
        if !part.is_empty() {
            tokens.push(Token {
                start: offset,
                end: offset + part.len(),
                kind: classify(part),
            });
        }
        offset += part.len() + 1;
    }
    tokens
}

/// Collapse every run of two or more spaces into one.
pub(super) fn collapse_spaces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_space = false;
    for c in text.chars() {
        if c == ' ' && previous_space {
            continue;
        }
        previous_space = c == ' ';
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_and_assignments() {
        let tokens = tokenize("quiet console=ttyS0,115200 splash");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].kind, TokenKind::Flag("quiet"));
        assert_eq!(
            tokens[1].kind,
            TokenKind::Assignment {
                name: "console",
                value: "ttyS0,115200"
            }
        );
        assert_eq!(tokens[2].name(), "splash");
        assert_eq!(tokens[2].value(), None);
    }

    #[test]
    fn value_keeps_later_equals_signs() {
        let tokens = tokenize("root=UUID=1234-abcd");
        assert_eq!(tokens[0].name(), "root");
        assert_eq!(tokens[0].value(), Some("UUID=1234-abcd"));
    }

    #[test]
    fn spans_point_into_line() {
        let line = "  quiet   splash ";
        let tokens = tokenize(line);
        assert_eq!(tokens.len(), 2);
        for token in &tokens {
            assert_eq!(&line[token.start..token.end], token.kind.to_string());
        }
        assert_eq!((tokens[0].start, tokens[0].end), (2, 7));
        assert_eq!((tokens[1].start, tokens[1].end), (10, 16));
    }

    #[test]
    fn formatter_round_trips_tokens() {
        let line = "quiet console=ttyS0 root=UUID=ab= x=";
        let rendered: Vec<String> = tokenize(line).iter().map(|t| t.kind.to_string()).collect();
        assert_eq!(rendered.join(" "), line);
    }

    #[test]
    fn empty_line_has_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("    ").is_empty());
    }

    #[test]
    fn tabs_are_not_separators() {
        let tokens = tokenize("quiet\tsplash");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Flag("quiet\tsplash"));
    }

    #[test]
    fn collapse_runs_of_spaces() {
        assert_eq!(collapse_spaces("a  b   c"), "a b c");
        assert_eq!(collapse_spaces("a b"), "a b");
        assert_eq!(collapse_spaces("  a  "), " a ");
    }
}
