pub mod param;
pub mod token;

use param::{ParamName, ParamValue};
use token::{Token, collapse_spaces, tokenize};

/// Outcome of reconciling a command line against one desired parameter.
///
/// When `changed` is false, `command_line` is the original string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileResult {
    pub changed: bool,
    pub command_line: String,
}

/// Compute the command line that puts `name` into the desired `value` state.
///
/// Only the first token named `name` is considered. A matched token is
/// rewritten in place; a missing one is appended after a single space.
/// Spacing is only normalized when a token is removed.
pub fn reconcile(command_line: &str, name: &ParamName, value: &ParamValue) -> ReconcileResult {
    let tokens = tokenize(command_line);
    let found = find(&tokens, name);

    let new_line = match (found, value.token(name)) {
        (Some(token), None) => {
            let joined = format!(
                "{}{}",
                &command_line[..token.start],
                &command_line[token.end..]
            );
            collapse_spaces(&joined).trim().to_owned()
        }
        (Some(token), Some(replacement)) => {
            if same_value(token.value(), value) {
                command_line.to_owned()
            } else {
                format!(
                    "{}{replacement}{}",
                    &command_line[..token.start],
                    &command_line[token.end..]
                )
            }
        }
        (None, None) => command_line.to_owned(),
        (None, Some(addition)) => format!("{command_line} {addition}"),
    };

    ReconcileResult {
        changed: new_line != command_line,
        command_line: new_line,
    }
}

fn find<'a>(tokens: &[Token<'a>], name: &ParamName) -> Option<Token<'a>> {
    tokens.iter().copied().find(|t| t.name() == name.as_str())
}

/// A bare flag satisfies `Empty`; an assignment satisfies an equal `Value`.
fn same_value(existing: Option<&str>, desired: &ParamValue) -> bool {
    match (existing, desired) {
        (None, ParamValue::Empty) => true,
        (Some(current), ParamValue::Value(wanted)) => current == wanted.as_str(),
        _ => false,
    }
}
