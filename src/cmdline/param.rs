use std::fmt;
use std::str::FromStr;

use super::token::TokenKind;
use crate::error::GrubStateError;

/// Characters that cannot appear in a command-line token: whitespace splits
/// the token and `"` ends the quoted assignment in `/etc/default/grub`.
fn check_token_text(kind: &str, text: &str) -> Result<(), GrubStateError> {
    if text.chars().any(char::is_whitespace) {
        return Err(GrubStateError::InvalidArgument(format!(
            "{kind} '{text}' must not contain whitespace"
        )));
    }
    if text.contains('"') {
        return Err(GrubStateError::InvalidArgument(format!(
            "{kind} '{text}' must not contain '\"'"
        )));
    }
    Ok(())
}

/// Validated kernel parameter identifier (`quiet`, `console`, ...).
///
/// The inner string is private, so every `ParamName` went through
/// [`ParamName::new`]:
///
/// ```compile_fail
/// use grub_state::cmdline::param::ParamName;
///
/// let _name = ParamName("bad name".to_owned());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParamName(String);

impl ParamName {
    /// Rejects empty names and names containing `=`, `"` or whitespace.
    pub fn new(name: &str) -> Result<Self, GrubStateError> {
        if name.is_empty() {
            return Err(GrubStateError::InvalidArgument(
                "parameter name must not be empty".to_owned(),
            ));
        }
        if name.contains('=') {
            return Err(GrubStateError::InvalidArgument(format!(
                "parameter name '{name}' must not contain '='"
            )));
        }
        check_token_text("parameter name", name)?;
        Ok(Self(name.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ParamName {
    type Err = GrubStateError;

    fn from_str(s: &str) -> Result<Self, GrubStateError> {
        Self::new(s)
    }
}

impl fmt::Display for ParamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Non-empty parameter value that survives a round trip through the
/// command line. May contain `=` (`root=UUID=...`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgValue(String);

impl ArgValue {
    pub fn new(value: &str) -> Result<Self, GrubStateError> {
        if value.is_empty() {
            return Err(GrubStateError::InvalidArgument(
                "parameter value must not be empty, use a bare flag instead".to_owned(),
            ));
        }
        check_token_text("parameter value", value)?;
        Ok(Self(value.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Desired state of a kernel parameter.
///
/// `Absent` and `Empty` are distinct: `Absent` removes the parameter,
/// `Empty` keeps it as a bare flag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParamValue {
    #[default]
    Absent,
    Empty,
    Value(ArgValue),
}

impl ParamValue {
    /// `None` is `Absent`, `""` is `Empty`, anything else must be a valid
    /// [`ArgValue`].
    pub fn new(value: Option<&str>) -> Result<Self, GrubStateError> {
        match value {
            None => Ok(ParamValue::Absent),
            Some("") => Ok(ParamValue::Empty),
            Some(v) => ArgValue::new(v).map(ParamValue::Value),
        }
    }

    /// The token this value produces for `name`, or `None` when absent.
    pub fn token<'a>(&'a self, name: &'a ParamName) -> Option<TokenKind<'a>> {
        match self {
            ParamValue::Absent => None,
            ParamValue::Empty => Some(TokenKind::Flag(name.as_str())),
            ParamValue::Value(value) => Some(TokenKind::Assignment {
                name: name.as_str(),
                value: value.as_str(),
            }),
        }
    }
}

impl FromStr for ParamValue {
    type Err = GrubStateError;

    /// Parse a present value; `""` is `Empty`.
    fn from_str(s: &str) -> Result<Self, GrubStateError> {
        Self::new(Some(s))
    }
}
