use serde::Serialize;
use thiserror::Error;

/// Fatal parse failures.
///
/// Unknown options and rejected values are not errors: the parser records
/// them and keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Unlock handlers kept revealing options past the pass limit.
    #[error("options were still being revealed after {passes} passes")]
    RegistrationLoop { passes: usize },
}

pub type ParseResult<T> = Result<T, ParseError>;

/// A flag that matched no registered option in the final pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct UnknownOption {
    /// The token as written, e.g. `--nope` or `-x`.
    pub flag: String,
    /// The following token, skipped as the unknown option's presumed value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped_value: Option<String>,
}
