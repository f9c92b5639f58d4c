//! Command-line option parsing with conditionally revealed options.
//!
//! Committing a value to one option may register new options. The parser
//! rescans the whole argument list until a pass reveals nothing new, so a
//! revealed option is recognized wherever it appears on the command line:
//!
//! ```
//! use cascade_args::{OptionInfo, Parser};
//!
//! let mut parser = Parser::new(["prog", "--level", "5", "--mode", "advanced"]);
//! parser.add_option(
//!     OptionInfo::new("mode")
//!         .default_value("basic")
//!         .on_unlock(|value, reveal| {
//!             if value != "advanced" {
//!                 return false;
//!             }
//!             reveal.add_option(OptionInfo::new("level").default_value("1"));
//!             true
//!         }),
//! );
//! parser.parse().unwrap();
//! assert_eq!(parser.value("level"), Some("5"));
//! ```
//!
//! Token rules:
//! - `--name` looks up a long name, `-x` a short alias.
//! - The next token is the option's value unless it starts with `-`; a flag
//!   with no value gets `"true"`.
//! - A bare `--` is ignored.
//! - Unknown options are recorded and skipped along with a following
//!   non-flag token.
//! - Options not named on the command line receive their default.

mod commit;
mod error;
mod option;
mod parser;
mod pass;
mod registry;
mod usage;

pub use error::{ParseError, ParseResult, UnknownOption};
pub use option::{OptionInfo, SetValueCallback, UnlockCallback, find_best_match};
pub use parser::{DEFAULT_MAX_PASSES, Parser};
pub use registry::{DocEntry, Registry, Reveal};
pub use usage::{OptionValue, ValuesSnapshot, render_current_values, render_usage};
