use crate::error::{ParseError, ParseResult, UnknownOption};
use crate::option::OptionInfo;
use crate::pass::run_pass;
use crate::registry::Registry;

/// Pass limit used unless [`Parser::with_max_passes`] says otherwise.
pub const DEFAULT_MAX_PASSES: usize = 32;

/// Command-line parser whose options may reveal further options.
///
/// Parsing rescans the full argument list until a pass reveals nothing new, so
/// a revealed option is recognized even when it appears before the flag that
/// revealed it.
#[derive(Debug)]
pub struct Parser {
    raw_args: Vec<String>,
    exe_name: String,
    registry: Registry,
    positionals: Vec<String>,
    unknown: Vec<UnknownOption>,
    passes: usize,
    max_passes: usize,
}

impl Parser {
    /// Create a parser over raw arguments, program path first.
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            raw_args: args.into_iter().map(Into::into).collect(),
            exe_name: String::new(),
            registry: Registry::new(),
            positionals: Vec::new(),
            unknown: Vec::new(),
            passes: 0,
            max_passes: DEFAULT_MAX_PASSES,
        }
    }

    /// Create a parser over the process arguments.
    pub fn from_env() -> Self {
        Self::new(std::env::args())
    }

    /// Fail with [`ParseError::RegistrationLoop`] if a pass numbered `max`
    /// still reveals options. Values below 1 are treated as 1.
    pub fn with_max_passes(mut self, max: usize) -> Self {
        self.max_passes = max.max(1);
        self
    }

    /// Append more raw arguments.
    pub fn set_args<I, S>(&mut self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.raw_args.extend(args.into_iter().map(Into::into));
    }

    pub fn add_option(&mut self, option: OptionInfo) {
        self.registry.register(option);
    }

    /// Add a free-text line to the usage output at the current position.
    pub fn add_doc_string(&mut self, text: impl Into<String>) {
        self.registry.add_doc_string(text);
    }

    /// Parse the raw arguments until no pass reveals new options.
    ///
    /// Every pass starts over from the first argument after the program path.
    /// Positional arguments and unknown options reflect the final pass only.
    pub fn parse(&mut self) -> ParseResult<()> {
        self.exe_name = self
            .raw_args
            .first()
            .map(|path| exe_name_from_path(path).to_string())
            .unwrap_or_default();
        let tokens = self.raw_args.get(1..).unwrap_or_default();

        let mut passes = 0usize;
        loop {
            passes += 1;
            let outcome = run_pass(&mut self.registry, tokens);
            self.positionals = outcome.positionals;
            self.unknown = outcome.unknown;
            self.passes = passes;

            if !outcome.needs_reparse {
                break;
            }
            if passes >= self.max_passes {
                return Err(ParseError::RegistrationLoop { passes });
            }
            tracing::debug!(pass = passes, "options revealed, reparsing");
        }

        for unknown in &self.unknown {
            tracing::warn!(option = %unknown.flag, "unknown option, skipping");
        }
        Ok(())
    }

    /// Program name: the program path after its last `/` or `\`.
    pub fn exe_name(&self) -> &str {
        &self.exe_name
    }

    /// Number of positional arguments.
    pub fn num_args(&self) -> usize {
        self.positionals.len()
    }

    pub fn arg(&self, index: usize) -> Option<&str> {
        self.positionals.get(index).map(String::as_str)
    }

    pub fn args(&self) -> &[String] {
        &self.positionals
    }

    pub fn has_option(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    pub fn option(&self, name: &str) -> Option<&OptionInfo> {
        self.registry.get(name)
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.registry.get(name).and_then(OptionInfo::value)
    }

    /// Whether the option's value is `"true"`.
    pub fn flag(&self, name: &str) -> bool {
        self.value(name) == Some("true")
    }

    /// Passes the last [`Parser::parse`] needed.
    pub fn passes(&self) -> usize {
        self.passes
    }

    pub fn unknown_options(&self) -> &[UnknownOption] {
        &self.unknown
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

fn exe_name_from_path(path: &str) -> &str {
    match path.rfind(|c: char| c == '/' || c == '\\') {
        Some(pos) => &path[pos + 1..],
        None => path,
    }
}
