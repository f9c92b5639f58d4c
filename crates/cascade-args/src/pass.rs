use crate::commit::commit;
use crate::error::UnknownOption;
use crate::registry::Registry;

/// Bare separator; accepted and ignored.
const SENTINEL: &str = "--";

/// Value committed for a flag given without one.
const IMPLICIT_VALUE: &str = "true";

#[derive(Debug, Default)]
pub(crate) struct PassOutcome {
    pub(crate) positionals: Vec<String>,
    pub(crate) unknown: Vec<UnknownOption>,
    pub(crate) needs_reparse: bool,
}

enum Token<'a> {
    Positional,
    Sentinel,
    Long(&'a str),
    Short(&'a str),
}

fn classify(token: &str) -> Token<'_> {
    if token == SENTINEL {
        Token::Sentinel
    } else if let Some(name) = token.strip_prefix("--") {
        Token::Long(name)
    } else if let Some(alias) = token.strip_prefix('-') {
        Token::Short(alias)
    } else {
        Token::Positional
    }
}

fn looks_like_flag(token: &str) -> bool {
    token.starts_with('-')
}

/// Scan `tokens` (program path excluded) once, left to right.
///
/// Options named in the scan get the following token as their value, or
/// `"true"` when no value follows. Options registered at the start of the pass
/// but never named get their default afterwards. Registrations queued by
/// unlock handlers are merged only once the scan and defaults are done.
pub(crate) fn run_pass(registry: &mut Registry, tokens: &[String]) -> PassOutcome {
    let mut unset = registry.snapshot();
    let mut deferred = Vec::new();
    let mut outcome = PassOutcome::default();

    let mut i = 0usize;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let resolved = match classify(token) {
            Token::Positional => {
                outcome.positionals.push(token.to_string());
                i += 1;
                continue;
            }
            Token::Sentinel => {
                i += 1;
                continue;
            }
            Token::Long(name) => registry.get(name).map(|o| o.name().to_string()),
            Token::Short(alias) => registry.canonical_name(alias).map(str::to_string),
        };

        let value = tokens
            .get(i + 1)
            .map(String::as_str)
            .filter(|next| !looks_like_flag(next));
        i += if value.is_some() { 2 } else { 1 };

        let Some(name) = resolved else {
            outcome.unknown.push(UnknownOption {
                flag: token.to_string(),
                skipped_value: value.map(str::to_string),
            });
            continue;
        };

        unset.shift_remove(&name);
        let value = value.unwrap_or(IMPLICIT_VALUE);
        outcome.needs_reparse |= commit(registry, &mut deferred, &name, value);
    }

    for name in &unset {
        let Some(default) = registry.get(name).map(|o| o.default_string().to_string()) else {
            continue;
        };
        outcome.needs_reparse |= commit(registry, &mut deferred, name, &default);
    }

    registry.merge(deferred);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::OptionInfo;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn value<'a>(registry: &'a Registry, name: &str) -> Option<&'a str> {
        registry.get(name).and_then(OptionInfo::value)
    }

    #[test]
    fn value_flag_consumes_next_token() {
        let mut registry = Registry::new();
        registry.register(OptionInfo::new("foo"));

        let out = run_pass(&mut registry, &tokens(&["--foo", "bar", "baz"]));
        assert_eq!(value(&registry, "foo"), Some("bar"));
        assert_eq!(out.positionals, ["baz"]);
        assert!(!out.needs_reparse);
    }

    #[test]
    fn flag_without_value_becomes_true() {
        let mut registry = Registry::new();
        registry.register(OptionInfo::new("verbose").short("v").default_value("false"));
        registry.register(OptionInfo::new("color").default_value("auto"));

        run_pass(&mut registry, &tokens(&["-v", "--color"]));
        assert_eq!(value(&registry, "verbose"), Some("true"));
        assert_eq!(value(&registry, "color"), Some("true"));
    }

    #[test]
    fn unknown_option_skips_presumed_value() {
        let mut registry = Registry::new();
        let out = run_pass(&mut registry, &tokens(&["--nope", "val", "x"]));

        assert_eq!(out.positionals, ["x"]);
        assert_eq!(
            out.unknown,
            [UnknownOption {
                flag: "--nope".to_string(),
                skipped_value: Some("val".to_string()),
            }]
        );
    }

    #[test]
    fn unknown_option_does_not_skip_following_flag() {
        let mut registry = Registry::new();
        registry.register(OptionInfo::new("known"));

        let out = run_pass(&mut registry, &tokens(&["-z", "--known", "1"]));
        assert_eq!(out.unknown[0].skipped_value, None);
        assert_eq!(value(&registry, "known"), Some("1"));
    }

    #[test]
    fn sentinel_is_a_no_op() {
        let mut registry = Registry::new();
        registry.register(OptionInfo::new("flag").default_value("false"));

        let out = run_pass(&mut registry, &tokens(&["--flag", "--", "file.txt"]));
        assert_eq!(value(&registry, "flag"), Some("true"));
        assert_eq!(out.positionals, ["file.txt"]);
        assert!(out.unknown.is_empty());
    }

    #[test]
    fn defaults_apply_only_to_untouched_options() {
        let mut registry = Registry::new();
        registry.register(OptionInfo::new("a").default_value("1"));
        registry.register(OptionInfo::new("b").default_value("2"));

        run_pass(&mut registry, &tokens(&["--a", "9"]));
        assert_eq!(value(&registry, "a"), Some("9"));
        assert_eq!(value(&registry, "b"), Some("2"));
    }

    #[test]
    fn revealed_option_is_unknown_until_next_pass() {
        let mut registry = Registry::new();
        registry.register(OptionInfo::new("mode").on_unlock(|value, reveal| {
            if value != "advanced" {
                return false;
            }
            reveal.add_option(OptionInfo::new("level").default_value("1"));
            true
        }));
        let input = tokens(&["--mode", "advanced", "--level", "5"]);

        let first = run_pass(&mut registry, &input);
        assert!(first.needs_reparse);
        assert_eq!(first.unknown.len(), 1);
        assert!(registry.contains("level"));
        assert_eq!(value(&registry, "level"), None);

        let second = run_pass(&mut registry, &input);
        assert!(!second.needs_reparse);
        assert!(second.unknown.is_empty());
        assert_eq!(value(&registry, "level"), Some("5"));
    }

    #[test]
    fn default_can_reveal_options() {
        let mut registry = Registry::new();
        registry.register(
            OptionInfo::new("backend")
                .default_value("gpu")
                .on_unlock(|value, reveal| {
                    if value == "gpu" {
                        reveal.add_option(OptionInfo::new("device").default_value("0"));
                        return true;
                    }
                    false
                }),
        );

        let out = run_pass(&mut registry, &[]);
        assert!(out.needs_reparse);
        assert!(registry.contains("device"));
    }
}
