//! Help text and value dumps built from the registry.

use std::collections::HashSet;
use std::io::{self, Write};

use serde::Serialize;

use crate::error::UnknownOption;
use crate::option::OptionInfo;
use crate::parser::Parser;
use crate::registry::{DocEntry, Registry};

/// Rendered option names longer than this do not widen the help column.
const MAX_NAME_WIDTH: usize = 32;

fn option_label(option: &OptionInfo) -> String {
    match option.short_name() {
        Some(short) => format!(
            "--{} (-{}) [{}]",
            option.name(),
            short,
            option.default_string()
        ),
        None => format!("--{} [{}]", option.name(), option.default_string()),
    }
}

fn label_width(option: &OptionInfo) -> usize {
    option_label(option).chars().count().min(MAX_NAME_WIDTH)
}

/// Render `Usage: <exe> [options]` followed by every doc entry in order.
pub fn render_usage(registry: &Registry, exe_name: &str) -> String {
    let longest = registry.options().map(label_width).max().unwrap_or(0);

    let mut out = format!("Usage: {exe_name} [options]\n\n");
    for entry in registry.doc_entries() {
        match entry {
            DocEntry::Option(name) => {
                let Some(option) = registry.get(name) else {
                    continue;
                };
                let padding = 2 + longest.saturating_sub(label_width(option));
                out.push('\t');
                out.push_str(&option_label(option));
                out.push_str(&" ".repeat(padding));
                out.push_str(option.help());
                if !option.enum_choices().is_empty() {
                    out.push_str(&format!("  {{{}}}", option.enum_choices().join(" | ")));
                }
                out.push('\n');
            }
            DocEntry::Text(text) => {
                out.push_str(text);
                out.push('\n');
            }
        }
    }
    out
}

/// Render the current value of every documented option, then any unknown
/// options seen in the last pass.
pub fn render_current_values(
    registry: &Registry,
    exe_name: &str,
    unknown: &[UnknownOption],
) -> String {
    let mut out = format!("Current parameters for {exe_name}\n");

    let mut visited: HashSet<&str> = HashSet::new();
    for entry in registry.doc_entries() {
        let DocEntry::Option(name) = entry else {
            continue;
        };
        let Some(option) = registry.get(name) else {
            continue;
        };
        if !visited.insert(option.name()) {
            continue;
        }
        match option.value() {
            Some(value) if value == option.default_string() => {
                out.push_str(&format!("\t--{}: {value} (default)\n", option.name()));
            }
            Some(value) => out.push_str(&format!("\t--{}: {value}\n", option.name())),
            None => out.push_str(&format!(
                "\t--{}: [{}]\n",
                option.name(),
                option.default_string()
            )),
        }
    }

    if !unknown.is_empty() {
        out.push_str("\nUnknown parameters\n");
        for u in unknown {
            out.push_str(&format!(
                "\t{}: {}\n",
                u.flag,
                u.skipped_value.as_deref().unwrap_or_default()
            ));
        }
    }
    out
}

/// Serializable view of a parser after [`Parser::parse`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ValuesSnapshot {
    pub exe_name: String,
    pub options: Vec<OptionValue>,
    pub positionals: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unknown: Vec<UnknownOption>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct OptionValue {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,
    pub default_value: String,
    pub value: Option<String>,
}

impl Parser {
    pub fn usage(&self) -> String {
        render_usage(self.registry(), self.exe_name())
    }

    pub fn print_usage(&self, out: &mut impl Write) -> io::Result<()> {
        out.write_all(self.usage().as_bytes())
    }

    pub fn current_values(&self) -> String {
        render_current_values(self.registry(), self.exe_name(), self.unknown_options())
    }

    pub fn print_current_values(&self, out: &mut impl Write) -> io::Result<()> {
        out.write_all(self.current_values().as_bytes())
    }

    pub fn values_snapshot(&self) -> ValuesSnapshot {
        ValuesSnapshot {
            exe_name: self.exe_name().to_string(),
            options: self
                .registry()
                .options()
                .map(|o| OptionValue {
                    name: o.name().to_string(),
                    short: o.short_name().map(str::to_string),
                    default_value: o.default_string().to_string(),
                    value: o.value().map(str::to_string),
                })
                .collect(),
            positionals: self.args().to_vec(),
            unknown: self.unknown_options().to_vec(),
        }
    }

    pub fn values_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.values_snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_parser(args: &[&str]) -> Parser {
        let mut parser = Parser::new(args.iter().copied());
        parser.add_option(
            OptionInfo::new("mode")
                .short("m")
                .default_value("fast")
                .description("Execution mode")
                .enum_values(["fast", "safe"]),
        );
        parser.add_doc_string("Output:");
        parser.add_option(OptionInfo::new("out").description("Output file"));
        parser
    }

    #[test]
    fn usage_aligns_descriptions() {
        let mut parser = sample_parser(&["/bin/tool"]);
        parser.parse().unwrap();
        let text = parser.usage();

        // "--mode (-m) [fast]" is 18 wide, "--out []" is 8.
        assert_eq!(
            text,
            "Usage: tool [options]\n\
             \n\
             \t--mode (-m) [fast]  Execution mode  {fast | safe}\n\
             Output:\n\
             \t--out []            Output file\n"
        );
    }

    #[test]
    fn usage_caps_column_width() {
        let mut parser = Parser::new(["tool"]);
        parser.add_option(OptionInfo::new("a-very-long-option-name-indeed").default_value("x"));
        parser.add_option(OptionInfo::new("b").description("short one"));
        let text = parser.usage();

        let short_line = text.lines().find(|l| l.contains("--b")).unwrap();
        // 32 cap - 6 ("--b []") + 2
        assert_eq!(short_line, format!("\t--b []{}short one", " ".repeat(28)));
    }

    #[test]
    fn current_values_marks_defaults_and_unknowns() {
        let mut parser = sample_parser(&["tool", "--out", "a.txt", "--bogus", "1"]);
        parser.parse().unwrap();
        let text = parser.current_values();

        assert_eq!(
            text,
            "Current parameters for tool\n\
             \t--mode: fast (default)\n\
             \t--out: a.txt\n\
             \n\
             Unknown parameters\n\
             \t--bogus: 1\n"
        );
    }

    #[test]
    fn current_values_before_parse_shows_defaults_in_brackets() {
        let parser = sample_parser(&["tool"]);
        assert!(parser.current_values().contains("\t--mode: [fast]\n"));
    }

    #[test]
    fn json_snapshot_lists_values() {
        let mut parser = sample_parser(&["tool", "-m", "safe", "input"]);
        parser.parse().unwrap();

        let json: serde_json::Value = serde_json::from_str(&parser.values_json().unwrap()).unwrap();
        assert_eq!(json["exe-name"], "tool");
        assert_eq!(json["options"][0]["name"], "mode");
        assert_eq!(json["options"][0]["short"], "m");
        assert_eq!(json["options"][0]["value"], "safe");
        assert_eq!(json["positionals"][0], "input");
        assert!(json.get("unknown").is_none());
    }
}
