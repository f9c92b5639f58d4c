use cascade_args::{OptionInfo, Parser, Reveal, find_best_match};

pub const MODES: [&str; 2] = ["basic", "advanced"];

/// Register the options available before anything is revealed.
pub fn register(parser: &mut Parser) {
    parser.add_option(
        OptionInfo::new("help")
            .short("h")
            .default_value("false")
            .description("Show this help"),
    );
    parser.add_option(
        OptionInfo::new("mode")
            .short("m")
            .default_value("basic")
            .description("Feature set; 'advanced' unlocks more options")
            .enum_values(MODES)
            .on_set(|value| {
                let known = find_best_match(value, &MODES).is_some();
                if !known {
                    tracing::warn!(value, "unknown mode, keeping previous value");
                }
                known
            })
            .on_unlock(reveal_advanced),
    );
    parser.add_option(
        OptionInfo::new("print-values")
            .short("p")
            .default_value("false")
            .description("Print the value of every option after parsing"),
    );
    parser.add_option(
        OptionInfo::new("json")
            .default_value("false")
            .description("Print option values as JSON"),
    );
    parser.add_option(
        OptionInfo::new("strict")
            .default_value("false")
            .description("Fail when unknown options are given"),
    );
}

fn reveal_advanced(value: &str, reveal: &mut Reveal<'_>) -> bool {
    if find_best_match(value, &MODES) != Some("advanced") {
        return false;
    }

    reveal.add_doc_string("");
    reveal.add_doc_string("Advanced options:");
    reveal.add_option(
        OptionInfo::new("level")
            .short("l")
            .default_value("1")
            .description("Optimization level (1-9)")
            .on_set(|value| {
                let ok = matches!(value.parse::<u8>(), Ok(1..=9));
                if !ok {
                    tracing::warn!(value, "level must be between 1 and 9");
                }
                ok
            }),
    );
    reveal.add_option(
        OptionInfo::new("trace")
            .short("t")
            .default_value("false")
            .description("Record a trace; unlocks --trace-file")
            .on_unlock(reveal_trace),
    );
    true
}

fn reveal_trace(value: &str, reveal: &mut Reveal<'_>) -> bool {
    if value != "true" || reveal.has_option("trace-file") {
        return false;
    }
    reveal.add_option(
        OptionInfo::new("trace-file")
            .default_value("trace.log")
            .description("Where to write the trace"),
    );
    true
}
