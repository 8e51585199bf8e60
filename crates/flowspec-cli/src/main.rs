//! flowspec CLI
//!
//! A thin wrapper around the flowspec library: parse one specification and
//! print it back in canonical form, or dump its syntax tree.

use std::io::Read;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use flowspec::{EmptyCall, EntryPoint, GenerateOptions};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Rule {
    Literal,
    Argument,
    Source,
    Sink,
}

impl From<Rule> for EntryPoint {
    fn from(rule: Rule) -> Self {
        match rule {
            Rule::Literal => EntryPoint::Literal,
            Rule::Argument => EntryPoint::Argument,
            Rule::Source => EntryPoint::Source,
            Rule::Sink => EntryPoint::Sink,
        }
    }
}

#[derive(Parser)]
#[command(name = "flowspec")]
#[command(about = "Parse and canonicalize event pipeline specifications")]
#[command(after_help = "\
EXAMPLES:
    # Canonical spacing for a sink
    flowspec '{flakey(.90)=>null}'
    # => { flakey( .90 ) => null }

    # Dump the syntax tree of a source as JSON
    flowspec --rule source --ast 'text( \"/tmp/file\" )'

    # Fail when stored text is not canonical
    echo '[ a, b ]' | flowspec --check
")]
struct Args {
    /// Specification text. Read from stdin when omitted.
    text: Option<String>,

    /// Grammar rule to parse the text with
    #[arg(short, long, value_enum, default_value = "sink")]
    rule: Rule,

    /// Print the syntax tree as JSON instead of canonical text
    #[arg(long, conflicts_with = "check")]
    ast: bool,

    /// Exit with an error when the input is not already canonical
    #[arg(long)]
    check: bool,

    /// Write zero-argument calls as `name( )` instead of `name()`
    #[arg(long)]
    spaced_empty_calls: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let text = match args.text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read specification from stdin")?;
            buf.trim_end_matches(['\r', '\n']).to_string()
        }
    };

    let entry = EntryPoint::from(args.rule);
    let options = GenerateOptions {
        empty_call: if args.spaced_empty_calls {
            EmptyCall::Spaced
        } else {
            EmptyCall::Tight
        },
    };
    log::debug!("parsing {} bytes as {}", text.len(), entry);

    if args.ast {
        println!("{}", dump_ast(entry, &text)?);
        return Ok(());
    }

    let canonical = flowspec::canonicalize(entry, &text, options)?;
    if args.check && canonical != text {
        log::warn!("input differs from canonical form");
        anyhow::bail!("not canonical; expected: {}", canonical);
    }
    println!("{}", canonical);

    Ok(())
}

fn dump_ast(entry: EntryPoint, text: &str) -> anyhow::Result<String> {
    let json = match entry {
        EntryPoint::Literal => serde_json::to_string_pretty(&flowspec::parse_literal(text)?)?,
        EntryPoint::Argument => serde_json::to_string_pretty(&flowspec::parse_argument(text)?)?,
        EntryPoint::Source => serde_json::to_string_pretty(&flowspec::parse_source(text)?)?,
        EntryPoint::Sink => serde_json::to_string_pretty(&flowspec::parse_sink(text)?)?,
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_to_sink_rule() {
        let args = Args::try_parse_from(["flowspec", "null"]).unwrap();
        assert!(matches!(args.rule, Rule::Sink));
        assert_eq!(args.text.as_deref(), Some("null"));
    }

    #[test]
    fn ast_and_check_conflict() {
        assert!(Args::try_parse_from(["flowspec", "--ast", "--check", "null"]).is_err());
    }

    #[test]
    fn dump_ast_as_json() {
        let json = dump_ast(EntryPoint::Source, "twitter").unwrap();
        assert!(json.contains("twitter"), "{json}");
        assert!(dump_ast(EntryPoint::Sink, "[ a").is_err());
    }

    #[test]
    fn generator_matches_options() {
        let generator = flowspec::Generator::new(GenerateOptions {
            empty_call: EmptyCall::Spaced,
        });
        let sink = flowspec::parse_sink("console()").unwrap();
        assert_eq!(generator.sink(&sink), "console( )");
    }
}
