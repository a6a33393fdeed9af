//! brace: parse brace source files and print their syntax trees.
//!
//! Usage:
//!   brace [options] FILE...
//!
//! Each file is printed in canonical form, or as a JSON tree with `--json`.
//! Set `RUST_LOG=brace_parser=debug` to trace the parser.

use brace_ast::TextDescription;
use brace_core::{LineMap, ParseArena};
use brace_diagnostics::{Diagnostic, ParseError};
use brace_parser::{ParseOptions, Parser, DEFAULT_MAX_RECURSION_DEPTH};
use bumpalo::Bump;
use clap::Parser as ClapParser;
use miette::{miette, IntoDiagnostic, LabeledSpan, NamedSource, Report};
use std::process;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(ClapParser, Debug)]
#[command(name = "brace", about = "Parse brace source files and print their syntax trees", version)]
struct Cli {
    /// Source files to parse.
    #[arg(value_name = "FILE", required = true)]
    files: Vec<String>,

    /// Parse each file as a single expression.
    #[arg(short = 'e', long)]
    expression: bool,

    /// Print the tree as JSON, ranges included.
    #[arg(long)]
    json: bool,

    /// List the comments found in each file.
    #[arg(long, conflicts_with = "expression")]
    comments: bool,

    /// Deepest nesting accepted before the parse fails.
    #[arg(long = "max-depth", value_name = "N", default_value_t = DEFAULT_MAX_RECURSION_DEPTH)]
    max_depth: u32,

    /// Treat a leading `#!` line as ordinary input.
    #[arg(long = "no-shebang")]
    no_shebang: bool,
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let options = ParseOptions::default()
        .with_max_recursion_depth(cli.max_depth)
        .with_shebang(!cli.no_shebang);

    let mut arena = ParseArena::new();
    let mut failures = 0usize;
    for file in &cli.files {
        if let Err(report) = run_file(&cli, options, arena.bump(), file) {
            eprintln!("{report:?}");
            failures += 1;
        }
        debug!(file = %file, bytes = arena.allocated_bytes(), "arena usage");
        arena.reset();
    }

    if failures > 0 {
        eprintln!(
            "\nFound {} error{}.",
            failures,
            if failures == 1 { "" } else { "s" }
        );
        process::exit(1);
    }
}

/// `RUST_LOG` overrides the default `warn` filter.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run_file(cli: &Cli, options: ParseOptions, arena: &Bump, file: &str) -> Result<(), Report> {
    let source =
        std::fs::read_to_string(file).map_err(|err| miette!("cannot read '{file}': {err}"))?;
    info!(file = %file, bytes = source.len(), "parsing");

    let parser = Parser::with_options(arena, file, &source, options);
    if cli.expression {
        let expression = parser
            .parse_standalone_expression()
            .map_err(|err| error_report(file, &source, err))?;
        if cli.json {
            println!("{}", serde_json::to_string_pretty(expression).into_diagnostic()?);
        } else {
            println!("{}", expression.text_description());
        }
        return Ok(());
    }

    let unit = parser
        .parse_top_level_declaration()
        .map_err(|err| error_report(file, &source, err))?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&unit).into_diagnostic()?);
    } else {
        println!("{}", unit.text_description());
    }
    if cli.comments {
        for comment in unit.sorted_comments() {
            println!("// {}: {}", comment.location, comment.content.escape_debug());
        }
    }
    Ok(())
}

/// Render a parse error with the offending source line.
fn error_report(file: &str, source: &str, error: ParseError) -> Report {
    let diagnostic = Diagnostic::from_parse_error(file, &error);
    debug!(%diagnostic, "parse failed");

    let offset = LineMap::new(source).offset_of(error.location()) as usize;
    miette!(
        code = format!("BR{}", diagnostic.code),
        labels = vec![LabeledSpan::at_offset(offset, "here")],
        "{}",
        diagnostic.message_text
    )
    .with_source_code(NamedSource::new(file, source.to_string()))
}
