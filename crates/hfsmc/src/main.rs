//! The hfsm DSL compiler CLI.
//!
//! Provides the `hfsmc` command with the following subcommand:
//!
//! - `hfsmc build <file>` - Compile an hfsm source file to target code
//!
//! Options:
//! - `--flags key=value,key=value` - Opaque flags passed through to the code emitter
//! - `--output` - Output path for the generated source (stdout if omitted)
//! - `--pretty` - Render diagnostics with source-annotated `ariadne` output

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hfsmc", version, about = "The hfsm DSL compiler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile an hfsm source file to target code
    Build {
        /// Path to the .hfsm source file
        file: PathBuf,

        /// Comma-separated key=value flags, passed through opaquely to the emitter
        #[arg(long)]
        flags: Option<String>,

        /// Output path for the generated source (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Render diagnostics with source-annotated output
        #[arg(long)]
        pretty: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            file,
            flags,
            output,
            pretty,
        } => {
            if let Err(code) = build(&file, flags.as_deref(), output.as_deref(), pretty) {
                process::exit(code);
            }
        }
    }
}

/// Execute the build pipeline: read -> lex+parse -> analyze -> optimize -> generate -> emit.
/// Returns `Err(exit_code)` on any failure so `main` can exit non-zero without
/// unwinding through panics.
fn build(file: &Path, flags: Option<&str>, output: Option<&Path>, pretty: bool) -> Result<(), i32> {
    let source = std::fs::read_to_string(file).map_err(|e| {
        eprintln!("error: failed to read '{}': {}", file.display(), e);
        1
    })?;

    let syntax = hfsmc_parser::parse(&source);
    let ssm = hfsmc_semck::analyze(&syntax);

    let has_errors = report_diagnostics(&source, file, &syntax, &ssm, pretty);
    if has_errors {
        eprintln!("error: compilation failed due to errors above.");
        return Err(1);
    }

    let osm = hfsmc_codegen::optimize(&ssm).map_err(|e| {
        eprintln!("error: {e}");
        1
    })?;
    let ast = hfsmc_codegen::generate_nsc(&osm);
    let emitter_flags = parse_flags(flags);
    let generated = hfsmc_emit_java::emit(&ast, &emitter_flags);

    match output {
        Some(path) => {
            std::fs::write(path, generated).map_err(|e| {
                eprintln!("error: failed to write '{}': {}", path.display(), e);
                1
            })?;
        }
        None => print!("{generated}"),
    }

    Ok(())
}

/// Parses `key=value,key=value` into a flag map. Entries without a `=` are
/// recorded with an empty value; `spec.md` §6 treats these flags as opaque
/// to the core compiler, so no key is validated here.
fn parse_flags(flags: Option<&str>) -> hfsmc_emit_java::EmitterFlags {
    let mut map = hfsmc_emit_java::EmitterFlags::default();
    let Some(flags) = flags else {
        return map;
    };
    for entry in flags.split(',').filter(|e| !e.is_empty()) {
        match entry.split_once('=') {
            Some((k, v)) => {
                map.insert(k.to_string(), v.to_string());
            }
            None => {
                map.insert(entry.to_string(), String::new());
            }
        }
    }
    map
}

/// Reports syntax and semantic diagnostics. Returns true if there are any
/// errors (warnings alone do not fail the build).
fn report_diagnostics(
    source: &str,
    path: &Path,
    syntax: &hfsmc_parser::FsmSyntax,
    ssm: &hfsmc_semck::SemanticStateMachine,
    pretty: bool,
) -> bool {
    let has_errors = !syntax.errors.is_empty() || !ssm.errors.is_empty();

    if pretty {
        let line_starts = line_starts(source);
        for error in &syntax.errors {
            eprint_pretty(source, path, &line_starts, error.loc, &error.to_string());
        }
    } else {
        for error in &syntax.errors {
            eprint!("{error}");
        }
    }

    for error in &ssm.errors {
        eprintln!("error: {error}");
    }
    for warning in &ssm.warnings {
        eprintln!("warning: {warning}");
    }

    has_errors
}

/// Byte offset of the start of each line, for mapping a [`hfsmc_common::Loc`]
/// (1-based line, 0-based in-line char position) to a byte span `ariadne`
/// can annotate.
fn line_starts(source: &str) -> Vec<usize> {
    let mut starts = vec![0];
    for (i, b) in source.bytes().enumerate() {
        if b == b'\n' {
            starts.push(i + 1);
        }
    }
    starts
}

fn eprint_pretty(source: &str, _path: &Path, line_starts: &[usize], loc: hfsmc_common::Loc, message: &str) {
    use ariadne::{Label, Report, ReportKind, Source};

    if loc.line < 1 {
        eprintln!("{message}");
        return;
    }
    let line_idx = (loc.line - 1) as usize;
    let Some(&line_start) = line_starts.get(line_idx) else {
        eprintln!("{message}");
        return;
    };
    let start = line_start + loc.pos.max(0) as usize;
    let end = start + 1;
    let _ = Report::<std::ops::Range<usize>>::build(ReportKind::Error, start..end)
        .with_message(message)
        .with_label(Label::new(start..end).with_message(message))
        .finish()
        .eprint(Source::from(source));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_flags_splits_key_value_pairs() {
        let flags = parse_flags(Some("package=com.example,strict="));
        assert_eq!(flags.get("package"), Some(&"com.example".to_string()));
        assert_eq!(flags.get("strict"), Some(&String::new()));
    }

    #[test]
    fn parse_flags_handles_missing_value() {
        let flags = parse_flags(None);
        assert!(flags.is_empty());
    }

    #[test]
    fn build_writes_generated_source_to_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let src_path = dir.path().join("turnstile.hfsm");
        std::fs::write(&src_path, "fsm:f initial:i actions:a {i e i a1}").unwrap();
        let out_path = dir.path().join("Turnstile.java");

        let result = build(&src_path, None, Some(&out_path), false);
        assert!(result.is_ok());

        let generated = std::fs::read_to_string(&out_path).unwrap();
        assert!(generated.contains("public abstract class f implements a {"));
    }

    #[test]
    fn build_fails_on_semantic_errors() {
        let dir = tempfile::tempdir().unwrap();
        let src_path = dir.path().join("broken.hfsm");
        std::fs::write(&src_path, "{s e s *}").unwrap();

        let result = build(&src_path, None, None, false);
        assert_eq!(result, Err(1));
    }
}
