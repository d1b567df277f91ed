//! Minimal CLI: sample(s) → (TypeScript declarations | declaration dump)
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use json_tsdecl::{CodegenOptions, DedupeOptions, Deduped, Options};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer named type declarations from JSON samples and print them as TypeScript
#[derive(Parser, Debug)]
#[command(name = "json-tsdecl", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// infer and print TypeScript type declarations
    Types(TypesOut),
    /// infer and print the deduplicated declaration list as JSON (debug view)
    Decls(DeclsOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON); each line is a separate sample
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document; every result is a separate sample
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns or '-' for stdin
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct DedupeSettings {
    /// also rewrite references inside array declarations when merging duplicates
    #[arg(long)]
    rewrite_arrays: bool,
}

#[derive(clap::Parser, Debug)]
struct TypesOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    dedupe_settings: DedupeSettings,

    /// spaces before each object member
    #[arg(long, default_value_t = 2)]
    indent: usize,

    /// do not mark the first declaration with `export`
    #[arg(long)]
    no_export: bool,

    /// output .ts file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct DeclsOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    dedupe_settings: DedupeSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

/// One independent inference input.
#[derive(Debug)]
struct Sample {
    origin: String,
    value: Value,
}

#[derive(Serialize)]
struct DeclsReport<'a> {
    origin: &'a str,
    #[serde(flatten)]
    deduped: Deduped,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_samples(&self) -> Result<Vec<Sample>> {
        let mut samples = Vec::new();
        for source in resolve_sources(&self.input)? {
            let origin = source.display_name();
            let text = source.read()?;
            let parsed: Result<Vec<Value>> = if self.ndjson {
                crate::path_de::from_ndjson_with_path(&text)
            } else {
                crate::path_de::from_str_with_path(&text).map(|v| vec![v])
            };
            let documents = parsed.with_context(|| format!("failed to parse JSON source ({origin})"))?;

            for (i, document) in documents.into_iter().enumerate() {
                let origin = if self.ndjson { format!("{origin}:{}", i + 1) } else { origin.clone() };
                let document = self.select(document, &origin)?;
                match self.jq_expr.as_ref() {
                    None => samples.push(Sample { origin, value: document }),
                    Some(jq_expr) => {
                        let results = crate::jq_exec::run_jaq(jq_expr, &document)
                            .with_context(|| format!("failed to apply jq expression to {origin}"))?;
                        for (j, value) in results.into_iter().enumerate() {
                            samples.push(Sample { origin: format!("{origin}#{}", j + 1), value });
                        }
                    }
                }
            }
        }
        debug!(samples = samples.len(), "loaded samples");
        Ok(samples)
    }

    fn select(&self, document: Value, origin: &str) -> Result<Value> {
        match self.json_pointer.as_deref() {
            None => Ok(document),
            Some(pointer) => document
                .pointer(pointer)
                .cloned()
                .ok_or_else(|| anyhow!("JSON pointer {pointer} matched nothing in {origin}")),
        }
    }
}

impl DedupeSettings {
    fn options(&self) -> DedupeOptions {
        DedupeOptions { rewrite_arrays: self.rewrite_arrays }
    }
}

impl TypesOut {
    fn options(&self) -> Options {
        Options {
            codegen: CodegenOptions { indent: " ".repeat(self.indent), export: !self.no_export },
            dedupe: self.dedupe_settings.options(),
        }
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Types(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                let samples = target.input_settings.load_samples()?;
                if samples.is_empty() {
                    warn!("no samples to infer from");
                }
                let options = target.options();

                // each sample is its own run; naming contexts are not shared
                let rendered = samples
                    .par_iter()
                    .map(|sample| {
                        json_tsdecl::render_value_with(&sample.value, &options)
                            .with_context(|| format!("could not infer types for {}", sample.origin))
                    })
                    .collect::<Result<Vec<_>>>()?;
                info!(samples = rendered.len(), "rendered declarations");
                write_output(target.out.as_deref(), &rendered.join("\n"))
            }
            Command::Decls(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }
                let samples = target.input_settings.load_samples()?;
                let options = target.dedupe_settings.options();
                let reports = samples
                    .par_iter()
                    .map(|sample| {
                        json_tsdecl::declarations_for_value(&sample.value, options)
                            .map(|deduped| DeclsReport { origin: &sample.origin, deduped })
                            .with_context(|| format!("could not infer types for {}", sample.origin))
                    })
                    .collect::<Result<Vec<_>>>()?;
                let mut src = serde_json::to_string_pretty(&reports)?;
                src.push('\n');
                write_output(target.out.as_deref(), &src)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq)]
enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    fn display_name(&self) -> String {
        match self {
            Source::Stdin => "<stdin>".to_string(),
            Source::File(path) => path.to_string_lossy().to_string(),
        }
    }

    fn read(&self) -> Result<String> {
        match self {
            Source::Stdin => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf).context("failed to read stdin")?;
                Ok(buf)
            }
            Source::File(path) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read source file {}", path.display())),
        }
    }
}

fn write_output(out: Option<&Path>, src: &str) -> Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(out, src).with_context(|| format!("failed to write {}", out.display()))?;
            info!(path = %out.display(), "wrote declarations");
        }
        None => print!("{src}"),
    }
    Ok(())
}

fn resolve_sources<I>(patterns: I) -> Result<Vec<Source>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<Source>::new();
    let mut stdin_seen = false;

    for raw in patterns {
        let pattern = raw.as_ref();

        if pattern == "-" {
            if stdin_seen {
                bail!("stdin ('-') may only be given once");
            }
            stdin_seen = true;
            out.push(Source::Stdin);
        } else if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern).with_context(|| format!("invalid glob pattern: {pattern}"))? {
                out.push(Source::File(entry?));
                matched_any = true;
            }
            if !matched_any {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(Source::File(PathBuf::from(pattern)));
        }
    }

    Ok(out)
}
