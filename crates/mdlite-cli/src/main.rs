//! mdlite CLI - Render, inspect, and validate mdlite notes
//!
//! Usage:
//!   mdlite [OPTIONS] <COMMAND> [FILE]
//!
//! Commands:
//!   render    Render a note to HTML
//!   parse     Display the block structure
//!   validate  Report tolerated malformed input
//!   stats     Show document statistics
//!
//! `FILE` omitted or `-` reads standard input.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser as ClapParser, Subcommand};
use log::{debug, info, LevelFilter};
use mdlite_core::ast::{CodeBlock, List};
use mdlite_core::lexer::Lexer;
use mdlite_core::span::Span;
use mdlite_core::{Block, Diagnostic, Diagnostics, Document, ListKind, Parser, Profile, Renderer};
use serde::Serialize;

#[derive(Debug, ClapParser)]
#[command(name = "mdlite", version)]
#[command(about = "Render and inspect notes written in the mdlite dialect")]
struct Cli {
    /// Suppress warnings about tolerated input
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log level (error, warn, info, debug, trace); overrides RUST_LOG
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<LevelFilter>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render a note to HTML
    Render {
        #[command(flatten)]
        input: InputArgs,

        /// Escaping profile
        #[arg(short, long, default_value_t = Profile::Safe, value_name = "safe|compat")]
        profile: Profile,

        /// Write HTML here instead of standard output
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Display the block structure
    Parse {
        #[command(flatten)]
        input: InputArgs,

        /// Show every block's content
        #[arg(short, long)]
        verbose: bool,

        /// Output in JSON format
        #[arg(short, long)]
        json: bool,
    },
    /// Report tolerated malformed input; exits non-zero if there is any
    Validate {
        #[command(flatten)]
        input: InputArgs,

        /// Output in JSON format
        #[arg(short, long)]
        json: bool,
    },
    /// Show document statistics
    Stats {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Debug, Args)]
struct InputArgs {
    /// Input file, or `-` for standard input
    file: Option<PathBuf>,
}

impl InputArgs {
    fn read(&self) -> Result<String> {
        match self.file.as_deref() {
            None => read_stdin(),
            Some(path) if path == Path::new("-") => read_stdin(),
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("failed to read '{}'", path.display())),
        }
    }
}

fn read_stdin() -> Result<String> {
    io::read_to_string(io::stdin()).context("failed to read standard input")
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(e) = run(&cli) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn init_logging(cli: &Cli) {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(level) = cli.log_level {
        builder.filter_level(level);
    } else if cli.quiet {
        builder.filter_level(LevelFilter::Error);
    }
    builder.init();
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Render {
            input,
            profile,
            output,
        } => cmd_render(&input.read()?, *profile, output.as_deref(), cli.quiet),
        Command::Parse {
            input,
            verbose,
            json,
        } => cmd_parse(&input.read()?, *verbose, *json, cli.quiet),
        Command::Validate { input, json } => cmd_validate(&input.read()?, *json),
        Command::Stats { input } => cmd_stats(&input.read()?),
    }
}

// =============================================================================
// Render Command
// =============================================================================

fn cmd_render(input: &str, profile: Profile, output: Option<&Path>, quiet: bool) -> Result<()> {
    let result = Renderer::new(profile).render_with_diagnostics(input);
    info!(
        "rendered {} bytes to {} bytes of HTML ({} profile)",
        input.len(),
        result.html.len(),
        profile
    );
    if !quiet {
        print_warnings(input, &result.diagnostics);
    }

    match output {
        Some(path) => {
            let mut html = result.html;
            html.push('\n');
            fs::write(path, html)
                .with_context(|| format!("failed to write '{}'", path.display()))?;
            debug!("wrote {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", result.html).context("failed to write standard output")?;
        }
    }

    Ok(())
}

// =============================================================================
// Parse Command
// =============================================================================

fn cmd_parse(input: &str, verbose: bool, json: bool, quiet: bool) -> Result<()> {
    let result = Parser::new().parse(input);

    if !quiet {
        print_warnings(input, &result.diagnostics);
    }

    if json {
        let doc = convert_document(&result.document, input, &result.diagnostics);
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else if verbose {
        print_document_verbose(&result.document);
    } else {
        print_document_summary(&result.document);
    }

    Ok(())
}

// =============================================================================
// Validate Command
// =============================================================================

fn cmd_validate(input: &str, json: bool) -> Result<()> {
    let result = Parser::new().parse(input);
    let diagnostics = &result.diagnostics;

    if json {
        let report = JsonValidation {
            valid: diagnostics.is_empty(),
            diagnostics: diagnostics
                .iter()
                .map(|d| JsonDiagnostic::new(d, input))
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if diagnostics.is_empty() {
        println!("Valid: nothing tolerated");
    } else {
        eprintln!("Invalid: {} diagnostic(s) found", diagnostics.len());
        for diagnostic in diagnostics {
            eprintln!(
                "  - line {}: {}",
                line_number(input, diagnostic.span),
                diagnostic.kind
            );
        }
    }

    if !diagnostics.is_empty() {
        bail!("{} diagnostic(s) found", diagnostics.len());
    }
    Ok(())
}

// =============================================================================
// Stats Command
// =============================================================================

fn cmd_stats(input: &str) -> Result<()> {
    let result = Parser::new().parse(input);
    let stats = DocumentStats::from_document(&result.document, input);

    println!("Document Statistics");
    println!("-------------------");
    println!("Content:");
    println!("  Total blocks:   {}", stats.total_blocks);
    println!("  Headings:       {}", stats.headings);
    println!("  Paragraphs:     {}", stats.paragraphs);
    println!("  Lists:          {}", stats.lists);
    println!("  List items:     {}", stats.list_items);
    println!("  Code blocks:    {}", stats.code_blocks);
    println!();
    println!("Size:");
    println!("  Bytes:          {}", stats.bytes);
    println!("  Words (est.):   {}", stats.words);
    println!("  Lines:          {}", stats.lines);
    println!();
    println!("Diagnostics:    {}", result.diagnostics.len());

    Ok(())
}

#[derive(Debug, Default)]
struct DocumentStats {
    total_blocks: usize,
    headings: usize,
    paragraphs: usize,
    lists: usize,
    list_items: usize,
    code_blocks: usize,
    bytes: usize,
    words: usize,
    lines: usize,
}

impl DocumentStats {
    fn from_document(doc: &Document, input: &str) -> Self {
        let mut stats = Self {
            total_blocks: doc.blocks.len(),
            bytes: input.len(),
            words: input.split_whitespace().count(),
            lines: Lexer::new(input).count(),
            ..Self::default()
        };

        for block in &doc.blocks {
            match block {
                Block::Heading(_) => stats.headings += 1,
                Block::Paragraph(_) => stats.paragraphs += 1,
                Block::List(l) => {
                    stats.lists += 1;
                    stats.list_items += l.items.len();
                }
                Block::CodeBlock(_) => stats.code_blocks += 1,
            }
        }
        stats
    }
}

// =============================================================================
// Diagnostics
// =============================================================================

/// One-based line of the first byte of `span`.
fn line_number(input: &str, span: Span) -> usize {
    Lexer::new(input)
        .position(|line| span.start <= line.span.end)
        .map_or(1, |i| i + 1)
}

fn print_warnings(input: &str, diagnostics: &Diagnostics) {
    for diagnostic in diagnostics {
        eprintln!(
            "warning: line {}: {}",
            line_number(input, diagnostic.span),
            diagnostic.kind
        );
    }
}

// =============================================================================
// JSON Output
// =============================================================================

#[derive(Serialize)]
struct JsonDocument<'a> {
    span: JsonSpan,
    blocks: Vec<JsonBlock<'a>>,
    diagnostics: Vec<JsonDiagnostic>,
}

#[derive(Serialize)]
struct JsonValidation {
    valid: bool,
    diagnostics: Vec<JsonDiagnostic>,
}

#[derive(Serialize)]
struct JsonSpan {
    start: u32,
    end: u32,
}

impl From<Span> for JsonSpan {
    fn from(span: Span) -> Self {
        Self {
            start: span.start,
            end: span.end,
        }
    }
}

#[derive(Serialize)]
struct JsonDiagnostic {
    message: String,
    line: usize,
    span: JsonSpan,
}

impl JsonDiagnostic {
    fn new(diagnostic: &Diagnostic, input: &str) -> Self {
        Self {
            message: diagnostic.kind.to_string(),
            line: line_number(input, diagnostic.span),
            span: diagnostic.span.into(),
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "type")]
enum JsonBlock<'a> {
    Heading {
        level: u8,
        text: &'a str,
        span: JsonSpan,
    },
    Paragraph {
        lines: &'a [&'a str],
        span: JsonSpan,
    },
    List {
        kind: &'static str,
        items: Vec<&'a str>,
        span: JsonSpan,
    },
    CodeBlock {
        info: &'a str,
        content: String,
        closed: bool,
        span: JsonSpan,
    },
}

fn convert_document<'a>(
    doc: &'a Document,
    input: &str,
    diagnostics: &Diagnostics,
) -> JsonDocument<'a> {
    JsonDocument {
        span: doc.span.into(),
        blocks: doc.blocks.iter().map(convert_block).collect(),
        diagnostics: diagnostics
            .iter()
            .map(|d| JsonDiagnostic::new(d, input))
            .collect(),
    }
}

fn convert_block<'a>(block: &'a Block) -> JsonBlock<'a> {
    match block {
        Block::Heading(h) => JsonBlock::Heading {
            level: h.level,
            text: h.text,
            span: h.span.into(),
        },
        Block::Paragraph(p) => JsonBlock::Paragraph {
            lines: &p.lines,
            span: p.span.into(),
        },
        Block::List(l) => JsonBlock::List {
            kind: list_kind_name(l.kind),
            items: l.items.iter().map(|item| item.text).collect(),
            span: l.span.into(),
        },
        Block::CodeBlock(c) => JsonBlock::CodeBlock {
            info: c.info,
            content: c.content(),
            closed: c.closed,
            span: c.span.into(),
        },
    }
}

fn list_kind_name(kind: ListKind) -> &'static str {
    match kind {
        ListKind::Ordered => "ordered",
        ListKind::Unordered => "unordered",
    }
}

// =============================================================================
// Text Output
// =============================================================================

fn print_document_summary(doc: &Document) {
    println!("Blocks: {}", doc.blocks.len());
    for (i, block) in doc.blocks.iter().enumerate() {
        println!("  [{}] {}", i + 1, describe_block(block));
    }
}

fn print_document_verbose(doc: &Document) {
    println!("=== mdlite blocks ===");
    println!("Span: {}..{}", doc.span.start, doc.span.end);

    for (i, block) in doc.blocks.iter().enumerate() {
        println!();
        println!("[{}] {}", i + 1, describe_block(block));
        let span = block.span();
        println!("  Span: {}..{}", span.start, span.end);
        print_block_verbose(block);
    }
}

fn describe_block(block: &Block) -> String {
    match block {
        Block::Heading(h) => format!("Heading (level {})", h.level),
        Block::Paragraph(p) => format!("Paragraph ({} lines)", p.lines.len()),
        Block::List(l) => format!(
            "List ({}, {} items)",
            list_kind_name(l.kind),
            l.items.len()
        ),
        Block::CodeBlock(c) => describe_code_block(c),
    }
}

fn describe_code_block(code: &CodeBlock) -> String {
    let info = if code.info.is_empty() {
        "none"
    } else {
        code.info
    };
    let unclosed = if code.closed { "" } else { ", unclosed" };
    format!("CodeBlock (info: {}{})", info, unclosed)
}

fn print_block_verbose(block: &Block) {
    match block {
        Block::Heading(h) => println!("  Text: {}", h.text),
        Block::Paragraph(p) => {
            for line in &p.lines {
                println!("  | {}", line);
            }
        }
        Block::List(list) => print_list_items(list),
        Block::CodeBlock(c) => {
            let content = c.content();
            let preview: String = content.chars().take(60).collect();
            let ellipsis = if content.chars().count() > 60 {
                "..."
            } else {
                ""
            };
            println!("  Content: {}{}", preview.replace('\n', "\\n"), ellipsis);
        }
    }
}

fn print_list_items(list: &List) {
    for (i, item) in list.items.iter().enumerate() {
        match list.kind {
            ListKind::Ordered => println!("  {}. {}", i + 1, item.text),
            ListKind::Unordered => println!("  - {}", item.text),
        }
    }
}
