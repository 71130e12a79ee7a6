mod render;

use std::fs;
use std::io::Read;
use std::process;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use label_designer_core::{EmitConfig, Layout, emit_markup, from_json, parse_str, to_pretty_json};
use label_designer_diagnostics::{self as diag, Diagnostic, Severity};
use label_designer_preview::{HttpTransport, PreviewConfig, render_once};

use crate::render::{Format, print_summary, render_diagnostics};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "label-designer",
    version,
    about = "Label designer toolchain: convert between label documents and ZPL-style markup"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Parse a markup file and print the document as JSON.
    Parse {
        /// Markup file, or "-" for stdin.
        file: String,
    },

    /// Generate markup from a JSON document file.
    Generate {
        /// JSON document file, or "-" for stdin.
        file: String,
        /// Whitespace layout of the generated markup.
        #[arg(long, value_enum, default_value_t = LayoutStyle::Lines)]
        layout: LayoutStyle,
    },

    /// Format a markup file (parse, then re-emit canonical markup).
    Format {
        /// Markup file, or "-" for stdin.
        file: String,
        /// Write formatted output back to the file (in-place).
        #[arg(long, short, conflicts_with = "check")]
        write: bool,
        /// Check if the file is already formatted (exit 1 if not). For CI.
        #[arg(long, conflicts_with = "write")]
        check: bool,
        /// Whitespace layout of the formatted markup.
        #[arg(long, value_enum, default_value_t = LayoutStyle::Lines)]
        layout: LayoutStyle,
    },

    /// Fetch a rendered preview image for a markup file.
    Preview {
        /// Markup file, or "-" for stdin.
        file: String,
        /// Where to write the PNG image.
        #[arg(long)]
        out: String,
        /// Override the rendering service base URL.
        #[arg(long)]
        endpoint: Option<String>,
        /// Override the print density in dots per millimeter.
        #[arg(long)]
        dpmm: Option<u32>,
    },

    /// Explain a diagnostic ID (e.g. LBL1001).
    Explain { id: String },
}

/// Whitespace layout for generated markup.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum LayoutStyle {
    /// Header, one element per line, trailer.
    Lines,
    /// No whitespace at all.
    Compact,
}

impl From<LayoutStyle> for Layout {
    fn from(s: LayoutStyle) -> Self {
        match s {
            LayoutStyle::Lines => Layout::Lines,
            LayoutStyle::Compact => Layout::Compact,
        }
    }
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    let format = Format::resolve_or_detect(cli.output.as_deref());

    match cli.cmd {
        Cmd::Parse { file } => cmd_parse(&file, format)?,
        Cmd::Generate { file, layout } => cmd_generate(&file, layout, format)?,
        Cmd::Format {
            file,
            write,
            check,
            layout,
        } => cmd_format(&file, write, check, layout, format)?,
        Cmd::Preview {
            file,
            out,
            endpoint,
            dpmm,
        } => cmd_preview(&file, &out, endpoint, dpmm, format)?,
        Cmd::Explain { id } => cmd_explain(&id, format)?,
    }

    Ok(())
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_parse(file: &str, format: Format) -> Result<()> {
    let input = read_input(file)?;
    let res = parse_str(&input);

    match format {
        Format::Json => {
            // Single valid JSON object to stdout.
            let out = serde_json::json!({
                "document": res.document,
                "diagnostics": res.diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            // Document to stdout, diagnostics to stderr.
            println!("{}", to_pretty_json(&res.document));
            if !res.diagnostics.is_empty() {
                render_diagnostics(&input, file, &res.diagnostics, format);
                print_summary(&res.diagnostics);
            }
        }
    }

    exit_on_errors(&res.diagnostics);
    Ok(())
}

fn cmd_generate(file: &str, layout: LayoutStyle, _format: Format) -> Result<()> {
    let input = read_input(file)?;
    let doc = from_json(&input).with_context(|| format!("invalid document JSON in '{file}'"))?;

    let config = EmitConfig {
        layout: layout.into(),
    };
    print!("{}", emit_markup(&doc, &config));
    Ok(())
}

fn cmd_format(
    file: &str,
    write: bool,
    check: bool,
    layout: LayoutStyle,
    format: Format,
) -> Result<()> {
    if write && file == "-" {
        bail!("--write requires a file path, not stdin");
    }

    let input = read_input(file)?;
    let res = parse_str(&input);

    // Surface parse diagnostics so the user knows if the input has issues.
    if !res.diagnostics.is_empty() {
        render_diagnostics(&input, file, &res.diagnostics, format);
        print_summary(&res.diagnostics);
    }

    let config = EmitConfig {
        layout: layout.into(),
    };
    let formatted = emit_markup(&res.document, &config);

    let already_formatted = formatted == input;

    if check {
        status_message(
            format,
            already_formatted,
            "already formatted",
            "not formatted",
            file,
        );
        if !already_formatted {
            process::exit(1);
        }
    } else if write {
        if !already_formatted {
            fs::write(file, &formatted)?;
        }
        status_message(
            format,
            !already_formatted,
            "formatted",
            "already formatted",
            file,
        );
    } else {
        // Default: print formatted output to stdout.
        print!("{formatted}");
    }

    Ok(())
}

fn cmd_preview(
    file: &str,
    out: &str,
    endpoint: Option<String>,
    dpmm: Option<u32>,
    format: Format,
) -> Result<()> {
    let input = read_input(file)?;
    let res = parse_str(&input);

    if !res.diagnostics.is_empty() {
        render_diagnostics(&input, file, &res.diagnostics, format);
        print_summary(&res.diagnostics);
    }

    let mut config = PreviewConfig::default();
    if let Some(endpoint) = endpoint {
        config.endpoint = endpoint;
    }
    if let Some(dpmm) = dpmm {
        config.dpmm = dpmm;
    }

    // The service renders the canonical markup, not the raw input, so the
    // image always matches what `format` would produce.
    let markup = emit_markup(&res.document, &EmitConfig::default());
    let transport = HttpTransport::new(&config)?;
    let image = render_once(
        &config,
        &transport,
        &markup,
        res.document.canvas_width,
        res.document.canvas_height,
    )
    .with_context(|| format!("preview fetch for '{file}' failed"))?;

    fs::write(out, &image).with_context(|| format!("failed to write preview to '{out}'"))?;

    match format {
        Format::Json => {
            let summary = serde_json::json!({
                "status": "written",
                "file": out,
                "bytes": image.len(),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Format::Pretty => {
            eprintln!("preview written: {} ({} bytes)", out, image.len());
        }
    }

    exit_on_errors(&res.diagnostics);
    Ok(())
}

fn cmd_explain(id: &str, format: Format) -> Result<()> {
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "id": id,
                "explanation": diag::explain(id),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            // Explanation is the expected output, so stdout rather than stderr.
            if let Some(text) = diag::explain(id) {
                use ariadne::Fmt;
                println!("{}: {}", id.fg(ariadne::Color::Cyan), text);
            } else {
                println!("{id}: (no explanation available)");
            }
        }
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// Read the named file, or stdin when the name is "-".
fn read_input(file: &str) -> Result<String> {
    if file == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(file).with_context(|| format!("failed to read '{file}'"))
    }
}

/// Emit a status message for --check / --write in the appropriate format.
fn status_message(format: Format, condition: bool, if_true: &str, if_false: &str, file: &str) {
    let msg = if condition { if_true } else { if_false };
    match format {
        Format::Json => {
            let out = serde_json::json!({ "status": msg, "file": file });
            println!(
                "{}",
                serde_json::to_string_pretty(&out).expect("status JSON serialization cannot fail")
            );
        }
        Format::Pretty => {
            eprintln!("{msg}: {file}");
        }
    }
}

/// Exit with code 1 if any diagnostic is an error.
/// Warnings and info do not cause a non-zero exit.
fn exit_on_errors(diagnostics: &[Diagnostic]) {
    if diagnostics
        .iter()
        .any(|d| matches!(d.severity, Severity::Error))
    {
        process::exit(1);
    }
}
