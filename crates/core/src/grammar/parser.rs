//! Markup parser: interprets a command stream into a [`Document`].
//!
//! This is a single-pass interpreter: commands mutate an explicit [`Pen`]
//! accumulator, and draw commands (field data, graphic box) materialize
//! elements from it. Parsing never fails; every malformed construct is
//! recovered with a fallback default or skipped, and flagged through
//! advisory diagnostics.

use super::scanner::{RawCommand, scan};
use crate::model::{Document, ElementPatch, ElementType};
use crate::pen::{Pen, positive_u32_param};
use label_designer_diagnostics::{Diagnostic, Span, codes};

/// Shorthand for building a `BTreeMap<String, String>` context from key-value pairs.
macro_rules! ctx {
    ($($k:expr => $v:expr),+ $(,)?) => {
        std::collections::BTreeMap::from([$(($k.into(), $v.into())),+])
    };
}

/// Result of parsing a markup input string.
#[derive(Debug, serde::Serialize)]
pub struct ParseResult {
    /// The interpreted document. Always present, even for garbage input.
    pub document: Document,
    /// Advisory diagnostics produced during parsing.
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse a markup input string into a document.
pub fn parse_str(input: &str) -> ParseResult {
    Interpreter::new(input).run()
}

// ── Interpreter ─────────────────────────────────────────────────────────

struct Interpreter<'a> {
    input: &'a str,
    doc: Document,
    pen: Pen,
    diags: Vec<Diagnostic>,
    /// Inside a comment (`FX`...`FS`): commands are inert.
    in_comment: bool,
    comment_start: usize,
    saw_start: bool,
    saw_end: bool,
}

impl<'a> Interpreter<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            doc: Document::default(),
            pen: Pen::default(),
            diags: Vec::new(),
            in_comment: false,
            comment_start: 0,
            saw_start: false,
            saw_end: false,
        }
    }

    fn run(mut self) -> ParseResult {
        let (leading, cmds) = scan(self.input);

        if leading > 0 {
            self.diags.push(Diagnostic::warn(
                codes::PARSER_STRAY_CONTENT,
                "content before the first command prefix is ignored",
                Some(Span::new(0, leading)),
            ));
        }

        for idx in 0..cmds.len() {
            self.interpret(&cmds, idx);
        }

        if self.in_comment {
            self.diags.push(Diagnostic::info(
                codes::PARSER_UNTERMINATED_COMMENT,
                "comment still open at end of input (missing ^FS)",
                Some(Span::new(self.comment_start, self.input.len())),
            ));
        }
        if !self.saw_start {
            self.diags.push(Diagnostic::info(
                codes::PARSER_MISSING_START,
                "no start-label marker (^XA)",
                Some(Span::empty(0)),
            ));
        }
        if !self.saw_end {
            self.diags.push(Diagnostic::info(
                codes::PARSER_MISSING_END,
                "no end-label marker (^XZ)",
                Some(Span::empty(self.input.len())),
            ));
        }
        if self.doc.is_empty() {
            self.diags.push(Diagnostic::info(
                codes::PARSER_EMPTY_DOCUMENT,
                "no draw commands produced an element",
                None,
            ));
        }

        ParseResult {
            document: self.doc,
            diagnostics: self.diags,
        }
    }

    fn interpret(&mut self, cmds: &[RawCommand<'a>], idx: usize) {
        let cmd = cmds[idx];
        let span = Span::new(cmd.start, cmd.end);

        if cmd.name.is_empty() {
            self.diags.push(Diagnostic::warn(
                codes::PARSER_EMPTY_COMMAND,
                "command prefix with no command name",
                Some(span),
            ));
            return;
        }

        // Comment mode swallows everything up to the next field separator,
        // including draw commands embedded in the comment text.
        if self.in_comment {
            if cmd.name == "FS" {
                self.in_comment = false;
            }
            return;
        }

        match cmd.name {
            "XA" => self.saw_start = true,
            "XZ" => self.saw_end = true,

            "FO" => self.pen.apply_origin(cmd.args),
            "A0" => self.pen.apply_font(cmd.args),
            "BY" => self.pen.apply_barcode_defaults(cmd.args),
            "BC" => self.pen.apply_barcode_type(cmd.args),
            "FB" => self.pen.apply_block(cmd.args),
            "FR" => self.pen.apply_invert(),

            // Graphic box materializes immediately from its own params; it
            // does not wait for field data.
            "GB" => {
                self.doc.create(
                    ElementType::Box,
                    self.pen.x,
                    self.pen.y,
                    ElementPatch {
                        width: positive_u32_param(cmd.args, 0),
                        height: positive_u32_param(cmd.args, 1),
                        thickness: positive_u32_param(cmd.args, 2),
                        ..ElementPatch::default()
                    },
                );
            }

            "FD" => self.field_data(cmds, idx),

            // Inert outside a field or comment.
            "FS" => {}

            "FX" => {
                self.in_comment = true;
                self.comment_start = cmd.start;
            }

            // Page size: applied in stream order, so the last occurrence wins.
            "PW" => {
                if let Some(w) = positive_u32_param(cmd.args, 0) {
                    self.doc.canvas_width = w;
                }
            }
            "LL" => {
                if let Some(h) = positive_u32_param(cmd.args, 0) {
                    self.doc.canvas_height = h;
                }
            }

            other => {
                self.diags.push(
                    Diagnostic::info(
                        codes::PARSER_UNKNOWN_COMMAND,
                        format!("unknown command ^{other} ignored"),
                        Some(span),
                    )
                    .with_context(ctx!("command" => format!("^{other}"))),
                );
            }
        }
    }

    /// Field data finalizes either a barcode (when armed by a barcode-type
    /// command) or a text element, consuming the pen state.
    fn field_data(&mut self, cmds: &[RawCommand<'a>], idx: usize) {
        let cmd = cmds[idx];
        let content = cmd.args.to_string();

        // Payload content cannot contain a literal prefix: the scanner has
        // already cut it at the next prefix. When that cut point is not the
        // field separator, the payload was truncated: flag, don't fix.
        let terminated = cmds.get(idx + 1).is_some_and(|next| next.name == "FS");
        if !terminated {
            self.diags.push(
                Diagnostic::warn(
                    codes::PARSER_UNTERMINATED_FIELD,
                    "field data not terminated by ^FS; payload truncated at the next command",
                    Some(Span::new(cmd.start, cmd.end)),
                )
                .with_context(ctx!("expected" => "^FS")),
            );
        }

        if self.pen.barcode_next {
            self.doc.create(
                ElementType::Barcode,
                self.pen.x,
                self.pen.y,
                ElementPatch {
                    content: Some(content),
                    module_height: Some(self.pen.barcode_height),
                    ..ElementPatch::default()
                },
            );
            self.pen.barcode_next = false;
        } else {
            self.doc.create(
                ElementType::Text,
                self.pen.x,
                self.pen.y,
                ElementPatch {
                    content: Some(content),
                    font_height: Some(self.pen.font_height),
                    font_width: Some(self.pen.font_width),
                    block_width: Some(self.pen.block_width),
                    align: Some(self.pen.align),
                    invert: Some(self.pen.invert),
                    ..ElementPatch::default()
                },
            );
        }
    }
}
