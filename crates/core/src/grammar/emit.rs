//! Markup emitter: converts a [`Document`] into markup text.
//!
//! Pure and deterministic: output depends only on the document passed in.
//! Elements are emitted in sequence order, one position command plus its
//! variant-specific commands each, between the start/end label markers.
//! Output is always well-formed given valid element fields; this direction
//! has no failure mode.

use crate::model::{Align, Document, Element, ElementKind};

// ── Configuration ───────────────────────────────────────────────────────

/// Whitespace layout for emitted markup. Layout is cosmetic only: both
/// styles parse to the same document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Header, one element per line, trailer. Readable default.
    #[default]
    Lines,
    /// No whitespace at all, the most compact wire form.
    Compact,
}

/// Configuration for the markup emitter.
#[derive(Debug, Clone, Default)]
pub struct EmitConfig {
    /// Whitespace layout.
    pub layout: Layout,
}

// ── Public API ──────────────────────────────────────────────────────────

/// Emit markup text from a document.
pub fn emit_markup(doc: &Document, config: &EmitConfig) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "^XA^PW{}^LL{}",
        doc.canvas_width, doc.canvas_height
    ));
    push_sep(&mut out, config);

    for el in doc.elements() {
        emit_element(&mut out, el);
        push_sep(&mut out, config);
    }

    out.push_str("^XZ");
    if config.layout == Layout::Lines {
        out.push('\n');
    }
    out
}

// ── Element emission ────────────────────────────────────────────────────

fn emit_element(out: &mut String, el: &Element) {
    out.push_str(&format!("^FO{},{}", el.x, el.y));

    match &el.kind {
        ElementKind::Text {
            content,
            font_height,
            font_width,
            block_width,
            align,
            invert,
            // Cosmetic only, no markup equivalent, deliberately dropped.
            bold: _,
        } => {
            out.push_str(&format!("^A0N,{font_height},{font_width}"));
            if *invert {
                out.push_str("^FR");
            }
            // A field block is only emitted when it changes something: a
            // real width or a non-default alignment.
            if *block_width > 0 || *align != Align::Left {
                out.push_str(&format!("^FB{},1,0,{},0", block_width, align.code()));
            }
            out.push_str(&format!("^FD{content}^FS"));
        }

        ElementKind::Barcode {
            content,
            module_height,
            // Display hint only; the barcode command has no width parameter.
            width: _,
        } => {
            out.push_str(&format!(
                "^BY3,2,{module_height}^BCN,{module_height},N,N,N^FD{content}^FS"
            ));
        }

        ElementKind::Box {
            width,
            height,
            thickness,
        } => {
            // Boxes terminate immediately; no field data follows.
            out.push_str(&format!("^GB{width},{height},{thickness},B,0^FS"));
        }
    }
}

fn push_sep(out: &mut String, config: &EmitConfig) {
    if config.layout == Layout::Lines {
        out.push('\n');
    }
}
