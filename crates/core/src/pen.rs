//! The parser's pen state.
//!
//! Markup commands mutate an implicit drawing context that later draw
//! commands consume. [`Pen`] captures that context as an explicit value
//! threaded through the parse loop, so the interpreter stays referentially
//! transparent and the transition rules are testable in isolation.

use crate::model::Align;

/// Running drawing context consumed by draw commands.
///
/// Two lifetimes of state coexist here: font size and barcode height are a
/// "current style" that persists across elements until explicitly changed,
/// while invert, block width, and alignment are position-scoped and reset
/// by every position command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pen {
    /// Current horizontal position in dots.
    pub x: i32,
    /// Current vertical position in dots.
    pub y: i32,
    /// Current font height in dots. Persists across elements.
    pub font_height: u32,
    /// Current font width in dots. Persists across elements.
    pub font_width: u32,
    /// Current barcode module height in dots. Persists across elements.
    pub barcode_height: u32,
    /// Block width for the next text field; 0 means "no block".
    pub block_width: u32,
    /// Alignment for the next text field.
    pub align: Align,
    /// Whether the next text field is drawn white-on-black.
    pub invert: bool,
    /// Set by a barcode-type command: the next field data is a barcode
    /// payload, not text.
    pub barcode_next: bool,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            font_height: 30,
            font_width: 30,
            barcode_height: 50,
            block_width: 0,
            align: Align::Left,
            invert: false,
            barcode_next: false,
        }
    }
}

impl Pen {
    /// Position command (`FO`): move the pen and reset the position-scoped
    /// state. Font size and barcode height deliberately persist.
    pub fn apply_origin(&mut self, args: &str) {
        self.x = parse_i32_param(args, 0).unwrap_or(0);
        self.y = parse_i32_param(args, 1).unwrap_or(0);
        self.invert = false;
        self.block_width = 0;
        self.align = Align::Left;
    }

    /// Font command (`A0`): params are orientation, height, width.
    /// Missing, malformed, or zero values fall back to the 30-dot default.
    pub fn apply_font(&mut self, args: &str) {
        self.font_height = positive_u32_param(args, 1).unwrap_or(30);
        self.font_width = positive_u32_param(args, 2).unwrap_or(30);
    }

    /// Barcode-defaults command (`BY`): the third param is the default
    /// module height. Only applied when present and numeric.
    pub fn apply_barcode_defaults(&mut self, args: &str) {
        if let Some(h) = positive_u32_param(args, 2) {
            self.barcode_height = h;
        }
    }

    /// Barcode-type command (`BC`): arms `barcode_next`; its own second
    /// param, when present, overrides the module height.
    pub fn apply_barcode_type(&mut self, args: &str) {
        self.barcode_next = true;
        if let Some(h) = positive_u32_param(args, 1) {
            self.barcode_height = h;
        }
    }

    /// Field-block command (`FB`): params are width, lines, line spacing,
    /// alignment, hanging indent. Only width and alignment are modeled.
    pub fn apply_block(&mut self, args: &str) {
        self.block_width = parse_u32_param(args, 0).unwrap_or(0);
        if let Some(c) = parse_char_param(args, 3) {
            self.align = Align::from_code(c);
        }
    }

    /// Invert-field command (`FR`).
    pub fn apply_invert(&mut self) {
        self.invert = true;
    }
}

// ── Parameter helpers ───────────────────────────────────────────────────
//
// Raw command arguments are a comma-separated list. Malformed values are
// recovered locally by the callers' fallback defaults, never surfaced.

fn param(args: &str, idx: usize) -> Option<&str> {
    args.split(',')
        .nth(idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

pub(crate) fn parse_i32_param(args: &str, idx: usize) -> Option<i32> {
    param(args, idx).and_then(|s| s.parse::<i32>().ok())
}

pub(crate) fn parse_u32_param(args: &str, idx: usize) -> Option<u32> {
    param(args, idx).and_then(|s| s.parse::<u32>().ok())
}

/// Like [`parse_u32_param`] but treats 0 as absent, matching the markup
/// convention that a zero size means "use the default".
pub(crate) fn positive_u32_param(args: &str, idx: usize) -> Option<u32> {
    parse_u32_param(args, idx).filter(|v| *v > 0)
}

pub(crate) fn parse_char_param(args: &str, idx: usize) -> Option<char> {
    param(args, idx).and_then(|s| s.chars().next())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_moves_and_resets_field_scope() {
        let mut pen = Pen {
            invert: true,
            block_width: 240,
            align: Align::Center,
            font_height: 48,
            ..Pen::default()
        };
        pen.apply_origin("120,45");
        assert_eq!((pen.x, pen.y), (120, 45));
        assert!(!pen.invert);
        assert_eq!(pen.block_width, 0);
        assert_eq!(pen.align, Align::Left);
        // current style persists
        assert_eq!(pen.font_height, 48);
    }

    #[test]
    fn origin_malformed_params_fall_back_to_zero() {
        let mut pen = Pen::default();
        pen.apply_origin("abc,");
        assert_eq!((pen.x, pen.y), (0, 0));
    }

    #[test]
    fn font_sets_height_and_width() {
        let mut pen = Pen::default();
        pen.apply_font("N,42,21");
        assert_eq!(pen.font_height, 42);
        assert_eq!(pen.font_width, 21);
    }

    #[test]
    fn font_zero_or_garbage_falls_back() {
        let mut pen = Pen::default();
        pen.apply_font("N,0,xyz");
        assert_eq!(pen.font_height, 30);
        assert_eq!(pen.font_width, 30);
    }

    #[test]
    fn barcode_defaults_partial_params() {
        let mut pen = Pen::default();
        pen.apply_barcode_defaults("3,2");
        assert_eq!(pen.barcode_height, 50, "no third param keeps default");
        pen.apply_barcode_defaults("3,2,80");
        assert_eq!(pen.barcode_height, 80);
    }

    #[test]
    fn barcode_type_arms_flag_and_overrides_height() {
        let mut pen = Pen::default();
        pen.apply_barcode_defaults("3,2,40");
        pen.apply_barcode_type("N,64,N,N,N");
        assert!(pen.barcode_next);
        assert_eq!(pen.barcode_height, 64);
    }

    #[test]
    fn barcode_type_without_height_keeps_current() {
        let mut pen = Pen::default();
        pen.apply_barcode_defaults("3,2,40");
        pen.apply_barcode_type("N");
        assert!(pen.barcode_next);
        assert_eq!(pen.barcode_height, 40);
    }

    #[test]
    fn block_sets_width_and_alignment() {
        let mut pen = Pen::default();
        pen.apply_block("400,1,0,C,0");
        assert_eq!(pen.block_width, 400);
        assert_eq!(pen.align, Align::Center);
    }

    #[test]
    fn block_without_alignment_keeps_current() {
        let mut pen = Pen::default();
        pen.apply_block("250");
        assert_eq!(pen.block_width, 250);
        assert_eq!(pen.align, Align::Left);
    }

    #[test]
    fn block_unknown_alignment_coerces_to_left() {
        let mut pen = Pen::default();
        pen.apply_block("100,1,0,Q,0");
        assert_eq!(pen.align, Align::Left);
    }
}
