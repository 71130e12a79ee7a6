//! The label element model.
//!
//! A [`Document`] owns an ordered sequence of [`Element`]s plus the canvas
//! size. Sequence order is creation order and determines both emission order
//! in generated markup and paint order when elements overlap (later = on
//! top); it carries no other meaning.
//!
//! All mutating operations are infallible: malformed overrides are coerced
//! to defaults, and operations on unknown ids are documented no-ops.

use serde::{Deserialize, Serialize};

// ── Defaults ────────────────────────────────────────────────────────────

/// Default canvas width in dots, used until a page-width command is seen.
pub const DEFAULT_CANVAS_WIDTH: u32 = 800;
/// Default canvas height in dots.
pub const DEFAULT_CANVAS_HEIGHT: u32 = 600;
/// Default font height and width for new text elements.
pub const DEFAULT_FONT_SIZE: u32 = 30;
/// Default module height for new barcode elements.
pub const DEFAULT_BARCODE_HEIGHT: u32 = 30;
/// Default side length for new box elements with no caller-supplied size.
pub const DEFAULT_BOX_SIDE: u32 = 100;
/// Default border thickness for new box elements.
pub const DEFAULT_BOX_THICKNESS: u32 = 1;
/// Default content for new text elements.
pub const DEFAULT_TEXT_CONTENT: &str = "Text";
/// Default payload for new barcode elements.
pub const DEFAULT_BARCODE_CONTENT: &str = "123";

/// Smallest allowed value for size-like fields (font size, box dimensions,
/// thickness, module height). `block_width` is exempt: 0 means "no block".
pub const MIN_DIMENSION: u32 = 1;

fn clamp_dim(v: u32) -> u32 {
    v.max(MIN_DIMENSION)
}

// ── Identity ────────────────────────────────────────────────────────────

/// Opaque element identifier. Assigned at creation, never reused, never
/// mutated. Only useful for lookups back into the owning [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(u64);

impl ElementId {
    /// The raw numeric value, for display purposes.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Alignment ───────────────────────────────────────────────────────────

/// Text block alignment. Serialized with the single-letter markup codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Align {
    /// Left-aligned (the markup default).
    #[default]
    #[serde(rename = "L")]
    Left,
    /// Centered.
    #[serde(rename = "C")]
    Center,
    /// Right-aligned.
    #[serde(rename = "R")]
    Right,
    /// Justified.
    #[serde(rename = "J")]
    Justified,
}

impl Align {
    /// The single-letter code used in block-format commands.
    pub fn code(self) -> char {
        match self {
            Align::Left => 'L',
            Align::Center => 'C',
            Align::Right => 'R',
            Align::Justified => 'J',
        }
    }

    /// Parse an alignment code. Unrecognized input coerces to the default.
    pub fn from_code(c: char) -> Align {
        match c.to_ascii_uppercase() {
            'C' => Align::Center,
            'R' => Align::Right,
            'J' => Align::Justified,
            _ => Align::Left,
        }
    }
}

// ── Elements ────────────────────────────────────────────────────────────

/// One of the three element variants. Exactly one variant per element; the
/// tag determines which fields are meaningful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    /// A text field.
    Text {
        /// The rendered string.
        content: String,
        /// Font height in dots.
        font_height: u32,
        /// Font width in dots. Independently scalable from height; the
        /// markup allows non-uniform font scaling.
        font_width: u32,
        /// Block/paragraph width in dots; 0 means "no block, auto width".
        block_width: u32,
        /// Block alignment.
        align: Align,
        /// Draw white-on-black (field-reverse).
        invert: bool,
        /// Cosmetic bold for on-screen rendering only. Has no markup
        /// equivalent and is never emitted by the generator.
        bold: bool,
    },
    /// A Code 128-style barcode field.
    Barcode {
        /// Encoded payload.
        content: String,
        /// Bar (module) height in dots. Plays the role font height plays
        /// for text.
        module_height: u32,
        /// On-screen display width hint. Advisory only: it is not a
        /// parameter of the emitted barcode command, so it does not
        /// round-trip through markup.
        width: u32,
    },
    /// A rectangular box outline.
    Box {
        /// Outer width in dots.
        width: u32,
        /// Outer height in dots.
        height: u32,
        /// Border thickness in dots.
        thickness: u32,
    },
}

/// A placed element: identity, position, and variant data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique identifier within the owning document.
    pub id: ElementId,
    /// Horizontal position in dots, top-left origin.
    pub x: i32,
    /// Vertical position in dots, top-left origin.
    pub y: i32,
    /// Variant payload.
    #[serde(flatten)]
    pub kind: ElementKind,
}

/// Discriminant used when creating elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    /// Text field.
    Text,
    /// Barcode field.
    Barcode,
    /// Box outline.
    Box,
}

/// Partial element fields, used both as creation overrides and as update
/// patches. Every field is optional; fields that do not apply to the
/// target element's variant are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementPatch {
    /// New horizontal position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    /// New vertical position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
    /// Text or barcode payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Text font height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_height: Option<u32>,
    /// Text font width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_width: Option<u32>,
    /// Text block width (0 clears the block).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_width: Option<u32>,
    /// Text block alignment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<Align>,
    /// Text invert flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invert: Option<bool>,
    /// Text cosmetic bold flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    /// Barcode module height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_height: Option<u32>,
    /// Box or barcode-hint width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Box height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Box border thickness.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness: Option<u32>,
}

// ── Document ────────────────────────────────────────────────────────────

/// A label document: canvas size plus the owned, ordered element sequence.
///
/// The document exclusively owns its elements; outside code refers to them
/// only by [`ElementId`]. Not designed for concurrent mutation; callers
/// must serialize access (the designer is single-threaded by contract).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Print-area width in dots.
    pub canvas_width: u32,
    /// Print-area height in dots.
    pub canvas_height: u32,
    elements: Vec<Element>,
    next_id: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }
}

impl Document {
    /// Create an empty document with the given canvas size.
    pub fn new(canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            canvas_width,
            canvas_height,
            elements: Vec::new(),
            next_id: 1,
        }
    }

    /// The elements in sequence (= paint and emission) order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Consume the document, yielding its elements.
    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }

    /// Look up an element by id.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the document has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Create a new element of the given type at `(x, y)`.
    ///
    /// Type-specific defaults are merged under the caller's `overrides`,
    /// size-like values are clamped to [`MIN_DIMENSION`], and the element is
    /// appended to the end of the sequence with a fresh id. Never fails.
    pub fn create(&mut self, ty: ElementType, x: i32, y: i32, overrides: ElementPatch) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;

        let kind = match ty {
            ElementType::Text => ElementKind::Text {
                content: overrides
                    .content
                    .unwrap_or_else(|| DEFAULT_TEXT_CONTENT.to_string()),
                font_height: clamp_dim(overrides.font_height.unwrap_or(DEFAULT_FONT_SIZE)),
                font_width: clamp_dim(overrides.font_width.unwrap_or(DEFAULT_FONT_SIZE)),
                block_width: overrides.block_width.unwrap_or(0),
                align: overrides.align.unwrap_or_default(),
                invert: overrides.invert.unwrap_or(false),
                bold: overrides.bold.unwrap_or(false),
            },
            ElementType::Barcode => ElementKind::Barcode {
                content: overrides
                    .content
                    .unwrap_or_else(|| DEFAULT_BARCODE_CONTENT.to_string()),
                module_height: clamp_dim(overrides.module_height.unwrap_or(DEFAULT_BARCODE_HEIGHT)),
                width: overrides.width.unwrap_or(0),
            },
            // A zero width/height from the caller means "unspecified", not
            // "zero-sized box".
            ElementType::Box => ElementKind::Box {
                width: match overrides.width {
                    Some(w) if w > 0 => w,
                    _ => DEFAULT_BOX_SIDE,
                },
                height: match overrides.height {
                    Some(h) if h > 0 => h,
                    _ => DEFAULT_BOX_SIDE,
                },
                thickness: clamp_dim(overrides.thickness.unwrap_or(DEFAULT_BOX_THICKNESS)),
            },
        };

        self.elements.push(Element { id, x, y, kind });
        id
    }

    /// Apply a partial update to the element with the given id.
    ///
    /// Fields in the patch that are not meaningful for the element's variant
    /// are ignored. Returns `false` (an explicit no-op, not an error) when
    /// the id is unknown.
    pub fn update(&mut self, id: ElementId, patch: &ElementPatch) -> bool {
        let Some(el) = self.elements.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        el.apply(patch);
        true
    }

    /// Remove the element with the given id.
    ///
    /// Returns `false` (a no-op, not an error) when the id is unknown.
    pub fn remove(&mut self, id: ElementId) -> bool {
        let before = self.elements.len();
        self.elements.retain(|e| e.id != id);
        self.elements.len() != before
    }

    /// Atomically replace the entire document contents.
    ///
    /// Used by the parser to swap in a freshly interpreted element list.
    /// The id counter advances past the largest incoming id so future
    /// creations stay unique.
    pub fn replace_all(&mut self, elements: Vec<Element>, canvas_width: u32, canvas_height: u32) {
        self.canvas_width = canvas_width;
        self.canvas_height = canvas_height;
        self.next_id = elements
            .iter()
            .map(|e| e.id.0 + 1)
            .max()
            .unwrap_or(1)
            .max(self.next_id);
        self.elements = elements;
    }
}

impl Element {
    fn apply(&mut self, patch: &ElementPatch) {
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        match &mut self.kind {
            ElementKind::Text {
                content,
                font_height,
                font_width,
                block_width,
                align,
                invert,
                bold,
            } => {
                if let Some(c) = &patch.content {
                    *content = c.clone();
                }
                if let Some(v) = patch.font_height {
                    *font_height = clamp_dim(v);
                }
                if let Some(v) = patch.font_width {
                    *font_width = clamp_dim(v);
                }
                if let Some(v) = patch.block_width {
                    *block_width = v;
                }
                if let Some(v) = patch.align {
                    *align = v;
                }
                if let Some(v) = patch.invert {
                    *invert = v;
                }
                if let Some(v) = patch.bold {
                    *bold = v;
                }
            }
            ElementKind::Barcode {
                content,
                module_height,
                width,
            } => {
                if let Some(c) = &patch.content {
                    *content = c.clone();
                }
                if let Some(v) = patch.module_height {
                    *module_height = clamp_dim(v);
                }
                if let Some(v) = patch.width {
                    *width = v;
                }
            }
            ElementKind::Box {
                width,
                height,
                thickness,
            } => {
                if let Some(v) = patch.width {
                    *width = clamp_dim(v);
                }
                if let Some(v) = patch.height {
                    *height = clamp_dim(v);
                }
                if let Some(v) = patch.thickness {
                    *thickness = clamp_dim(v);
                }
            }
        }
    }
}
