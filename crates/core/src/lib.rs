//! Label designer core library.
//!
//! Provides the element model for printable labels together with a
//! bidirectional mapping to ZPL-style markup.  The main entry points are
//! [`parse_str`] for interpreting markup into a [`Document`],
//! [`emit_markup`] for deterministic generation, and [`Editor`] for
//! mutation with change notification.

#![warn(missing_docs)]

/// Document editing with change notification.
pub mod editor;
/// Markup grammar: scanner, parser, emitter, and serialization helpers.
pub mod grammar;
/// The label element model: documents, elements, patches.
pub mod model;
/// The pen: accumulated positioning and styling state during parsing.
pub mod pen;

// ── Convenience re-exports ──────────────────────────────────────────────────
// Flat imports for the most common entry points. The full module paths
// remain available for less common types.

// Parser
pub use grammar::parser::{ParseResult, parse_str};

// Model
pub use model::{Align, Document, Element, ElementId, ElementKind, ElementPatch, ElementType};

// Emitter
pub use grammar::emit::{EmitConfig, Layout, emit_markup};

// Editor
pub use editor::{DocumentChange, Editor};

// Pen
pub use pen::Pen;

// Diagnostics (re-exported from the diagnostics crate)
pub use label_designer_diagnostics::{Diagnostic, Severity, Span, codes};

// Serialization helpers
pub use grammar::dump::{from_json, to_pretty_json};
