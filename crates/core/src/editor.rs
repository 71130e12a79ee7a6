//! Document editing with change notification.
//!
//! [`Editor`] wraps a [`Document`] and decouples mutation from rendering:
//! every operation mutates the model first, then reports a typed
//! [`DocumentChange`] to subscribed observers. The core stays free of any
//! rendering dependency; a UI re-derives element visuals from the change
//! and the document, and re-triggers generation as it sees fit.
//!
//! # Caller contract
//!
//! The editor is single-threaded. All calls must be serialized by the
//! caller: the types are deliberately not `Sync`, and no internal locking
//! is performed because there is no concurrent mutation to guard against.

use crate::grammar::emit::{EmitConfig, emit_markup};
use crate::grammar::parser::parse_str;
use crate::model::{Document, ElementId, ElementPatch, ElementType};
use label_designer_diagnostics::Diagnostic;

/// A mutation that observers may need to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentChange {
    /// A new element was appended.
    ElementCreated(ElementId),
    /// An existing element's fields changed.
    ElementUpdated(ElementId),
    /// An element was removed.
    ElementRemoved(ElementId),
    /// The whole document was swapped (e.g. after parsing markup).
    DocumentReplaced,
}

type Observer = Box<dyn FnMut(&Document, &DocumentChange)>;

/// Owns a document and notifies observers after each mutation.
pub struct Editor {
    doc: Document,
    observers: Vec<Observer>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Create an editor over an empty default-sized document.
    pub fn new() -> Self {
        Self::with_document(Document::default())
    }

    /// Create an editor over an existing document.
    pub fn with_document(doc: Document) -> Self {
        Self {
            doc,
            observers: Vec::new(),
        }
    }

    /// The current document.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Register an observer called after every mutation.
    pub fn subscribe(&mut self, observer: impl FnMut(&Document, &DocumentChange) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Create an element; observers see `ElementCreated`.
    pub fn create(
        &mut self,
        ty: ElementType,
        x: i32,
        y: i32,
        overrides: ElementPatch,
    ) -> ElementId {
        let id = self.doc.create(ty, x, y, overrides);
        self.notify(DocumentChange::ElementCreated(id));
        id
    }

    /// Patch an element; observers see `ElementUpdated`.
    ///
    /// Unknown ids are a silent no-op and produce no notification.
    pub fn update(&mut self, id: ElementId, patch: &ElementPatch) {
        if self.doc.update(id, patch) {
            self.notify(DocumentChange::ElementUpdated(id));
        }
    }

    /// Remove an element; observers see `ElementRemoved`.
    ///
    /// Unknown ids are a silent no-op and produce no notification.
    pub fn remove(&mut self, id: ElementId) {
        if self.doc.remove(id) {
            self.notify(DocumentChange::ElementRemoved(id));
        }
    }

    /// Parse markup and replace the whole document with the result.
    ///
    /// Observers see a single `DocumentReplaced`. Returns the parser's
    /// advisory diagnostics; loading itself cannot fail.
    pub fn load(&mut self, markup: &str) -> Vec<Diagnostic> {
        let result = parse_str(markup);
        let (w, h) = (result.document.canvas_width, result.document.canvas_height);
        self.doc.replace_all(result.document.into_elements(), w, h);
        self.notify(DocumentChange::DocumentReplaced);
        result.diagnostics
    }

    /// Generate markup for the current document with the default layout.
    pub fn markup(&self) -> String {
        emit_markup(&self.doc, &EmitConfig::default())
    }

    fn notify(&mut self, change: DocumentChange) {
        let doc = &self.doc;
        for observer in &mut self.observers {
            observer(doc, &change);
        }
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("doc", &self.doc)
            .field("observers", &self.observers.len())
            .finish()
    }
}
