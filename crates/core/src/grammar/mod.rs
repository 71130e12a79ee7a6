/// JSON serialization helpers for documents and parse results.
pub mod dump;
/// Markup emitter: converts a document back to markup text.
pub mod emit;
/// Markup parser: interprets a command stream into a document.
pub mod parser;
/// Markup scanner: splits raw input into borrowed commands.
pub mod scanner;
