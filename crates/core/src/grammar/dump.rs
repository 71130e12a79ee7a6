use crate::model::Document;

/// Serialize a document to a pretty-printed JSON string.
pub fn to_pretty_json(doc: &Document) -> String {
    serde_json::to_string_pretty(doc).expect("Document serialization cannot fail")
}

/// Deserialize a document from JSON text.
pub fn from_json(text: &str) -> Result<Document, serde_json::Error> {
    serde_json::from_str(text)
}
