//! Diagnostic ID constants.
//!
//! Use these instead of string literals to get compile-time typo detection
//! and IDE autocomplete. The command set of this markup dialect is closed,
//! so the code list is maintained by hand.

/// Content appeared before the first command prefix.
pub const PARSER_STRAY_CONTENT: &str = "LBL1001";

/// A command name was not recognized and was skipped.
pub const PARSER_UNKNOWN_COMMAND: &str = "LBL1002";

/// The input did not begin with a start-label marker (`^XA`).
pub const PARSER_MISSING_START: &str = "LBL1003";

/// The input did not contain an end-label marker (`^XZ`).
pub const PARSER_MISSING_END: &str = "LBL1004";

/// Field data was not followed by a field separator (`^FS`); the payload
/// was truncated at the next command prefix.
pub const PARSER_UNTERMINATED_FIELD: &str = "LBL1005";

/// A command prefix was not followed by a command name.
pub const PARSER_EMPTY_COMMAND: &str = "LBL1006";

/// A comment (`^FX`) was still open at end of input.
pub const PARSER_UNTERMINATED_COMMENT: &str = "LBL1007";

/// The input produced no elements.
pub const PARSER_EMPTY_DOCUMENT: &str = "LBL1008";
