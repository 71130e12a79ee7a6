//! Markup scanner: splits raw input into a sequence of borrowed commands.
//!
//! A command starts at the prefix character (`^`), is named by the next two
//! characters, and owns everything up to (but not including) the next prefix
//! as its raw argument text. Field-data payloads therefore cannot contain a
//! literal prefix character; the first one ends the payload.

/// The command prefix character.
pub const COMMAND_PREFIX: char = '^';

/// A raw command that borrows its text directly from the source input,
/// with zero allocation.
///
/// `name` and `args` are always slices of the input. The `start`/`end` byte
/// offsets cover the whole command including its prefix, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawCommand<'a> {
    /// Two-character command name (shorter only when input ends early).
    pub name: &'a str,
    /// Raw comma-separated argument text up to the next prefix.
    pub args: &'a str,
    /// Byte offset of the prefix character.
    pub start: usize,
    /// Byte offset one past the last argument character.
    pub end: usize,
}

/// Scan markup input into commands.
///
/// Content before the first prefix is skipped here; [`scan`] returns its
/// byte length so the parser can flag it. Every `name`/`args` field borrows
/// from `input`, so the returned `Vec` is valid as long as `input` is alive.
///
/// # Safety of bytewise scanning
///
/// The prefix `^` is ASCII (0x5E). UTF-8 continuation bytes are in the range
/// 0x80–0xBF, so scanning bytes for the prefix can never split a multi-byte
/// character; slice boundaries computed this way are always char boundaries.
pub fn scan(input: &str) -> (usize, Vec<RawCommand<'_>>) {
    let b = input.as_bytes();
    let mut cmds = Vec::new();
    let mut i = 0usize;

    // Leading stray content, if any.
    while i < b.len() && b[i] != b'^' {
        i += 1;
    }
    let leading = i;

    while i < b.len() {
        let start = i;
        i += 1; // prefix

        // Command name: up to two characters, stopping early at the next
        // prefix or end of input.
        let name_start = i;
        let mut taken = 0;
        while i < b.len() && taken < 2 && b[i] != b'^' {
            i += utf8_len(b[i]);
            taken += 1;
        }
        let name_end = i.min(b.len());

        // Raw arguments: the remainder until the next prefix.
        let args_start = name_end;
        while i < b.len() && b[i] != b'^' {
            i += 1;
        }

        cmds.push(RawCommand {
            name: &input[name_start..name_end],
            args: &input[args_start..i.min(b.len())],
            start,
            end: i.min(b.len()),
        });
    }

    (leading, cmds)
}

/// Byte length of the UTF-8 character starting with `lead`.
fn utf8_len(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        _ => 4,
    }
}
