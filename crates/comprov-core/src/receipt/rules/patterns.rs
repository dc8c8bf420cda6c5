//! Common regex patterns for receipt extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Characters a recipient name may consist of: ASCII letters, Latin-1
/// letters (À-ÿ) and whitespace.
pub const NAME_CHARS: &str = r"[A-Za-zÀ-ÿ\s]";

lazy_static! {
    // "Nome:" label, name up to the next line break or the CPF field
    pub static ref RECIPIENT_NAME: Regex = Regex::new(
        r"Nome:\s*([A-Za-zÀ-ÿ\s]+?)(?:\n|CPF)"
    ).unwrap();

    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Build a recipient name pattern for an arbitrary label and terminator.
///
/// Both are matched literally. An empty terminator leaves the line break as
/// the only end marker.
pub fn name_pattern(label: &str, terminator: &str) -> Result<Regex, regex::Error> {
    let end = if terminator.is_empty() {
        r"\n".to_string()
    } else {
        format!(r"(?:\n|{})", regex::escape(terminator))
    };

    Regex::new(&format!(r"{}\s*({}+?){}", regex::escape(label), NAME_CHARS, end))
}
