//! File name sanitization.

use crate::models::document::PaymentCategory;

/// Characters that are not allowed in common file system entry names.
pub const ILLEGAL_FILENAME_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Make a free-text name safe to use as a file name fragment.
///
/// Illegal characters are removed first, then each remaining space becomes
/// an underscore. No normalization, truncation or collision handling.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .filter(|c| !ILLEGAL_FILENAME_CHARS.contains(c))
        .map(|c| if c == ' ' { '_' } else { c })
        .collect()
}

/// Derived file name for a recipient: `{Sanitized_Name}_{TAG}.pdf`.
pub fn derived_file_name(person_name: &str, category: PaymentCategory) -> String {
    format!("{}_{}.pdf", sanitize(person_name), category.tag())
}
