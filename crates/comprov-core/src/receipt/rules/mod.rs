//! Rule-based extractors for PIX payment receipts.

mod name;
pub mod patterns;

pub use name::{parse_name, PixReceiptExtractor};
