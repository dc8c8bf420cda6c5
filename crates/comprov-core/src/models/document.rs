//! Receipt documents and per-document processing outcomes.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An uploaded receipt: display name plus raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Original display name (usually the uploaded file name).
    pub name: String,
    /// Raw document bytes.
    pub content: Vec<u8>,
}

impl Document {
    /// Create a document from a name and its bytes.
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Read a document from disk. The display name is the path's file name.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read(path)?;
        Ok(Self::new(display_name(path), content))
    }
}

/// File name component of `path`, or the full path when it has none.
pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

/// Payment category applied to every file name in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentCategory {
    /// Salary payment (salário).
    Salary,
    /// Expense reimbursement (ajuda de custo).
    ExpenseReimbursement,
}

impl PaymentCategory {
    /// All categories, in display order.
    pub const ALL: [PaymentCategory; 2] = [Self::Salary, Self::ExpenseReimbursement];

    /// Tag appended to derived file names, e.g. `SALARIO`.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Salary => "SALARIO",
            Self::ExpenseReimbursement => "AJUDA_CUSTO",
        }
    }

    /// Label used in archive file names, e.g. `Salario`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Salary => "Salario",
            Self::ExpenseReimbursement => "Ajuda_Custo",
        }
    }
}

impl fmt::Display for PaymentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for PaymentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        match normalized.as_str() {
            "SALARIO" | "SALARY" => Ok(Self::Salary),
            "AJUDA_CUSTO" | "AJUDA_DE_CUSTO" | "EXPENSE_REIMBURSEMENT" | "EXPENSE" => {
                Ok(Self::ExpenseReimbursement)
            }
            _ => Err(format!("unknown payment category: {}", s)),
        }
    }
}

/// A receipt whose recipient name was found and which has been renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedDocument {
    /// Name the document was uploaded with.
    pub original_name: String,
    /// Derived name, `{Sanitized_Name}_{TAG}.pdf`.
    pub new_name: String,
    /// Recipient name as extracted, before sanitization.
    pub person_name: String,
    /// Original bytes, never re-encoded.
    #[serde(skip)]
    pub content: Vec<u8>,
}

/// Why a document could not be processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The bytes could not be decoded as a PDF.
    Decode,
    /// The name label was absent from the extracted text.
    NameNotFound,
    /// The document content could not be read.
    Io,
}

/// A document that produced no [`ProcessedDocument`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessingError {
    /// Name the document was uploaded with.
    pub original_name: String,
    /// Human-readable failure message.
    pub message: String,
    /// Failure category.
    pub kind: FailureKind,
}

impl ProcessingError {
    pub fn new(original_name: impl Into<String>, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            original_name: original_name.into(),
            message: message.into(),
            kind,
        }
    }
}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.original_name, self.message)
    }
}

impl std::error::Error for ProcessingError {}

/// Outcome of one document, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentOutcome {
    /// Renamed successfully.
    Renamed {
        original_name: String,
        new_name: String,
        person_name: String,
    },
    /// Could not be processed.
    Failed {
        original_name: String,
        kind: FailureKind,
        message: String,
    },
}

impl DocumentOutcome {
    /// Name the document was uploaded with.
    pub fn original_name(&self) -> &str {
        match self {
            Self::Renamed { original_name, .. } | Self::Failed { original_name, .. } => original_name,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Renamed { .. })
    }
}

impl From<&ProcessedDocument> for DocumentOutcome {
    fn from(doc: &ProcessedDocument) -> Self {
        Self::Renamed {
            original_name: doc.original_name.clone(),
            new_name: doc.new_name.clone(),
            person_name: doc.person_name.clone(),
        }
    }
}

impl From<&ProcessingError> for DocumentOutcome {
    fn from(err: &ProcessingError) -> Self {
        Self::Failed {
            original_name: err.original_name.clone(),
            kind: err.kind,
            message: err.message.clone(),
        }
    }
}

impl fmt::Display for DocumentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Renamed {
                original_name,
                new_name,
                person_name,
            } => write!(f, "{} -> {} ({})", original_name, new_name, person_name),
            Self::Failed {
                original_name,
                message,
                ..
            } => write!(f, "{}: {}", original_name, message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_category_tags() {
        assert_eq!(PaymentCategory::Salary.tag(), "SALARIO");
        assert_eq!(PaymentCategory::ExpenseReimbursement.tag(), "AJUDA_CUSTO");
        assert_eq!(PaymentCategory::ExpenseReimbursement.label(), "Ajuda_Custo");
        assert_eq!(PaymentCategory::Salary.to_string(), "SALARIO");
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("salario".parse::<PaymentCategory>(), Ok(PaymentCategory::Salary));
        assert_eq!("SALARY".parse::<PaymentCategory>(), Ok(PaymentCategory::Salary));
        assert_eq!("ajuda-custo".parse::<PaymentCategory>(), Ok(PaymentCategory::ExpenseReimbursement));
        assert_eq!(" Ajuda_Custo ".parse::<PaymentCategory>(), Ok(PaymentCategory::ExpenseReimbursement));
        assert!("bonus".parse::<PaymentCategory>().is_err());
    }

    #[test]
    fn test_document_from_path_uses_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recibo.pdf");
        std::fs::write(&path, b"bytes").unwrap();

        let doc = Document::from_path(&path).unwrap();
        assert_eq!(doc.name, "recibo.pdf");
        assert_eq!(doc.content, b"bytes".to_vec());
    }

    #[test]
    fn test_processing_error_display() {
        let err = ProcessingError::new("a.pdf", FailureKind::NameNotFound, "no name");
        assert_eq!(err.to_string(), "a.pdf: no name");
    }

    #[test]
    fn test_outcome_serializes_with_status() {
        let outcome = DocumentOutcome::Failed {
            original_name: "a.pdf".to_string(),
            kind: FailureKind::Decode,
            message: "bad".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["kind"], "decode");
    }
}
