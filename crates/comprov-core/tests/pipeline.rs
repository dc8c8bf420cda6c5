//! End-to-end tests over real PDF bytes.

use std::io::{Cursor, Read};

use comprov_core::error::PdfError;
use comprov_core::{
    replaced_entries, ArchiveBuilder, BatchProcessor, Document, FailureKind, PaymentCategory,
    PdfExtractor, PdfProcessor, PdfTextExtractor, TextExtractor,
};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Object, Stream};
use pretty_assertions::assert_eq;

/// Build a PDF with one page per entry of `pages`, one text line per string.
fn make_pdf(pages: &[&[&str]]) -> Vec<u8> {
    make_pdf_with_fonts(pages, Dictionary::new())
}

/// Like [`make_pdf`], with extra entries in the page font resources. The
/// text itself is always set in `F1`.
fn make_pdf_with_fonts(pages: &[&[&str]], mut fonts: Dictionary) -> Vec<u8> {
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    fonts.set("F1", font_id);
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
    });

    let mut kids = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 12.into()]));
            operations.push(Operation::new("Td", vec![72.into(), (760 - 20 * i as i64).into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut data = Vec::new();
    doc.save_to(&mut data).unwrap();
    data
}

/// Encrypt `data` with RC4 (standard handler, revision 4) for an empty user
/// password. The /U check value is omitted, so any password derives the key.
fn encrypt_with_empty_password(data: &[u8]) -> Vec<u8> {
    let mut doc = lopdf::Document::load_mem(data).unwrap();
    let encrypt_id = doc.add_object(dictionary! {
        "Filter" => "Standard",
        "V" => 4_i64,
        "R" => 4_i64,
        "Length" => 128_i64,
        "P" => -4_i64,
        "O" => Object::string_literal(vec![0x42_u8; 32]),
        "CF" => dictionary! {
            "StdCF" => dictionary! { "CFM" => "V2", "Length" => 16_i64 },
        },
        "StmF" => "StdCF",
        "StrF" => "StdCF",
    });
    let file_id = Object::string_literal(b"comprov-file-id!".to_vec());
    doc.trailer.set("ID", vec![file_id.clone(), file_id]);
    doc.trailer.set("Encrypt", encrypt_id);

    // RC4 is symmetric: the decryption pass over plain objects encrypts them.
    doc.decrypt("").unwrap();
    doc.trailer.set("Encrypt", encrypt_id);

    let mut out = Vec::new();
    doc.save_to(&mut out).unwrap();
    out
}

fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[test]
fn test_extract_text_from_generated_pdf() {
    let data = make_pdf(&[&["Comprovante de transferencia", "Nome: Maria Silva", "CPF: ***.456.789-**"]]);

    let text = PdfTextExtractor::new().extract_text(&data).unwrap();
    assert!(text.contains("Nome: Maria Silva"));
}

#[test]
fn test_page_count_and_page_text() {
    let data = make_pdf(&[&["Primeira pagina"], &["Segunda pagina"]]);

    let mut extractor = PdfExtractor::new();
    extractor.load(&data).unwrap();

    assert_eq!(extractor.page_count(), 2);
    assert!(extractor.extract_page_text(2).unwrap().contains("Segunda"));
    assert!(extractor.extract_page_text(3).is_err());
}

#[test]
fn test_name_found_across_pages() {
    let data = make_pdf(&[&["Comprovante PIX"], &["Nome: Ana Lima", "CPF: ***"]]);
    let docs = vec![Document::new("two-pages.pdf", data)];

    let result = BatchProcessor::new().process(&docs, PaymentCategory::Salary);

    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert_eq!(result.processed[0].new_name, "Ana_Lima_SALARIO.pdf");
}

#[test]
fn test_batch_to_archive() {
    let maria = make_pdf(&[&["Nome: Maria Silva", "CPF: ***.456.789-**"]]);
    let no_label = make_pdf(&[&["Valor: R$ 1.500,00"]]);
    let eder = make_pdf(&[&["Dados do recebedor", "Nome: Eder Melo dos Santos", "CPF: ***"]]);

    let docs = vec![
        Document::new("comprovante1.pdf", maria.clone()),
        Document::new("comprovante2.pdf", no_label),
        Document::new("not-a-pdf.pdf", b"hello".to_vec()),
        Document::new("comprovante3.pdf", eder.clone()),
    ];

    let result = BatchProcessor::new().process(&docs, PaymentCategory::ExpenseReimbursement);

    let names: Vec<_> = result.processed.iter().map(|d| d.new_name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Maria_Silva_AJUDA_CUSTO.pdf", "Eder_Melo_dos_Santos_AJUDA_CUSTO.pdf"]
    );
    let kinds: Vec<_> = result.errors.iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![FailureKind::NameNotFound, FailureKind::Decode]);

    let data = ArchiveBuilder::new().build(&result.processed).unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(data)).unwrap();
    assert_eq!(archive.len(), 2);

    let mut content = Vec::new();
    archive
        .by_name("Maria_Silva_AJUDA_CUSTO.pdf")
        .unwrap()
        .read_to_end(&mut content)
        .unwrap();
    assert_eq!(content, maria);

    let mut content = Vec::new();
    archive
        .by_name("Eder_Melo_dos_Santos_AJUDA_CUSTO.pdf")
        .unwrap()
        .read_to_end(&mut content)
        .unwrap();
    assert_eq!(content, eder);
}

#[test]
fn test_colliding_names_keep_the_last_receipt() {
    let first = make_pdf(&[&["Nome: Ana Lima", "CPF: 1"]]);
    let bia = make_pdf(&[&["Nome: Bia", "CPF: 2"]]);
    let last = make_pdf(&[&["Nome: Ana Lima", "CPF: 3"]]);
    let docs = vec![
        Document::new("a.pdf", first),
        Document::new("b.pdf", bia.clone()),
        Document::new("c.pdf", last.clone()),
    ];

    let result = BatchProcessor::new().process(&docs, PaymentCategory::Salary);
    assert_eq!(result.processed.len(), 3);

    let data = ArchiveBuilder::new().build(&result.processed).unwrap();
    let mut archive = zip::ZipArchive::new(Cursor::new(data)).unwrap();
    assert_eq!(archive.len(), 2);

    let mut content = Vec::new();
    archive
        .by_name("Ana_Lima_SALARIO.pdf")
        .unwrap()
        .read_to_end(&mut content)
        .unwrap();
    assert_eq!(content, last);

    let mut content = Vec::new();
    archive
        .by_name("Bia_SALARIO.pdf")
        .unwrap()
        .read_to_end(&mut content)
        .unwrap();
    assert_eq!(content, bia);

    let replaced = replaced_entries(&result.processed);
    assert_eq!(replaced.len(), 1);
    assert_eq!(replaced[0].replaced, "a.pdf");
    assert_eq!(replaced[0].kept, "c.pdf");
}

#[test]
fn test_empty_password_pdf_is_decrypted() {
    let plain = make_pdf(&[&["Nome: Maria Silva", "CPF: ***.456.789-**"]]);
    let encrypted = encrypt_with_empty_password(&plain);
    assert!(!contains_bytes(&encrypted, b"Maria Silva"));

    let mut extractor = PdfExtractor::new();
    extractor.load(&encrypted).unwrap();
    assert!(PdfProcessor::extract_text(&extractor).unwrap().contains("Nome: Maria Silva"));

    let docs = vec![Document::new("locked.pdf", encrypted)];
    let result = BatchProcessor::new().process(&docs, PaymentCategory::Salary);
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert_eq!(result.processed[0].new_name, "Maria_Silva_SALARIO.pdf");
}

#[test]
fn test_encrypted_pdf_without_decryption_is_rejected() {
    let encrypted = encrypt_with_empty_password(&make_pdf(&[&["Nome: Maria Silva", "CPF: ***"]]));

    let mut extractor = PdfExtractor::new().with_empty_password_decryption(false);
    assert!(matches!(extractor.load(&encrypted), Err(PdfError::Encrypted)));
}

#[test]
fn test_pdf_without_pages_is_rejected() {
    let data = make_pdf(&[]);

    let mut extractor = PdfExtractor::new();
    assert!(matches!(extractor.load(&data), Err(PdfError::NoPages)));

    let docs = vec![Document::new("blank.pdf", data)];
    let result = BatchProcessor::new().process(&docs, PaymentCategory::Salary);
    assert_eq!(result.errors[0].kind, FailureKind::Decode);
    assert_eq!(result.errors[0].message, "PDF has no pages");
}

#[test]
fn test_falls_back_to_pdf_extract() {
    // lopdf resolves every font on the page and fails on a non-font entry;
    // pdf-extract only loads the fonts the content actually selects.
    let fonts = dictionary! {
        "F2" => dictionary! { "Type" => "Annot" },
    };
    let data = make_pdf_with_fonts(&[&["Nome: Maria Silva", "CPF: ***"]], fonts);

    let mut strict = PdfExtractor::new().with_fallback(false);
    strict.load(&data).unwrap();
    assert!(matches!(
        PdfProcessor::extract_text(&strict),
        Err(PdfError::TextExtraction(_))
    ));

    let mut extractor = PdfExtractor::new();
    extractor.load(&data).unwrap();
    let text = PdfProcessor::extract_text(&extractor).unwrap();
    assert!(text.contains("Maria"), "{:?}", text);
}
