//! End-to-end extraction tests against synthetic documents.

mod common;

use common::{build_doc, grid, paragraph, to_bytes, with_info};
use pdfgrid::{Error, TableExtractor};

#[test]
fn simple_table_flattens_row_major() {
    let mut doc = build_doc(&[grid(&[
        &[Some("Name"), Some("Qty")],
        &[Some("Apples"), Some("12")],
        &[Some("Pears"), Some("7")],
    ])]);

    let extractor = TableExtractor::from_bytes(&to_bytes(&mut doc)).unwrap();
    let cells = extractor.extract_cells(0).unwrap();

    assert_eq!(cells, vec!["Name", "Qty", "Apples", "12", "Pears", "7"]);

    // Output length is rows x columns of the detected table.
    let tables = extractor.extract_tables(0).unwrap();
    assert_eq!(
        cells.len(),
        tables[0].row_count() * tables[0].column_count()
    );
}

#[test]
fn missing_cell_becomes_empty_string() {
    let mut doc = build_doc(&[grid(&[
        &[Some("A"), Some("B")],
        &[Some("1"), None],
        &[Some("2"), Some("x")],
    ])]);

    let extractor = TableExtractor::from_bytes(&to_bytes(&mut doc)).unwrap();

    let tables = extractor.extract_tables(0).unwrap();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].rows[1].cells[1].text, None);

    let cells = extractor.extract_cells(0).unwrap();
    assert_eq!(cells, vec!["A", "B", "1", "", "2", "x"]);
}

#[test]
fn out_of_range_page_yields_empty() {
    let mut doc = build_doc(&[grid(&[
        &[Some("A"), Some("B")],
        &[Some("C"), Some("D")],
    ])]);

    let extractor = TableExtractor::from_bytes(&to_bytes(&mut doc)).unwrap();
    assert_eq!(extractor.page_count(), 1);
    assert!(extractor.extract_cells(1).unwrap().is_empty());
    assert!(extractor.extract_cells(500).unwrap().is_empty());
}

#[test]
fn page_without_table_yields_empty() {
    let mut doc = build_doc(&[paragraph(&[
        "This report covers the third quarter.",
        "Revenue grew in every region we track,",
        "with the strongest gains in the north.",
        "Detailed figures follow on later pages.",
    ])]);

    let extractor = TableExtractor::from_bytes(&to_bytes(&mut doc)).unwrap();
    assert!(extractor.extract_tables(0).unwrap().is_empty());
    assert!(extractor.extract_cells(0).unwrap().is_empty());
}

#[test]
fn extraction_is_idempotent() {
    let mut doc = build_doc(&[grid(&[
        &[Some("Name"), Some("Qty")],
        &[Some("Apples"), Some("12")],
        &[Some("Pears"), Some("7")],
    ])]);
    let bytes = to_bytes(&mut doc);

    let extractor = TableExtractor::from_bytes(&bytes).unwrap();
    let first = extractor.extract_cells(0).unwrap();
    let second = extractor.extract_cells(0).unwrap();
    assert_eq!(first, second);

    // A fresh handle over the same bytes sees the same cells.
    let other = TableExtractor::from_bytes(&bytes).unwrap();
    assert_eq!(other.extract_cells(0).unwrap(), first);
}

#[test]
fn table_on_second_page() {
    let mut doc = build_doc(&[
        paragraph(&[
            "An introduction page without any",
            "tabular content whatsoever, just",
            "a few short lines of prose text",
            "before the data starts.",
        ]),
        grid(&[
            &[Some("City"), Some("Temp")],
            &[Some("Oslo"), Some("-3")],
            &[Some("Rome"), Some("21")],
        ]),
    ]);

    let extractor = TableExtractor::from_bytes(&to_bytes(&mut doc)).unwrap();
    assert_eq!(extractor.page_count(), 2);

    assert!(extractor.extract_cells(0).unwrap().is_empty());
    assert_eq!(
        extractor.extract_cells(1).unwrap(),
        vec!["City", "Temp", "Oslo", "-3", "Rome", "21"]
    );

    let all = extractor.extract_all_tables().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].0, 1);
}

#[test]
fn only_first_table_is_flattened() {
    // Two tables separated by a prose line that sits on neither column.
    let mut placed = grid(&[
        &[Some("A"), Some("B")],
        &[Some("C"), Some("D")],
    ]);
    placed.push(("Unrelated caption text".to_string(), 100, 640));
    placed.push(("E".to_string(), 72, 616));
    placed.push(("F".to_string(), 192, 616));
    placed.push(("G".to_string(), 72, 592));
    placed.push(("H".to_string(), 192, 592));

    let mut doc = build_doc(&[placed]);
    let extractor = TableExtractor::from_bytes(&to_bytes(&mut doc)).unwrap();

    let tables = extractor.extract_tables(0).unwrap();
    assert_eq!(tables.len(), 2);

    // The flatten contract only sees the topmost table.
    assert_eq!(extractor.extract_cells(0).unwrap(), vec!["A", "B", "C", "D"]);
}

#[test]
fn bullet_list_is_not_a_table() {
    let mut doc = build_doc(&[vec![
        ("•".to_string(), 72, 700),
        ("Management console".to_string(), 96, 700),
        ("•".to_string(), 72, 676),
        ("Interface options".to_string(), 96, 676),
        ("•".to_string(), 72, 652),
        ("Firmware updates".to_string(), 96, 652),
    ]]);

    let extractor = TableExtractor::from_bytes(&to_bytes(&mut doc)).unwrap();
    assert!(extractor.extract_cells(0).unwrap().is_empty());
}

#[test]
fn document_info_and_blank_detection() {
    let mut doc = build_doc(&[paragraph(&[
        "A single page that carries clearly more than fifty",
        "characters of body text, so the document as a whole",
        "does not count as blank.",
    ])]);
    with_info(&mut doc, "Quarterly Menu", "Kitchen Team");

    let extractor = TableExtractor::from_bytes(&to_bytes(&mut doc)).unwrap();
    let info = extractor.info();

    assert_eq!(info.page_count, 1);
    assert_eq!(info.title.as_deref(), Some("Quarterly Menu"));
    assert_eq!(info.author.as_deref(), Some("Kitchen Team"));
    assert!(!info.encrypted);
    assert!(!info.blank);
}

#[test]
fn sparse_document_is_blank() {
    let mut doc = build_doc(&[vec![("x".to_string(), 72, 700)]]);

    let extractor = TableExtractor::from_bytes(&to_bytes(&mut doc)).unwrap();
    assert!(extractor.is_blank());
    assert!(extractor.info().blank);
}

#[test]
fn open_errors_propagate() {
    // Missing file
    assert!(matches!(
        TableExtractor::open("no/such/file.pdf"),
        Err(Error::Io(_))
    ));

    // Present but not a PDF
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("not_a_pdf.txt");
    std::fs::write(&path, "just some text").unwrap();
    assert!(matches!(
        TableExtractor::open(&path),
        Err(Error::UnknownFormat)
    ));
}

#[test]
fn extraction_from_saved_file() {
    let mut doc = build_doc(&[grid(&[
        &[Some("Name"), Some("Qty")],
        &[Some("Apples"), Some("12")],
        &[Some("Pears"), Some("7")],
    ])]);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fixture.pdf");
    doc.save(&path).unwrap();

    let cells = pdfgrid::extract_cells(&path, 0).unwrap();
    assert_eq!(cells, vec!["Name", "Qty", "Apples", "12", "Pears", "7"]);

    // Out-of-range through the path-level entry point as well.
    assert!(pdfgrid::extract_cells(&path, 9).unwrap().is_empty());
}
