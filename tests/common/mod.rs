//! Shared helpers for building synthetic PDF fixtures with lopdf.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// A piece of text placed at a page position (x, y in points).
pub type Placed = (String, i64, i64);

/// Build a document with one page per entry, each holding the given
/// positioned text. Every run is shown at 12pt in a shared Type1 font.
pub fn build_doc(pages: &[Vec<Placed>]) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for placed in pages {
        let mut operations = Vec::new();
        for (text, x, y) in placed {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 12.into()]));
            operations.push(Operation::new("Td", vec![(*x).into(), (*y).into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(text.as_str())]));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content stream"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
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
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Attach an Info dictionary with title and author.
pub fn with_info(doc: &mut Document, title: &str, author: &str) {
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(title),
        "Author" => Object::string_literal(author),
    });
    doc.trailer.set("Info", info_id);
}

/// Serialize a document to bytes.
pub fn to_bytes(doc: &mut Document) -> Vec<u8> {
    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("serialize document");
    buf
}

/// Lay out a grid of optional cell texts as positioned page text.
///
/// Columns sit 120pt apart starting at x=72; rows run 24pt apart downward
/// from y=700. `None` leaves the grid position empty.
pub fn grid(rows: &[&[Option<&str>]]) -> Vec<Placed> {
    let mut placed = Vec::new();
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            if let Some(text) = cell {
                placed.push((
                    text.to_string(),
                    72 + c as i64 * 120,
                    700 - r as i64 * 24,
                ));
            }
        }
    }
    placed
}

/// Lay out prose lines, all at the left margin.
pub fn paragraph(lines: &[&str]) -> Vec<Placed> {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| (line.to_string(), 72, 700 - i as i64 * 16))
        .collect()
}
