use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// Build a small PDF where each entry of `pages` is a list of
/// `(x, y, text)` runs shown in Courier 12.
fn build_pdf(pages: &[&[(i64, i64, &str)]]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for runs in pages {
        let mut operations = vec![Operation::new("q", vec![]), Operation::new("Q", vec![])];
        for &(x, y, text) in runs.iter() {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 12.into()]));
            operations.push(Operation::new("Td", vec![x.into(), y.into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(text)]));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
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

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

#[test]
fn test_pages_from_generated_pdf() {
    let bytes = build_pdf(&[
        &[
            (72, 720, "WAYFINDER EXPEDITION LOG"),
            (72, 690, "Odo Start: 12345"),
            (72, 670, "Notes / Observations"),
        ],
        &[],
        &[(72, 700, "Sunrise: 06:12")],
    ]);

    let pages: Vec<Option<String>> = pdf::TextDocument::from_bytes(&bytes)
        .unwrap()
        .pages()
        .unwrap()
        .into_iter()
        .map(|p| p.text)
        .collect();
    assert_eq!(pages.len(), 3);
    assert_eq!(
        pages[0].as_deref(),
        Some("WAYFINDER EXPEDITION LOG\nOdo Start: 12345\nNotes / Observations")
    );
    assert_eq!(pages[1], None);
    assert_eq!(pages[2].as_deref(), Some("Sunrise: 06:12"));
}

#[test]
fn test_info_reports_page_count() {
    let bytes = build_pdf(&[&[(72, 700, "Sky")], &[(72, 700, "Mud")]]);
    let info = pdf::TextDocument::from_bytes(&bytes).unwrap().info();
    assert_eq!(info.page_count, 2);
    assert_eq!(info.title, None);
}

#[test]
fn test_text_document_pages_are_numbered() {
    let bytes = build_pdf(&[&[(72, 700, "Oil")], &[(72, 700, "Winch")]]);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.pdf");
    std::fs::write(&path, &bytes).unwrap();

    let doc = pdf::TextDocument::open(&path).unwrap();
    let pages = doc.pages().unwrap();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].page, 1);
    assert_eq!(pages[1].page, 2);
    assert_eq!(pages[1].text.as_deref(), Some("Winch"));
}
