mod common;

use std::sync::Arc;

use common::{DocxBuilder, FailingPort, MappingPort, drawing_run, png, table_xml};
use doctrans::ooxml::docx::writer::{BodyElement, BorderStyle, CellBorders, EMU_PER_PX, MutableDocument};
use doctrans::ooxml::docx::{Package, ParagraphAlignment};
use doctrans::ooxml::opc::ReadLimits;
use doctrans::pipeline::{DocumentTranslator, ImageScope, PipelineError, TranslatorOptions};
use doctrans::translate::TranslationPort;

fn translator(port: Arc<dyn TranslationPort>) -> DocumentTranslator {
    DocumentTranslator::new(port, TranslatorOptions::default())
}

fn translate(port: Arc<dyn TranslationPort>, docx: &[u8], target: &str) -> MutableDocument {
    translator(port).translate_bytes(docx, target).unwrap()
}

#[test]
fn test_hello_world_keeps_first_run_formatting() {
    let docx = DocxBuilder::new()
        .body(r#"<w:p><w:r><w:rPr><w:b/><w:sz w:val="24"/></w:rPr><w:t xml:space="preserve">Hello </w:t></w:r><w:r><w:t>world</w:t></w:r></w:p>"#)
        .build();
    let port = Arc::new(MappingPort::identity().with("Hello world", "Bonjour le monde"));

    let output = translate(port.clone(), &docx, "fr");

    assert_eq!(port.seen(), ["Hello world"]);
    let paragraphs: Vec<_> = output.paragraphs().collect();
    assert_eq!(paragraphs.len(), 1);
    let runs = paragraphs[0].runs();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].text(), "Bonjour le monde");
    assert_eq!(runs[0].formatting().bold, Some(true));
    assert_eq!(runs[0].formatting().font_size_pt(), Some(12.0));

    // The saved package reads back the same way.
    let reread = Package::from_bytes(&output.to_bytes().unwrap()).unwrap();
    let doc = reread.document().unwrap();
    assert_eq!(doc.paragraphs()[0].text(), "Bonjour le monde");
    assert_eq!(doc.paragraphs()[0].runs()[0].formatting().bold, Some(true));
    assert_eq!(doc.paragraphs()[0].runs()[0].formatting().font_size, Some(24));
}

#[test]
fn test_identity_table_gets_uniform_borders() {
    let docx = DocxBuilder::new()
        .body(&table_xml(2, &[&["A1", "B1"], &["A2", "B2"]]))
        .build();
    let port = Arc::new(MappingPort::identity());

    let output = translate(port.clone(), &docx, "es");

    assert_eq!(port.calls(), 4);
    let tables: Vec<_> = output.tables().collect();
    assert_eq!(tables.len(), 1);
    let table = tables[0];
    assert_eq!(table.rows().len(), 2);
    for (r, row) in table.rows().iter().enumerate() {
        assert_eq!(row.cells().len(), 2);
        for (c, cell) in row.cells().iter().enumerate() {
            let expected = format!("{}{}", ["A", "B"][c], r + 1);
            assert_eq!(cell.text(), expected);
            assert_eq!(cell.borders(), Some(&CellBorders::uniform_single()));
            assert_eq!(cell.borders().unwrap().top.as_ref().unwrap().style, BorderStyle::Single);
        }
    }
}

#[test]
fn test_table_keeps_column_count_in_every_row() {
    let docx = DocxBuilder::new()
        .body(&table_xml(4, &[&["a", "b", "c", "d"], &["e", "f"], &["g", "h", "i", "j"]]))
        .build();

    let output = translate(Arc::new(MappingPort::identity()), &docx, "de");

    let table = output.tables().next().unwrap();
    assert_eq!(table.column_count(), 4);
    assert_eq!(table.rows().len(), 3);
    for row in table.rows() {
        assert_eq!(row.cells().len(), 4);
    }
    assert_eq!(table.cell(1, 1).unwrap().text(), "f");
    assert_eq!(table.cell(1, 3).unwrap().text(), "");
}

#[test]
fn test_failing_backend_keeps_original_text() {
    let docx = DocxBuilder::new()
        .text("First paragraph")
        .body(&table_xml(1, &[&["cell"]]))
        .body(r#"<w:p><w:r><w:t>Second </w:t></w:r><w:r><w:rPr><w:i/></w:rPr><w:t>paragraph</w:t></w:r></w:p>"#)
        .build();
    let port = Arc::new(FailingPort::default());
    let package = Package::from_bytes(&docx).unwrap();

    let (output, report) = translator(port.clone())
        .transform_with_report(&package, "fr")
        .unwrap();

    let texts: Vec<String> = output.paragraphs().map(|p| p.text()).collect();
    assert_eq!(texts, ["First paragraph", "Second paragraph"]);
    assert_eq!(output.tables().next().unwrap().cell(0, 0).unwrap().text(), "cell");
    assert_eq!(port.calls(), 3);
    assert_eq!(report.fallbacks, 3);
    assert_eq!(report.paragraphs, 2);
    assert_eq!(report.tables, 1);
}

#[test]
fn test_empty_paragraphs_skip_backend() {
    let docx = DocxBuilder::new()
        .body("<w:p/>")
        .body(r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr></w:p>"#)
        .body(r#"<w:p><w:r><w:rPr><w:b/></w:rPr><w:t></w:t></w:r></w:p>"#)
        .build();
    let port = Arc::new(MappingPort::identity());

    let output = translate(port.clone(), &docx, "fr");

    assert_eq!(port.calls(), 0);
    let paragraphs: Vec<_> = output.paragraphs().collect();
    assert_eq!(paragraphs.len(), 3);
    assert!(paragraphs[0].runs().is_empty());
    assert!(paragraphs[1].runs().is_empty());
    assert_eq!(paragraphs[1].style(), Some("Heading1"));
    assert_eq!(paragraphs[2].runs().len(), 1);
    assert_eq!(paragraphs[2].runs()[0].text(), "");
    assert_eq!(paragraphs[2].runs()[0].formatting().bold, Some(true));
}

#[test]
fn test_unset_formatting_stays_unset() {
    let docx = DocxBuilder::new()
        .text("plain")
        .body(r#"<w:p><w:r><w:rPr><w:i w:val="0"/><w:u w:val="none"/></w:rPr><w:t>explicit</w:t></w:r></w:p>"#)
        .build();

    let output = translate(Arc::new(MappingPort::identity()), &docx, "fr");

    let paragraphs: Vec<_> = output.paragraphs().collect();
    let plain = paragraphs[0].runs()[0].formatting();
    assert!(plain.is_empty());

    let explicit = paragraphs[1].runs()[0].formatting();
    assert_eq!(explicit.bold, None);
    assert_eq!(explicit.italic, Some(false));
    assert_eq!(explicit.underline, Some(false));

    let reread = Package::from_bytes(&output.to_bytes().unwrap()).unwrap();
    let doc = reread.document().unwrap();
    assert!(doc.paragraphs()[0].runs()[0].formatting().is_empty());
    assert_eq!(doc.paragraphs()[1].runs()[0].formatting().italic, Some(false));
    assert_eq!(doc.paragraphs()[1].runs()[0].formatting().underline, Some(false));
}

#[test]
fn test_node_order_and_table_positions() {
    let docx = DocxBuilder::new()
        .text("before")
        .body(&table_xml(1, &[&["first"]]))
        .text("between")
        .body(&table_xml(2, &[&["second", "table"]]))
        .build();

    let output = translate(Arc::new(MappingPort::identity()), &docx, "it");

    let kinds: Vec<&str> = output
        .elements()
        .iter()
        .map(|element| match element {
            BodyElement::Paragraph(_) => "p",
            BodyElement::Table(_) => "tbl",
        })
        .collect();
    assert_eq!(kinds, ["p", "tbl", "p", "tbl"]);

    let tables: Vec<_> = output.tables().collect();
    assert_eq!(tables[0].column_count(), 1);
    assert_eq!(tables[0].cell(0, 0).unwrap().text(), "first");
    assert_eq!(tables[1].column_count(), 2);
    assert_eq!(tables[1].cell(0, 1).unwrap().text(), "table");
}

#[test]
fn test_paragraph_image_is_scaled_into_box() {
    let docx = DocxBuilder::new()
        .body(&format!("<w:p><w:r><w:t>Figure</w:t></w:r>{}</w:p>", drawing_run("rId5")))
        .image("rId5", "image1.png", png(1920, 1080))
        .build();
    let package = Package::from_bytes(&docx).unwrap();

    let (output, report) = translator(Arc::new(MappingPort::identity().with("Figure", "Abbildung")))
        .transform_with_report(&package, "de")
        .unwrap();

    assert_eq!(report.images, 1);
    let paragraph = output.paragraphs().next().unwrap();
    assert_eq!(paragraph.runs().len(), 2);
    assert_eq!(paragraph.runs()[0].text(), "Abbildung");

    let image = paragraph.runs()[1].image().unwrap();
    assert_eq!(image.width_emu(), 576 * EMU_PER_PX);
    assert_eq!(image.height_emu(), 324 * EMU_PER_PX);
    assert!(image.width_emu() <= 6 * 914_400);
    assert!(image.height_emu() <= 8 * 914_400);

    let reread = Package::from_bytes(&output.to_bytes().unwrap()).unwrap();
    let images = reread.images();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].pixel_dimensions().unwrap(), (1920, 1080));
}

#[test]
fn test_image_scope() {
    let docx = DocxBuilder::new()
        .body(&format!("<w:p>{}</w:p>", drawing_run("rId5")))
        .text("no pictures here")
        .image("rId5", "image1.png", png(10, 10))
        .image("rId6", "image2.png", png(20, 20))
        .build();
    let package = Package::from_bytes(&docx).unwrap();
    let port: Arc<dyn TranslationPort> = Arc::new(MappingPort::identity());

    let referenced = DocumentTranslator::new(port.clone(), TranslatorOptions::default());
    let (output, report) = referenced.transform_with_report(&package, "fr").unwrap();
    assert_eq!(report.images, 1);
    assert_eq!(output.images().len(), 1);
    assert_eq!(output.images()[0].width_emu(), 10 * EMU_PER_PX);

    let document_wide = DocumentTranslator::new(
        port,
        TranslatorOptions {
            image_scope: ImageScope::DocumentWide,
            ..TranslatorOptions::default()
        },
    );
    let (output, report) = document_wide.transform_with_report(&package, "fr").unwrap();
    assert_eq!(report.images, 2);
    let widths: Vec<i64> = output.images().iter().map(|image| image.width_emu()).collect();
    assert_eq!(widths, [10 * EMU_PER_PX, 20 * EMU_PER_PX]);
    // Only the paragraph that referenced a picture receives them.
    assert!(output.paragraphs().nth(1).unwrap().images().next().is_none());
}

#[test]
fn test_undecodable_image_is_skipped() {
    let docx = DocxBuilder::new()
        .body(&format!("<w:p><w:r><w:t>Broken</w:t></w:r>{}</w:p>", drawing_run("rId7")))
        .text("after")
        .image("rId7", "image1.png", b"\x89PNG\r\n\x1a\nnot really".to_vec())
        .build();
    let package = Package::from_bytes(&docx).unwrap();

    let (output, report) = translator(Arc::new(MappingPort::identity()))
        .transform_with_report(&package, "fr")
        .unwrap();

    assert_eq!(report.images, 0);
    let texts: Vec<String> = output.paragraphs().map(|p| p.text()).collect();
    assert_eq!(texts, ["Broken", "after"]);
    assert!(output.images().is_empty());
}

#[test]
fn test_cell_alignment_and_image() {
    let table = format!(
        r#"<w:tbl><w:tblPr><w:tblStyle w:val="TableGrid"/></w:tblPr><w:tblGrid><w:gridCol/><w:gridCol/></w:tblGrid><w:tr><w:tc><w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:t>Logo</w:t></w:r></w:p><w:p>{}</w:p></w:tc><w:tc><w:p><w:r><w:t>Name</w:t></w:r></w:p><w:p><w:r><w:t>Title</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#,
        drawing_run("rId5")
    );
    let docx = DocxBuilder::new()
        .body(&table)
        .image("rId5", "logo.png", png(100, 50))
        .build();
    let port = Arc::new(MappingPort::identity());

    let output = translate(port.clone(), &docx, "fr");

    assert_eq!(port.seen(), ["Logo\n", "Name\nTitle"]);
    let table = output.tables().next().unwrap();
    assert_eq!(table.style(), Some("TableGrid"));

    let logo = table.cell(0, 0).unwrap();
    let first = &logo.paragraphs()[0];
    assert_eq!(first.alignment(), Some(ParagraphAlignment::Center));
    assert_eq!(first.runs()[0].text(), "Logo\n");
    let image = first.runs()[1].image().unwrap();
    assert_eq!((image.width_emu(), image.height_emu()), (100 * EMU_PER_PX, 50 * EMU_PER_PX));

    let name = table.cell(0, 1).unwrap();
    assert_eq!(name.paragraphs()[0].alignment(), None);
    assert_eq!(name.text(), "Name\nTitle");
}

#[test]
fn test_merged_header_keeps_columns_aligned() {
    let table = concat!(
        r#"<w:tbl><w:tblPr/><w:tblGrid><w:gridCol/><w:gridCol/><w:gridCol/></w:tblGrid>"#,
        r#"<w:tr><w:tc><w:p><w:r><w:t>A1</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>B1</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>C1</w:t></w:r></w:p></w:tc></w:tr>"#,
        r#"<w:tr><w:tc><w:tcPr><w:gridSpan w:val="2"/></w:tcPr><w:p><w:r><w:t>AB2</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>C2</w:t></w:r></w:p></w:tc></w:tr>"#,
        r#"</w:tbl>"#
    );
    let docx = DocxBuilder::new().body(table).build();
    let port = Arc::new(MappingPort::identity());

    let output = translate(port.clone(), &docx, "fr");

    assert_eq!(port.seen(), ["A1", "B1", "C1", "AB2", "C2"]);
    let table = output.tables().next().unwrap();
    assert_eq!(table.column_count(), 3);
    assert!(table.rows().iter().all(|row| row.cells().len() == 3));
    assert_eq!(table.cell(1, 0).unwrap().text(), "AB2");
    assert_eq!(table.cell(1, 1).unwrap().text(), "");
    assert_eq!(table.cell(1, 2).unwrap().text(), "C2");
    // the spanned column still gets its border
    assert!(table.cell(1, 1).unwrap().borders().is_some());
}

#[test]
fn test_alternate_content_picture_is_inserted_once() {
    let run = r#"<w:r><mc:AlternateContent><mc:Choice Requires="wps"><w:drawing><wp:inline><wp:extent cx="100" cy="100"/><a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture"><pic:pic><pic:blipFill><a:blip r:embed="rId5"/></pic:blipFill></pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing></mc:Choice><mc:Fallback><w:pict><v:shape><v:imagedata r:id="rId5"/></v:shape></w:pict></mc:Fallback></mc:AlternateContent></w:r>"#;
    let docx = DocxBuilder::new()
        .body(&format!("<w:p><w:r><w:t>Figure</w:t></w:r>{run}</w:p>"))
        .image("rId5", "figure.png", png(40, 30))
        .build();
    let package = Package::from_bytes(&docx).unwrap();

    let (output, report) = translator(Arc::new(MappingPort::identity()))
        .transform_with_report(&package, "fr")
        .unwrap();

    assert_eq!(report.images, 1);
    assert_eq!(output.images().len(), 1);
    assert_eq!(output.paragraphs().next().unwrap().text(), "Figure");
}

#[test]
fn test_oversized_part_is_rejected() {
    let docx = DocxBuilder::new()
        .text("small text")
        .image("rId9", "huge.png", vec![0u8; 512 * 1024])
        .build();
    let translator = DocumentTranslator::new(
        Arc::new(MappingPort::identity()),
        TranslatorOptions {
            read_limits: ReadLimits {
                max_part_size: 64 * 1024,
                max_total_size: 1024 * 1024,
            },
            ..TranslatorOptions::default()
        },
    );

    let err = translator.translate_bytes(&docx, "fr").unwrap_err();
    assert!(matches!(err, PipelineError::UnsupportedFileKind(_)));

    // the default limits accept the same package
    let output = translate(Arc::new(MappingPort::identity()), &docx, "fr");
    assert_eq!(output.paragraphs().count(), 1);
}

#[test]
fn test_source_styles_are_carried() {
    let styles = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:style w:type="paragraph" w:styleId="Custom"><w:name w:val="Custom"/></w:style></w:styles>"#;
    let docx = DocxBuilder::new()
        .body(r#"<w:p><w:pPr><w:pStyle w:val="Custom"/></w:pPr><w:r><w:t>styled</w:t></w:r></w:p>"#)
        .styles(styles)
        .build();

    let output = translate(Arc::new(MappingPort::identity()), &docx, "fr");

    assert_eq!(output.styles_xml(), Some(styles.as_bytes()));
    assert_eq!(output.paragraphs().next().unwrap().style(), Some("Custom"));

    let reread = Package::from_bytes(&output.to_bytes().unwrap()).unwrap();
    assert_eq!(reread.styles_xml(), Some(styles.as_bytes()));
    assert_eq!(reread.document().unwrap().paragraphs()[0].style_id(), Some("Custom"));
}

#[test]
fn test_rejects_non_word_input() {
    let translator = translator(Arc::new(MappingPort::identity()));

    let err = translator.translate_bytes(b"%PDF-1.7 not a package", "fr").unwrap_err();
    assert!(matches!(err, PipelineError::UnsupportedFileKind(_)));

    let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    zip.start_file("hello.txt", zip::write::SimpleFileOptions::default()).unwrap();
    std::io::Write::write_all(&mut zip, b"hi").unwrap();
    let plain_zip = zip.finish().unwrap().into_inner();
    let err = translator.translate_bytes(&plain_zip, "fr").unwrap_err();
    assert!(matches!(err, PipelineError::UnsupportedFileKind(_)));
}

#[test]
fn test_saved_output_opens_as_word_package() {
    let docx = DocxBuilder::new().text("Save me").build();
    let output = translate(Arc::new(MappingPort::identity().with("Save me", "Sauve-moi")), &docx, "fr");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("TranslatedDocument_test.docx");
    output.save(&path).unwrap();

    let package = Package::open(&path).unwrap();
    assert_eq!(package.document().unwrap().paragraphs()[0].text(), "Sauve-moi");
}
