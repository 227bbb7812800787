use easyflow_core::models::artifact::ArtifactKind;
use easyflow_core::models::chapter::Chapter;
use easyflow_core::models::row::StudentRow;
use easyflow_export::generate::chapters_for;
use easyflow_export::layout::{footer_text, wrap_text, FontFamily, FontStyle};
use easyflow_export::pdf::ReportBuilder;

fn example_rows() -> Vec<StudentRow> {
    vec![
        StudentRow::new("Ana", 8i64, 9i64, 7i64),
        StudentRow::new("Luis", 6i64, 7i64, 8i64),
    ]
}

#[test]
fn one_page_per_chapter_when_bodies_fit() {
    let report = ReportBuilder::new("Reporte de Notas")
        .author("EasyFlow")
        .chapters(chapters_for(&example_rows()))
        .build();

    let titles: Vec<&str> = report.chapters().iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Ana", "Luis"]);

    let layout = report.layout();
    assert_eq!(layout.page_count(), 2);
    assert_eq!(layout.footers(), vec!["Página 1", "Página 2"]);

    for page in &layout.pages {
        let header = page.header.as_ref().expect("header on every page");
        assert_eq!(header.text, "Reporte de Notas");
        assert_eq!(header.style, FontStyle::Bold);
        assert_eq!(page.footer.style, FontStyle::Italic);
    }

    let first: Vec<&str> = layout.pages[0].body.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(first, vec!["Ana", "Mat: 8", "Fis: 9", "Qui: 7"]);
    assert_eq!(layout.pages[0].body[0].style, FontStyle::Bold);
    assert_eq!(layout.pages[0].body[1].style, FontStyle::Regular);
}

#[test]
fn body_lines_sit_below_the_title_block() {
    let layout = ReportBuilder::new("T")
        .chapter(Chapter::new("Ana", "Mat: 8"))
        .build()
        .layout();

    let body = &layout.pages[0].body;
    let header_y = layout.pages[0].header.as_ref().unwrap().y_mm;
    assert!(body[0].y_mm > header_y);
    assert!(body[1].y_mm > body[0].y_mm);
    assert!(layout.pages[0].footer.y_mm > body[1].y_mm);
}

#[test]
fn empty_report_has_a_single_page() {
    let layout = ReportBuilder::new("Vacío").build().layout();
    assert_eq!(layout.page_count(), 1);
    assert_eq!(layout.footers(), vec!["Página 1"]);
    assert!(layout.pages[0].body.is_empty());
}

#[test]
fn long_bodies_flow_onto_following_pages() {
    let body = (1..=60)
        .map(|i| format!("Línea {i}"))
        .collect::<Vec<_>>()
        .join("\n");
    let layout = ReportBuilder::new("Largo")
        .chapter(Chapter::new("Uno", body))
        .chapter(Chapter::new("Dos", "corto"))
        .build()
        .layout();

    assert!(layout.page_count() > 2);

    let numbers: Vec<usize> = layout.pages.iter().map(|p| p.number).collect();
    let expected: Vec<usize> = (1..=layout.page_count()).collect();
    assert_eq!(numbers, expected);
    for page in &layout.pages {
        assert_eq!(page.footer.text, footer_text(page.number));
    }

    // Nothing is placed inside the bottom margin.
    for page in &layout.pages {
        for line in &page.body {
            assert!(line.y_mm < 297.0 - 20.0);
        }
    }

    let last = layout.pages.last().unwrap();
    assert_eq!(last.body[0].text, "Dos");
}

#[test]
fn blank_title_omits_the_header() {
    let layout = ReportBuilder::new("").build().layout();
    assert!(layout.pages[0].header.is_none());
}

#[test]
fn blank_author_is_left_unset() {
    assert_eq!(ReportBuilder::new("T").author("  ").build().author(), None);
    assert_eq!(
        ReportBuilder::new("T").author("EasyFlow").build().author(),
        Some("EasyFlow")
    );
}

#[test]
fn chapter_fonts_map_to_standard_faces() {
    let layout = ReportBuilder::new("T")
        .chapter(Chapter::new("A", "b").with_font("Courier New", 10.0))
        .chapter(Chapter::new("C", "d").with_font("Times New Roman", 14.0))
        .build()
        .layout();

    assert_eq!(layout.pages[0].body[0].family, FontFamily::Courier);
    assert_eq!(layout.pages[0].body[0].size_pt, 10.0);
    assert_eq!(layout.pages[1].body[0].family, FontFamily::Times);
    assert_eq!(FontFamily::from_name("Arial"), FontFamily::Helvetica);
}

#[test]
fn pdf_is_written_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Resumen_Notas.pdf");

    let file = ReportBuilder::new("Reporte de Notas")
        .author("EasyFlow")
        .chapters(chapters_for(&example_rows()))
        .build()
        .write_to(&path)
        .unwrap();

    assert_eq!(file.kind, ArtifactKind::Report);
    assert_eq!(file.file_name(), "Resumen_Notas.pdf");
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn writing_into_a_missing_directory_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("r.pdf");

    let err = ReportBuilder::new("T").build().write_to(&path).unwrap_err();
    assert!(matches!(err, easyflow_export::error::ExportError::Io(_)));
}

#[test]
fn wrapping_respects_the_line_budget() {
    assert_eq!(wrap_text("uno dos tres", 7), vec!["uno dos", "tres"]);
    assert_eq!(wrap_text("", 10), vec![""]);
    assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    assert_eq!(wrap_text("a abcdefgh b", 4), vec!["a", "abcd", "efgh", "b"]);
}
