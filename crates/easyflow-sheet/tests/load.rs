use std::io::{Cursor, Write};

use easyflow_core::models::scalar::Scalar;
use easyflow_sheet::error::LoadError;
use easyflow_sheet::{load_bytes, load_path, read_table, SheetFormat};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <sheets><sheet name="Notas" sheetId="1" r:id="rId7"/></sheets>
</workbook>"#;

const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
  <Relationship Id="rId7" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/notas.xml"/>
</Relationships>"#;

const SHARED: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="6" uniqueCount="6">
  <si><t>Nombre del Alumno</t></si>
  <si><t>Mat</t></si>
  <si><t>Fis</t></si>
  <si><t>Qui</t></si>
  <si><t>Ana</t></si>
  <si><r><t>Lu</t></r><r><rPr><b/></rPr><t>is</t></r><rPh><t>ルイス</t></rPh></si>
</sst>"#;

const SHEET: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <sheetData>
    <row r="1">
      <c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c>
      <c r="C1" t="s"><v>2</v></c><c r="D1" t="s"><v>3</v></c>
    </row>
    <row r="2">
      <c r="A2" t="s"><v>4</v></c><c r="B2"><v>8</v></c>
      <c r="C2"><v>9</v></c><c r="D2"><v>7</v></c>
    </row>
    <row r="3" spans="1:4"><c r="A3" s="1"/></row>
    <row r="4">
      <c r="A4" t="s"><v>5</v></c><c r="B4"><v>6.5</v></c>
      <c r="C4" t="inlineStr"><is><t>NP</t></is></c><c r="D4" t="str"><f>B4+1.5</f><v>8</v></c>
    </row>
  </sheetData>
</worksheet>"#;

fn xlsx(parts: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, body) in parts {
        writer
            .start_file(name.to_string(), SimpleFileOptions::default())
            .unwrap();
        writer.write_all(body.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn grades_workbook() -> Vec<u8> {
    xlsx(&[
        ("xl/workbook.xml", WORKBOOK),
        ("xl/_rels/workbook.xml.rels", RELS),
        ("xl/sharedStrings.xml", SHARED),
        ("xl/worksheets/notas.xml", SHEET),
    ])
}

#[test]
fn xlsx_rows_are_read_in_file_order() {
    let rows = load_bytes(&grades_workbook(), SheetFormat::Xlsx).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].student_name, "Ana");
    assert_eq!(rows[0].math_score, Scalar::Number(8.0));
    assert_eq!(rows[0].physics_score, Scalar::Number(9.0));
    assert_eq!(rows[0].chemistry_score, Scalar::Number(7.0));

    // Rich text runs joined, phonetic hint dropped.
    assert_eq!(rows[1].student_name, "Luis");
    assert_eq!(rows[1].math_score, Scalar::Number(6.5));
    assert_eq!(rows[1].physics_score, Scalar::Text("NP".into()));
    assert_eq!(rows[1].chemistry_score, Scalar::Text("8".into()));
}

#[test]
fn xlsx_without_workbook_falls_back_to_first_sheet() {
    let sheet = r#"<worksheet><sheetData>
        <row><c t="inlineStr"><is><t>Qui</t></is></c><c t="inlineStr"><is><t>Fis</t></is></c>
             <c t="inlineStr"><is><t>Mat</t></is></c><c t="inlineStr"><is><t>Nombre del Alumno</t></is></c></row>
        <row><c><v>1</v></c><c><v>2</v></c><c><v>3</v></c><c t="inlineStr"><is><t>Eva</t></is></c></row>
    </sheetData></worksheet>"#;
    let bytes = xlsx(&[("xl/worksheets/sheet1.xml", sheet)]);

    let rows = load_bytes(&bytes, SheetFormat::Xlsx).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].student_name, "Eva");
    assert_eq!(rows[0].math_score, Scalar::Number(3.0));
    assert_eq!(rows[0].chemistry_score, Scalar::Number(1.0));
}

#[test]
fn xlsx_missing_columns_is_a_schema_error() {
    let sheet = r#"<worksheet><sheetData>
        <row><c r="A1" t="inlineStr"><is><t>Nombre del Alumno</t></is></c><c r="C1" t="inlineStr"><is><t>Fis</t></is></c></row>
        <row><c r="A2" t="inlineStr"><is><t>Ana</t></is></c><c r="C2"><v>9</v></c></row>
    </sheetData></worksheet>"#;
    let bytes = xlsx(&[("xl/worksheets/sheet1.xml", sheet)]);

    match load_bytes(&bytes, SheetFormat::Xlsx) {
        Err(LoadError::Schema { missing }) => assert_eq!(missing, vec!["Mat", "Qui"]),
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[test]
fn sparse_cells_keep_their_columns() {
    let table = read_table(&grades_workbook(), SheetFormat::Xlsx).unwrap();
    assert_eq!(table.headers, vec!["Nombre del Alumno", "Mat", "Fis", "Qui"]);
    // The styled-only row 3 carries no values and is not a data row.
    assert_eq!(table.rows.len(), 2);
}

#[test]
fn not_a_zip_is_an_xlsx_error() {
    let err = load_bytes(b"definitely not a workbook", SheetFormat::Xlsx).unwrap_err();
    assert!(matches!(err, LoadError::Xlsx(_)));
}

#[test]
fn csv_with_semicolons_and_bom() {
    let input = "\u{feff}Nombre del Alumno;Mat;Fis;Qui;Grupo\nAna;8;9;7;A\n;;;;\nLuis;6;7;8;B\n";
    let rows = load_bytes(input.as_bytes(), SheetFormat::Csv).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].student_name, "Ana");
    assert_eq!(rows[1].student_name, "Luis");
    assert_eq!(rows[1].chemistry_score.to_string(), "8");
}

#[test]
fn csv_short_rows_leave_scores_empty() {
    let input = "Nombre del Alumno,Mat,Fis,Qui\n\"Pérez, Ana\",10\n";
    let rows = load_bytes(input.as_bytes(), SheetFormat::Csv).unwrap();

    assert_eq!(rows[0].student_name, "Pérez, Ana");
    assert_eq!(rows[0].math_score, Scalar::Number(10.0));
    assert_eq!(rows[0].physics_score, Scalar::Empty);
}

#[test]
fn empty_csv_reports_every_column_missing() {
    match load_bytes(b"", SheetFormat::Csv) {
        Err(LoadError::Schema { missing }) => assert_eq!(missing.len(), 4),
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[test]
fn load_path_dispatches_on_extension() {
    let dir = tempfile::tempdir().unwrap();

    let xlsx_path = dir.path().join("Notas.XLSX");
    std::fs::write(&xlsx_path, grades_workbook()).unwrap();
    assert_eq!(load_path(&xlsx_path).unwrap().len(), 2);

    let csv_path = dir.path().join("notas.csv");
    std::fs::write(&csv_path, "Nombre del Alumno,Mat,Fis,Qui\nAna,8,9,7\n").unwrap();
    assert_eq!(load_path(&csv_path).unwrap()[0].student_name, "Ana");

    let ods_path = dir.path().join("notas.ods");
    std::fs::write(&ods_path, b"").unwrap();
    assert!(matches!(
        load_path(&ods_path),
        Err(LoadError::UnsupportedFormat(_))
    ));
}

#[test]
fn column_references_map_to_indices() {
    use easyflow_sheet::xlsx::column_index;

    assert_eq!(column_index("A1"), Some(0));
    assert_eq!(column_index("D7"), Some(3));
    assert_eq!(column_index("AB12"), Some(27));
    assert_eq!(column_index("12"), None);
    assert_eq!(column_index("XFD1"), Some(16_383));
    assert_eq!(column_index("XFE1"), None);
    assert_eq!(column_index("ZZZZZZZZZZZZZZZZ1"), None);
}

fn single_cell_sheet(reference: &str) -> Vec<u8> {
    let sheet = format!(
        r#"<worksheet><sheetData><row r="1"><c r="{reference}"><v>1</v></c></row></sheetData></worksheet>"#
    );
    xlsx(&[("xl/worksheets/sheet1.xml", &sheet)])
}

#[test]
fn references_past_the_last_column_are_rejected() {
    for reference in ["ZZZZZZ1", "ZZZZZZZZZZZZZZZZ1", "XFE1"] {
        match read_table(&single_cell_sheet(reference), SheetFormat::Xlsx) {
            Err(LoadError::Xlsx(msg)) => assert!(msg.contains(reference), "{msg}"),
            other => panic!("expected xlsx error for {reference}, got {other:?}"),
        }
    }
}

#[test]
fn the_last_column_is_still_readable() {
    let table = read_table(&single_cell_sheet("XFD1"), SheetFormat::Xlsx).unwrap();
    assert_eq!(table.headers.len(), 16_384);
    assert_eq!(table.headers[16_383], "1");
}
