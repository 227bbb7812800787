use easyflow_core::date::format_date;
use easyflow_core::error::CoreError;
use easyflow_core::file_names::{student_document, with_suffix, SUMMARY_REPORT};
use easyflow_core::models::chapter::Chapter;
use easyflow_core::models::context::RenderContext;
use easyflow_core::models::row::StudentRow;
use easyflow_core::models::scalar::Scalar;
use easyflow_core::models::sender::SenderIdentity;
use easyflow_core::schema::{column, missing_columns};

#[test]
fn whole_numbers_display_without_fraction() {
    assert_eq!(Scalar::Number(8.0).to_string(), "8");
    assert_eq!(Scalar::Number(7.5).to_string(), "7.5");
    assert_eq!(Scalar::Text("NP".into()).to_string(), "NP");
    assert_eq!(Scalar::Empty.to_string(), "");
}

#[test]
fn cell_text_is_classified() {
    assert_eq!(Scalar::from_cell(" 9 "), Scalar::Number(9.0));
    assert_eq!(Scalar::from_cell("6.25"), Scalar::Number(6.25));
    assert_eq!(Scalar::from_cell("   "), Scalar::Empty);
    assert_eq!(Scalar::from_cell("Ausente"), Scalar::Text("Ausente".into()));
    assert_eq!(Scalar::from_cell("NaN"), Scalar::Text("NaN".into()));
}

#[test]
fn scalars_serialize_as_json_numbers_or_strings() {
    let values = vec![
        Scalar::Number(8.0),
        Scalar::Number(6.5),
        Scalar::Text("Ana".into()),
        Scalar::Empty,
    ];
    let json = serde_json::to_string(&values).unwrap();
    assert_eq!(json, r#"[8,6.5,"Ana",""]"#);
}

#[test]
fn context_binds_row_and_date() {
    let row = StudentRow::new("Ana", 8i64, 9i64, 7i64);
    let ctx = RenderContext::for_row(&row, "05/03/24", None);

    let json = ctx.to_json().unwrap();
    assert_eq!(json["nombre_alumno"], "Ana");
    assert_eq!(json["nota_mat"], 8);
    assert_eq!(json["nota_fis"], 9);
    assert_eq!(json["nota_qui"], 7);
    assert_eq!(json["fecha"], "05/03/24");
    assert_eq!(ctx.get("nombre"), Some(&Scalar::Empty));
    assert_eq!(json["telefono"], "");
    assert_eq!(json["correo"], "");
    assert_eq!(ctx.len(), 8);
}

#[test]
fn context_includes_sender_when_configured() {
    let row = StudentRow::new("Luis", 6i64, 7i64, 8i64);
    let sender = SenderIdentity {
        name: "Secretaría".into(),
        phone: "555-0100".into(),
        email: "secretaria@example.com".into(),
    };
    let ctx = RenderContext::for_row(&row, "01/01/25", Some(&sender));

    assert_eq!(ctx.get("nombre"), Some(&Scalar::Text("Secretaría".into())));
    assert_eq!(ctx.get("telefono"), Some(&Scalar::Text("555-0100".into())));
    assert_eq!(
        ctx.get("correo"),
        Some(&Scalar::Text("secretaria@example.com".into()))
    );
}

#[test]
fn row_from_columns_reports_missing_field() {
    let err = StudentRow::from_columns(|name| {
        (name != column::PHYSICS).then(|| Scalar::from_cell("5"))
    })
    .unwrap_err();

    assert!(matches!(err, CoreError::MissingField(ref f) if f == "Fis"));
}

#[test]
fn row_from_columns_trims_the_name() {
    let row = StudentRow::from_columns(|name| {
        Some(match name {
            column::STUDENT_NAME => Scalar::Text("  Ana ".into()),
            _ => Scalar::Number(10.0),
        })
    })
    .unwrap();

    assert_eq!(row.student_name, "Ana");
    assert_eq!(row.math_score, Scalar::Number(10.0));
}

#[test]
fn chapter_for_row_lists_each_subject() {
    let row = StudentRow::new("Ana", 8i64, 9i64, 7i64);
    let chapter = Chapter::for_row(&row);

    assert_eq!(chapter.title, "Ana");
    assert_eq!(chapter.body, "Mat: 8\nFis: 9\nQui: 7");
    assert_eq!(chapter.font, "Arial");
    assert_eq!(chapter.size, 12.0);
}

#[test]
fn document_names_are_derived_from_student_name() {
    assert_eq!(student_document("Ana"), "Notas_de_Ana.docx");
    assert_eq!(student_document("María José"), "Notas_de_María José.docx");
    assert_eq!(student_document("a/b:c"), "Notas_de_a_b_c.docx");
    assert_eq!(with_suffix("Notas_de_Ana.docx", 2), "Notas_de_Ana_2.docx");
    assert_eq!(SUMMARY_REPORT, "Resumen_Notas.pdf");
}

#[test]
fn missing_columns_are_listed_in_order() {
    let headers = ["Nombre del Alumno ", "Qui", "Extra"];
    assert_eq!(missing_columns(&headers), vec!["Mat", "Fis"]);

    let complete = ["Mat", "Fis", "Qui", "Nombre del Alumno"];
    assert!(missing_columns(&complete).is_empty());
}

#[test]
fn dates_use_day_month_short_year() {
    let date = jiff::civil::date(2024, 3, 5);
    assert_eq!(format_date(date), "05/03/24");
}
