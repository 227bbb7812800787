use axum::extract::{Multipart, State};
use axum::response::Response;

use easyflow_core::models::row::StudentRow;
use easyflow_export::docx::DocxTemplate;
use easyflow_sheet::SheetFormat;

use crate::error::PageError;
use crate::pages::Notice;
use crate::session::Session;
use crate::state::AppState;

struct UploadedFile {
    name: String,
    bytes: Vec<u8>,
}

/// Accept a spreadsheet and a Word template, load the rows and keep both
/// in the session.
pub async fn upload(State(state): State<AppState>, multipart: Multipart) -> Response {
    let parsed = parse_upload(multipart).await;

    let mut session = state.session.lock().await;
    let outcome = parsed.map(|inputs| load_into(&mut session, inputs));
    super::respond(&state, &session, outcome)
}

/// Spreadsheet loading and template compilation run off the async workers.
async fn parse_upload(multipart: Multipart) -> Result<ParsedInputs, PageError> {
    let (spreadsheet, template) = read_upload(multipart).await?;
    tokio::task::spawn_blocking(move || parse(spreadsheet, template)).await?
}

async fn read_upload(
    mut multipart: Multipart,
) -> Result<(UploadedFile, UploadedFile), PageError> {
    let mut spreadsheet = None;
    let mut template = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| PageError::BadRequest(format!("Envío de archivos no válido: {e}")))?
    {
        let slot = match field.name() {
            Some("spreadsheet") => &mut spreadsheet,
            Some("template") => &mut template,
            _ => continue,
        };
        let name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| PageError::BadRequest(format!("No se pudo leer el archivo {name}: {e}")))?;
        if !bytes.is_empty() {
            *slot = Some(UploadedFile {
                name,
                bytes: bytes.to_vec(),
            });
        }
    }

    let spreadsheet = spreadsheet
        .ok_or_else(|| PageError::BadRequest("Sube tu archivo Excel.".to_string()))?;
    let template = template
        .ok_or_else(|| PageError::BadRequest("Sube tu plantilla de Word.".to_string()))?;
    Ok((spreadsheet, template))
}

struct ParsedInputs {
    spreadsheet_name: String,
    rows: Vec<StudentRow>,
    template_name: String,
    template: DocxTemplate,
}

fn parse(spreadsheet: UploadedFile, template: UploadedFile) -> Result<ParsedInputs, PageError> {
    let format = SheetFormat::from_file_name(&spreadsheet.name)?;
    let rows = easyflow_sheet::load_bytes(&spreadsheet.bytes, format)?;
    let parsed = DocxTemplate::from_bytes(&template.bytes)?;

    Ok(ParsedInputs {
        spreadsheet_name: spreadsheet.name,
        rows,
        template_name: template.name,
        template: parsed,
    })
}

fn load_into(session: &mut Session, inputs: ParsedInputs) -> Vec<Notice> {
    tracing::info!(
        spreadsheet = %inputs.spreadsheet_name,
        template = %inputs.template_name,
        rows = inputs.rows.len(),
        "inputs loaded"
    );
    let count = inputs.rows.len();
    session.load(
        inputs.spreadsheet_name,
        inputs.rows,
        inputs.template_name,
        inputs.template,
    );

    vec![Notice::success(format!(
        "Archivos cargados correctamente ({count} filas)."
    ))]
}
