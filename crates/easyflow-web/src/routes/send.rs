use axum::Form;
use axum::extract::State;
use axum::response::Response;
use serde::Deserialize;

use easyflow_notify::Outgoing;

use crate::error::PageError;
use crate::pages::Notice;
use crate::session::Session;
use crate::state::{AppState, MailStatus};

#[derive(Debug, Deserialize)]
pub struct SendForm {
    pub recipient: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
}

/// Mail every artifact of the session to one recipient.
pub async fn send(State(state): State<AppState>, Form(form): Form<SendForm>) -> Response {
    let session = state.session.lock().await;
    let outcome = run(&state, &session, form).await;
    super::respond(&state, &session, outcome)
}

async fn run(
    state: &AppState,
    session: &Session,
    form: SendForm,
) -> Result<Vec<Notice>, PageError> {
    let mailer = match &state.mail {
        MailStatus::Ready(mailer) => mailer.clone(),
        MailStatus::Disabled(reason) => {
            return Err(PageError::Unavailable(format!(
                "El envío de correo no está configurado: {reason}"
            )));
        }
    };
    if form.recipient.trim().is_empty() {
        return Err(PageError::BadRequest("Indica un destinatario.".to_string()));
    }

    let outgoing = Outgoing {
        recipient: form.recipient.trim().to_string(),
        subject: form.subject,
        body: form.body,
        attachments: session.artifacts().iter().map(|f| f.path.clone()).collect(),
    };

    let delivery = tokio::task::spawn_blocking(move || mailer.send(&outgoing)).await??;

    Ok(vec![Notice::success(format!(
        "Correo enviado a {} con {} adjuntos.",
        delivery.recipient, delivery.attachments
    ))])
}
