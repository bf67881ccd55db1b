use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use minijinja::context;
use validator::Validate;

use crate::core::error::Result;
use crate::features::contacts::dtos::ContactFormDto;
use crate::features::contacts::services::ContactService;
use crate::shared::forms::FormErrors;
use crate::shared::templates;

/// Contact page
pub async fn contact_form(State(_service): State<Arc<ContactService>>) -> Result<Html<String>> {
    render_contact_form(ContactFormDto::default(), FormErrors::new())
}

/// Accept a contact message and send the visitor back to the home page.
pub async fn submit_contact(
    State(service): State<Arc<ContactService>>,
    Form(dto): Form<ContactFormDto>,
) -> Result<Response> {
    if let Err(e) = dto.validate() {
        let mut errors = FormErrors::new();
        errors.extend_from_validation(&e);
        return Ok(render_contact_form(dto, errors)?.into_response());
    }

    service.create(dto).await?;

    Ok(Redirect::to("/").into_response())
}

fn render_contact_form(contact: ContactFormDto, errors: FormErrors) -> Result<Html<String>> {
    let body = templates::render("contacts/form.jinja", context! { contact, errors })?;
    Ok(Html(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::TestServer;

    // The GET side has no database dependency, so the routed handler can be
    // exercised end to end.
    #[tokio::test]
    async fn test_contact_form_renders() {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();
        let service = Arc::new(ContactService::new(pool));
        let app = crate::features::contacts::routes::routes(service);

        let server = TestServer::new(app).unwrap();
        let response = server.get("/contacts").await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert!(response.text().contains("form"));
    }
}
