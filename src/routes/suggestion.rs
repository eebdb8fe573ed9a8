use crate::db::Repository;
use crate::forms::{self, FieldErrors};
use crate::helpers::ViewError;
use crate::routes::see_other;
use crate::views::Templates;
use actix_web::{get, post, web, HttpResponse};
use tera::Context;

fn render_form(
    templates: &Templates,
    form: &forms::SuggestionForm,
    errors: &FieldErrors,
) -> Result<HttpResponse, ViewError> {
    let mut context = Context::new();
    context.insert("form", form);
    context.insert("errors", errors);
    templates.render("suggestion_form.html", &context)
}

#[tracing::instrument(name = "Suggestion form.", skip_all)]
#[get("/suggest/")]
pub async fn form_handler(templates: web::Data<Templates>) -> Result<HttpResponse, ViewError> {
    render_form(&templates, &forms::SuggestionForm::default(), &FieldErrors::new())
}

#[tracing::instrument(name = "Submit suggestion.", skip_all)]
#[post("/suggest/")]
pub async fn submit_handler(
    form: web::Form<forms::SuggestionForm>,
    repository: web::Data<dyn Repository>,
    templates: web::Data<Templates>,
) -> Result<HttpResponse, ViewError> {
    let form = form.into_inner();
    if let Err(errors) = form.check() {
        tracing::info!("Rejected suggestion: {:?}", errors);
        return render_form(&templates, &form, &errors);
    }

    let suggestion = repository.insert_suggestion(form.into()).await?;
    tracing::info!("New suggestion {} has been saved", suggestion.id);

    Ok(see_other("/"))
}
