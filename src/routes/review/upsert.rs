use crate::db::Repository;
use crate::forms::{FieldErrors, ReviewForm};
use crate::helpers::ViewError;
use crate::middleware::authentication::LoggedUser;
use crate::models::{self, ReviewKind};
use crate::routes::see_other;
use crate::views::{MovieItem, Templates};
use actix_web::{get, post, web, HttpResponse};
use chrono::Utc;
use tera::Context;

/// Target of a review form: a movie, a kind and, when editing, the review.
struct Target {
    movie: models::Movie,
    kind: ReviewKind,
    review: Option<models::Review>,
}

impl Target {
    async fn load(
        repository: &dyn Repository,
        movie_id: i32,
        kind: ReviewKind,
        review_id: Option<i32>,
    ) -> Result<Self, ViewError> {
        let movie = repository.fetch_movie(movie_id).await?.ok_or(ViewError::NotFound)?;
        let review = match review_id {
            Some(id) => {
                let review = repository
                    .fetch_review(kind, id)
                    .await?
                    .filter(|review| review.movie_id == movie.id)
                    .ok_or(ViewError::NotFound)?;
                Some(review)
            }
            None => None,
        };

        Ok(Self { movie, kind, review })
    }

    fn action(&self) -> String {
        match &self.review {
            Some(review) => format!("/review/movie/{}/{}/{}/edit/", self.movie.id, self.kind, review.id),
            None => format!("/review/movie/{}/{}/new/", self.movie.id, self.kind),
        }
    }

    fn render(
        &self,
        templates: &Templates,
        form: &ReviewForm,
        errors: &FieldErrors,
    ) -> Result<HttpResponse, ViewError> {
        let mut context = Context::new();
        context.insert("movie", &MovieItem::from(&self.movie));
        context.insert("form", form);
        context.insert("errors", errors);
        context.insert("kind_label", self.kind.label());
        context.insert("editing", &self.review.is_some());
        context.insert("action", &self.action());
        context.insert("note_field", self.kind.note_field());
        context.insert("note_label", self.kind.note_label());
        context.insert("note", form.note(self.kind));
        context.insert("note_errors", errors.get(self.kind.note_field()));
        templates.render("review_form.html", &context)
    }
}

/// Shared body of the four review form routes. Without `form` the page is
/// rendered, prefilled when editing; with it the review is validated and
/// saved.
async fn add_or_edit(
    user: &models::User,
    target: Target,
    form: Option<ReviewForm>,
    repository: &dyn Repository,
    templates: &Templates,
) -> Result<HttpResponse, ViewError> {
    let form = match form {
        Some(form) => form,
        None => {
            let form = target.review.as_ref().map(ReviewForm::from).unwrap_or_default();
            return target.render(templates, &form, &FieldErrors::new());
        }
    };

    if let Err(errors) = form.check(target.kind) {
        return target.render(templates, &form, &errors);
    }

    let saved = match target.review {
        Some(mut review) => {
            form.update(&mut review);
            repository.update_review(review).await?
        }
        None => {
            let now = Utc::now();
            let mut review = form.into_review(target.kind);
            review.movie_id = target.movie.id;
            review.reviewer_id = user.id;
            review.pub_date = now;
            repository.insert_review(review, now).await?
        }
    };
    tracing::info!(
        "{} {} of movie {} saved by {}",
        saved.kind.label(),
        saved.id,
        saved.movie_id,
        user.username
    );

    Ok(see_other(&saved.absolute_url()))
}

#[tracing::instrument(name = "New review form.", skip_all)]
#[get("/movie/{movie_id:\\d+}/{kind:initial|rewatch}/new/")]
pub async fn add_form_handler(
    user: LoggedUser,
    path: web::Path<(i32, ReviewKind)>,
    repository: web::Data<dyn Repository>,
    templates: web::Data<Templates>,
) -> Result<HttpResponse, ViewError> {
    let (movie_id, kind) = path.into_inner();
    let target = Target::load(repository.get_ref(), movie_id, kind, None).await?;
    add_or_edit(&user, target, None, repository.get_ref(), &templates).await
}

#[tracing::instrument(name = "Add review.", skip_all)]
#[post("/movie/{movie_id:\\d+}/{kind:initial|rewatch}/new/")]
pub async fn add_handler(
    user: LoggedUser,
    path: web::Path<(i32, ReviewKind)>,
    form: web::Form<ReviewForm>,
    repository: web::Data<dyn Repository>,
    templates: web::Data<Templates>,
) -> Result<HttpResponse, ViewError> {
    let (movie_id, kind) = path.into_inner();
    let target = Target::load(repository.get_ref(), movie_id, kind, None).await?;
    add_or_edit(&user, target, Some(form.into_inner()), repository.get_ref(), &templates).await
}

#[tracing::instrument(name = "Edit review form.", skip_all)]
#[get("/movie/{movie_id:\\d+}/{kind:initial|rewatch}/{review_id:\\d+}/edit/")]
pub async fn edit_form_handler(
    user: LoggedUser,
    path: web::Path<(i32, ReviewKind, i32)>,
    repository: web::Data<dyn Repository>,
    templates: web::Data<Templates>,
) -> Result<HttpResponse, ViewError> {
    let (movie_id, kind, review_id) = path.into_inner();
    let target = Target::load(repository.get_ref(), movie_id, kind, Some(review_id)).await?;
    add_or_edit(&user, target, None, repository.get_ref(), &templates).await
}

#[tracing::instrument(name = "Edit review.", skip_all)]
#[post("/movie/{movie_id:\\d+}/{kind:initial|rewatch}/{review_id:\\d+}/edit/")]
pub async fn edit_handler(
    user: LoggedUser,
    path: web::Path<(i32, ReviewKind, i32)>,
    form: web::Form<ReviewForm>,
    repository: web::Data<dyn Repository>,
    templates: web::Data<Templates>,
) -> Result<HttpResponse, ViewError> {
    let (movie_id, kind, review_id) = path.into_inner();
    let target = Target::load(repository.get_ref(), movie_id, kind, Some(review_id)).await?;
    add_or_edit(&user, target, Some(form.into_inner()), repository.get_ref(), &templates).await
}
