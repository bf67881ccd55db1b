use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use minijinja::context;
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{read_form_fields, OptionalUser};
use crate::features::blog::dtos::BlogFormDto;
use crate::features::blog::services::BlogService;
use crate::modules::storage::PhotoStore;
use crate::shared::forms::FormErrors;
use crate::shared::templates;

#[derive(Clone)]
pub struct BlogState {
    pub blog: Arc<BlogService>,
    pub photos: Arc<PhotoStore>,
}

enum FormMode {
    Create,
    Update(i64),
}

impl FormMode {
    fn action(&self) -> String {
        match self {
            FormMode::Create => "/blog/create".to_string(),
            FormMode::Update(id) => format!("/blog/{}/update", id),
        }
    }

    fn title(&self) -> &'static str {
        match self {
            FormMode::Create => "New post",
            FormMode::Update(_) => "Edit post",
        }
    }
}

/// Published posts only
pub async fn list_posts(
    State(state): State<BlogState>,
    OptionalUser(user): OptionalUser,
) -> Result<Html<String>> {
    let posts = state.blog.list_published().await?;

    let body = templates::render("blog/list.jinja", context! { posts, user })?;
    Ok(Html(body))
}

/// Post detail; every read bumps the view counter
pub async fn post_detail(
    State(state): State<BlogState>,
    Path(id): Path<i64>,
    OptionalUser(user): OptionalUser,
) -> Result<Html<String>> {
    let post = state.blog.read_detail(id).await?;

    let body = templates::render("blog/detail.jinja", context! { post, user })?;
    Ok(Html(body))
}

pub async fn new_post_form(State(_state): State<BlogState>) -> Result<Html<String>> {
    render_post_form(FormMode::Create, BlogFormDto::default(), FormErrors::new())
}

pub async fn create_post(
    State(state): State<BlogState>,
    mut multipart: Multipart,
) -> Result<Response> {
    let (fields, photo) = read_form_fields(&mut multipart, "photo").await?;
    let dto = BlogFormDto::from_fields(&fields);

    let mut errors = FormErrors::new();
    if let Err(e) = dto.validate() {
        errors.extend_from_validation(&e);
    }
    if let Some(photo) = &photo {
        if let Err(message) = state.photos.check(photo) {
            errors.add("photo", message);
        }
    }

    if !errors.is_empty() {
        return Ok(render_post_form(FormMode::Create, dto, errors)?.into_response());
    }

    let photo_path = match &photo {
        Some(photo) => Some(state.photos.store(photo).await?),
        None => None,
    };

    state.blog.create(dto, photo_path).await?;

    Ok(Redirect::to("/blog").into_response())
}

pub async fn edit_post_form(
    State(state): State<BlogState>,
    Path(id): Path<i64>,
) -> Result<Html<String>> {
    let post = state.blog.get(id).await?;

    let dto = BlogFormDto {
        title: post.title,
        description: post.description,
    };

    render_post_form(FormMode::Update(id), dto, FormErrors::new())
}

pub async fn update_post(
    State(state): State<BlogState>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Result<Response> {
    let (fields, photo) = read_form_fields(&mut multipart, "photo").await?;
    let dto = BlogFormDto::from_fields(&fields);

    let mut errors = FormErrors::new();
    if let Err(e) = dto.validate() {
        errors.extend_from_validation(&e);
    }
    if let Some(photo) = &photo {
        if let Err(message) = state.photos.check(photo) {
            errors.add("photo", message);
        }
    }

    if !errors.is_empty() {
        return Ok(render_post_form(FormMode::Update(id), dto, errors)?.into_response());
    }

    let photo_path = match &photo {
        Some(photo) => Some(state.photos.store(photo).await?),
        None => None,
    };

    state.blog.update(id, dto, photo_path).await?;

    Ok(Redirect::to(&format!("/blog/{}", id)).into_response())
}

/// Deletion confirmation page
pub async fn delete_post_confirm(
    State(state): State<BlogState>,
    Path(id): Path<i64>,
) -> Result<Html<String>> {
    let post = state.blog.get(id).await?;

    let body = templates::render("blog/confirm_delete.jinja", context! { post })?;
    Ok(Html(body))
}

pub async fn delete_post(State(state): State<BlogState>, Path(id): Path<i64>) -> Result<Redirect> {
    state.blog.delete(id).await?;
    Ok(Redirect::to("/blog"))
}

/// Flip the published flag and return to the list
pub async fn toggle_publish(
    State(state): State<BlogState>,
    Path(id): Path<i64>,
) -> Result<Redirect> {
    state.blog.toggle_published(id).await?;
    Ok(Redirect::to("/blog"))
}

fn render_post_form(mode: FormMode, post: BlogFormDto, errors: FormErrors) -> Result<Html<String>> {
    let body = templates::render(
        "blog/form.jinja",
        context! {
            title => mode.title(),
            action => mode.action(),
            post,
            errors,
        },
    )?;
    Ok(Html(body))
}
