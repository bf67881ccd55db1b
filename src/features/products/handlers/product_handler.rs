use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use minijinja::context;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{read_form_fields, OptionalUser};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::categories::CategoryService;
use crate::features::products::dtos::{ProductFormDto, ProductSubmission};
use crate::features::products::formset::{self, VersionRowForm};
use crate::features::products::models::Version;
use crate::features::products::policy::EditPolicy;
use crate::features::products::services::{ProductChanges, ProductService};
use crate::modules::storage::PhotoStore;
use crate::shared::forms::FormErrors;
use crate::shared::templates;

#[derive(Clone)]
pub struct ProductsState {
    pub products: Arc<ProductService>,
    pub categories: Arc<CategoryService>,
    pub photos: Arc<PhotoStore>,
}

enum FormMode {
    Create,
    Update(i64),
}

impl FormMode {
    fn action(&self) -> String {
        match self {
            FormMode::Create => "/products/create".to_string(),
            FormMode::Update(id) => format!("/products/{}/update", id),
        }
    }

    fn title(&self) -> &'static str {
        match self {
            FormMode::Create => "Add product",
            FormMode::Update(_) => "Edit product",
        }
    }
}

/// Product list page
pub async fn list_products(
    State(state): State<ProductsState>,
    OptionalUser(user): OptionalUser,
) -> Result<Html<String>> {
    let products = state.products.list().await?;

    let body = templates::render(
        "products/list.jinja",
        context! { products, user },
    )?;
    Ok(Html(body))
}

/// Product detail page with its version records
pub async fn product_detail(
    State(state): State<ProductsState>,
    Path(id): Path<i64>,
    OptionalUser(user): OptionalUser,
) -> Result<Html<String>> {
    let product = state.products.get(id).await?;
    let versions = state.products.versions_of(id).await?;

    let category_name = match product.category_id {
        Some(category_id) => state
            .categories
            .list()
            .await?
            .into_iter()
            .find(|c| c.id == category_id)
            .map(|c| c.name),
        None => None,
    };

    let body = templates::render(
        "products/detail.jinja",
        context! { product, versions, category_name, user },
    )?;
    Ok(Html(body))
}

/// Empty creation form
pub async fn new_product_form(
    user: AuthenticatedUser,
    State(state): State<ProductsState>,
) -> Result<Html<String>> {
    render_product_form(
        &state,
        &user,
        FormMode::Create,
        ProductFormDto::default(),
        Vec::new(),
        FormErrors::new(),
        EditPolicy::Owner,
    )
    .await
}

/// Create a product and its initial version rows. The submitting actor
/// becomes the owner.
pub async fn create_product(
    user: AuthenticatedUser,
    State(state): State<ProductsState>,
    mut multipart: Multipart,
) -> Result<Response> {
    let (fields, photo) = read_form_fields(&mut multipart, "photo").await?;
    let submission = ProductSubmission::from_fields(&fields, photo);

    let errors = validate_submission(&state, &submission);
    if !errors.is_empty() {
        return Ok(render_product_form(
            &state,
            &user,
            FormMode::Create,
            submission.product,
            submission.versions,
            errors,
            EditPolicy::Owner,
        )
        .await?
        .into_response());
    }

    let photo_path = store_photo(&state, &submission).await?;
    let changes = changes_from(submission.product.clone(), photo_path);

    match state
        .products
        .create_with_versions(user.id, changes, submission.versions.clone())
        .await
    {
        Ok(id) => Ok(Redirect::to(&format!("/products/{}", id)).into_response()),
        Err(AppError::Validation(service_errors)) => Ok(render_product_form(
            &state,
            &user,
            FormMode::Create,
            submission.product,
            submission.versions,
            service_errors,
            EditPolicy::Owner,
        )
        .await?
        .into_response()),
        Err(e) => Err(e),
    }
}

/// Edit form, prefilled with the product and its version rows. The policy is
/// resolved here so an unauthorized actor never sees the form.
pub async fn edit_product_form(
    user: AuthenticatedUser,
    State(state): State<ProductsState>,
    Path(id): Path<i64>,
) -> Result<Html<String>> {
    let product = state.products.get(id).await?;
    let policy = EditPolicy::resolve(&user, &product)?;

    let rows: Vec<VersionRowForm> = state
        .products
        .versions_of(id)
        .await?
        .into_iter()
        .enumerate()
        .map(|(index, version)| row_from_version(index, version))
        .collect();

    let dto = ProductFormDto {
        name: product.name.clone(),
        description: product.description.clone(),
        category_id: product.category_id,
        price: product.price,
        manufactured_at: product.manufactured_at,
    };

    render_product_form(
        &state,
        &user,
        FormMode::Update(id),
        dto,
        rows,
        FormErrors::new(),
        policy,
    )
    .await
}

/// Apply an edit to a product and its version rows.
///
/// Authorization resolves first: the owner, or an actor holding the full
/// moderator capability set, may proceed; anyone else is rejected before any
/// validation runs. Moderator submissions are clamped to the moderator field
/// subset. Parent and row validation complete before anything is written.
pub async fn update_product(
    user: AuthenticatedUser,
    State(state): State<ProductsState>,
    Path(id): Path<i64>,
    mut multipart: Multipart,
) -> Result<Response> {
    let product = state.products.get(id).await?;
    let policy = EditPolicy::resolve(&user, &product)?;

    let (fields, photo) = read_form_fields(&mut multipart, "photo").await?;
    let mut submission = ProductSubmission::from_fields(&fields, photo);
    submission.product = policy.restrict(submission.product, &product);
    if !policy.allows_photo() {
        submission.photo = None;
    }

    let errors = validate_submission(&state, &submission);
    if !errors.is_empty() {
        return Ok(render_product_form(
            &state,
            &user,
            FormMode::Update(id),
            submission.product,
            submission.versions,
            errors,
            policy,
        )
        .await?
        .into_response());
    }

    let photo_path = store_photo(&state, &submission).await?;
    let changes = changes_from(submission.product.clone(), photo_path);

    match state
        .products
        .update_with_versions(id, changes, submission.versions.clone())
        .await
    {
        Ok(()) => Ok(Redirect::to(&format!("/products/{}", id)).into_response()),
        Err(AppError::Validation(service_errors)) => Ok(render_product_form(
            &state,
            &user,
            FormMode::Update(id),
            submission.product,
            submission.versions,
            service_errors,
            policy,
        )
        .await?
        .into_response()),
        Err(e) => Err(e),
    }
}

/// Collect every field error from the submission: coercion errors, parent
/// constraints, row constraints and the photo checks.
fn validate_submission(state: &ProductsState, submission: &ProductSubmission) -> FormErrors {
    let mut errors = submission.parse_errors.clone();

    if let Err(e) = submission.product.validate() {
        errors.extend_from_validation(&e);
    }

    formset::validate_rows(&submission.versions, &mut errors);

    if let Some(photo) = &submission.photo {
        if let Err(message) = state.photos.check(photo) {
            errors.add("photo", message);
        }
    }

    errors
}

/// The photo hits the disk only after the whole submission validated.
async fn store_photo(
    state: &ProductsState,
    submission: &ProductSubmission,
) -> Result<Option<String>> {
    match &submission.photo {
        Some(photo) => Ok(Some(state.photos.store(photo).await?)),
        None => Ok(None),
    }
}

fn changes_from(dto: ProductFormDto, photo: Option<String>) -> ProductChanges {
    ProductChanges {
        name: dto.name,
        description: dto.description,
        category_id: dto.category_id,
        price: dto.price,
        manufactured_at: dto.manufactured_at,
        photo,
    }
}

fn row_from_version(index: usize, version: Version) -> VersionRowForm {
    VersionRowForm {
        index,
        id: Some(version.id),
        version_number: version.version_number,
        version_name: version.version_name,
        is_version_active: version.is_version_active,
        delete: false,
    }
}

async fn render_product_form(
    state: &ProductsState,
    user: &AuthenticatedUser,
    mode: FormMode,
    product: ProductFormDto,
    rows: Vec<VersionRowForm>,
    errors: FormErrors,
    policy: EditPolicy,
) -> Result<Html<String>> {
    let categories = state.categories.list().await?;
    let extra_index = rows.iter().map(|row| row.index + 1).max().unwrap_or(0);

    let body = templates::render(
        "products/form.jinja",
        context! {
            title => mode.title(),
            action => mode.action(),
            product,
            rows,
            extra_index,
            categories,
            errors,
            policy => policy.as_str(),
            user,
        },
    )?;
    Ok(Html(body))
}
