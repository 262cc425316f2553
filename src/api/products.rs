use axum::{
    Json,
    extract::{Multipart, Path, State},
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use super::types::{ProductForm, UploadedFile};
use super::{ApiError, ApiResponse, AppState, ProductDto, validation};
use crate::db::{NewProduct, ProductPatch};
use crate::slug;

/// GET /products
pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<ProductDto>>>, ApiError> {
    let products = state.store().list_products().await?;

    Ok(Json(ApiResponse::success(
        products.into_iter().map(ProductDto::from).collect(),
    )))
}

/// GET /products/{slug}
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<ProductDto>>, ApiError> {
    let product = state
        .store()
        .get_product_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::product_not_found(&slug))?;

    Ok(Json(ApiResponse::success(ProductDto::from(product))))
}

/// POST /products (multipart)
/// Create a listing: all fields plus an image are required. The slug is
/// derived from the name here and never changes afterwards. The owner is
/// taken from the current session when one is present.
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let form = read_product_form(multipart).await?;
    check_image_size(&state, form.image.as_ref()).await?;

    let fields = validation::validate_new_product(&form).map_err(ApiError::FieldValidation)?;

    // validate_new_product guarantees the image part is present
    let image = form
        .image
        .as_ref()
        .ok_or_else(|| ApiError::validation("Image is required"))?;
    let image_url = state.images().save(&image.filename, &image.bytes).await?;

    let owner_id = state.tokens().current_user(&jar).map(|c| c.user_id);

    let product = state
        .store()
        .add_product(&NewProduct {
            slug: slug::generate(&fields.name),
            name: fields.name,
            description: Some(fields.description),
            price: fields.price,
            image_url: Some(image_url),
            category: Some(fields.category),
            owner_id,
        })
        .await?;

    tracing::info!(slug = %product.slug, "Created product");

    Ok(Redirect::to(&format!("/products/{}", product.slug)))
}

/// POST /products/{slug} (multipart)
/// Shared mutation endpoint: the `intent` form field selects update or delete.
pub async fn mutate_product(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(slug): Path<String>,
    multipart: Multipart,
) -> Result<axum::response::Response, ApiError> {
    state.tokens().require_user(&jar)?;

    let form = read_product_form(multipart).await?;

    match form.intent.as_deref() {
        Some("update") => update_product(&state, &slug, form).await,
        Some("delete") => delete_product(&state, &slug).await,
        other => Err(ApiError::validation(format!(
            "Unknown intent: {}",
            other.unwrap_or("<missing>")
        ))),
    }
}

/// Partial update; an uploaded image replaces the stored file and the old
/// file is removed best-effort after the row is written.
async fn update_product(
    state: &Arc<AppState>,
    slug: &str,
    form: ProductForm,
) -> Result<axum::response::Response, ApiError> {
    let existing = state
        .store()
        .get_product_by_slug(slug)
        .await?
        .ok_or_else(|| ApiError::product_not_found(slug))?;

    check_image_size(state, form.image.as_ref()).await?;

    let fields = validation::validate_update_product(&form).map_err(ApiError::FieldValidation)?;

    let mut patch = ProductPatch {
        name: fields.name,
        description: fields.description,
        price: fields.price,
        category: fields.category,
        image_url: None,
    };

    if let Some(image) = &form.image {
        patch.image_url = Some(state.images().save(&image.filename, &image.bytes).await?);
    }

    state
        .store()
        .update_product(slug, &patch)
        .await?
        .ok_or_else(|| ApiError::product_not_found(slug))?;

    if patch.image_url.is_some()
        && let Some(old_url) = &existing.image_url
        && let Err(e) = state.images().remove(old_url).await
    {
        tracing::warn!(url = %old_url, "Failed to remove replaced image: {e}");
    }

    tracing::info!(slug, "Updated product");

    Ok(Redirect::to(&format!("/products/{slug}")).into_response())
}

/// Remove the row, then best-effort unlink the stored image. A product
/// without an image needs no file operation.
async fn delete_product(
    state: &Arc<AppState>,
    slug: &str,
) -> Result<axum::response::Response, ApiError> {
    let deleted = state
        .store()
        .delete_product(slug)
        .await?
        .ok_or_else(|| ApiError::product_not_found(slug))?;

    if let Some(image_url) = &deleted.image_url {
        state.images().remove(image_url).await?;
    }

    tracing::info!(slug, "Deleted product");

    Ok(Redirect::to("/").into_response())
}

/// Lift the known fields out of a multipart submission. Unknown parts are
/// ignored; an empty file part counts as no image, matching the browser
/// behavior of submitting an empty file input.
async fn read_product_form(mut multipart: Multipart) -> Result<ProductForm, ApiError> {
    let mut form = ProductForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(format!("Malformed form submission: {e}")))?
    {
        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };

        if name == "image" {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::validation(format!("Failed to read image upload: {e}")))?;

            if !filename.is_empty() && !bytes.is_empty() {
                form.image = Some(UploadedFile { filename, bytes });
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| ApiError::validation(format!("Failed to read field '{name}': {e}")))?;

        match name.as_str() {
            "intent" => form.intent = Some(value),
            "name" => form.name = Some(value),
            "description" => form.description = Some(value),
            "price" => form.price = Some(value),
            "category" => form.category = Some(value),
            _ => {}
        }
    }

    Ok(form)
}

async fn check_image_size(
    state: &Arc<AppState>,
    image: Option<&UploadedFile>,
) -> Result<(), ApiError> {
    let max_bytes = state.config().read().await.uploads.max_image_bytes;

    if let Some(image) = image
        && image.bytes.len() > max_bytes
    {
        return Err(ApiError::validation(format!(
            "Image exceeds the maximum size of {max_bytes} bytes"
        )));
    }

    Ok(())
}
