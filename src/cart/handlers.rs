//! REST API handlers for shopping cart operations
//!
//! This module implements the HTTP endpoints for adding items, listing carts
//! and removing items. Bodies are validated into strict requests before the
//! service is called.

use super::helpers::{validate_add_body, validate_remove_body};
use super::{models::*, state::SharedState};
use crate::error::CartError;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde::de::DeserializeOwned;

/// Creates routes for cart-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/cart/add", post(add_item))
        .route("/carts", get(list_carts))
        .route("/cart/:product_id", delete(remove_item))
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

/// Decodes a request body, reading a non-JSON or blank body as an empty
/// object so that missing fields are reported by validation.
fn parse_body<T>(headers: &HeaderMap, body: &Bytes) -> Result<T, CartError>
where
    T: DeserializeOwned + Default,
{
    if !is_json_content_type(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| CartError::InvalidBody(e.to_string()))
}

/// Endpoint: POST /cart/add
/// Adds a product to the user's active cart, creating the cart on first use.
async fn add_item(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, CartError> {
    let request = validate_add_body(parse_body(&headers, &body)?)?;
    let cart = state.carts.add_item(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(CartResponse::new("Item added to cart", cart)),
    ))
}

/// Endpoint: GET /carts
/// Lists every cart in the store.
async fn list_carts(State(state): State<SharedState>) -> Result<impl IntoResponse, CartError> {
    let carts = state.carts.list_carts().await?;
    Ok(Json(CartListResponse::from(carts)))
}

/// Endpoint: DELETE /cart/:productId
/// Removes one product from the user's active cart.
async fn remove_item(
    State(state): State<SharedState>,
    Path(product_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, CartError> {
    let request = validate_remove_body(product_id, parse_body(&headers, &body)?)?;
    let cart = state.carts.remove_item(request).await?;

    Ok(Json(CartResponse::new("Product removed from cart", cart)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn json_headers(content_type: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers
    }

    #[test]
    fn blank_json_body_reads_as_empty_object() {
        let headers = json_headers("application/json");

        for raw in ["", "  \n"] {
            let body: RemoveItemBody = parse_body(&headers, &Bytes::from(raw)).unwrap();
            assert!(body.user.is_none());
        }
    }

    #[test]
    fn non_json_content_type_is_ignored() {
        let body: AddItemBody =
            parse_body(&json_headers("text/plain"), &Bytes::from("user=U1")).unwrap();
        assert!(body.user.is_none());

        let body: AddItemBody = parse_body(&HeaderMap::new(), &Bytes::new()).unwrap();
        assert!(body.product_id.is_none());
    }

    #[test]
    fn json_content_type_accepts_parameters() {
        let body: RemoveItemBody = parse_body(
            &json_headers("application/json; charset=utf-8"),
            &Bytes::from(r#"{"user":"U1"}"#),
        )
        .unwrap();
        assert_eq!(body.user.as_deref(), Some("U1"));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let result: Result<RemoveItemBody, _> =
            parse_body(&json_headers("application/json"), &Bytes::from("{ not json"));
        assert!(matches!(result, Err(CartError::InvalidBody(_))));
    }
}
