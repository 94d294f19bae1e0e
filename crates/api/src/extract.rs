//! Extractors whose rejections render as [`AppError`].
//!
//! axum's stock `Json`, `Query` and `Path` reject with plain-text bodies
//! (and `422` for well-formed JSON of the wrong shape). These wrappers route
//! every rejection through [`AppError::BadRequest`] so clients always get the
//! JSON error body and a `400`.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Query-string parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// Path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
