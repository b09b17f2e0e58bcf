//! `multipart/form-data` bodies collected into [`FormFields`].
//!
//! A part with a file name is an upload; everything else is text.

use crate::error::AppError;
use crate::services::FormFields;
use crate::uploads::UploadedFile;
use axum::extract::multipart::MultipartError;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::StatusCode;

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(err.body_text())
    }
}

impl FormFields {
    /// Drain every part of the request
    pub async fn collect_from(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut fields = FormFields::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let data = field.bytes().await.map_err(multipart_error)?;

            match file_name {
                Some(file_name) => fields.files.push(UploadedFile {
                    field: name,
                    file_name: Some(file_name),
                    content_type,
                    data,
                }),
                None => {
                    let value = String::from_utf8(data.to_vec()).map_err(|_| {
                        AppError::Validation(format!("Field '{}' is not valid UTF-8", name))
                    })?;
                    fields.push_text(&name, value);
                }
            }
        }

        Ok(fields)
    }
}

impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        FormFields::collect_from(multipart).await
    }
}
