//! Reading the developer form from a `multipart/form-data` body.
//!
//! Text parts are collected by name; the legacy `cat_name`/`cat_breed` and
//! camel-case image names are accepted as aliases. A file part with neither
//! a file name nor a body is treated as "no file chosen"; any other file
//! part is kept and validated like a real upload.

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use catfacts_core::file_store::Upload;
use catfacts_core::patch::Patch;
use catfacts_db::models::developer::{CreateDeveloper, UpdateDeveloper};

use crate::error::{AppError, AppResult};
use crate::services::developer::DeveloperUploads;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Every part of a developer form, before create/update interpretation.
///
/// A text field is `None` when its part was absent from the body and
/// `Some` (possibly empty) when it was sent.
#[derive(Debug, Default)]
pub struct DeveloperForm {
    pub name: Option<String>,
    pub role: Option<String>,
    pub github: Option<String>,
    pub bio: Option<String>,
    pub companion_name: Option<String>,
    pub companion_breed: Option<String>,
    pub uploads: DeveloperUploads,
}

impl DeveloperForm {
    /// Drain the multipart stream. Unknown parts are ignored.
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "profile_image" | "profileImage" | "companion_image" | "catImage" => {
                    let file_name = field.file_name().map(str::to_string);
                    let content_type = field
                        .content_type()
                        .unwrap_or(FALLBACK_CONTENT_TYPE)
                        .to_string();
                    let bytes = field.bytes().await.map_err(multipart_error)?;
                    if is_unchosen(file_name.as_deref(), &bytes) {
                        continue;
                    }
                    let upload = Upload {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    };
                    if matches!(name.as_str(), "profile_image" | "profileImage") {
                        form.uploads.profile_image = Some(upload);
                    } else {
                        form.uploads.companion_image = Some(upload);
                    }
                }
                "name" | "role" | "github" | "bio" | "companion_name" | "cat_name"
                | "companion_breed" | "cat_breed" => {
                    let text = field.text().await.map_err(multipart_error)?;
                    let slot = match name.as_str() {
                        "name" => &mut form.name,
                        "role" => &mut form.role,
                        "github" => &mut form.github,
                        "bio" => &mut form.bio,
                        "companion_name" | "cat_name" => &mut form.companion_name,
                        _ => &mut form.companion_breed,
                    };
                    *slot = Some(text);
                }
                _ => {}
            }
        }

        Ok(form)
    }

    /// Interpret as a create request. Blank optional fields are stored as
    /// absent; `name`/`role` are validated by the service.
    pub fn into_create(self) -> (CreateDeveloper, DeveloperUploads) {
        let input = CreateDeveloper {
            name: self.name.unwrap_or_default(),
            role: self.role.unwrap_or_default(),
            github: non_blank(self.github),
            bio: non_blank(self.bio),
            companion_name: non_blank(self.companion_name),
            companion_breed: non_blank(self.companion_breed),
        };
        (input, self.uploads)
    }

    /// Interpret as a partial update. Only parts present in the body are
    /// applied, and a present empty value overwrites the stored one.
    pub fn into_update(self) -> (UpdateDeveloper, DeveloperUploads) {
        let input = UpdateDeveloper {
            name: self.name.into(),
            role: self.role.into(),
            github: Patch::from(self.github).map(Some),
            bio: Patch::from(self.bio).map(Some),
            companion_name: Patch::from(self.companion_name).map(Some),
            companion_breed: Patch::from(self.companion_breed).map(Some),
        };
        (input, self.uploads)
    }
}

/// What a browser sends for a file input left empty.
fn is_unchosen(file_name: Option<&str>, bytes: &[u8]) -> bool {
    bytes.is_empty() && file_name.unwrap_or("").is_empty()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(err.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> DeveloperForm {
        DeveloperForm {
            name: Some("Rona".into()),
            role: Some("Frontend".into()),
            github: Some("".into()),
            bio: None,
            companion_name: Some("  ".into()),
            companion_breed: Some("Munchkin".into()),
            uploads: DeveloperUploads::default(),
        }
    }

    #[test]
    fn only_nameless_empty_file_parts_are_unchosen() {
        assert!(is_unchosen(None, b""));
        assert!(is_unchosen(Some(""), b""));
        assert!(!is_unchosen(Some("cat.gif"), b""));
        assert!(!is_unchosen(Some(""), b"GIF89a"));
    }

    #[test]
    fn create_drops_blank_optional_fields() {
        let (input, _) = form().into_create();
        assert_eq!(input.name, "Rona");
        assert_eq!(input.github, None);
        assert_eq!(input.bio, None);
        assert_eq!(input.companion_name, None);
        assert_eq!(input.companion_breed.as_deref(), Some("Munchkin"));
    }

    #[test]
    fn create_defaults_missing_required_fields_to_empty() {
        let (input, _) = DeveloperForm::default().into_create();
        assert_eq!(input.name, "");
        assert_eq!(input.role, "");
    }

    #[test]
    fn update_distinguishes_omitted_from_empty() {
        let (input, _) = form().into_update();
        assert_eq!(input.name, Patch::Set("Rona".to_string()));
        assert_eq!(input.github, Patch::Set(Some(String::new())));
        assert_eq!(input.bio, Patch::Keep);
        assert_eq!(input.companion_name, Patch::Set(Some("  ".to_string())));
    }
}
