//! Developer records and their attached images.
//!
//! Every operation composes the developer repository with the upload
//! [`FileStore`]. There is no transaction spanning both; instead the steps
//! are ordered so that a failure part-way leaves the stored record pointing
//! at files that still exist:
//!
//! - create: validate fields and both media types, store the files, insert
//!   the row. If the insert fails the new files are removed again.
//! - update: store the replacement files, persist the row, and only then
//!   remove the replaced files.
//! - delete: remove both files, then the row. If the row delete fails after
//!   the files are gone the record is left with dangling references; this
//!   is reported to the caller and logged, not rolled back.
//!
//! Update and delete hold a per-id lock for their whole duration so two
//! requests for the same developer cannot interleave their file
//! replacement within this process.

use std::sync::Arc;

use catfacts_core::error::CoreError;
use catfacts_core::file_store::{FileRef, FileStore, Upload};
use catfacts_core::locks::KeyedLocks;
use catfacts_core::patch::Patch;
use catfacts_core::types::DbId;
use catfacts_core::validation::require_non_empty;
use catfacts_db::models::developer::{CreateDeveloper, Developer, UpdateDeveloper};
use catfacts_db::repositories::DeveloperRepo;
use catfacts_db::DbPool;

use crate::error::{AppError, AppResult};

const ENTITY: &str = "Developer";

/// Optional image uploads accompanying a create or update request.
#[derive(Debug, Clone, Default)]
pub struct DeveloperUploads {
    pub profile_image: Option<Upload>,
    pub companion_image: Option<Upload>,
}

impl DeveloperUploads {
    /// Check both declared media types before anything is written.
    fn validate(&self) -> Result<(), CoreError> {
        for upload in [&self.profile_image, &self.companion_image].into_iter().flatten() {
            FileStore::validate(upload)?;
        }
        Ok(())
    }
}

/// References of files stored for one request.
#[derive(Debug, Default)]
struct StoredUploads {
    profile_image: Option<FileRef>,
    companion_image: Option<FileRef>,
}

impl StoredUploads {
    fn refs(&self) -> impl Iterator<Item = &FileRef> {
        self.profile_image.iter().chain(self.companion_image.iter())
    }
}

/// CRUD for developers, keeping the image files in step with the rows.
#[derive(Clone)]
pub struct DeveloperService {
    pool: DbPool,
    files: Arc<FileStore>,
    locks: Arc<KeyedLocks>,
}

impl DeveloperService {
    pub fn new(pool: DbPool, files: FileStore) -> Self {
        Self {
            pool,
            files: Arc::new(files),
            locks: Arc::new(KeyedLocks::new()),
        }
    }

    /// The upload store backing developer images.
    pub fn files(&self) -> &FileStore {
        &self.files
    }

    /// All developers in insertion order.
    pub async fn list(&self) -> AppResult<Vec<Developer>> {
        Ok(DeveloperRepo::list(&self.pool).await?)
    }

    /// One developer by id.
    pub async fn get(&self, id: DbId) -> AppResult<Developer> {
        DeveloperRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::not_found(ENTITY, id))
    }

    /// Validate, store any uploads, and insert a new developer.
    ///
    /// Nothing is written if `name`/`role` are blank or either upload has a
    /// media type outside the allow-list.
    pub async fn create(
        &self,
        input: CreateDeveloper,
        uploads: DeveloperUploads,
    ) -> AppResult<Developer> {
        let input = CreateDeveloper {
            name: require_non_empty("name", &input.name)?,
            role: require_non_empty("role", &input.role)?,
            ..input
        };
        uploads.validate()?;

        let stored = self.store_uploads(&uploads).await?;
        let fields = input.into_fields(
            stored.profile_image.as_ref().map(FileRef::to_string),
            stored.companion_image.as_ref().map(FileRef::to_string),
        );

        match DeveloperRepo::create(&self.pool, &fields).await {
            Ok(developer) => {
                tracing::info!(developer_id = developer.id, "Developer created");
                Ok(developer)
            }
            Err(e) => {
                self.discard(&stored).await;
                Err(e.into())
            }
        }
    }

    /// Apply a partial update, replacing images that come with new uploads.
    ///
    /// Omitted fields keep their stored values. A replaced image file is
    /// removed only after the row points at its successor.
    pub async fn update(
        &self,
        id: DbId,
        input: UpdateDeveloper,
        uploads: DeveloperUploads,
    ) -> AppResult<Developer> {
        let _guard = self.locks.lock(id).await;
        let existing = self.get(id).await?;

        let input = UpdateDeveloper {
            name: required_patch("name", input.name)?,
            role: required_patch("role", input.role)?,
            ..input
        };
        uploads.validate()?;

        let stored = self.store_uploads(&uploads).await?;
        let mut fields = input.apply(existing.fields());
        if let Some(new_ref) = &stored.profile_image {
            fields.profile_image = Some(new_ref.to_string());
        }
        if let Some(new_ref) = &stored.companion_image {
            fields.companion_image = Some(new_ref.to_string());
        }

        let updated = match DeveloperRepo::update(&self.pool, id, &fields).await {
            Ok(Some(developer)) => developer,
            Ok(None) => {
                self.discard(&stored).await;
                return Err(AppError::not_found(ENTITY, id));
            }
            Err(e) => {
                self.discard(&stored).await;
                return Err(e.into());
            }
        };

        if stored.profile_image.is_some() {
            if let Some(old) = &existing.profile_image {
                self.remove_file(id, old).await;
            }
        }
        if stored.companion_image.is_some() {
            if let Some(old) = &existing.companion_image {
                self.remove_file(id, old).await;
            }
        }

        tracing::info!(developer_id = id, "Developer updated");
        Ok(updated)
    }

    /// Remove a developer's image files and then the developer.
    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        let _guard = self.locks.lock(id).await;
        let existing = self.get(id).await?;

        for file_ref in [&existing.profile_image, &existing.companion_image]
            .into_iter()
            .flatten()
        {
            self.remove_file(id, file_ref).await;
        }

        match DeveloperRepo::delete(&self.pool, id).await {
            Ok(true) => {
                tracing::info!(developer_id = id, "Developer deleted");
                Ok(())
            }
            Ok(false) => Err(AppError::not_found(ENTITY, id)),
            Err(e) => {
                tracing::error!(
                    developer_id = id,
                    error = %e,
                    "Row delete failed after image files were removed"
                );
                Err(e.into())
            }
        }
    }

    /// Store the profile then the companion upload. If the second store
    /// fails the first file is removed again.
    async fn store_uploads(&self, uploads: &DeveloperUploads) -> AppResult<StoredUploads> {
        let mut stored = StoredUploads::default();

        if let Some(upload) = &uploads.profile_image {
            stored.profile_image = Some(self.files.store(upload).await?);
        }
        if let Some(upload) = &uploads.companion_image {
            match self.files.store(upload).await {
                Ok(file_ref) => stored.companion_image = Some(file_ref),
                Err(e) => {
                    self.discard(&stored).await;
                    return Err(e.into());
                }
            }
        }

        Ok(stored)
    }

    /// Best-effort removal of files stored by a request that then failed.
    async fn discard(&self, stored: &StoredUploads) {
        for file_ref in stored.refs() {
            if let Err(e) = self.files.remove(file_ref.as_str()).await {
                tracing::warn!(file_ref = %file_ref, error = %e, "Failed to discard orphaned upload");
            }
        }
    }

    /// Best-effort removal of a file a record no longer references.
    async fn remove_file(&self, developer_id: DbId, file_ref: &str) {
        if let Err(e) = self.files.remove(file_ref).await {
            tracing::warn!(developer_id, file_ref, error = %e, "Failed to remove image file");
        }
    }
}

/// Validate a required text field only if the caller supplied it.
fn required_patch(field: &str, patch: Patch<String>) -> Result<Patch<String>, CoreError> {
    match patch {
        Patch::Keep => Ok(Patch::Keep),
        Patch::Set(value) => require_non_empty(field, &value).map(Patch::Set),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_patch_keeps_omitted_field() {
        assert_eq!(required_patch("name", Patch::Keep).unwrap(), Patch::Keep);
    }

    #[test]
    fn required_patch_trims_supplied_value() {
        assert_eq!(
            required_patch("name", Patch::Set("  Alex ".into())).unwrap(),
            Patch::Set("Alex".to_string())
        );
    }

    #[test]
    fn required_patch_rejects_blank_value() {
        assert!(matches!(
            required_patch("role", Patch::Set("   ".into())),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn uploads_validate_checks_both_parts() {
        let png = Upload {
            file_name: Some("a.png".into()),
            content_type: "image/png".into(),
            bytes: vec![1],
        };
        let gif = Upload {
            file_name: Some("b.gif".into()),
            content_type: "image/gif".into(),
            bytes: vec![2],
        };

        let ok = DeveloperUploads {
            profile_image: Some(png.clone()),
            companion_image: None,
        };
        assert!(ok.validate().is_ok());

        let bad = DeveloperUploads {
            profile_image: Some(png),
            companion_image: Some(gif),
        };
        assert!(matches!(bad.validate(), Err(CoreError::UnsupportedMediaType(_))));
    }
}
