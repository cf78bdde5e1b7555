//! Developer entity model and DTOs.

use catfacts_core::patch::Patch;
use catfacts_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `developers` table.
///
/// `profile_image` and `companion_image` hold file references exactly as
/// returned by the upload store; `None` renders as a placeholder client-side.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Developer {
    pub id: DbId,
    pub name: String,
    pub role: String,
    pub github: Option<String>,
    pub bio: Option<String>,
    pub companion_name: Option<String>,
    pub companion_breed: Option<String>,
    pub profile_image: Option<String>,
    pub companion_image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Developer {
    /// The writable columns of this row.
    pub fn fields(&self) -> DeveloperFields {
        DeveloperFields {
            name: self.name.clone(),
            role: self.role.clone(),
            github: self.github.clone(),
            bio: self.bio.clone(),
            companion_name: self.companion_name.clone(),
            companion_breed: self.companion_breed.clone(),
            profile_image: self.profile_image.clone(),
            companion_image: self.companion_image.clone(),
        }
    }
}

/// Every writable column, as inserted or fully overwritten by the repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeveloperFields {
    pub name: String,
    pub role: String,
    pub github: Option<String>,
    pub bio: Option<String>,
    pub companion_name: Option<String>,
    pub companion_breed: Option<String>,
    pub profile_image: Option<String>,
    pub companion_image: Option<String>,
}

/// Text fields of a create request. Image references are attached after
/// the uploads have been stored.
#[derive(Debug, Clone, Default)]
pub struct CreateDeveloper {
    pub name: String,
    pub role: String,
    pub github: Option<String>,
    pub bio: Option<String>,
    pub companion_name: Option<String>,
    pub companion_breed: Option<String>,
}

impl CreateDeveloper {
    pub fn into_fields(
        self,
        profile_image: Option<String>,
        companion_image: Option<String>,
    ) -> DeveloperFields {
        DeveloperFields {
            name: self.name,
            role: self.role,
            github: self.github,
            bio: self.bio,
            companion_name: self.companion_name,
            companion_breed: self.companion_breed,
            profile_image,
            companion_image,
        }
    }
}

/// Text fields of a partial update. Omitted fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateDeveloper {
    pub name: Patch<String>,
    pub role: Patch<String>,
    pub github: Patch<Option<String>>,
    pub bio: Patch<Option<String>>,
    pub companion_name: Patch<Option<String>>,
    pub companion_breed: Patch<Option<String>>,
}

impl UpdateDeveloper {
    /// Merge onto the stored fields. Image references are left untouched.
    pub fn apply(self, current: DeveloperFields) -> DeveloperFields {
        DeveloperFields {
            name: self.name.apply(current.name),
            role: self.role.apply(current.role),
            github: self.github.apply(current.github),
            bio: self.bio.apply(current.bio),
            companion_name: self.companion_name.apply(current.companion_name),
            companion_breed: self.companion_breed.apply(current.companion_breed),
            profile_image: current.profile_image,
            companion_image: current.companion_image,
        }
    }
}
