//! Upload media-type allow-list and stored file naming.

use rand::Rng;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Media types accepted for image uploads.
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// Upper bound (exclusive) of the random component in generated names.
const RANDOM_SUFFIX_BOUND: u32 = 1_000_000_000;

// ---------------------------------------------------------------------------
// Media types
// ---------------------------------------------------------------------------

/// An accepted image media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMediaType {
    Jpeg,
    Png,
}

impl ImageMediaType {
    /// Parse a declared `Content-Type`, ignoring case and parameters.
    ///
    /// Anything outside [`ALLOWED_IMAGE_TYPES`] is rejected with
    /// [`CoreError::UnsupportedMediaType`].
    pub fn parse(declared: &str) -> Result<Self, CoreError> {
        let essence = declared
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "image/jpeg" => Ok(Self::Jpeg),
            "image/png" => Ok(Self::Png),
            _ => Err(CoreError::UnsupportedMediaType(format!(
                "'{declared}' is not allowed. Allowed types: {}",
                ALLOWED_IMAGE_TYPES.join(", ")
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    /// Extension used when the uploaded file name carries none of
    /// [`Self::extensions`].
    pub fn default_extension(&self) -> &'static str {
        self.extensions()[0]
    }

    /// Lowercase extensions a stored file of this type may carry.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Jpeg => &["jpg", "jpeg"],
            Self::Png => &["png"],
        }
    }
}

// ---------------------------------------------------------------------------
// Naming
// ---------------------------------------------------------------------------

/// Pick the stored extension for an upload.
///
/// The original name's extension is kept (lowercased) only when it belongs
/// to the declared media type. Anything else, including names that would
/// be served as another content type, gets the canonical extension.
pub fn file_extension(original_name: Option<&str>, media_type: ImageMediaType) -> String {
    original_name
        .and_then(|name| {
            let base = name.rsplit(&['/', '\\'][..]).next().unwrap_or(name);
            let (stem, ext) = base.rsplit_once('.')?;
            let ext = ext.to_ascii_lowercase();
            (!stem.is_empty() && media_type.extensions().contains(&ext.as_str())).then_some(ext)
        })
        .unwrap_or_else(|| media_type.default_extension().to_string())
}

/// Generate a stored file name: `<unix-millis>-<random>.<ext>`.
///
/// The timestamp orders names roughly by upload time; the random component
/// separates uploads landing in the same millisecond. Callers must still
/// create the file exclusively, since the name alone is not a guarantee.
pub fn generate_file_name(original_name: Option<&str>, media_type: ImageMediaType) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let random: u32 = rand::rng().random_range(0..RANDOM_SUFFIX_BOUND);
    let ext = file_extension(original_name, media_type);
    format!("{millis}-{random}.{ext}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
