//! # School Types
//!
//! - [`School`]: a stored row, serialized with the table's column names
//! - [`SchoolSubmission`]: raw form input, every field optional
//! - [`NewSchool`]: a record ready for insertion

use serde::{Deserialize, Serialize};

/// Identifier generated by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchoolId(pub i64);

impl std::fmt::Display for SchoolId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// A registered school as stored in the `schools` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct School {
    pub id: SchoolId,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    /// Digits only.
    pub contact: String,
    pub email_id: String,
    /// Filename under the public image directory.
    pub image: String,
    /// `YYYY-MM-DD HH:MM:SS.SSS`, UTC.
    pub created_at: String,
}

/// A validated record ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSchool {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact: String,
    pub email_id: String,
    pub image: String,
}

/// An uploaded image as received from the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageUpload {
    /// Client-side file name, used only for its extension.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// A browser submits an empty part when no file was picked.
    pub fn is_empty(&self) -> bool {
        self.file_name.is_empty() || self.bytes.is_empty()
    }
}

/// Raw form input. Nothing here has been checked yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchoolSubmission {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub contact: Option<String>,
    pub email_id: Option<String>,
    pub image: Option<ImageUpload>,
}

impl SchoolSubmission {
    /// Names of the text fields accepted from the form, in form order.
    pub const TEXT_FIELDS: [&'static str; 6] =
        ["name", "address", "city", "state", "contact", "email_id"];

    /// Set a text field by its form name.
    ///
    /// Returns `false` if the name is not a known field (the value is dropped).
    pub fn set_text(&mut self, field: &str, value: impl Into<String>) -> bool {
        let slot = match field {
            "name" => &mut self.name,
            "address" => &mut self.address,
            "city" => &mut self.city,
            "state" => &mut self.state,
            "contact" => &mut self.contact,
            "email_id" => &mut self.email_id,
            _ => return false,
        };
        *slot = Some(value.into());
        true
    }

    /// Builder form of [`SchoolSubmission::set_text`].
    #[must_use]
    pub fn with_text(mut self, field: &str, value: impl Into<String>) -> Self {
        self.set_text(field, value);
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: ImageUpload) -> Self {
        self.image = Some(image);
        self
    }
}
