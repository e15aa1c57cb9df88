//! # Field Validation
//!
//! Checks a [`SchoolSubmission`] before anything touches the disk.
//!
//! Order of checks (first failure wins):
//! 1. all six text fields and the image are present and non-blank
//! 2. email matches `^[^\s@]+@[^\s@]+\.[^\s@]+$`
//! 3. contact is one or more ASCII digits
//! 4. the image file name carries an allowed image extension
//!
//! Presence is judged on trimmed values, but email and contact are matched
//! as submitted, so surrounding whitespace fails their patterns.
//!
//! The image bytes are never inspected; the extension is the only image check.
//! Only raster image extensions are allowed since stored files are served
//! back from the same origin.

use crate::error::RegistryError;
use crate::school::SchoolSubmission;
use regex::Regex;
use thiserror::Error;

/// Basic address shape: something, `@`, something, `.`, something. No whitespace.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Accepted image extensions, lowercase.
pub const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "gif", "webp", "bmp", "avif"];

/// Reasons a submission is rejected. The messages are shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("All fields are required")]
    MissingFields,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Contact number must contain only digits")]
    InvalidContact,

    #[error("Image file must have a valid extension")]
    InvalidImage,
}

/// A submission that passed every check. Name, address, city and state are trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSubmission {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact: String,
    pub email_id: String,
    /// Lowercased, without the dot.
    pub image_extension: String,
    pub image_bytes: Vec<u8>,
}

/// Compiled validation rules.
#[derive(Debug, Clone)]
pub struct FieldRules {
    email: Regex,
}

impl FieldRules {
    pub fn new() -> Result<Self, RegistryError> {
        Ok(Self {
            email: Regex::new(EMAIL_PATTERN)?,
        })
    }

    pub fn is_valid_email(&self, email: &str) -> bool {
        self.email.is_match(email)
    }

    pub fn validate(&self, submission: SchoolSubmission) -> Result<ValidatedSubmission, ValidationError> {
        let SchoolSubmission {
            name,
            address,
            city,
            state,
            contact,
            email_id,
            image,
        } = submission;

        let name = trimmed(required(name)?);
        let address = trimmed(required(address)?);
        let city = trimmed(required(city)?);
        let state = trimmed(required(state)?);
        let contact = required(contact)?;
        let email_id = required(email_id)?;
        let image = image
            .filter(|upload| !upload.is_empty())
            .ok_or(ValidationError::MissingFields)?;

        if !self.is_valid_email(&email_id) {
            return Err(ValidationError::InvalidEmail);
        }
        if !is_digits(&contact) {
            return Err(ValidationError::InvalidContact);
        }
        let image_extension =
            image_extension(&image.file_name).ok_or(ValidationError::InvalidImage)?;

        Ok(ValidatedSubmission {
            name,
            address,
            city,
            state,
            contact,
            email_id,
            image_extension,
            image_bytes: image.bytes,
        })
    }
}

/// The value as submitted, if it has any non-whitespace content.
fn required(value: Option<String>) -> Result<String, ValidationError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(ValidationError::MissingFields)
}

fn trimmed(value: String) -> String {
    value.trim().to_owned()
}

/// One or more ASCII digits, nothing else.
pub fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Extension after the last `.` of a client file name, lowercased.
///
/// `None` if there is no dot or the extension is not in [`IMAGE_EXTENSIONS`].
pub fn image_extension(file_name: &str) -> Option<String> {
    let (_, ext) = file_name.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}
