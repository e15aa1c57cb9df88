//! # SchoolReg Core
//!
//! Domain logic for the school registry.
//!
//! A registration is a two-step write:
//! 1. the uploaded image is written to the public image directory;
//! 2. a row referencing the image filename is inserted into `schools`.
//!
//! No transaction spans both steps. If the insert fails, the image file
//! stays on disk without a matching row.
//!
//! ## Layout
//!
//! - [`school`]: stored rows, raw submissions, validated records
//! - [`validation`]: required fields, email pattern, digit-only contact
//! - [`images`]: timestamp-named image files
//! - [`store`]: the relational store (`SchoolStore`, `SqliteStore`)
//! - [`registry`]: the service tying the three together

pub mod error;
pub mod images;
pub mod registry;
pub mod school;
pub mod store;
pub mod validation;

pub use error::RegistryError;
pub use images::{IMAGE_DIR_NAME, ImageStore};
pub use registry::{Registered, Registry};
pub use school::{ImageUpload, NewSchool, School, SchoolId, SchoolSubmission};
pub use store::{SCHEMA, SchoolStore, SqliteStore};
pub use validation::{FieldRules, IMAGE_EXTENSIONS, ValidatedSubmission, ValidationError};
