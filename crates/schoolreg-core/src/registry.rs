//! # Registry
//!
//! The registration service: validate, write the image, insert the row.
//!
//! The image write and the insert are independent. A failed insert leaves
//! the image on disk with no row pointing at it.

use crate::error::RegistryError;
use crate::images::ImageStore;
use crate::school::{NewSchool, School, SchoolId, SchoolSubmission};
use crate::store::SchoolStore;
use crate::validation::FieldRules;

/// Outcome of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registered {
    pub id: SchoolId,
    /// Stored image filename.
    pub image: String,
}

#[derive(Debug)]
pub struct Registry<S: SchoolStore> {
    rules: FieldRules,
    images: ImageStore,
    store: S,
}

impl<S: SchoolStore> Registry<S> {
    /// Build a registry, creating the schema and image directory if needed.
    pub fn new(store: S, images: ImageStore) -> Result<Self, RegistryError> {
        store.initialize()?;
        images.ensure_dir()?;
        Ok(Self {
            rules: FieldRules::new()?,
            images,
            store,
        })
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    /// Register a school from raw form input.
    pub fn register(&mut self, submission: SchoolSubmission) -> Result<Registered, RegistryError> {
        let valid = self.rules.validate(submission)?;

        let image = self.images.save(&valid.image_extension, &valid.image_bytes)?;

        let record = NewSchool {
            name: valid.name,
            address: valid.address,
            city: valid.city,
            state: valid.state,
            contact: valid.contact,
            email_id: valid.email_id,
            image: image.clone(),
        };
        let id = self.store.insert(&record)?;

        Ok(Registered { id, image })
    }

    /// Every registered school, newest first.
    pub fn list(&self) -> Result<Vec<School>, RegistryError> {
        self.store.list_recent()
    }

    pub fn count(&self) -> Result<usize, RegistryError> {
        self.store.count()
    }
}
