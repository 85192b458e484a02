//! Common repository traits
//!
//! Generic interfaces for document store operations. Every collection is
//! addressed by an opaque string id, so the `Id` parameter is usually `str`.

/// Trait for creating new documents
///
/// # Type Parameters
/// * `Entity` - Type of the returned entity (with the id generated by the server)
/// * `CreateDTO` - DTO for creation (without id)
pub trait Create<Entity, CreateDTO> {
    /// Inserts a new document and returns it with its generated id
    ///
    /// # Returns
    /// * `Ok(Entity)` - Created entity
    /// * `Err(sqlx::Error)` - Error during insertion
    async fn create(&self, data: &CreateDTO) -> Result<Entity, sqlx::Error>;
}

/// Trait for reading a single document by id
pub trait Read<Entity, Id: ?Sized> {
    /// Reads a document by its id
    ///
    /// # Returns
    /// * `Ok(Some(Entity))` - Entity found
    /// * `Ok(None)` - No document with that id
    /// * `Err(sqlx::Error)` - Error during reading
    async fn read(&self, id: &Id) -> Result<Option<Entity>, sqlx::Error>;
}

/// Trait for field updates on an existing document
///
/// # Type Parameters
/// * `UpdateDTO` - DTO with optional fields (only `Some(_)` fields are modified)
pub trait Update<Entity, UpdateDTO, Id: ?Sized> {
    /// Applies the update and returns the stored document
    ///
    /// # Returns
    /// * `Ok(Entity)` - Updated entity
    /// * `Err(sqlx::Error::RowNotFound)` - No document with that id
    async fn update(&self, id: &Id, data: &UpdateDTO) -> Result<Entity, sqlx::Error>;
}

/// Trait for deleting documents
pub trait Delete<Id: ?Sized> {
    /// Deletes a document, returning whether something was removed
    async fn delete(&self, id: &Id) -> Result<bool, sqlx::Error>;
}
