use crate::errors::RepoError;
use crate::models::{Idea, ValidIdea};
use async_trait::async_trait;

/// Trait defining the persistence operations for ideas.
#[async_trait]
pub trait IdeaRepository: Send + Sync + 'static { // Send+Sync+'static required for Arc<dyn>
    /// Lists every idea, newest (highest id) first.
    async fn list_all(&self) -> Result<Vec<Idea>, RepoError>;

    /// Stores a new idea with zero likes and returns it as stored,
    /// including the assigned id and creation timestamp.
    async fn create(&self, idea: &ValidIdea) -> Result<Idea, RepoError>;

    /// Adds one like. Returns `RepoError::NotFound` if the id does not exist.
    async fn increment_like(&self, id: i64) -> Result<Idea, RepoError>;

    /// Returns `RepoError::NotFound` if the id does not exist.
    async fn delete_by_id(&self, id: i64) -> Result<(), RepoError>;

    /// Inserts all `ideas` in one transaction, but only if the store holds no ideas yet.
    /// Returns how many were inserted.
    async fn insert_all_if_empty(&self, ideas: &[ValidIdea]) -> Result<usize, RepoError>;
}
