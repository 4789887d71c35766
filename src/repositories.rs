use crate::{
    domain::IdeaRepository,
    errors::RepoError,
    models::{encode_tags, Idea, IdeaRow, ValidIdea},
};
use anyhow::Context;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::info;

const IDEA_COLUMNS: &str = "id, title, description, tags_json, likes, created_at";

#[derive(Debug, Clone)]
pub struct SqliteIdeaRepository {
    pool: SqlitePool,
}

impl SqliteIdeaRepository {
    pub fn new(pool: SqlitePool) -> Self {
        info!("Initializing SqliteIdeaRepository");
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl IdeaRepository for SqliteIdeaRepository {
    async fn list_all(&self) -> Result<Vec<Idea>, RepoError> {
        let rows: Vec<IdeaRow> =
            sqlx::query_as(&format!("SELECT {IDEA_COLUMNS} FROM ideas ORDER BY id DESC"))
                .fetch_all(&self.pool)
                .await
                .context("SQLite: Failed to list ideas")?;

        tracing::debug!("SQLite: Listed {} ideas", rows.len());
        Ok(rows.into_iter().map(Idea::from).collect())
    }

    /// Id, like count and `created_at` are assigned by the database.
    async fn create(&self, idea: &ValidIdea) -> Result<Idea, RepoError> {
        let row: IdeaRow = sqlx::query_as(&format!(
            "INSERT INTO ideas (title, description, tags_json, likes) VALUES (?, ?, ?, 0) RETURNING {IDEA_COLUMNS}"
        ))
        .bind(idea.title())
        .bind(idea.description())
        .bind(encode_tags(idea.tags()))
        .fetch_one(&self.pool)
        .await
        .context("SQLite: Failed to insert idea")?;

        tracing::debug!(idea_id = %row.id, "SQLite: Idea inserted");
        Ok(row.into())
    }

    /// The increment runs as one UPDATE so concurrent likes never overwrite each other.
    async fn increment_like(&self, id: i64) -> Result<Idea, RepoError> {
        let row: Option<IdeaRow> = sqlx::query_as(&format!(
            "UPDATE ideas SET likes = likes + 1 WHERE id = ? RETURNING {IDEA_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("SQLite: Failed to like idea (id: {})", id))?;

        match row {
            Some(row) => {
                tracing::debug!(idea_id = %id, likes = row.likes, "SQLite: Idea liked");
                Ok(row.into())
            }
            None => Err(RepoError::NotFound(id)),
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM ideas WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("SQLite: Failed to delete idea (id: {})", id))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(id));
        }
        tracing::debug!(idea_id = %id, "SQLite: Idea deleted");
        Ok(())
    }

    async fn insert_all_if_empty(&self, ideas: &[ValidIdea]) -> Result<usize, RepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("SQLite: Failed to begin seed transaction")?;

        let (has_rows,): (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM ideas)")
            .fetch_one(&mut *tx)
            .await
            .context("SQLite: Failed to check for existing ideas")?;
        if has_rows {
            return Ok(0);
        }

        for idea in ideas {
            sqlx::query("INSERT INTO ideas (title, description, tags_json, likes) VALUES (?, ?, ?, 0)")
                .bind(idea.title())
                .bind(idea.description())
                .bind(encode_tags(idea.tags()))
                .execute(&mut *tx)
                .await
                .with_context(|| format!("SQLite: Failed to insert idea '{}'", idea.title()))?;
        }

        tx.commit()
            .await
            .context("SQLite: Failed to commit seed transaction")?;
        tracing::debug!(count = ideas.len(), "SQLite: Inserted ideas into empty table");
        Ok(ideas.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_memory_pool, init_schema};
    use crate::models::NewIdea;
    use std::sync::Arc;

    async fn repo() -> SqliteIdeaRepository {
        let pool = create_memory_pool().await.unwrap();
        init_schema(&pool).await.unwrap();
        SqliteIdeaRepository::new(pool)
    }

    fn valid(title: &str, tags: &[&str]) -> ValidIdea {
        NewIdea {
            title: title.to_string(),
            description: format!("about {}", title),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
        .validate()
        .unwrap()
    }

    #[tokio::test]
    async fn create_returns_stored_record() {
        let repo = repo().await;
        let idea = repo.create(&valid("first", &["a", " b ", "", "c"])).await.unwrap();

        assert_eq!(idea.id, 1);
        assert_eq!(idea.title, "first");
        assert_eq!(idea.description, "about first");
        assert_eq!(idea.tags, vec!["a", "b", "c"]);
        assert_eq!(idea.likes, 0);
        assert!(idea.created_at.is_some());

        let listed = repo.list_all().await.unwrap();
        assert_eq!(listed, vec![idea]);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let repo = repo().await;
        assert!(repo.list_all().await.unwrap().is_empty());

        for title in ["one", "two", "three", "four"] {
            repo.create(&valid(title, &[])).await.unwrap();
        }
        let ids: Vec<i64> = repo.list_all().await.unwrap().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![4, 3, 2, 1]);
    }

    #[tokio::test]
    async fn likes_count_exactly() {
        let repo = repo().await;
        let idea = repo.create(&valid("liked", &[])).await.unwrap();

        let mut last = None;
        for _ in 0..5 {
            last = Some(repo.increment_like(idea.id).await.unwrap());
        }
        assert_eq!(last.unwrap().likes, 5);
    }

    #[tokio::test]
    async fn concurrent_likes_all_apply() {
        let repo = Arc::new(repo().await);
        let id = repo.create(&valid("popular", &[])).await.unwrap().id;

        let handles: Vec<_> = (0..20)
            .map(|_| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { repo.increment_like(id).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let listed = repo.list_all().await.unwrap();
        assert_eq!(listed[0].likes, 20);
    }

    #[tokio::test]
    async fn missing_id_is_not_found_without_side_effects() {
        let repo = repo().await;
        let idea = repo.create(&valid("kept", &["x"])).await.unwrap();

        assert!(matches!(repo.increment_like(99).await, Err(RepoError::NotFound(99))));
        assert!(matches!(repo.delete_by_id(99).await, Err(RepoError::NotFound(99))));
        assert_eq!(repo.list_all().await.unwrap(), vec![idea]);
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let repo = repo().await;
        let gone = repo.create(&valid("gone", &[])).await.unwrap();
        let kept = repo.create(&valid("kept", &[])).await.unwrap();

        repo.delete_by_id(gone.id).await.unwrap();

        assert_eq!(repo.list_all().await.unwrap(), vec![kept]);
        assert!(matches!(repo.increment_like(gone.id).await, Err(RepoError::NotFound(_))));
        assert!(matches!(repo.delete_by_id(gone.id).await, Err(RepoError::NotFound(_))));
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = repo().await;
        let first = repo.create(&valid("a", &[])).await.unwrap();
        repo.delete_by_id(first.id).await.unwrap();

        let second = repo.create(&valid("b", &[])).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn corrupt_tags_read_as_empty() {
        let repo = repo().await;
        let idea = repo.create(&valid("broken", &["a"])).await.unwrap();
        sqlx::query("UPDATE ideas SET tags_json = 'not json' WHERE id = ?")
            .bind(idea.id)
            .execute(&repo.pool)
            .await
            .unwrap();

        let listed = repo.list_all().await.unwrap();
        assert!(listed[0].tags.is_empty());

        let liked = repo.increment_like(idea.id).await.unwrap();
        assert!(liked.tags.is_empty());
        assert_eq!(liked.likes, 1);
    }
}
