use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use super::repo_types::{NewRecipe, Recipe, RecipePatch};

#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// All recipes, newest first by id.
    async fn list(&self) -> anyhow::Result<Vec<Recipe>>;

    async fn create(&self, new: NewRecipe) -> anyhow::Result<Recipe>;

    /// Returns `None` when no recipe has this id.
    async fn update(&self, id: i64, patch: RecipePatch) -> anyhow::Result<Option<Recipe>>;

    /// Returns `false` when no recipe has this id.
    async fn delete(&self, id: i64) -> anyhow::Result<bool>;
}

#[derive(Clone)]
pub struct PgRecipeStore {
    db: PgPool,
}

impl PgRecipeStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecipeStore for PgRecipeStore {
    async fn list(&self) -> anyhow::Result<Vec<Recipe>> {
        let rows = sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, title, image, tags, ingredients, instructions, created_at, updated_at
            FROM recipes
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list recipes")?;
        Ok(rows)
    }

    async fn create(&self, new: NewRecipe) -> anyhow::Result<Recipe> {
        let recipe = sqlx::query_as::<_, Recipe>(
            r#"
            INSERT INTO recipes (title, image, tags, ingredients, instructions)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, image, tags, ingredients, instructions, created_at, updated_at
            "#,
        )
        .bind(&new.title)
        .bind(&new.image)
        .bind(&new.tags)
        .bind(&new.ingredients)
        .bind(&new.instructions)
        .fetch_one(&self.db)
        .await
        .context("insert recipe")?;
        Ok(recipe)
    }

    async fn update(&self, id: i64, patch: RecipePatch) -> anyhow::Result<Option<Recipe>> {
        // NULL parameters keep the current column value
        let recipe = sqlx::query_as::<_, Recipe>(
            r#"
            UPDATE recipes
               SET title        = COALESCE($2, title),
                   image        = COALESCE($3, image),
                   tags         = COALESCE($4, tags),
                   ingredients  = COALESCE($5, ingredients),
                   instructions = COALESCE($6, instructions),
                   updated_at   = now()
             WHERE id = $1
            RETURNING id, title, image, tags, ingredients, instructions, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&patch.title)
        .bind(&patch.image)
        .bind(&patch.tags)
        .bind(&patch.ingredients)
        .bind(&patch.instructions)
        .fetch_optional(&self.db)
        .await
        .context("update recipe")?;
        Ok(recipe)
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .context("delete recipe")?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct MemoryRecipeStore {
    inner: std::sync::Mutex<(i64, Vec<Recipe>)>,
}

#[cfg(test)]
#[async_trait]
impl RecipeStore for MemoryRecipeStore {
    async fn list(&self) -> anyhow::Result<Vec<Recipe>> {
        let inner = self.inner.lock().unwrap();
        let mut rows = inner.1.clone();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows)
    }

    async fn create(&self, new: NewRecipe) -> anyhow::Result<Recipe> {
        let mut inner = self.inner.lock().unwrap();
        inner.0 += 1;
        let now = time::OffsetDateTime::now_utc();
        let recipe = Recipe {
            id: inner.0,
            title: new.title,
            image: new.image,
            tags: new.tags,
            ingredients: new.ingredients,
            instructions: new.instructions,
            created_at: now,
            updated_at: now,
        };
        inner.1.push(recipe.clone());
        Ok(recipe)
    }

    async fn update(&self, id: i64, patch: RecipePatch) -> anyhow::Result<Option<Recipe>> {
        let mut inner = self.inner.lock().unwrap();
        let Some(recipe) = inner.1.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        patch.apply(recipe);
        recipe.updated_at = time::OffsetDateTime::now_utc();
        Ok(Some(recipe.clone()))
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.1.len();
        inner.1.retain(|r| r.id != id);
        Ok(inner.1.len() < before)
    }
}

// Run with `DATABASE_URL` pointing at a server that allows creating
// databases: `cargo test -- --ignored`.
#[cfg(test)]
mod pg_tests {
    use super::*;

    fn titled(title: &str) -> NewRecipe {
        NewRecipe {
            title: title.into(),
            image: None,
            tags: vec![],
            ingredients: vec![],
            instructions: None,
        }
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn list_is_newest_first(db: PgPool) {
        let store = PgRecipeStore::new(db);
        store.create(titled("A")).await.unwrap();
        store.create(titled("B")).await.unwrap();

        let titles: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn update_keeps_columns_left_out_of_the_patch(db: PgPool) {
        let store = PgRecipeStore::new(db);
        let created = store
            .create(NewRecipe {
                image: Some("soup.png".into()),
                tags: vec!["warm".into()],
                instructions: Some("boil".into()),
                ..titled("Soup")
            })
            .await
            .unwrap();
        assert!(created.ingredients.is_empty());

        let updated = store
            .update(
                created.id,
                RecipePatch {
                    ingredients: Some(vec!["water".into(), "salt".into()]),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "Soup");
        assert_eq!(updated.image.as_deref(), Some("soup.png"));
        assert_eq!(updated.tags, vec!["warm"]);
        assert_eq!(updated.ingredients, vec!["water", "salt"]);
        assert_eq!(updated.instructions.as_deref(), Some("boil"));
        assert!(updated.updated_at >= created.updated_at);

        assert!(store
            .update(created.id + 1000, RecipePatch::default())
            .await
            .unwrap()
            .is_none());
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn delete_reports_missing_rows(db: PgPool) {
        let store = PgRecipeStore::new(db);
        let created = store.create(titled("Soup")).await.unwrap();
        assert!(store.delete(created.id).await.unwrap());
        assert!(!store.delete(created.id).await.unwrap());
        assert!(store.list().await.unwrap().is_empty());
    }
}
