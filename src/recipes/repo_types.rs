use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    pub image: Option<String>,
    pub tags: Vec<String>,
    pub ingredients: Vec<String>,
    pub instructions: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// A validated recipe ready to insert.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub title: String,
    pub image: Option<String>,
    pub tags: Vec<String>,
    pub ingredients: Vec<String>,
    pub instructions: Option<String>,
}

/// Partial update. `None` leaves the stored value unchanged; there is no
/// way to clear a field through a patch.
#[derive(Debug, Clone, Default)]
pub struct RecipePatch {
    pub title: Option<String>,
    pub image: Option<String>,
    pub tags: Option<Vec<String>>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<String>,
}

// mirrors the COALESCE update in `PgRecipeStore::update`
#[cfg(test)]
impl RecipePatch {
    pub fn apply(self, recipe: &mut Recipe) {
        if let Some(title) = self.title {
            recipe.title = title;
        }
        if let Some(image) = self.image {
            recipe.image = Some(image);
        }
        if let Some(tags) = self.tags {
            recipe.tags = tags;
        }
        if let Some(ingredients) = self.ingredients {
            recipe.ingredients = ingredients;
        }
        if let Some(instructions) = self.instructions {
            recipe.instructions = Some(instructions);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn soup() -> Recipe {
        let now = OffsetDateTime::now_utc();
        Recipe {
            id: 1,
            title: "Soup".into(),
            image: Some("soup.png".into()),
            tags: vec!["warm".into()],
            ingredients: vec!["water".into(), "salt".into()],
            instructions: Some("boil".into()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut r = soup();
        RecipePatch::default().apply(&mut r);
        assert_eq!(r.title, "Soup");
        assert_eq!(r.image.as_deref(), Some("soup.png"));
        assert_eq!(r.tags, vec!["warm"]);
        assert_eq!(r.instructions.as_deref(), Some("boil"));
    }

    #[test]
    fn patch_overwrites_only_supplied_fields() {
        let mut r = soup();
        RecipePatch {
            tags: Some(vec![]),
            instructions: Some("simmer".into()),
            ..Default::default()
        }
        .apply(&mut r);
        assert_eq!(r.title, "Soup");
        assert!(r.tags.is_empty());
        assert_eq!(r.ingredients, vec!["water", "salt"]);
        assert_eq!(r.instructions.as_deref(), Some("simmer"));
    }
}
