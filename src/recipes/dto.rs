use serde::Deserialize;

use super::repo_types::{NewRecipe, RecipePatch};
use crate::error::{AppError, AppResult};

pub const MAX_TITLE_LEN: usize = 200;

#[derive(Debug, Deserialize)]
pub struct RecipeCreate {
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Option<String>,
}

/// Absent and `null` fields both mean "unchanged".
#[derive(Debug, Default, Deserialize)]
pub struct RecipeUpdate {
    pub title: Option<String>,
    pub image: Option<String>,
    pub tags: Option<Vec<String>>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<String>,
}

fn validate_title(raw: &str) -> AppResult<String> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(AppError::Validation("Title is required".into()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(AppError::Validation(format!(
            "Title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(title.to_string())
}

impl TryFrom<RecipeCreate> for NewRecipe {
    type Error = AppError;

    fn try_from(body: RecipeCreate) -> AppResult<Self> {
        Ok(Self {
            title: validate_title(&body.title)?,
            image: body.image,
            tags: body.tags,
            ingredients: body.ingredients,
            instructions: body.instructions,
        })
    }
}

impl TryFrom<RecipeUpdate> for RecipePatch {
    type Error = AppError;

    fn try_from(body: RecipeUpdate) -> AppResult<Self> {
        Ok(Self {
            title: body.title.as_deref().map(validate_title).transpose()?,
            image: body.image,
            tags: body.tags,
            ingredients: body.ingredients,
            instructions: body.instructions,
        })
    }
}
