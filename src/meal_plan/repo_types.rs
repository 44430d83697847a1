use serde_json::{Map, Value};
use sqlx::{types::Json, FromRow};
use time::OffsetDateTime;

/// Key of the only meal-plan row.
pub const MEAL_PLAN_ID: i32 = 1;

pub type PlanDocument = Map<String, Value>;

#[derive(Debug, Clone, FromRow)]
pub struct MealPlan {
    pub plan: Json<PlanDocument>,
    pub updated_at: OffsetDateTime,
}
