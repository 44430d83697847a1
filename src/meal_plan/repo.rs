use anyhow::Context;
use async_trait::async_trait;
use sqlx::{types::Json, PgPool};

use super::repo_types::{MealPlan, PlanDocument, MEAL_PLAN_ID};

/// Single-entry document store backing the meal plan.
#[async_trait]
pub trait MealPlanStore: Send + Sync {
    /// Returns the plan, first creating it with an empty document if absent.
    async fn get_or_create(&self) -> anyhow::Result<MealPlan>;

    /// Replaces the whole document. No merge with the previous content.
    async fn replace(&self, plan: PlanDocument) -> anyhow::Result<MealPlan>;
}

#[derive(Clone)]
pub struct PgMealPlanStore {
    db: PgPool,
}

impl PgMealPlanStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MealPlanStore for PgMealPlanStore {
    async fn get_or_create(&self) -> anyhow::Result<MealPlan> {
        sqlx::query(
            r#"
            INSERT INTO meal_plans (id, plan)
            VALUES ($1, '{}'::jsonb)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(MEAL_PLAN_ID)
        .execute(&self.db)
        .await
        .context("ensure meal plan row")?;

        let plan = sqlx::query_as::<_, MealPlan>(
            r#"
            SELECT plan, updated_at
            FROM meal_plans
            WHERE id = $1
            "#,
        )
        .bind(MEAL_PLAN_ID)
        .fetch_one(&self.db)
        .await
        .context("load meal plan")?;
        Ok(plan)
    }

    async fn replace(&self, plan: PlanDocument) -> anyhow::Result<MealPlan> {
        let plan = sqlx::query_as::<_, MealPlan>(
            r#"
            INSERT INTO meal_plans (id, plan)
            VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE
               SET plan = EXCLUDED.plan,
                   updated_at = now()
            RETURNING plan, updated_at
            "#,
        )
        .bind(MEAL_PLAN_ID)
        .bind(Json(plan))
        .fetch_one(&self.db)
        .await
        .context("replace meal plan")?;
        Ok(plan)
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct MemoryMealPlanStore {
    row: std::sync::Mutex<Option<MealPlan>>,
}

#[cfg(test)]
#[async_trait]
impl MealPlanStore for MemoryMealPlanStore {
    async fn get_or_create(&self) -> anyhow::Result<MealPlan> {
        let mut row = self.row.lock().unwrap();
        let plan = row.get_or_insert_with(|| MealPlan {
            plan: Json(PlanDocument::new()),
            updated_at: time::OffsetDateTime::now_utc(),
        });
        Ok(plan.clone())
    }

    async fn replace(&self, plan: PlanDocument) -> anyhow::Result<MealPlan> {
        let mut row = self.row.lock().unwrap();
        let plan = MealPlan {
            plan: Json(plan),
            updated_at: time::OffsetDateTime::now_utc(),
        };
        *row = Some(plan.clone());
        Ok(plan)
    }
}
