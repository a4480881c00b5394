use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::profiles::repo_types::{Profile, ProfileRow};

/// Persistence seam for nutrition profiles, one per user.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_profile(&self, user_id: Uuid) -> anyhow::Result<Option<Profile>>;
    /// Inserts the user's first profile. Returns `false` if one already exists,
    /// leaving it untouched.
    async fn create_profile(&self, user_id: Uuid, profile: &Profile) -> anyhow::Result<bool>;
    /// Inserts or replaces the user's profile.
    async fn save_profile(&self, user_id: Uuid, profile: &Profile) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct PgProfileStore {
    db: PgPool,
}

impl PgProfileStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn get_profile(&self, user_id: Uuid) -> anyhow::Result<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT age, gender, weight_kg, height_cm, activity_level,
                   dietary_preferences, allergies, health_goal
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .context("select profile")?;

        row.map(Profile::try_from)
            .transpose()
            .with_context(|| format!("stored profile for {user_id} is invalid"))
    }

    async fn create_profile(&self, user_id: Uuid, profile: &Profile) -> anyhow::Result<bool> {
        let age = i32::try_from(profile.age).context("age out of range")?;
        let res = sqlx::query(
            r#"
            INSERT INTO profiles (user_id, age, gender, weight_kg, height_cm, activity_level,
                                  dietary_preferences, allergies, health_goal)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(age)
        .bind(profile.gender.as_str())
        .bind(profile.weight_kg)
        .bind(profile.height_cm)
        .bind(profile.activity_level.as_str())
        .bind(profile.dietary_preferences.as_deref())
        .bind(profile.allergies.as_deref())
        .bind(&profile.health_goal)
        .execute(&self.db)
        .await
        .context("insert profile")?;
        Ok(res.rows_affected() > 0)
    }

    async fn save_profile(&self, user_id: Uuid, profile: &Profile) -> anyhow::Result<()> {
        let age = i32::try_from(profile.age).context("age out of range")?;
        sqlx::query(
            r#"
            INSERT INTO profiles (user_id, age, gender, weight_kg, height_cm, activity_level,
                                  dietary_preferences, allergies, health_goal)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (user_id) DO UPDATE
               SET age = EXCLUDED.age,
                   gender = EXCLUDED.gender,
                   weight_kg = EXCLUDED.weight_kg,
                   height_cm = EXCLUDED.height_cm,
                   activity_level = EXCLUDED.activity_level,
                   dietary_preferences = EXCLUDED.dietary_preferences,
                   allergies = EXCLUDED.allergies,
                   health_goal = EXCLUDED.health_goal,
                   updated_at = now()
            "#,
        )
        .bind(user_id)
        .bind(age)
        .bind(profile.gender.as_str())
        .bind(profile.weight_kg)
        .bind(profile.height_cm)
        .bind(profile.activity_level.as_str())
        .bind(profile.dietary_preferences.as_deref())
        .bind(profile.allergies.as_deref())
        .bind(&profile.health_goal)
        .execute(&self.db)
        .await
        .context("upsert profile")?;
        Ok(())
    }
}
