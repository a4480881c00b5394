use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{error, instrument, warn};

use crate::{
    auth::services::AuthUser,
    plans::{
        dto::{GeneratedPlan, MealPlanRequest, RecipeIdeasResponse, RecipeRequest},
        services::{generate_meal_plan, generate_recipe_ideas, GenerationError},
    },
    profiles::handlers::{invalid, require_profile},
    state::AppState,
};

pub fn plan_routes() -> Router<AppState> {
    Router::new()
        .route("/meal-plans", post(create_meal_plan))
        .route("/recipe-ideas", post(create_recipe_ideas))
}

fn generation_failed(e: GenerationError) -> (StatusCode, String) {
    match e {
        GenerationError::InvalidProfile(e) => invalid(e),
        GenerationError::Completion(e) => {
            error!(error = %e, "completion failed");
            (StatusCode::BAD_GATEWAY, e.to_string())
        }
    }
}

fn require_text(field: &str, value: &str) -> Result<(), (StatusCode, String)> {
    if value.trim().is_empty() {
        warn!(field, "empty generation input");
        return Err((StatusCode::BAD_REQUEST, format!("{field} is required")));
    }
    Ok(())
}

#[instrument(skip(state, payload))]
pub async fn create_meal_plan(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<MealPlanRequest>,
) -> Result<Json<GeneratedPlan>, (StatusCode, String)> {
    require_text("description", &payload.description)?;
    let profile = require_profile(&state, user_id).await?;

    let plan = generate_meal_plan(state.completion.as_ref(), &profile, &payload)
        .await
        .map_err(generation_failed)?;
    Ok(Json(plan))
}

#[instrument(skip(state, payload))]
pub async fn create_recipe_ideas(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Json(payload): Json<RecipeRequest>,
) -> Result<Json<RecipeIdeasResponse>, (StatusCode, String)> {
    require_text("diet", &payload.diet)?;
    require_text("food_preferences", &payload.food_preferences)?;

    let ideas = generate_recipe_ideas(
        state.completion.as_ref(),
        payload.diet.trim(),
        payload.food_preferences.trim(),
    )
    .await
    .map_err(generation_failed)?;
    Ok(Json(RecipeIdeasResponse { ideas }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plans::dto::MealType;
    use crate::profiles::repo_types::{ActivityLevel, Gender, Profile};
    use crate::state::fakes::CannedCompletion;
    use std::sync::Arc;
    use uuid::Uuid;

    fn profile() -> Profile {
        Profile {
            age: 28,
            gender: Gender::Male,
            weight_kg: 80.0,
            height_cm: 182.0,
            activity_level: ActivityLevel::ModeratelyActive,
            dietary_preferences: Some("halal".into()),
            allergies: None,
            health_goal: "gain muscle".into(),
        }
    }

    fn lunch() -> MealPlanRequest {
        MealPlanRequest {
            meal_type: MealType::Lunch,
            description: "is high in fibre".into(),
        }
    }

    #[tokio::test]
    async fn meal_plan_serializes_as_single_keyed_object() {
        let state = AppState::fake();
        let user_id = Uuid::new_v4();
        state.profiles.save_profile(user_id, &profile()).await.unwrap();

        let Json(plan) = create_meal_plan(State(state), AuthUser(user_id), Json(lunch()))
            .await
            .expect("plan");

        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json, serde_json::json!({ "lunch": ["Line one", "Line two"] }));
    }

    #[tokio::test]
    async fn meal_plan_requires_a_profile() {
        let state = AppState::fake();
        let err = create_meal_plan(State(state), AuthUser(Uuid::new_v4()), Json(lunch()))
            .await
            .err()
            .unwrap();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn completion_failure_is_bad_gateway_and_leaves_profile_untouched() {
        let state = AppState::fake_with(Arc::new(CannedCompletion(Err(429))));
        let user_id = Uuid::new_v4();
        state.profiles.save_profile(user_id, &profile()).await.unwrap();

        let err = create_meal_plan(State(state.clone()), AuthUser(user_id), Json(lunch()))
            .await
            .err()
            .unwrap();
        assert_eq!(err.0, StatusCode::BAD_GATEWAY);

        let stored = state.profiles.get_profile(user_id).await.unwrap();
        assert_eq!(stored, Some(profile()));
    }

    #[tokio::test]
    async fn recipe_ideas_validate_and_generate() {
        let state = AppState::fake();
        let user_id = Uuid::new_v4();

        let err = create_recipe_ideas(
            State(state.clone()),
            AuthUser(user_id),
            Json(RecipeRequest {
                diet: " ".into(),
                food_preferences: "pasta".into(),
            }),
        )
        .await
        .err()
        .unwrap();
        assert_eq!(err, (StatusCode::BAD_REQUEST, "diet is required".to_string()));

        let Json(res) = create_recipe_ideas(
            State(state),
            AuthUser(user_id),
            Json(RecipeRequest {
                diet: "mediterranean".into(),
                food_preferences: "pasta".into(),
            }),
        )
        .await
        .expect("ideas");
        assert_eq!(res.ideas, vec!["Line one", "Line two"]);
    }
}
