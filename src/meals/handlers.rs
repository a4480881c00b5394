use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::{auth::services::AuthUser, state::AppState};

use super::dto::{CreateMealRequest, MealResponse, Pagination};
use super::repo;

pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals).post(create_meal))
        .route("/meals/:id", get(get_meal).delete(delete_meal))
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "meal store failure");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<MealResponse>>, (StatusCode, String)> {
    let (limit, offset) = p.clamped();
    let meals = repo::list_by_user(&state.db, user_id, limit, offset)
        .await
        .map_err(internal)?;
    Ok(Json(meals.into_iter().map(MealResponse::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MealResponse>, (StatusCode, String)> {
    match repo::get_by_id(&state.db, user_id, id).await.map_err(internal)? {
        Some(meal) => Ok(Json(meal.into())),
        None => Err((StatusCode::NOT_FOUND, "Meal not found".into())),
    }
}

#[instrument(skip(state, body))]
pub async fn create_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<CreateMealRequest>,
) -> Result<(StatusCode, Json<MealResponse>), (StatusCode, String)> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "name is required".into()));
    }

    let meal = repo::create(&state.db, user_id, name, body.description.trim())
        .await
        .map_err(internal)?;
    info!(%user_id, meal_id = %meal.id, "meal saved");
    Ok((StatusCode::CREATED, Json(meal.into())))
}

#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    if repo::delete(&state.db, user_id, id).await.map_err(internal)? {
        info!(%user_id, meal_id = %id, "meal deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, "Meal not found".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_rejects_blank_name_before_touching_db() {
        let state = AppState::fake();
        let err = create_meal(
            State(state),
            AuthUser(Uuid::new_v4()),
            Json(CreateMealRequest {
                name: "   ".into(),
                description: "anything".into(),
            }),
        )
        .await
        .err()
        .unwrap();
        assert_eq!(err, (StatusCode::BAD_REQUEST, "name is required".to_string()));
    }
}
