use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Form, Json, Router,
};
use serde::Serialize;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::services::AuthUser,
    nutrition::{basal_metabolic_rate, compute_targets, NutrientTargets},
    profiles::{
        dto::{ProfileForm, ProfileResponse},
        repo_types::{Profile, ProfileError},
    },
    state::AppState,
};

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile).post(create_profile).put(update_profile))
        .route("/profile/targets", get(get_targets))
}

#[derive(Debug, Serialize)]
pub struct TargetsResponse {
    pub bmr: f64,
    #[serde(flatten)]
    pub targets: NutrientTargets,
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "profile store failure");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

pub(crate) fn invalid(e: ProfileError) -> (StatusCode, String) {
    (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
}

/// Loads the caller's profile or answers 404.
pub(crate) async fn require_profile(
    state: &AppState,
    user_id: Uuid,
) -> Result<Profile, (StatusCode, String)> {
    state
        .profiles
        .get_profile(user_id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, "Profile not found".to_string()))
}

fn respond(user_id: Uuid, profile: Profile) -> ProfileResponse {
    let targets = match compute_targets(&profile) {
        Ok(targets) => Some(targets),
        Err(e) => {
            warn!(%user_id, error = %e, "targets unavailable for stored profile");
            None
        }
    };
    ProfileResponse { profile, targets }
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ProfileResponse>, (StatusCode, String)> {
    let profile = require_profile(&state, user_id).await?;
    Ok(Json(respond(user_id, profile)))
}

#[instrument(skip(state, form))]
pub async fn create_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Form(form): Form<ProfileForm>,
) -> Result<(StatusCode, Json<ProfileResponse>), (StatusCode, String)> {
    let profile = form.parse().map_err(|e| {
        warn!(%user_id, error = %e, "profile form rejected");
        invalid(e)
    })?;

    let created = state
        .profiles
        .create_profile(user_id, &profile)
        .await
        .map_err(internal)?;
    if !created {
        return Err((StatusCode::CONFLICT, "Profile already exists".into()));
    }
    info!(%user_id, "profile created");
    Ok((StatusCode::CREATED, Json(respond(user_id, profile))))
}

#[instrument(skip(state, form))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Form(form): Form<ProfileForm>,
) -> Result<Json<ProfileResponse>, (StatusCode, String)> {
    let profile = form.parse().map_err(|e| {
        warn!(%user_id, error = %e, "profile form rejected");
        invalid(e)
    })?;

    state
        .profiles
        .save_profile(user_id, &profile)
        .await
        .map_err(internal)?;
    info!(%user_id, "profile updated");
    Ok(Json(respond(user_id, profile)))
}

#[instrument(skip(state))]
pub async fn get_targets(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<TargetsResponse>, (StatusCode, String)> {
    let profile = require_profile(&state, user_id).await?;
    let targets = compute_targets(&profile).map_err(invalid)?;
    Ok(Json(TargetsResponse {
        bmr: basal_metabolic_rate(&profile),
        targets,
    }))
}
