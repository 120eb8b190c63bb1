use axum::Json;
use axum::extract::State;
use chrono::Datelike;
use common::StatsInput;
use common::stats::{aggregate, resolve_city_pins};
use sea_orm::*;
use tracing::instrument;

use crate::entity::member;
use crate::error::AppError;
use crate::models::stats::{CityOptionsResponse, CityPinResponse, ClubStatsResponse};
use crate::state::AppState;
use crate::utils::cache::keys;

/// The per-member projection behind the stats and the city map.
async fn load_stats_inputs<C: ConnectionTrait>(db: &C) -> Result<Vec<StatsInput>, AppError> {
    let rows: Vec<(i32, i32, i32, Option<Vec<String>>, Option<i32>)> = member::Entity::find()
        .select_only()
        .column(member::Column::TotalMarathons)
        .column(member::Column::BostonCount)
        .column(member::Column::Sub3Marathons)
        .column(member::Column::MarathonCities)
        .column(member::Column::YearJoined)
        .order_by_asc(member::Column::FullName)
        .into_tuple()
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(
            |(total_marathons, boston_count, sub3_marathons, marathon_cities, year_joined)| {
                StatsInput {
                    total_marathons,
                    boston_count,
                    sub3_marathons,
                    marathon_cities,
                    year_joined,
                }
            },
        )
        .collect())
}

#[utoipa::path(
    get,
    path = "/stats",
    tag = "Stats",
    operation_id = "getClubStats",
    summary = "Club statistics",
    description = "Totals across all members: marathons run, Boston finishes, distinct marathon cities, \
        members with a sub-3 marathon, and years since the earliest join year.",
    responses(
        (status = 200, description = "Club statistics", body = ClubStatsResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<ClubStatsResponse>, AppError> {
    let stats = state
        .cache
        .get_or_load(keys::STATS, || async {
            let inputs = load_stats_inputs(&state.db).await?;
            let current_year = chrono::Utc::now().year();
            Ok::<_, AppError>(ClubStatsResponse::from(aggregate(&inputs, current_year)))
        })
        .await?;

    Ok(Json(stats))
}

#[utoipa::path(
    get,
    path = "/marathon-cities",
    tag = "Stats",
    operation_id = "listMarathonCities",
    summary = "Marathon city map pins",
    description = "One pin per known marathon city with the number of members who ran it, in first-seen order. \
        Cities missing from the gazetteer are left out.",
    responses(
        (status = 200, description = "City pins", body = Vec<CityPinResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_marathon_cities(
    State(state): State<AppState>,
) -> Result<Json<Vec<CityPinResponse>>, AppError> {
    let pins = state
        .cache
        .get_or_load(keys::MARATHON_CITIES, || async {
            let inputs = load_stats_inputs(&state.db).await?;
            let pins = resolve_city_pins(
                inputs.iter().map(|m| m.marathon_cities.as_deref()),
                &state.gazetteer,
            );
            Ok::<_, AppError>(pins.into_iter().map(CityPinResponse::from).collect::<Vec<_>>())
        })
        .await?;

    Ok(Json(pins))
}

#[utoipa::path(
    get,
    path = "/marathon-cities/options",
    tag = "Stats",
    operation_id = "listMarathonCityOptions",
    summary = "Known marathon cities",
    description = "Gazetteer keys accepted in a member's `marathon_cities`.",
    responses(
        (status = 200, description = "City keys", body = CityOptionsResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn list_city_options(State(state): State<AppState>) -> Json<CityOptionsResponse> {
    Json(CityOptionsResponse {
        cities: state.gazetteer.keys().to_vec(),
    })
}
