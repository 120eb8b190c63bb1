use common::{CityPin, ClubStats};
use serde::Serialize;

/// Club-wide totals shown on the home page.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClubStatsResponse {
    /// Sum of every member's marathon count.
    #[schema(example = 412)]
    pub total_marathons: i64,
    #[schema(example = 57)]
    pub member_count: usize,
    /// Distinct marathon cities across all members, including unmapped ones.
    #[schema(example = 23)]
    pub distinct_cities: usize,
    #[schema(example = 31)]
    pub boston_finishes: i64,
    /// Members with at least one sub-3-hour marathon.
    #[schema(example = 9)]
    pub sub3_members: usize,
    #[schema(example = 2009)]
    pub earliest_year: i32,
    #[schema(example = 17)]
    pub years_of_history: i32,
}

impl From<ClubStats> for ClubStatsResponse {
    fn from(s: ClubStats) -> Self {
        Self {
            total_marathons: s.total_marathons,
            member_count: s.member_count,
            distinct_cities: s.distinct_cities,
            boston_finishes: s.boston_finishes,
            sub3_members: s.sub3_members,
            earliest_year: s.earliest_year,
            years_of_history: s.years_of_history,
        }
    }
}

/// One map marker.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CityPinResponse {
    /// Gazetteer key as stored on member records.
    #[schema(example = "New York")]
    pub name: String,
    #[schema(example = "Nueva York")]
    pub display_name: String,
    #[schema(example = 40.7128)]
    pub lat: f64,
    #[schema(example = -74.006)]
    pub lng: f64,
    /// Members who list this city.
    #[schema(example = 4)]
    pub member_count: usize,
}

impl From<CityPin> for CityPinResponse {
    fn from(p: CityPin) -> Self {
        Self {
            name: p.name,
            display_name: p.display_name,
            lat: p.lat,
            lng: p.lng,
            member_count: p.member_count,
        }
    }
}

/// Marathon city choices offered by the member editor.
#[derive(Serialize, utoipa::ToSchema)]
pub struct CityOptionsResponse {
    #[schema(example = json!(["Boston", "Chicago", "New York"]))]
    pub cities: Vec<String>,
}
