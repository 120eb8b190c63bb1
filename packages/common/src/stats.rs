use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::gazetteer::Gazetteer;

/// The per-member projection the aggregations need.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsInput {
    pub total_marathons: i32,
    pub boston_count: i32,
    pub sub3_marathons: i32,
    pub marathon_cities: Option<Vec<String>>,
    pub year_joined: Option<i32>,
}

/// Club-wide figures derived from the full member set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubStats {
    pub total_marathons: i64,
    pub member_count: usize,
    pub distinct_cities: usize,
    pub boston_finishes: i64,
    /// Members with at least one sub-3 marathon, not the number of sub-3 races.
    pub sub3_members: usize,
    pub earliest_year: i32,
    pub years_of_history: i32,
}

/// A gazetteer-resolved marathon city with the number of members who ran it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityPin {
    pub name: String,
    pub display_name: String,
    pub lat: f64,
    pub lng: f64,
    pub member_count: usize,
}

/// Reduce the member set into [`ClubStats`].
///
/// The reduction is order-independent. Counts are summed as stored; negative
/// values are not rejected here. Members without `year_joined` never move
/// `earliest_year`, which starts at `current_year`.
pub fn aggregate(members: &[StatsInput], current_year: i32) -> ClubStats {
    let mut total_marathons = 0i64;
    let mut boston_finishes = 0i64;
    let mut sub3_members = 0usize;
    let mut earliest_year = current_year;
    let mut cities: HashSet<&str> = HashSet::new();

    for member in members {
        total_marathons += i64::from(member.total_marathons);
        boston_finishes += i64::from(member.boston_count);
        if member.sub3_marathons > 0 {
            sub3_members += 1;
        }
        if let Some(year) = member.year_joined
            && year < earliest_year
        {
            earliest_year = year;
        }
        if let Some(list) = &member.marathon_cities {
            cities.extend(list.iter().map(String::as_str));
        }
    }

    ClubStats {
        total_marathons,
        member_count: members.len(),
        distinct_cities: cities.len(),
        boston_finishes,
        sub3_members,
        earliest_year,
        years_of_history: current_year.saturating_sub(earliest_year),
    }
}

/// Count member participations per city and join them against the gazetteer.
///
/// A city counts once per member listing it. Pins come out in first-seen
/// order; cities the gazetteer does not know are dropped.
pub fn resolve_city_pins<'a, I>(city_lists: I, gazetteer: &Gazetteer) -> Vec<CityPin>
where
    I: IntoIterator<Item = Option<&'a [String]>>,
{
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for list in city_lists.into_iter().flatten() {
        let mut seen_for_member: HashSet<&str> = HashSet::new();
        for city in list {
            let city = city.as_str();
            if !seen_for_member.insert(city) {
                continue;
            }
            let count = counts.entry(city).or_insert_with(|| {
                order.push(city);
                0
            });
            *count += 1;
        }
    }

    order
        .into_iter()
        .filter_map(|name| {
            let Some(city) = gazetteer.get(name) else {
                tracing::debug!(city = name, "Marathon city not in gazetteer, skipping");
                return None;
            };
            Some(CityPin {
                name: name.to_string(),
                display_name: city.display_name.clone(),
                lat: city.lat,
                lng: city.lng,
                member_count: counts[name],
            })
        })
        .collect()
}
