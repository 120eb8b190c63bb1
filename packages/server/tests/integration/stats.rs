use chrono::Datelike;
use serde_json::json;

use crate::common::{TestApp, routes};

async fn seed_scenario(app: &TestApp, token: &str) {
    app.create_member(
        token,
        json!({
            "full_name": "Ana",
            "total_marathons": 10,
            "boston_count": 2,
            "sub3_marathons": 0,
            "marathon_cities": ["Boston", "Chicago"],
            "year_joined": 2019,
        }),
    )
    .await;
    app.create_member(
        token,
        json!({
            "full_name": "Beto",
            "total_marathons": 5,
            "boston_count": 0,
            "sub3_marathons": 3,
            "marathon_cities": ["Boston"],
            "year_joined": 2021,
        }),
    )
    .await;
}

#[tokio::test]
async fn stats_aggregate_every_member() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    seed_scenario(&app, &token).await;

    let res = app.get_without_token(routes::STATS).await;

    let current_year = chrono::Utc::now().year();
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(
        res.body,
        json!({
            "totalMarathons": 15,
            "memberCount": 2,
            "distinctCities": 2,
            "bostonFinishes": 2,
            "sub3Members": 1,
            "earliestYear": 2019,
            "yearsOfHistory": current_year - 2019,
        })
    );
}

#[tokio::test]
async fn stats_of_an_empty_club_start_at_the_current_year() {
    let app = TestApp::spawn().await;

    let res = app.get_without_token(routes::STATS).await;

    let current_year = chrono::Utc::now().year();
    assert_eq!(res.status, 200);
    assert_eq!(res.body["memberCount"], 0);
    assert_eq!(res.body["totalMarathons"], 0);
    assert_eq!(res.body["earliestYear"], current_year);
    assert_eq!(res.body["yearsOfHistory"], 0);
}

#[tokio::test]
async fn city_pins_count_members_per_city() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    seed_scenario(&app, &token).await;

    let res = app.get_without_token(routes::MARATHON_CITIES).await;

    assert_eq!(res.status, 200, "{}", res.text);
    let pins = res.body.as_array().unwrap();
    assert_eq!(pins.len(), 2);
    assert_eq!(pins[0]["name"], "Boston");
    assert_eq!(pins[0]["memberCount"], 2);
    assert_eq!(pins[0]["displayName"], "Boston Marathon");
    assert_eq!(pins[1]["name"], "Chicago");
    assert_eq!(pins[1]["memberCount"], 1);
    assert!(pins[1]["lat"].is_number());
    assert!(pins[1]["lng"].is_number());
}

#[tokio::test]
async fn unknown_cities_count_as_distinct_but_get_no_pin() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    app.create_member(
        &token,
        json!({"full_name": "Ana", "marathon_cities": ["Atlantis", "Boston"]}),
    )
    .await;

    let stats = app.get_without_token(routes::STATS).await;
    assert_eq!(stats.body["distinctCities"], 2);

    let pins = app.get_without_token(routes::MARATHON_CITIES).await;
    let names: Vec<&str> = pins
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Boston"]);
}

#[tokio::test]
async fn member_writes_refresh_the_cached_stats() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let before = app.get_without_token(routes::STATS).await;
    assert_eq!(before.body["memberCount"], 0);

    seed_scenario(&app, &token).await;

    let after = app.get_without_token(routes::STATS).await;
    assert_eq!(after.body["memberCount"], 2);
}

#[tokio::test]
async fn city_options_list_the_gazetteer_keys() {
    let app = TestApp::spawn().await;

    let res = app.get_without_token(routes::CITY_OPTIONS).await;

    assert_eq!(res.status, 200);
    let cities = res.body["cities"].as_array().unwrap();
    assert!(cities.contains(&json!("Boston")));
    assert!(cities.contains(&json!("Ciudad de México")));
}
