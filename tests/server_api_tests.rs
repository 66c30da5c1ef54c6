use std::sync::Arc;

use atlantis_calc::config::Config;
use atlantis_calc::data::builtin_catalog;
use atlantis_calc::server::routes::route_request;
use atlantis_calc::server::AppState;

fn state() -> AppState {
    AppState::new(Config::default(), Arc::new(builtin_catalog().clone()))
}

const EASY_SEED: &str = r#"["1a","1b","1c","1d","1e","2a","2b","2c","2d"]"#;

#[test]
fn health_endpoint_returns_ok_json() {
    let response = route_request(&state(), "GET", "/api/health", "");
    assert_eq!(response.status_code, 200);
    assert_eq!(response.content_type, "application/json");
    assert!(response.body.contains("\"status\": \"ok\""));
}

#[test]
fn rooms_endpoint_lists_rooms_without_finish_room() {
    let response = route_request(&state(), "GET", "/api/rooms", "");
    assert_eq!(response.status_code, 200);
    let payload: serde_json::Value =
        serde_json::from_str(&response.body).expect("response should be valid json");
    let rooms = payload["rooms"].as_array().expect("rooms should be an array");
    assert_eq!(rooms.len(), builtin_catalog().len() - 1);
    assert!(rooms.iter().all(|room| room["id"] != "finish room"));
}

#[test]
fn rooms_endpoint_filters_by_difficulty() {
    let response = route_request(&state(), "GET", "/api/rooms?difficulty=hard", "");
    assert_eq!(response.status_code, 200);
    let payload: serde_json::Value =
        serde_json::from_str(&response.body).expect("response should be valid json");
    let rooms = payload["rooms"].as_array().expect("rooms should be an array");
    assert!(!rooms.is_empty());
    assert!(rooms.iter().all(|room| room["difficulty"] == "hard"));
}

#[test]
fn calc_endpoint_returns_ranked_results() {
    let body = format!(r#"{{"rooms":{EASY_SEED},"limit":3}}"#);
    let response = route_request(&state(), "POST", "/api/calc", &body);
    assert_eq!(response.status_code, 200);

    let payload: serde_json::Value =
        serde_json::from_str(&response.body).expect("response should be valid json");
    assert_eq!(payload["status"], "ok");
    assert_eq!(payload["rooms"].as_array().map(Vec::len), Some(10));
    assert_eq!(payload["rooms"][9], "finish room");
    // 74 pairs + 242 triples for this seed's strategy counts.
    assert_eq!(payload["total_results"], 316);

    let results = payload["results"].as_array().expect("results should be an array");
    assert_eq!(results.len(), 3);
    let mut prior: Option<f64> = None;
    for (i, result) in results.iter().enumerate() {
        assert_eq!(result["rank"], i + 1);
        let time = result["boost_time"].as_f64().expect("boost_time is a number");
        if let Some(previous) = prior {
            assert!(previous <= time, "results should be fastest first");
        }
        prior = Some(time);
        let boosts = result["boosts"].as_array().expect("boosts should be an array");
        assert!(boosts.len() == 2 || boosts.len() == 3);
        assert_eq!(boosts[0]["pacelock"], 0.0);
    }
    assert!(payload["calc_command"]
        .as_str()
        .is_some_and(|cmd| cmd.starts_with("/calc room_1:1a room_2:1b")));
}

#[test]
fn calc_endpoint_flags_notable_seed_once() {
    let config = Config {
        notable_seconds: 10_000.0,
        ..Config::default()
    };
    let state = AppState::new(config, Arc::new(builtin_catalog().clone()));
    let body = format!(r#"{{"rooms":{EASY_SEED}}}"#);

    let first = route_request(&state, "POST", "/api/calc", &body);
    let second = route_request(&state, "POST", "/api/calc", &body);
    let notable = |body: &str| -> bool {
        let payload: serde_json::Value = serde_json::from_str(body).expect("valid json");
        payload["notable"].as_bool().expect("notable is a bool")
    };
    assert!(notable(&first.body));
    assert!(!notable(&second.body));
}

#[test]
fn calc_endpoint_rejects_wrong_room_count() {
    let response = route_request(&state(), "POST", "/api/calc", r#"{"rooms":["1a","1b"]}"#);
    assert_eq!(response.status_code, 400);
    assert!(response.body.contains("expected 9 rooms"));
}

#[test]
fn calc_endpoint_rejects_malformed_body() {
    let response = route_request(&state(), "POST", "/api/calc", "{not json");
    assert_eq!(response.status_code, 400);
    assert!(response.body.contains("Invalid request body"));
}

#[test]
fn unknown_route_is_404() {
    let response = route_request(&state(), "GET", "/api/nope", "");
    assert_eq!(response.status_code, 404);
}

#[test]
fn expired_seed_keys_do_not_accumulate() {
    let config = Config {
        seen_ttl_secs: 0,
        notable_seconds: 1e9,
        ..Config::default()
    };
    let state = AppState::new(config, Arc::new(builtin_catalog().clone()));
    let seed = ["1a", "1b", "1c", "1d", "1e", "2a", "2b", "2c", "2d"];

    for shift in 0..seed.len() {
        let mut rotated = seed.to_vec();
        rotated.rotate_left(shift);
        let body = serde_json::json!({ "rooms": rotated }).to_string();
        let response = route_request(&state, "POST", "/api/calc", &body);
        assert_eq!(response.status_code, 200);
    }

    let seen = state.seen.lock().expect("seen cache lock");
    assert!(seen.len() <= 1, "expired keys kept: {}", seen.len());
}

#[test]
fn negative_seen_ttl_still_remembers_seeds() {
    let config = Config {
        seen_ttl_secs: -30,
        notable_seconds: 10_000.0,
        ..Config::default()
    };
    let state = AppState::new(config, Arc::new(builtin_catalog().clone()));
    let body = format!(r#"{{"rooms":{EASY_SEED}}}"#);

    let first = route_request(&state, "POST", "/api/calc", &body);
    let second = route_request(&state, "POST", "/api/calc", &body);
    let notable = |body: &str| -> bool {
        let payload: serde_json::Value = serde_json::from_str(body).expect("valid json");
        payload["notable"].as_bool().expect("notable is a bool")
    };
    assert!(notable(&first.body));
    assert!(!notable(&second.body));
}
