//! Demo logistics executors. They generate plausible-looking data
//! rather than calling real fleet or traffic services.

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Local};
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::{json, Value};

use super::executor::{require_str, ToolError, ToolExecutor, ToolSpec};

const MAJOR_HIGHWAYS: [&str; 6] = ["I-95", "I-75", "I-80", "I-90", "I-10", "I-70"];

const WEATHER_CONDITIONS: [&str; 8] = [
    "Clear skies",
    "Light rain",
    "Heavy rain",
    "Snow flurries",
    "Heavy snow",
    "Fog",
    "High winds",
    "Severe thunderstorms",
];

const TRAFFIC_EVENTS: [&str; 6] = [
    "Construction",
    "Accident cleanup",
    "Heavy congestion",
    "Road work",
    "Lane closure",
    "Holiday traffic",
];

const TRUCK_PREFIXES: [&str; 3] = ["TRK", "VEH", "FRT"];

const DRIVER_FIRST_NAMES: [&str; 6] = ["John", "Sarah", "Mike", "Lisa", "David", "Emma"];

const DRIVER_LAST_NAMES: [&str; 6] = ["Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia"];

/// Finds candidate routes between two cities.
pub struct FindRoutes;

impl FindRoutes {
    pub fn spec() -> ToolSpec {
        ToolSpec::new(
            "find_routes",
            "Find available shipping routes between two cities. Returns route options \
             with estimated base travel times and the major highways on the way.",
        )
        .with_param("origin", "Starting city")
        .with_param("destination", "Destination city")
    }
}

#[async_trait]
impl ToolExecutor for FindRoutes {
    async fn execute(&self, input: Value) -> Result<Value, ToolError> {
        let origin = require_str(&input, "origin")?;
        let destination = require_str(&input, "destination")?;

        let mut rng = rand::thread_rng();
        let route_count = rng.gen_range(2..=3);
        let routes: Vec<Value> = (0..route_count)
            .map(|_| {
                let leg_count = rng.gen_range(1..=3);
                let via: Vec<&str> = MAJOR_HIGHWAYS
                    .choose_multiple(&mut rng, leg_count)
                    .copied()
                    .collect();
                json!({
                    "route_id": format!("RT{}", rng.gen_range(1000..=9999)),
                    "estimated_hours": rng.gen_range(8..=48),
                    "via": via.join(" → "),
                })
            })
            .collect();

        Ok(json!({
            "routes": routes,
            "origin": origin,
            "destination": destination,
        }))
    }
}

/// Reports traffic and weather along a previously found route.
pub struct CheckConditions;

impl CheckConditions {
    pub fn spec() -> ToolSpec {
        ToolSpec::new(
            "check_conditions",
            "Check current traffic and weather conditions for a route returned by find_routes.",
        )
        .with_param("route_id", "Route identifier from find_routes")
    }
}

#[async_trait]
impl ToolExecutor for CheckConditions {
    async fn execute(&self, input: Value) -> Result<Value, ToolError> {
        let route_id = require_str(&input, "route_id")?;

        let mut rng = rand::thread_rng();
        let traffic_delay = round_tenth(rng.gen_range(0.0..4.0));
        let weather_delay = round_tenth(rng.gen_range(0.0..3.0));

        let mut conditions: Vec<&str> = Vec::new();
        if rng.gen_bool(0.7) {
            if let Some(event) = TRAFFIC_EVENTS.choose(&mut rng).copied() {
                conditions.push(event);
            }
        }
        if rng.gen_bool(0.6) {
            if let Some(weather) = WEATHER_CONDITIONS.choose(&mut rng).copied() {
                conditions.push(weather);
            }
        }
        let summary = if conditions.is_empty() {
            "No major conditions reported".to_string()
        } else {
            conditions.join(" and ")
        };

        Ok(json!({
            "route_id": route_id,
            "traffic_delay_hours": traffic_delay,
            "weather_delay_hours": weather_delay,
            "conditions": summary,
        }))
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Assigns a truck and driver to a route and confirms the dispatch.
pub struct DispatchTruck;

impl DispatchTruck {
    pub fn spec() -> ToolSpec {
        ToolSpec::new(
            "dispatch_truck",
            "Assign a truck and driver to a route and confirm the dispatch with a \
             scheduled departure time.",
        )
        .with_param("route_id", "Route identifier from find_routes")
    }
}

#[async_trait]
impl ToolExecutor for DispatchTruck {
    async fn execute(&self, input: Value) -> Result<Value, ToolError> {
        let route_id = require_str(&input, "route_id")?;

        let mut rng = rand::thread_rng();
        let prefix = TRUCK_PREFIXES.choose(&mut rng).copied().unwrap_or("TRK");
        let truck_id = format!("{prefix}-{}", rng.gen_range(100..=999));

        let first = DRIVER_FIRST_NAMES.choose(&mut rng).copied().unwrap_or("John");
        let last = DRIVER_LAST_NAMES.choose(&mut rng).copied().unwrap_or("Smith");
        let driver = format!("{first} {last}");

        // Departure sometime in the next half hour to six hours.
        let minutes_ahead = rng.gen_range(30..=360);
        let departure = Local::now() + ChronoDuration::minutes(minutes_ahead);

        Ok(json!({
            "route_id": route_id,
            "truck_id": truck_id,
            "driver": driver,
            "departure_time": departure.format("%Y-%m-%d %H:%M:%S").to_string(),
            "status": "CONFIRMED",
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn find_routes_returns_plausible_options() {
        let result = FindRoutes
            .execute(json!({ "origin": "Chicago", "destination": "Denver" }))
            .await
            .expect("routes");

        assert_eq!(result["origin"], "Chicago");
        assert_eq!(result["destination"], "Denver");

        let routes = result["routes"].as_array().expect("routes array");
        assert!((2..=3).contains(&routes.len()));
        for route in routes {
            let route_id = route["route_id"].as_str().expect("route_id");
            assert!(route_id.starts_with("RT"));
            let hours = route["estimated_hours"].as_i64().expect("hours");
            assert!((8..=48).contains(&hours));
            assert!(!route["via"].as_str().expect("via").is_empty());
        }
    }

    #[tokio::test]
    async fn find_routes_requires_both_cities() {
        let err = FindRoutes
            .execute(json!({ "origin": "Chicago" }))
            .await
            .expect_err("must fail");
        assert_eq!(err, ToolError::missing_parameter("destination"));
    }

    #[tokio::test]
    async fn check_conditions_reports_bounded_delays() {
        let result = CheckConditions
            .execute(json!({ "route_id": "RT1234" }))
            .await
            .expect("conditions");

        assert_eq!(result["route_id"], "RT1234");
        let traffic = result["traffic_delay_hours"].as_f64().expect("traffic");
        assert!((0.0..=4.0).contains(&traffic));
        let weather = result["weather_delay_hours"].as_f64().expect("weather");
        assert!((0.0..=3.0).contains(&weather));
        assert!(!result["conditions"].as_str().expect("summary").is_empty());
    }

    #[tokio::test]
    async fn dispatch_truck_confirms_assignment() {
        let result = DispatchTruck
            .execute(json!({ "route_id": "RT1234" }))
            .await
            .expect("dispatch");

        assert_eq!(result["status"], "CONFIRMED");
        let truck_id = result["truck_id"].as_str().expect("truck_id");
        assert!(TRUCK_PREFIXES.iter().any(|p| truck_id.starts_with(p)));
        assert!(result["driver"].as_str().expect("driver").contains(' '));
        assert!(!result["departure_time"].as_str().expect("departure").is_empty());
    }

    #[tokio::test]
    async fn non_string_route_id_is_rejected() {
        let err = CheckConditions
            .execute(json!({ "route_id": 42 }))
            .await
            .expect_err("must fail");
        assert!(matches!(err, ToolError::InvalidParameter { .. }));
    }
}
