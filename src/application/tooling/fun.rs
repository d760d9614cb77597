//! Small demo lookups without parameters worth validating.

use async_trait::async_trait;
use rand::seq::SliceRandom;
use serde_json::{json, Value};

use super::executor::{ToolError, ToolExecutor, ToolSpec};

const JOKES: [&str; 6] = [
    "Why did the truck driver bring a map to dinner? He wanted to find the best route to dessert.",
    "I told my dispatcher a joke about highways. It went over their head like an overpass.",
    "Why do truckers make terrible secret agents? They always leave a paper trail of delivery receipts.",
    "What do you call a sleeping big rig? A slumber truck.",
    "Why did the cargo ship apply for a desk job? It was tired of freight work.",
    "My GPS told me a joke today. It had perfect delivery.",
];

const FORTUNES: [&str; 6] = [
    "A long journey will end sooner than you expect.",
    "Good news travels on the fastest route.",
    "Patience at the weigh station brings rewards at the dock.",
    "An unexpected detour leads to a pleasant discovery.",
    "Your next delivery arrives ahead of schedule.",
    "A small kindness on the road returns doubled.",
];

/// Returns a random canned joke.
pub struct FindJoke;

impl FindJoke {
    pub fn spec() -> ToolSpec {
        ToolSpec::new("find_joke", "Find a short joke to lighten the mood.")
            .with_param("category", "Optional topic for the joke")
    }
}

#[async_trait]
impl ToolExecutor for FindJoke {
    async fn execute(&self, input: Value) -> Result<Value, ToolError> {
        let joke = JOKES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(JOKES[0]);
        let mut payload = json!({ "joke": joke });
        if let Some(category) = input.get("category").and_then(Value::as_str) {
            payload["category"] = json!(category);
        }
        Ok(payload)
    }
}

/// Draws a random fortune.
pub struct TellFortune;

impl TellFortune {
    pub fn spec() -> ToolSpec {
        ToolSpec::new("tell_fortune", "Draw a fortune-cookie style prediction.")
    }
}

#[async_trait]
impl ToolExecutor for TellFortune {
    async fn execute(&self, _input: Value) -> Result<Value, ToolError> {
        let fortune = FORTUNES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(FORTUNES[0]);
        Ok(json!({ "fortune": fortune }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn find_joke_returns_a_joke() {
        let result = FindJoke
            .execute(json!({ "category": "trucks" }))
            .await
            .expect("joke");
        let joke = result["joke"].as_str().expect("joke text");
        assert!(JOKES.contains(&joke));
        assert_eq!(result["category"], "trucks");
    }

    #[tokio::test]
    async fn find_joke_works_without_category() {
        let result = FindJoke.execute(json!({})).await.expect("joke");
        assert!(result["joke"].as_str().is_some());
        assert!(result.get("category").is_none());
    }

    #[tokio::test]
    async fn tell_fortune_returns_a_fortune() {
        let result = TellFortune.execute(json!({})).await.expect("fortune");
        let fortune = result["fortune"].as_str().expect("fortune text");
        assert!(FORTUNES.contains(&fortune));
    }
}
