//! Console front end: welcome banner, query loop, and an observer
//! that narrates each agent step.

use std::io::{self, BufRead, Write};

use crate::application::agent::{Agent, AgentObserver, Decision, Observation, RunStatus};
use crate::infrastructure::model::ModelClient;

const SEPARATOR_WIDTH: usize = 80;

/// Prints a titled separator line, or a bare rule when the title is empty.
pub fn separator(title: &str, fill: char) {
    let line = fill.to_string().repeat(SEPARATOR_WIDTH);
    if title.is_empty() {
        println!("\n{line}");
    } else {
        println!("\n{line}");
        println!("{title:^SEPARATOR_WIDTH$}");
        println!("{line}");
    }
}

pub fn print_welcome() {
    separator("LOGISTICS ROUTE PLANNER", '=');
    println!("This tool helps plan and dispatch truck routes using the ReAct framework.");
    println!();
    println!("Capabilities:");
    println!("  1. Find available routes between two cities");
    println!("  2. Check traffic and weather conditions for a route");
    println!("  3. Dispatch a truck and driver with a confirmed departure");
    println!();
    println!("Example queries:");
    println!("  - Plan a delivery from Chicago to Denver");
    println!("  - What are the conditions on route RT1234?");
    println!("  - Find the fastest route from Boston to Miami and dispatch a truck");
    println!();
    println!("Type 'exit' to quit.");
    separator("", '-');
}

/// Observer that prints each step of the loop as it happens.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleObserver;

impl AgentObserver for ConsoleObserver {
    fn on_iteration(&self, iteration: usize) {
        println!("\n==================== Iteration {iteration} ====================");
    }

    fn on_prompt(&self, prompt: &str) {
        println!("\nSending prompt to LLM:");
        println!("{}", "-".repeat(60));
        println!("{prompt}");
        println!("{}", "-".repeat(60));
    }

    fn on_raw_response(&self, raw: &str) {
        println!("\nLLM responded with:");
        println!("{}", "-".repeat(60));
        println!("{raw}");
        println!("{}", "-".repeat(60));
    }

    fn on_decision(&self, decision: &Decision) {
        match decision {
            Decision::Action { action, .. } => {
                println!("\nLLM requested tool execution:");
                println!("Thought: {}", decision.thought());
                println!("Tool: {}", action.name);
                if let Some(params) = action.input.as_object() {
                    if !params.is_empty() {
                        println!("Input parameters:");
                        for (key, value) in params {
                            println!(" - {key}: {value}");
                        }
                    }
                }
            }
            Decision::Answer { answer, .. } => {
                println!("\nLLM provided final answer:");
                println!("Thought: {}", decision.thought());
                println!("Answer: {answer}");
            }
        }
    }

    fn on_observation(&self, observation: &Observation) {
        match observation {
            Observation::Success { result, .. } => {
                println!("\nTool execution results:");
                match serde_json::to_string_pretty(result) {
                    Ok(pretty) => println!("{pretty}"),
                    Err(_) => println!("{result}"),
                }
            }
            other => println!("\n{other}"),
        }
    }
}

/// Reads queries from stdin and runs each one through the agent until
/// the user exits.
pub async fn run_interactive<M: ModelClient>(agent: &Agent<M>) -> io::Result<()> {
    print_welcome();

    let stdin = io::stdin();
    loop {
        print!("\nYour query: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let query = line.trim();

        if query.is_empty() {
            println!("Please type something!");
            continue;
        }
        if query.eq_ignore_ascii_case("exit") {
            separator("GOODBYE!", '=');
            println!("Thanks for trying the ReAct agent!");
            break;
        }

        separator("NEW QUERY", '-');
        let report = agent.run(query).await;
        separator("RESPONSE", '-');

        if report.status == RunStatus::Failed {
            if let Some(failure) = &report.failure {
                println!("The run failed: {failure}");
            }
            println!("\nTip: if this is an API error, check your GOOGLE_API_KEY in config/.env");
        } else if let Some(answer) = &report.answer {
            println!("{answer}");
        }
    }

    Ok(())
}
