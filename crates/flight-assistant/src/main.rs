//! Command line front end for the flight booking assistant.

#[macro_use]
extern crate tracing;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flight_assistant::{Assistant, AssistantBuilder, Console};
use flight_assistant::core::{ToolCallRequest, ToolCallResult};
use flight_assistant::data::BookingData;
use flight_assistant::service::{FlightBookingService, load_catalog, seed_flights};
use owo_colors::OwoColorize;
use serde_json::{Value, json};
use tokio::io::{self, BufReader};

/// Flight booking assistant tools.
#[derive(Parser, Debug)]
#[command(name = "flight-assistant", version)]
struct Cli {
    /// JSON file with the flight catalog, defaults to the built-in flights
    #[arg(long, env = "FLIGHT_CATALOG", global = true)]
    catalog: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the scripted booking scenario (default)
    Demo,
    /// Print the system prompt and tool definitions as JSON
    Tools,
    /// Read one JSON tool call per line from stdin and print the results
    Console,
}

const BAR_CHAR: &str = "▎";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let flights = match &cli.catalog {
        Some(path) => load_catalog(path).with_context(|| {
            format!("failed to load catalog from {}", path.display())
        })?,
        None => seed_flights(),
    };
    debug!("serving {} flight(s)", flights.len());
    let service = Arc::new(FlightBookingService::new(flights));
    let assistant = AssistantBuilder::with_service(service).build();
    let output = Output {
        colored: !cli.no_color,
    };

    match cli.command.unwrap_or(Command::Demo) {
        Command::Demo => run_demo(&assistant, &output).await,
        Command::Tools => {
            let doc = json!({
                "system_prompt": assistant.system_prompt(),
                "tools": assistant.tool_definitions(),
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
            Ok(())
        }
        Command::Console => {
            let console = Console::new(assistant).on_malformed(move |err| {
                output.error(err);
            });
            console.run(BufReader::new(io::stdin()), io::stdout()).await?;
            Ok(())
        }
    }
}

async fn run_demo(assistant: &Assistant, output: &Output) -> Result<()> {
    let mut demo = Demo {
        assistant,
        output,
        next_id: 0,
    };

    demo.call(
        "List flights Warsaw -> Krakow",
        "list_flights",
        json!({ "departure": "Warsaw", "destination": "Krakow" }),
    )
    .await;
    demo.call("Get flight LO123", "get_flight", json!({ "code": "LO123" }))
        .await;

    let result = demo
        .call(
            "Book 2 tickets on LO123",
            "book_tickets",
            json!({
                "flight_code": "LO123",
                "passengers": [
                    { "first_name": "Alice", "last_name": "Nowak", "date_of_birth": "1990-03-10" },
                    { "first_name": "Bob", "last_name": "Kowalski", "date_of_birth": "1988-07-22" },
                ],
            }),
        )
        .await;
    if result.is_error {
        anyhow::bail!("demo booking failed: {}", result.content);
    }
    let booking: BookingData = serde_json::from_str(&result.content)
        .context("booking result is not valid JSON")?;

    demo.call(
        "Capacity after booking",
        "get_flight",
        json!({ "code": "LO123" }),
    )
    .await;
    demo.call(
        "Find booking by id",
        "find_booking",
        json!({ "booking_id": booking.id }),
    )
    .await;
    demo.call(
        "Cancel booking",
        "cancel_booking",
        json!({ "booking_id": booking.id }),
    )
    .await;
    demo.call(
        "Capacity after cancel",
        "get_flight",
        json!({ "code": "LO123" }),
    )
    .await;
    Ok(())
}

/// Drives the scripted scenario through the tool dispatcher, the same path
/// a model's tool calls take.
struct Demo<'a> {
    assistant: &'a Assistant,
    output: &'a Output,
    next_id: usize,
}

impl Demo<'_> {
    async fn call(
        &mut self,
        title: &str,
        name: &str,
        arguments: Value,
    ) -> ToolCallResult {
        self.next_id += 1;
        self.output.heading(title);
        let result = self
            .assistant
            .call_tool(ToolCallRequest {
                id: format!("call_{}", self.next_id),
                name: name.to_owned(),
                arguments,
            })
            .await;
        self.output.result(&result);
        result
    }
}

/// Terminal output helpers.
#[derive(Clone, Copy)]
struct Output {
    colored: bool,
}

impl Output {
    fn heading(&self, title: &str) {
        if self.colored {
            println!("\n{} {}", "==".bright_cyan(), title.bold());
        } else {
            println!("\n== {title} ==");
        }
    }

    fn result(&self, result: &ToolCallResult) {
        let body = serde_json::from_str::<Value>(&result.content)
            .and_then(|value| serde_json::to_string_pretty(&value))
            .unwrap_or_else(|_| result.content.clone());
        if !self.colored {
            println!("{body}");
        } else if result.is_error {
            println!("{}{}", BAR_CHAR.bright_red(), body.red());
        } else {
            for line in body.lines() {
                println!("{}{}", BAR_CHAR.bright_cyan(), line.bright_white());
            }
        }
    }

    fn error(&self, message: &str) {
        if self.colored {
            eprintln!("{}{}", BAR_CHAR.bright_red(), message.red());
        } else {
            eprintln!("error: {message}");
        }
    }
}
