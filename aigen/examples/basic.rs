//! Basic usage example using the aigen meta crate.
//!
//! This demonstrates:
//! 1. Registering a backend under a name, wrapped with the logging layer
//! 2. Plain text generation
//! 3. Structured output with a schema derived by schemars
//! 4. Offering tools and continuing a conversation from history
//!
//! The backend here is an in-process function model that answers from a
//! script, so the example runs without network access or API keys. A real
//! backend would implement `Model` and translate `GenerationRequest` into its
//! provider's wire format.

use aigen::prelude::*;
use aigen::schemars::JsonSchema;
use aigen::{CandidateData, FunctionTool, GenerationUsage};
use serde::Deserialize;

#[derive(Debug, Deserialize, JsonSchema)]
struct PersonInfo {
    /// Full name of the person
    name: String,
    /// Age in years
    age: u32,
    /// List of hobbies
    hobbies: Vec<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[allow(dead_code)]
struct WeatherQuery {
    /// City to report on
    city: String,
}

/// A scripted backend: JSON-format requests get a person record, everything
/// else gets a summary of what was asked.
fn scripted_model() -> FunctionModel {
    FunctionModel::new(
        ModelInfo::new("demo/scripted").with_label("Scripted demo model"),
        |req: GenerationRequest| async move {
            let text = match req.output.format {
                OutputFormat::Json => "Here is the record:\n```json\n{\"name\": \"Sarah Johnson\", \"age\": 28, \"hobbies\": [\"rock climbing\", \"cooking\"]}\n```".to_string(),
                OutputFormat::Text => format!(
                    "Received {} message(s) and {} tool(s).",
                    req.messages.len(),
                    req.tools.len()
                ),
            };

            let candidates = (0..req.candidates.unwrap_or(1))
                .map(|index| CandidateData::new(index, MessageData::model(text.clone())))
                .collect();

            Ok(GenerationResponseData::new(candidates).with_usage(GenerationUsage {
                total_tokens: Some(42),
                ..Default::default()
            }))
        },
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut models: HashMap<String, Arc<dyn Model>> = HashMap::new();
    models.insert(
        model_key("scripted"),
        Arc::new(LoggingLayer::new().layer(scripted_model())),
    );
    let generator = Generator::builder().lookup(models).finish();

    // Example 1: plain text
    println!("=== Example 1: Text generation ===\n");
    let response = generator
        .generate(ModelPrompt::new("scripted", "Tell me a joke").with_candidates(2))
        .await?;
    for candidate in &response.candidates {
        println!("[{}] {}", candidate.index, candidate.text());
    }
    println!("usage: {:?}\n", response.usage);

    // Example 2: structured output
    println!("=== Example 2: Structured output ===\n");
    let response = generator
        .generate(
            ModelPrompt::new(
                "scripted",
                "Extract person information: Sarah Johnson is 28 and enjoys rock climbing and cooking.",
            )
            .with_output_schema::<PersonInfo>(),
        )
        .await?;
    if let Some(person) = response.output() {
        println!("{} ({}) likes {}\n", person.name, person.age, person.hobbies.join(", "));
    }

    // Example 3: tools and history
    println!("=== Example 3: Tools and history ===\n");
    let weather: Arc<dyn ToolAction> = Arc::new(
        FunctionTool::new(
            "weather",
            aigen::schema::typed::<WeatherQuery>(),
            |input| async move { Ok(serde_json::json!({"city": input["city"], "forecast": "sunny"})) },
        )
        .with_description("Look up the weather for a city"),
    );

    let history = vec![
        MessageData::user("Hi!"),
        MessageData::model("Hello, how can I help?"),
    ];
    let response = generator
        .generate(
            ModelPrompt::new("scripted", "What's the weather in Paris?")
                .with_history(history)
                .with_tool(weather.clone()),
        )
        .await?;
    println!("{}", response.text());

    let forecast = weather.invoke(serde_json::json!({"city": "Paris"})).await?;
    println!("tool output: {}", forecast);

    Ok(())
}
