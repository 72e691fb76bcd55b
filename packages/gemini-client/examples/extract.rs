//! JSON extraction example

use gemini_client::{GeminiClient, GenerateRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = GeminiClient::from_env()?;

    let system = "Extract person information from text. Return JSON with keys name, age, occupation.";
    let user = "John Smith is a 35 year old software engineer.";

    let response = client
        .generate_content(
            GenerateRequest::user_text(user)
                .system(system)
                .temperature(0.0)
                .response_mime_type("application/json"),
        )
        .await?;

    println!("Raw output: {}", response.text);

    let parsed: serde_json::Value = serde_json::from_str(&response.text)?;
    println!("\nParsed:");
    println!("  Name: {}", parsed["name"]);
    println!("  Age: {}", parsed["age"]);
    println!("  Occupation: {}", parsed["occupation"]);

    Ok(())
}
