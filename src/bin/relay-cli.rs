use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Operator CLI for the tracking event relay", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Post a raw JSON payload file to the relay
    Send {
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Print a complete sample payload
    Sample,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Send { file } => {
            let body = std::fs::read(&file)?;
            // Catch obviously broken files locally instead of round-tripping a 500.
            serde_json::from_slice::<Value>(&body)?;

            let res = reqwest::Client::new()
                .post(format!("{}/", cli.url.trim_end_matches('/')))
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Sample => {
            println!("{}", serde_json::to_string_pretty(&sample_payload())?);
        }
    }

    Ok(())
}

fn sample_payload() -> Value {
    json!({
        "ev": "contact_form_submitted",
        "et": "form_submit",
        "id": "cl_app_id_001",
        "uid": "cl_app_id_001-uid-001",
        "mid": Uuid::new_v4().to_string(),
        "t": "Contact us",
        "p": "http://localhost/contact-us",
        "l": "en-US",
        "sc": "1920 x 1080",
        "atrk1": "form_variant",
        "atrv1": "red_top",
        "atrt1": "string",
        "uatrk1": "email",
        "uatrv1": "user@example.com",
        "uatrt1": "string",
    })
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let request_id = res
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let text = res.text().await?;

    if status.is_success() {
        println!("Relayed (status {}, request {})", status, request_id);
    } else {
        eprintln!("Error: relay returned status {} (request {})", status, request_id);
        if !text.is_empty() {
            eprintln!("Response: {}", text);
        }
    }
    Ok(())
}
