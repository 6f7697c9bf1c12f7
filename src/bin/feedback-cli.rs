use clap::{Parser, Subcommand, ValueEnum};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "feedback-cli")]
#[command(about = "Submit feedback to a running feedback-ingest service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Route the service mounts the handler on.
    #[arg(short, long, default_value = "/api/feedback")]
    path: String,

    /// User-agent to send. Omitted entirely when not given.
    #[arg(long)]
    user_agent: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum VerdictArg {
    Up,
    Down,
}

impl VerdictArg {
    fn as_str(self) -> &'static str {
        match self {
            VerdictArg::Up => "up",
            VerdictArg::Down => "down",
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Rate a symbol up or down
    Submit {
        #[arg(short, long)]
        symbol: String,
        #[arg(short, long, value_enum)]
        verdict: VerdictArg,
        #[arg(short, long)]
        reason: Option<String>,
        #[arg(long)]
        user_id: Option<String>,
    },
    /// Send an arbitrary body as-is
    Raw {
        body: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(ua) = &cli.user_agent {
        headers.insert(USER_AGENT, HeaderValue::from_str(ua)?);
    }

    let body = match cli.command {
        Commands::Submit {
            symbol,
            verdict,
            reason,
            user_id,
        } => {
            let mut payload = json!({ "symbol": symbol, "verdict": verdict.as_str() });
            if let Some(reason) = reason {
                payload["reason"] = Value::String(reason);
            }
            if let Some(user_id) = user_id {
                payload["userId"] = Value::String(user_id);
            }
            serde_json::to_string(&payload)?
        }
        Commands::Raw { body } => body,
    };

    let res = client
        .post(format!("{}{}", cli.url.trim_end_matches('/'), cli.path))
        .headers(headers)
        .body(body)
        .send()
        .await?;

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
