use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Command-line client for the chat gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Verdict {
    Like,
    Dislike,
}

impl Verdict {
    fn as_str(&self) -> &'static str {
        match self {
            Verdict::Like => "like",
            Verdict::Dislike => "dislike",
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Send a chat query to the bot
    Chat {
        query: String,
    },
    /// Rate a previous bot reply
    Feedback {
        interaction_id: String,
        #[arg(value_enum)]
        verdict: Verdict,
    },
    /// Check the gateway is up
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Chat { query } => {
            client
                .post(format!("{}/chat", base))
                .query(&[("query", query)])
                .send()
                .await?
        }
        Commands::Feedback { interaction_id, verdict } => {
            client
                .post(format!("{}/feedback", base))
                .json(&json!({
                    "interaction_id": interaction_id,
                    "feedback": verdict.as_str(),
                }))
                .send()
                .await?
        }
        Commands::Health => client.get(format!("{}/health", base)).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
