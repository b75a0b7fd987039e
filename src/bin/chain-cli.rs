use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;

use service_chain::chain::{ServiceRole, CORRELATION_HEADER};

#[derive(Parser)]
#[command(name = "chain-cli")]
#[command(about = "Check and exercise the C -> B -> A service chain", long_about = None)]
struct Cli {
    /// Host the three services listen on.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check /health on every service
    Health,
    /// Send a message into the chain through the root service
    Send {
        /// Message forwarded to the leaf
        #[arg(short, long, default_value = "")]
        msg: String,

        /// Correlation id to supply; one is generated when omitted
        #[arg(short = 'i', long)]
        correlation_id: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::builder().no_proxy().build()?;

    match cli.command {
        Commands::Health => {
            for role in ServiceRole::ALL {
                let url = format!("http://{}:{}/health", cli.host, role.default_port());
                match client.get(&url).send().await {
                    Ok(res) => println!("{} ({}) {}: {}", role.service_name(), role, url, res.status()),
                    Err(e) => println!("{} ({}) {}: unreachable ({})", role.service_name(), role, url, e),
                }
            }
        }
        Commands::Send { msg, correlation_id } => {
            let root = ServiceRole::Root;
            let mut headers = HeaderMap::new();
            if let Some(id) = correlation_id {
                headers.insert(CORRELATION_HEADER, HeaderValue::from_str(&id)?);
            }

            let res = client
                .get(format!("http://{}:{}{}", cli.host, root.default_port(), root.endpoint()))
                .query(&[("msg", msg.as_str())])
                .headers(headers)
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    println!("HTTP {}", status);

    let text = res.text().await?;
    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
