use calc_sdk::{CalcClient, ClientError};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "calc-cli")]
#[command(about = "Command line client for calc-server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Multiply two operands
    Multiply {
        #[arg(allow_hyphen_values = true)]
        operand1: f64,
        #[arg(allow_hyphen_values = true)]
        operand2: f64,
    },
    /// Send a raw JSON body to /calc
    Raw { body: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = CalcClient::new(&cli.url);

    match cli.command {
        Commands::Multiply { operand1, operand2 } => {
            match client.multiply(operand1, operand2).await {
                Ok(res) => println!("{} (at {})", res.result, res.time),
                Err(ClientError::Api { status, kind, description, .. }) => {
                    eprintln!("Error: {} ({}): {}", kind, status, description);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Commands::Raw { body } => {
            let res = client.post_raw(body).await?;
            if !res.status.is_success() {
                eprintln!("Status: {}", res.status);
            }
            println!("{}", serde_json::to_string_pretty(&res.body)?);
        }
    }

    Ok(())
}
