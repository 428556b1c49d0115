use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "portal-cli")]
#[command(about = "Drive the Supply Chain Portal forms from the command line", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://127.0.0.1:5000", env = "PORTAL_URL")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new product
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        manufacturer: String,
    },
    /// Transfer a product to a new owner
    Transfer {
        #[arg(long)]
        product_id: String,
        #[arg(long)]
        new_owner: String,
    },
    /// Mark a product as delivered
    Deliver {
        #[arg(long)]
        product_id: String,
    },
    /// Show a product's details
    Product {
        #[arg(long)]
        product_id: String,
    },
    /// Show a product's ownership history
    History {
        #[arg(long)]
        product_id: String,
    },
    /// Check portal and chain health
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let (path, fields): (&str, Vec<(&str, String)>) = match cli.command {
        Commands::Register { name, manufacturer } => {
            ("/register", vec![("name", name), ("manufacturer", manufacturer)])
        }
        Commands::Transfer { product_id, new_owner } => (
            "/transfer",
            vec![("product_id", product_id), ("new_owner", new_owner)],
        ),
        Commands::Deliver { product_id } => ("/deliver", vec![("product_id", product_id)]),
        Commands::Product { product_id } => ("/product", vec![("product_id", product_id)]),
        Commands::History { product_id } => ("/history", vec![("product_id", product_id)]),
        Commands::Health => {
            let res = client.get(format!("{}/health", base)).send().await?;
            let status = res.status();
            let json: Value = res.json().await?;
            println!("{}", serde_json::to_string_pretty(&json)?);
            if !status.is_success() {
                eprintln!("Portal reports status {}", status);
            }
            return Ok(());
        }
    };

    let res = client
        .post(format!("{}{}", base, path))
        .form(&fields)
        .send()
        .await?;
    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    if !status.is_success() {
        eprintln!("Error: portal returned status {}", status);
        eprintln!("Response: {}", text);
        return Ok(());
    }

    println!("{}", text);
    Ok(())
}
