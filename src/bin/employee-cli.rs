use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "employee-cli")]
#[command(about = "Command-line client for the employee gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8111")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check gateway status
    Health,
    /// List all employees
    List,
    /// Show one employee by id
    Get { id: String },
    /// Search employees whose name contains the fragment
    Search { fragment: String },
    /// Show the highest salary
    HighestSalary,
    /// Show the ten highest earning employees
    Top10,
    /// Create an employee
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        salary: i64,
        #[arg(long)]
        age: i32,
        #[arg(long)]
        title: String,
    },
    /// Delete an employee by id
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Health => client.get(format!("{base}/health")).send().await?,
        Commands::List => client.get(format!("{base}/employees")).send().await?,
        Commands::Get { id } => client.get(format!("{base}/employees/{id}")).send().await?,
        Commands::Search { fragment } => {
            client
                .get(format!("{base}/employees/search/{fragment}"))
                .send()
                .await?
        }
        Commands::HighestSalary => {
            client
                .get(format!("{base}/employees/highest-salary"))
                .send()
                .await?
        }
        Commands::Top10 => client.get(format!("{base}/employees/top10")).send().await?,
        Commands::Create {
            name,
            salary,
            age,
            title,
        } => {
            client
                .post(format!("{base}/employees"))
                .json(&json!({ "name": name, "salary": salary, "age": age, "title": title }))
                .send()
                .await?
        }
        Commands::Delete { id } => {
            client
                .delete(format!("{base}/employees/{id}"))
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        eprintln!("Response: {}", text);
        return Ok(());
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
