use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, COOKIE};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "recipe-cli")]
#[command(about = "Command-line client for the recipe gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Upstream auth token, sent as `Authorization: Bearer <token>`.
    #[arg(short, long)]
    token: Option<String>,

    /// Session id, sent as the `session_id` cookie.
    #[arg(short, long)]
    session: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    SignUp { email: String, password: String },
    /// Obtain an upstream auth token
    SignIn { email: String, password: String },
    /// Check that the given credential is accepted
    Verify,
    /// List recipes
    Recipes,
    /// List ratings
    Ratings,
    /// Average rating of a recipe
    Average { recipe_id: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    if let Some(token) = &cli.token {
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}"))?);
    }
    if let Some(session) = &cli.session {
        headers.insert(COOKIE, HeaderValue::from_str(&format!("session_id={session}"))?);
    }

    let res = match cli.command {
        Commands::SignUp { email, password } => {
            client
                .post(format!("{}/api/auth/sign-up", cli.url))
                .json(&json!({ "email": email, "password": password }))
                .send()
                .await?
        }
        Commands::SignIn { email, password } => {
            client
                .post(format!("{}/api/auth/sign-in", cli.url))
                .json(&json!({ "email": email, "password": password }))
                .send()
                .await?
        }
        Commands::Verify => get(&client, &cli.url, "/api/auth/verification", headers).await?,
        Commands::Recipes => get(&client, &cli.url, "/api/recipes", headers).await?,
        Commands::Ratings => get(&client, &cli.url, "/api/ratings", headers).await?,
        Commands::Average { recipe_id } => {
            let path = format!("/api/ratings/average/{recipe_id}");
            get(&client, &cli.url, &path, headers).await?
        }
    };

    print_response(res).await
}

async fn get(
    client: &reqwest::Client,
    base: &str,
    path: &str,
    headers: HeaderMap,
) -> Result<reqwest::Response, reqwest::Error> {
    client.get(format!("{base}{path}")).headers(headers).send().await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if !text.is_empty() {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
