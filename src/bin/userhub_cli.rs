//! Command-line client for the userhub API.

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use userhub::User;
use userhub::api::models::ApiResponse;
use userhub::client::ApiClient;

#[derive(Parser, Debug)]
#[command(name = "userhub-cli", version, about = "Drive a userhub server from the terminal")]
struct Cli {
    /// Base URL of the userhub server.
    #[arg(long, env = "USERHUB_URL", default_value = "http://localhost:8080", global = true)]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all users.
    List,
    /// Create a user from a JSON body.
    Create { name: String, email: String },
    /// Replace a user's name and email.
    Update { id: String, name: String, email: String },
    /// Delete a user.
    Delete { id: String },
    /// Create a user through the form endpoint.
    Form { name: String, email: String },
    /// Upload a file.
    Upload { path: PathBuf },
}

fn print_users(response: &ApiResponse<Vec<User>>) {
    match &response.data {
        Some(users) if !users.is_empty() => {
            println!("\nUsers List:");
            for user in users {
                println!(
                    "ID: {}\nName: {}\nEmail: {}\nCreated At: {}\n",
                    user.id, user.name, user.email, user.created_at
                );
            }
        }
        _ => println!("No users found"),
    }
}

fn print_response<T: Serialize>(response: &ApiResponse<T>) -> Result<()> {
    println!("\nResponse: {} (Status: {})", response.message, response.status);
    if let Some(data) = &response.data {
        println!("Data: {}", serde_json::to_string_pretty(data)?);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = ApiClient::new(cli.base_url);

    match cli.command {
        Command::List => print_users(&client.list_users().await?),
        Command::Create { name, email } => print_response(&client.create_user(&name, &email).await?)?,
        Command::Update { id, name, email } => print_response(&client.update_user(&id, &name, &email).await?)?,
        Command::Delete { id } => print_response(&client.delete_user(&id).await?)?,
        Command::Form { name, email } => print_response(&client.submit_form(&name, &email).await?)?,
        Command::Upload { path } => print_response(&client.upload_file(&path).await?)?,
    }

    Ok(())
}
