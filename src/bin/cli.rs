//! AtlasDoc CLI
//!
//! Command-line interface for a local AtlasDoc store.

use std::process;

use atlasdoc::{AtlasError, Config, Engine};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing_subscriber::{fmt, EnvFilter};

/// AtlasDoc CLI
#[derive(Parser, Debug)]
#[command(name = "atlasdoc-cli")]
#[command(about = "CLI for the AtlasDoc JSON document store")]
#[command(version)]
struct Args {
    /// Data directory
    #[arg(short, long, default_value = "./Users")]
    data_dir: String,

    /// Skip fsync of staged records
    #[arg(long)]
    no_sync: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write the sample users, list them, then delete a missing one
    Demo,

    /// Write a JSON value as a record
    Put {
        collection: String,
        resource: String,
        /// JSON text, e.g. '{"name":"Kamo"}'
        json: String,
    },

    /// Print a record
    Get { collection: String, resource: String },

    /// List resource names in a collection
    List { collection: String },

    /// Print every record in a collection
    All { collection: String },

    /// Delete a record
    Del { collection: String, resource: String },

    /// Delete a collection and all its records
    Drop { collection: String },
}

// =============================================================================
// Sample Schema
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Address {
    city: String,
    state: String,
    country: String,
    pincode: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct User {
    name: String,
    age: u32,
    contact: String,
    company: String,
    address: Address,
}

fn user(name: &str, age: u32, city: &str) -> User {
    User {
        name: name.to_string(),
        age,
        contact: "23344333".to_string(),
        company: format!("Remote{}", name),
        address: Address {
            city: city.to_string(),
            state: "Central".to_string(),
            country: "South Africa".to_string(),
            pincode: 410013,
        },
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .data_dir(&args.data_dir)
        .sync_writes(!args.no_sync)
        .build();

    let engine = match Engine::open(config) {
        Ok(e) => e,
        Err(e) => {
            tracing::error!("Failed to open store: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(&engine, args.command) {
        tracing::error!("{}", e);
        process::exit(1);
    }
}

fn run(engine: &Engine, command: Commands) -> atlasdoc::Result<()> {
    match command {
        Commands::Demo => demo(engine),
        Commands::Put {
            collection,
            resource,
            json,
        } => {
            let value = parse_input(&json)?;
            engine.write(&collection, &resource, &value)
        }
        Commands::Get {
            collection,
            resource,
        } => {
            let value: Value = engine.read(&collection, &resource)?;
            print_json(&value)
        }
        Commands::List { collection } => {
            for name in engine.list(&collection)? {
                println!("{}", name);
            }
            Ok(())
        }
        Commands::All { collection } => {
            let values: Vec<Value> = engine.read_all(&collection)?;
            print_json(&values)
        }
        Commands::Del {
            collection,
            resource,
        } => engine.delete_record(&collection, &resource),
        Commands::Drop { collection } => engine.delete_collection(&collection),
    }
}

/// Parse JSON text given on the command line
fn parse_input(json: &str) -> atlasdoc::Result<Value> {
    serde_json::from_str(json)
        .map_err(|e| AtlasError::Config(format!("invalid JSON argument: {}", e)))
}

fn print_json<T: Serialize>(value: &T) -> atlasdoc::Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(AtlasError::Serialization)?;
    println!("{}", text);
    Ok(())
}

/// Seed `users` from worker threads, then read everything back
fn demo(engine: &Engine) -> atlasdoc::Result<()> {
    let employees = vec![
        user("Kamo", 23, "Pretoria"),
        user("Kamzo", 25, "Cape Town"),
        user("Kamogelo", 27, "Durban"),
        user("El", 29, "Pretoria"),
        user("Ellie", 31, "Pretoria"),
        user("Ellen", 32, "Pretoria"),
    ];

    crossbeam::thread::scope(|s| {
        for employee in &employees {
            s.spawn(move |_| {
                if let Err(e) = engine.write("users", &employee.name, employee) {
                    tracing::error!("Error writing user data: {}", e);
                }
            });
        }
    })
    .map_err(|_| AtlasError::Config("demo writer thread panicked".to_string()))?;

    let users: Vec<User> = engine.read_all("users")?;
    println!("All Users:");
    for user in &users {
        println!("{:?}", user);
    }

    match engine.delete_record("users", "John") {
        Ok(()) => println!("Deleted users/John"),
        Err(e) if e.is_not_found() => println!("Nothing to delete: {}", e),
        Err(e) => return Err(e),
    }

    Ok(())
}
