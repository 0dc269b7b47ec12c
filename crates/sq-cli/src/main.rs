//! # sq — SALESQ command line
//!
//! - `sq hub --data <csv>` — Launch the query hub.
//! - `sq query [filters]` — Query a running hub.
//! - `sq scan --data <csv> [filters]` — Run the same query locally, no server.
//! - `sq health` — Hub health document.
//!
//! `query` and `scan` take `--export [PATH]` to also write the page as CSV
//! (default `sales_page_<page>.csv`).

mod export;
mod render;

use std::path::PathBuf;
use std::process::Command;

use clap::{Args, Parser, Subcommand};
use sq_core::{QueryOptions, QueryParams, QueryResult};
use sq_store::Store;

/// SALESQ — ad-hoc queries over retail sales transactions.
#[derive(Parser)]
#[command(name = "sq", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the SALESQ query hub.
    Hub {
        /// Path to the sales CSV.
        #[arg(long, default_value = "data/sales_data.csv")]
        data: PathBuf,

        /// Server bind address.
        #[arg(long, default_value = "127.0.0.1:4000")]
        bind: String,
    },

    /// Query a running hub.
    Query {
        #[command(flatten)]
        filters: FilterArgs,

        /// Print the raw JSON response.
        #[arg(long)]
        json: bool,

        /// Write the page to CSV, by default `sales_page_<page>.csv`.
        #[arg(long, value_name = "PATH")]
        export: Option<Option<PathBuf>>,
    },

    /// Query a local CSV file in-process.
    Scan {
        /// Path to the sales CSV.
        #[arg(long)]
        data: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long)]
        json: bool,

        #[arg(long, value_name = "PATH")]
        export: Option<Option<PathBuf>>,
    },

    /// Check hub health.
    Health,
}

/// Query flags. Values are passed through raw; the engine coerces them.
#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Substring of customer name or phone number.
    #[arg(long)]
    search: Option<String>,

    /// Customer regions (repeat or comma-separate).
    #[arg(long = "region")]
    regions: Vec<String>,

    #[arg(long = "gender")]
    genders: Vec<String>,

    #[arg(long = "category")]
    categories: Vec<String>,

    /// Tags; every tag must appear within some record tag.
    #[arg(long = "tag")]
    tags: Vec<String>,

    #[arg(long = "payment-method")]
    payment_methods: Vec<String>,

    #[arg(long)]
    age_min: Option<String>,

    #[arg(long)]
    age_max: Option<String>,

    /// Inclusive lower date bound, e.g. 2023-01-01.
    #[arg(long)]
    date_from: Option<String>,

    #[arg(long)]
    date_to: Option<String>,

    /// date, quantity or customerName.
    #[arg(long)]
    sort_by: Option<String>,

    /// asc or desc.
    #[arg(long)]
    sort_order: Option<String>,

    #[arg(long)]
    page: Option<String>,

    #[arg(long)]
    page_size: Option<String>,
}

impl From<FilterArgs> for QueryParams {
    fn from(args: FilterArgs) -> Self {
        QueryParams {
            search: args.search,
            regions: args.regions,
            genders: args.genders,
            categories: args.categories,
            tags: args.tags,
            payment_methods: args.payment_methods,
            age_min: args.age_min,
            age_max: args.age_max,
            date_from: args.date_from,
            date_to: args.date_to,
            sort_by: args.sort_by,
            sort_order: args.sort_order,
            page: args.page,
            page_size: args.page_size,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Hub { data, bind } => {
            eprintln!("SALESQ: Launching query hub...");
            eprintln!("   Data: {}", data.display());
            eprintln!("   Bind: {}", bind);
            eprintln!();

            let data = data.display().to_string();
            let status = Command::new("cargo")
                .args(["run", "-p", "sq-hub", "--", "--data", &data, "--bind", &bind])
                .status();

            match status {
                Ok(s) if s.success() => {}
                Ok(s) => {
                    eprintln!("Hub exited with: {}", s);
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Failed to launch hub: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Scan {
            data,
            filters,
            json,
            export,
        } => {
            let store = match Store::load(&data) {
                Ok(store) => store,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };
            let options = QueryOptions::from(QueryParams::from(filters));
            let result = store.query(&options);
            if json {
                print_json(&result);
            } else {
                print!("{}", render::render(&result));
            }
            if let Some(path) = export {
                export_or_exit(&result, path);
            }
        }

        // Async Commands
        cmd => {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("Failed to build tokio runtime");

            if let Err(e) = rt.block_on(async_main(cmd)) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}

async fn async_main(cmd: Commands) -> Result<(), reqwest::Error> {
    let client = reqwest::Client::new();
    let base_url =
        std::env::var("SQ_BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:4000".to_string());

    match cmd {
        Commands::Query {
            filters,
            json,
            export,
        } => {
            let params = QueryParams::from(filters);
            let url = format!("{}/api/sales", base_url);
            let resp = client
                .get(&url)
                .query(&params.to_pairs())
                .send()
                .await?
                .error_for_status()?;

            let result = resp.json::<QueryResult>().await?;
            if json {
                print_json(&result);
            } else {
                print!("{}", render::render(&result));
            }
            if let Some(path) = export {
                export_or_exit(&result, path);
            }
        }

        Commands::Health => {
            let url = format!("{}/api/health", base_url);
            let body = client
                .get(&url)
                .send()
                .await?
                .error_for_status()?
                .json::<serde_json::Value>()
                .await?;
            print_json(&body);
        }

        _ => {}
    }
    Ok(())
}

fn export_or_exit(result: &QueryResult, path: Option<PathBuf>) {
    if result.data.is_empty() {
        eprintln!("No data to export on this page.");
        return;
    }
    let path = path.unwrap_or_else(|| export::default_path(&result.meta));
    match export::export_page(&path, &result.data) {
        Ok(()) => eprintln!("Exported {} records to {}", result.data.len(), path.display()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Error: {}", e),
    }
}
