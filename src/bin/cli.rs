//! Prodesk CLI
//!
//! Command-line interface for Prodesk administration:
//! - Manage tenants (list, create, copy API keys, theme, deactivate)
//! - Read analytics and leads
//! - Export leads as CSV
//! - Inspect a stored conversation

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use prodesk::client::{ClientConfig, ProdeskClient};
use prodesk::config::{generate_default_config, Config};
use prodesk::dashboard::{
    display_api_key, export_filename, format_lead_date, leads_to_csv, ranked_queries,
    search_leads, status_label, ClientManager, SystemClipboard,
};
use prodesk::logging::init_logging;
use prodesk::types::{Client, Lead};
use prodesk::validation::ClientForm;
use prodesk::widget::{Position, Theme, ThemeOverrides};

#[derive(Parser)]
#[command(name = "prodesk-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Administer Prodesk chatbot tenants")]
#[command(long_about = "Prodesk admin CLI.\nCreate tenants, hand out API keys and read what their widgets collected.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend URL (default: from config, then http://localhost:8000)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage tenants
    Clients {
        #[command(subcommand)]
        action: ClientsCommand,
    },

    /// Tenant counts
    Overview,

    /// Stats for one tenant
    Analytics {
        /// Tenant API key
        #[arg(long)]
        api_key: String,
    },

    /// Leads for one tenant
    Leads {
        /// Tenant API key
        #[arg(long)]
        api_key: String,
        /// Filter by name or email (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
        /// Write CSV to this path ("-" for stdout, a directory for the default name)
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// Show a stored conversation
    Conversation {
        /// Widget session id
        session_id: String,
        /// Tenant API key
        #[arg(long)]
        api_key: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ClientsCommand {
    /// List all tenants
    List,

    /// Create a tenant and print its API key
    Create {
        /// Company name
        #[arg(long)]
        name: String,
        /// Contact email
        #[arg(long)]
        email: String,
        /// Website URL
        #[arg(long)]
        website: Option<String>,
    },

    /// Show one tenant
    Show {
        /// Tenant id
        id: String,
    },

    /// Copy a tenant's full API key to the clipboard
    CopyKey {
        /// Tenant id
        id: String,
    },

    /// Update the widget theme stored for a tenant
    Theme {
        /// Tenant id
        id: String,
        #[arg(long)]
        primary_color: Option<String>,
        #[arg(long)]
        position: Option<Position>,
        #[arg(long)]
        welcome: Option<String>,
    },

    /// Deactivate a tenant
    Deactivate {
        /// Tenant id
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::from_env(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    init_logging(&config.logging)?;

    let client = ProdeskClient::new(ClientConfig::from(&config.api))?;

    match cli.command {
        Commands::Clients { action } => run_clients(action, client, &cli.format).await?,

        Commands::Overview => {
            let mut manager = ClientManager::new(client);
            manager.load().await?;
            let overview = manager.overview();

            match cli.format.as_str() {
                "json" => println!(
                    "{}",
                    serde_json::json!({
                        "total_clients": overview.total,
                        "active_clients": overview.active,
                    })
                ),
                _ => {
                    println!("Total clients:  {}", overview.total);
                    println!("Active clients: {}", overview.active);
                }
            }
        }

        Commands::Analytics { api_key } => {
            let summary = client.analytics(&api_key).await?;

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&summary)?),
                _ => {
                    println!("Total chats:        {}", summary.total_chats);
                    println!("Chats today:        {}", summary.chats_today);
                    println!("Leads collected:    {}", summary.leads_collected);
                    println!("Leads today:        {}", summary.leads_today);
                    println!("Avg response time:  {:.2}s", summary.avg_response_time);

                    if !summary.top_queries.is_empty() {
                        println!();
                        println!("Top queries:");
                        for (rank, query) in ranked_queries(&summary.top_queries) {
                            println!("  {}. {}", rank, query);
                        }
                    }
                }
            }
        }

        Commands::Leads {
            api_key,
            search,
            export,
        } => {
            let leads = search_leads(&client, &api_key, search.as_deref().unwrap_or("")).await?;

            match export {
                Some(path) if path.as_os_str() == "-" => println!("{}", leads_to_csv(&leads)),
                Some(path) => {
                    let path = if path.is_dir() {
                        path.join(export_filename(chrono::Utc::now().date_naive()))
                    } else {
                        path
                    };
                    std::fs::write(&path, leads_to_csv(&leads))?;
                    println!("Exported {} leads to {:?}", leads.len(), path);
                }
                None => print_leads(&leads, &cli.format)?,
            }
        }

        Commands::Conversation {
            session_id,
            api_key,
        } => {
            let record = client.conversation(&session_id, &api_key).await?;

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&record)?),
                _ => {
                    println!("Session: {}", record.session_id);
                    if let Some(contact) = &record.lead_captured {
                        println!("Lead:    {} <{}>", contact.name, contact.email);
                    }
                    println!();
                    for message in &record.messages {
                        let who = if message.is_user() { "Visitor" } else { "Bot" };
                        println!("[{}] {}: {}", message.clock_time(), who, message.content);
                    }
                }
            }
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

async fn run_clients(
    action: ClientsCommand,
    client: ProdeskClient,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ClientsCommand::List => {
            let mut manager = ClientManager::new(client);
            let clients = manager.load().await?;
            print_clients(clients, format)?;
        }

        ClientsCommand::Create {
            name,
            email,
            website,
        } => {
            let form = ClientForm {
                name,
                email,
                website_url: website.unwrap_or_default(),
            };

            let mut manager = ClientManager::new(client);
            let created = manager.create(&form).await?;

            println!("Created client {} ({})", created.name, created.id);
            println!("API key: {}", created.api_key);
        }

        ClientsCommand::Show { id } => {
            let tenant = client.get_client(&id).await?;

            match format {
                "json" => println!("{}", serde_json::to_string_pretty(&tenant)?),
                _ => {
                    let theme = tenant.theme.clone().unwrap_or_default();
                    println!("Name:     {}", tenant.name);
                    println!("Email:    {}", tenant.email);
                    println!("Website:  {}", tenant.website_url.as_deref().unwrap_or("-"));
                    println!("API key:  {}", tenant.api_key);
                    println!("Status:   {}", status_label(&tenant));
                    println!(
                        "Theme:    {} / {} / {:?}",
                        theme.primary_color, theme.position, theme.welcome_message
                    );
                }
            }
        }

        ClientsCommand::CopyKey { id } => {
            let mut manager = ClientManager::new(client);
            manager.load().await?;

            let Some(tenant) = manager.find(&id).cloned() else {
                eprintln!("Client not found: {}", id);
                std::process::exit(1);
            };

            manager.copy_api_key(&tenant, &mut SystemClipboard::new())?;
            println!("API key copied to clipboard! ({})", display_api_key(&tenant.api_key));
        }

        ClientsCommand::Theme {
            id,
            primary_color,
            position,
            welcome,
        } => {
            let overrides = ThemeOverrides {
                primary_color,
                position,
                welcome_message: welcome,
            };
            if overrides.is_empty() {
                eprintln!("Nothing to update: pass --primary-color, --position or --welcome");
                std::process::exit(1);
            }

            let tenant = client.get_client(&id).await?;
            let theme = tenant
                .theme
                .unwrap_or_else(Theme::default)
                .with_overrides(&overrides);

            let message = client.update_client_theme(&id, &theme).await?;
            println!("{}", message);
        }

        ClientsCommand::Deactivate { id } => {
            let message = client.deactivate_client(&id).await?;
            println!("{}", message);
        }
    }

    Ok(())
}

fn print_clients(clients: &[Client], format: &str) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(clients)?),
        "csv" => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record(["id", "name", "email", "website_url", "api_key", "is_active"])?;
            for c in clients {
                writer.write_record([
                    c.id.as_str(),
                    c.name.as_str(),
                    c.email.as_str(),
                    c.website_url.as_deref().unwrap_or(""),
                    c.api_key.as_str(),
                    if c.is_active { "true" } else { "false" },
                ])?;
            }
            writer.flush()?;
        }
        _ => {
            if clients.is_empty() {
                println!("No clients yet.");
                println!();
                println!("Create your first client with:");
                println!("  prodesk-cli clients create --name Acme --email ops@acme.io");
                return Ok(());
            }

            println!(
                "{:<26} {:<20} {:<28} {:<24} {}",
                "ID", "Name", "Email", "API Key", "Status"
            );
            println!("{}", "-".repeat(108));
            for c in clients {
                println!(
                    "{:<26} {:<20} {:<28} {:<24} {}",
                    c.id,
                    c.name,
                    c.email,
                    display_api_key(&c.api_key),
                    status_label(c)
                );
            }
        }
    }

    Ok(())
}

fn print_leads(leads: &[Lead], format: &str) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(leads)?),
        "csv" => println!("{}", leads_to_csv(leads)),
        _ => {
            if leads.is_empty() {
                println!("No leads found");
                return Ok(());
            }

            println!(
                "{:<20} {:<28} {:<16} {:<12} {}",
                "Name", "Email", "Phone", "Date", "Message"
            );
            println!("{}", "-".repeat(100));
            for lead in leads {
                println!(
                    "{:<20} {:<28} {:<16} {:<12} {}",
                    lead.name,
                    lead.email,
                    lead.phone.as_deref().unwrap_or("-"),
                    format_lead_date(&lead.created_at),
                    lead.message.as_deref().unwrap_or("")
                );
            }
        }
    }

    Ok(())
}
