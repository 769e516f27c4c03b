//! Prodesk Chat
//!
//! Terminal rendition of the embeddable widget. Drives the same
//! conversation state machine as the browser build against the live
//! backend, with the lead flag kept in a JSON file.
//!
//! Run with: cargo run --bin prodesk-chat -- --api-key pk_...
//!
//! Commands: `/open`, `/close`, `/lead`, `/dismiss`, `/theme key=value`, `/quit`.

use clap::Parser;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::time::Instant;

use prodesk::client::{ClientConfig, ProdeskClient};
use prodesk::config::Config;
use prodesk::logging::init_logging;
use prodesk::types::ChatMessage;
use prodesk::validation::LeadForm;
use prodesk::widget::{
    ConfigUpdate, FileStore, InitConfig, LeadOutcome, Position, ThemeOverrides, WidgetHandle,
};

#[derive(Parser)]
#[command(name = "prodesk-chat")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Chat with a Prodesk tenant's bot from the terminal")]
struct Args {
    /// Tenant API key
    #[arg(long)]
    api_key: String,

    /// Header colour (#rrggbb)
    #[arg(long)]
    primary_color: Option<String>,

    /// bottom-right or bottom-left
    #[arg(long)]
    position: Option<Position>,

    /// Greeting shown on first open
    #[arg(long)]
    welcome: Option<String>,

    /// Config file (default: search standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

type Input = Lines<BufReader<Stdin>>;
type Widget = WidgetHandle<ProdeskClient, FileStore>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    init_logging(&config.logging)?;

    let mut theme = config.widget.theme_overrides();
    theme.merge(ThemeOverrides {
        primary_color: args.primary_color,
        position: args.position,
        welcome_message: args.welcome,
    });

    let backend = ProdeskClient::new(ClientConfig::from(&config.api))?;
    let store = FileStore::open(&config.store.path)?;
    let init = InitConfig {
        api_key: args.api_key,
        theme,
    };

    let mut widget =
        WidgetHandle::init(init, backend, store)?.with_policy(config.widget.lead_prompt_policy());

    println!(
        "Prodesk chat ({}, {}). Type /open to start, /quit to leave.",
        widget.conversation().theme().primary_color,
        widget.conversation().theme().position
    );

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut lead_deadline: Option<Instant> = None;

    loop {
        let timer = tokio::time::sleep_until(lead_deadline.unwrap_or_else(Instant::now));

        tokio::select! {
            _ = timer, if lead_deadline.is_some() => {
                lead_deadline = None;
                if widget.show_lead_prompt() {
                    println!();
                    println!("  Want us to follow up? Type /lead to leave your details or /dismiss.");
                }
            }
            line = input.next_line() => {
                let Some(line) = line? else { break };
                let line = line.trim();

                match line.split_once(' ').map_or((line, ""), |(cmd, rest)| (cmd, rest.trim())) {
                    ("/quit", _) => break,
                    ("/open", _) => {
                        widget.open();
                        print_transcript(widget.conversation().messages());
                    }
                    ("/close", _) => {
                        widget.close();
                        println!("(widget closed, /open to resume)");
                    }
                    ("/dismiss", _) => {
                        widget.dismiss_lead_prompt();
                        lead_deadline = None;
                    }
                    ("/lead", _) => collect_lead(&mut widget, &mut input).await?,
                    ("/theme", setting) => apply_theme_setting(&mut widget, setting),
                    ("", _) => {}
                    _ if !widget.conversation().is_open() => {
                        println!("(widget closed, /open to chat)");
                    }
                    _ => {
                        if let Some(report) = widget.send(line).await {
                            print_transcript(std::slice::from_ref(&report.reply));
                            if let Some(delay) = report.lead_prompt_in {
                                lead_deadline = Some(Instant::now() + delay);
                            }
                        }
                    }
                }
            }
        }
    }

    widget.destroy();
    Ok(())
}

fn print_transcript(messages: &[ChatMessage]) {
    for message in messages {
        let who = if message.is_user() { "you" } else { "bot" };
        println!("[{}] {}> {}", message.clock_time(), who, message.content);
    }
}

async fn ask(input: &mut Input, label: &str) -> std::io::Result<String> {
    println!("  {}:", label);
    Ok(input.next_line().await?.unwrap_or_default())
}

async fn collect_lead(widget: &mut Widget, input: &mut Input) -> std::io::Result<()> {
    let form = LeadForm {
        name: ask(input, "Name *").await?,
        email: ask(input, "Email *").await?,
        phone: ask(input, "Phone").await?,
        message: ask(input, "Message").await?,
    };

    match widget.submit_lead(&form).await {
        Ok(LeadOutcome::Captured) => {
            if let Some(thanks) = widget.conversation().messages().last() {
                print_transcript(std::slice::from_ref(thanks));
            }
        }
        Ok(LeadOutcome::Failed { notice }) => println!("  ! {}", notice),
        Err(e) => println!("  ! {}", e),
    }

    Ok(())
}

/// `/theme primaryColor=#ff5500`, `/theme position=bottom-left`,
/// `/theme welcomeMessage=Hi there`
fn apply_theme_setting(widget: &mut Widget, setting: &str) {
    let Some((key, value)) = setting.split_once('=') else {
        println!("  usage: /theme primaryColor=#rrggbb | position=bottom-left | welcomeMessage=...");
        return;
    };

    let mut update = ConfigUpdate::default();
    match key.trim() {
        "primaryColor" | "primary_color" => update.theme.primary_color = Some(value.trim().to_string()),
        "welcomeMessage" | "welcome_message" => {
            update.theme.welcome_message = Some(value.trim().to_string())
        }
        "position" => match value.trim().parse() {
            Ok(position) => update.theme.position = Some(position),
            Err(e) => {
                println!("  ! {}", e);
                return;
            }
        },
        "apiKey" | "api_key" => update.api_key = Some(value.trim().to_string()),
        other => {
            println!("  ! unknown setting '{}'", other);
            return;
        }
    }

    widget.update(&update);
    let theme = widget.conversation().theme();
    println!("  theme: {} / {} / {:?}", theme.primary_color, theme.position, theme.welcome_message);
}
