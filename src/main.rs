use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use piwik_tracker::{HttpTransport, RequestBuilder, TrackerConfig, TrackingClient};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "piwik-tracker")]
#[command(about = "Send tracking hits to a Piwik collector", long_about = None)]
struct Cli {
    /// URL of the tracked page
    #[arg(long, global = true)]
    url: Option<String>,
    /// Referrer URL
    #[arg(long, global = true)]
    referrer: Option<String>,
    /// Force the hit onto this 16 character visitor id
    #[arg(long, global = true)]
    visitor_id: Option<String>,
    /// Override the visitor IP
    #[arg(long, global = true)]
    ip: Option<String>,
    /// User-Agent reported for the visitor
    #[arg(long, global = true)]
    user_agent: Option<String>,
    /// Accept-Language reported for the visitor
    #[arg(long, global = true)]
    lang: Option<String>,
    /// Custom variable, repeatable
    #[arg(long = "cvar", value_name = "SLOT=NAME=VALUE", global = true, value_parser = parse_custom_variable)]
    custom_variables: Vec<(u8, String, String)>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Track a page view
    Pageview {
        /// Document title
        title: String,
    },
    /// Record a goal conversion
    Goal {
        goal_id: u32,
        #[arg(long)]
        revenue: Option<f64>,
    },
    /// Track a download or outlink
    Action {
        action_url: String,
        /// download or link
        action_type: String,
    },
}

fn parse_custom_variable(raw: &str) -> std::result::Result<(u8, String, String), String> {
    let mut parts = raw.splitn(3, '=');
    let (Some(slot), Some(name), Some(value)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("expected SLOT=NAME=VALUE, got '{raw}'"));
    };
    let slot = slot
        .parse::<u8>()
        .map_err(|_| format!("slot must be a number between 1 and 5, got '{slot}'"))?;
    Ok((slot, name.to_string(), value.to_string()))
}

fn apply_options(
    mut request: RequestBuilder<HttpTransport>,
    cli: &Cli,
) -> Result<RequestBuilder<HttpTransport>> {
    if let Some(url) = &cli.url {
        request = request.url(url);
    }
    if let Some(referrer) = &cli.referrer {
        request = request.referrer(referrer);
    }
    if let Some(id) = &cli.visitor_id {
        request = request.visitor_id(id)?;
    }
    if let Some(ip) = &cli.ip {
        request = request.ip(ip);
    }
    if let Some(agent) = &cli.user_agent {
        request = request.user_agent(agent);
    }
    if let Some(lang) = &cli.lang {
        request = request.browser_language(lang);
    }
    for (slot, name, value) in &cli.custom_variables {
        request = request.custom_variable(*slot, name, value)?;
    }
    Ok(request)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = TrackerConfig::from_env()?;

    let client =
        TrackingClient::from_config(&config).context("failed to create tracking client")?;
    info!(
        "Tracking site {} on {}",
        client.site_id(),
        client.base_url()
    );

    let request = apply_options(client.request(config.auth_token.as_deref()), &cli)?;

    let response = match cli.command {
        Commands::Pageview { title } => request.track_pageview(title).await,
        Commands::Goal { goal_id, revenue } => request.track_goal(goal_id, revenue).await,
        Commands::Action {
            action_url,
            action_type,
        } => request.track_action(action_url, action_type).await,
    }
    .context("tracking request failed")?;

    println!("✓ Collector answered {}", response.status());

    Ok(())
}
