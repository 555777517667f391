// Diagnostic CLI for the presence bridge. Wires the rendering pipeline to
// a stub directory so the query side can be exercised without the host
// server: point it at an icon directory, describe a user's state, and see
// exactly what a query client would receive.

use anyhow::{anyhow, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

use presence_bridge::models::{AvailabilityState, NormalizedPresence};
use presence_bridge::query::{
    FileResourceLoader, PresenceDirectory, PresenceQueryService, RendererDispatch, ResourceCache,
};
use presence_bridge::GatewayConfig;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render a presence query result the way the bridge would serve it."
)]
struct Args {
    /// Target identifier to query, e.g. somebody@vendor.example.org
    target: String,

    /// Identifier of the requesting user, if any
    #[arg(long)]
    requester: Option<String>,

    /// Output type: image, xml or text
    #[arg(long = "type", default_value = RendererDispatch::DEFAULT_TYPE)]
    output_type: String,

    /// Directory containing the presence icons (overrides the config file)
    #[arg(long)]
    icons: Option<PathBuf>,

    /// Gateway config file to read the icon directory from
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pretend the target is known and in this state: available, away,
    /// dnd, xa or offline. Omit it to exercise the not-found path.
    #[arg(long)]
    state: Option<String>,

    /// Custom status text to attach to the pretended state
    #[arg(long)]
    status_text: Option<String>,
}

/// Directory stub answering for exactly one user.
struct StubDirectory {
    state: Option<AvailabilityState>,
    status_text: Option<String>,
}

impl PresenceDirectory for StubDirectory {
    fn lookup(&self, _requester: Option<&str>, target: &str) -> Result<NormalizedPresence> {
        match self.state {
            Some(state) => Ok(NormalizedPresence {
                from: target.to_string(),
                to: String::new(),
                state,
                status_text: self.status_text.clone(),
            }),
            None => Err(anyhow!("no such user: {}", target)),
        }
    }
}

fn parse_state(name: &str) -> Result<AvailabilityState> {
    match name {
        "available" => Ok(AvailabilityState::Available),
        "away" => Ok(AvailabilityState::Away),
        "dnd" => Ok(AvailabilityState::DoNotDisturb),
        "xa" => Ok(AvailabilityState::ExtendedAway),
        "offline" => Ok(AvailabilityState::Unavailable),
        other => Err(anyhow!(
            "unknown state '{}'; expected available, away, dnd, xa or offline",
            other
        )),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let icon_dir = match (&args.icons, &args.config) {
        (Some(dir), _) => dir.clone(),
        (None, Some(path)) => GatewayConfig::load(path)?.icon_dir,
        (None, None) => PathBuf::from("images"),
    };
    info!("Using icon directory {}", icon_dir.display());

    let cache = ResourceCache::new(FileResourceLoader::new(&icon_dir));
    let directory = StubDirectory {
        state: args.state.as_deref().map(parse_state).transpose()?,
        status_text: args.status_text.clone(),
    };
    let service = PresenceQueryService::new(directory);

    let result = service.resolve(args.requester.as_deref(), &args.target);
    match RendererDispatch::render(&args.output_type, &result, &cache) {
        Some(rendered) if rendered.content_type == "image/gif" => {
            println!(
                "{}: {} bytes",
                rendered.content_type,
                rendered.body.len()
            );
        }
        Some(rendered) => {
            println!("{}", String::from_utf8_lossy(&rendered.body));
        }
        None => {
            eprintln!("no renderer registered for type '{}'", args.output_type);
            std::process::exit(1);
        }
    }
    Ok(())
}
