use clap::{Args, Parser, Subcommand};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use wayly_core::*;

#[derive(Parser)]
#[command(name = "wayly")]
#[command(about = "Accessibility-aware washroom finder", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

/// Movement-profile overrides shared by the routing commands
#[derive(Args, Clone)]
struct ProfileArgs {
    /// Wheelchair, scooter, or stroller
    #[arg(long)]
    uses_wheels: bool,

    /// Requires step-free access
    #[arg(long)]
    avoid_stairs: bool,

    /// Gradual inclines only
    #[arg(long)]
    prefer_ramps: bool,

    /// Maximum walking distance in meters
    #[arg(long)]
    max_distance: Option<f64>,

    /// Movement speed (slow, comfortable, fast)
    #[arg(long)]
    speed: Option<Speed>,
}

impl ProfileArgs {
    /// Layer the CLI overrides on top of the configured defaults
    fn apply_to(&self, mut profile: UserProfile) -> UserProfile {
        profile.movement.uses_wheels = self.uses_wheels;
        profile.movement.avoid_stairs = self.avoid_stairs;
        profile.movement.prefer_ramps = self.prefer_ramps;
        if let Some(distance) = self.max_distance {
            profile.movement.max_walking_distance = Some(distance);
        }
        if let Some(speed) = self.speed {
            profile.speed = speed;
        }
        profile.normalized()
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List facilities matching the active filters (default)
    List {
        /// Facility filters (women, men, universal, baby, accessible)
        #[arg(long = "filter")]
        filters: Vec<FilterTag>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Compute the fastest and the most accessible route
    Route {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Facility filters applied before scoring
        #[arg(long = "filter")]
        filters: Vec<FilterTag>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Run the routing flow and print the advisory for a target
    Advise {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Facility id to route to (defaults to the fastest destination)
        #[arg(long)]
        id: Option<u32>,

        /// Facility filters applied before scoring
        #[arg(long = "filter")]
        filters: Vec<FilterTag>,
    },

    /// Validate the built-in catalog
    Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    wayly_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Some(Commands::List { filters, json }) => cmd_list(&filters, json),
        Some(Commands::Route {
            profile,
            filters,
            json,
        }) => cmd_route(&config, &profile, &filters, json),
        Some(Commands::Advise {
            profile,
            id,
            filters,
        }) => cmd_advise(&config, &profile, id, &filters).await,
        Some(Commands::Validate) => cmd_validate(),
        None => cmd_list(&[], false),
    }
}

fn active_set(filters: &[FilterTag]) -> HashSet<FilterTag> {
    filters.iter().copied().collect()
}

fn cmd_list(filters: &[FilterTag], json: bool) -> Result<()> {
    let catalog = get_default_catalog();
    let visible = filter_facilities(&catalog.facilities, &active_set(filters));

    if json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    if visible.is_empty() {
        println!("No facilities match the active filters.");
        return Ok(());
    }

    for facility in visible {
        let distance = facility
            .base_distance
            .map_or_else(|| "?".to_string(), |d| format!("{}m", d));
        println!(
            "[{}] {} - {} away, accessibility {}/100{}",
            facility.id,
            facility.name,
            distance,
            facility.score_or_zero(),
            if facility.wheelchair {
                ", wheelchair accessible"
            } else {
                ""
            },
        );
        println!("    {}", facility.address);
    }

    Ok(())
}

fn cmd_route(config: &Config, args: &ProfileArgs, filters: &[FilterTag], json: bool) -> Result<()> {
    let catalog = get_default_catalog();
    let profile = args.apply_to(config.initial_profile());
    let visible = filter_facilities(&catalog.facilities, &active_set(filters));

    if visible.is_empty() {
        println!("No facilities match the active filters; routing is disabled.");
        return Ok(());
    }

    let routes = compute_routes(&visible, &profile)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&routes)?);
        return Ok(());
    }

    print_route(&routes.fastest);
    print_route(&routes.accessible);
    Ok(())
}

fn print_route(route: &RouteOption<'_>) {
    let kind = match route.kind {
        RouteKind::Fastest => "Fastest",
        RouteKind::Accessible => "Accessible",
    };
    println!(
        "{}: {} - {} min, {}m ({})",
        kind, route.target.name, route.duration_minutes, route.distance_m, route.description,
    );
}

async fn cmd_advise(
    config: &Config,
    args: &ProfileArgs,
    id: Option<u32>,
    filters: &[FilterTag],
) -> Result<()> {
    let catalog = get_default_catalog();

    let mut session = SessionState::new();
    session.apply(Intent::OpenSearch);
    for tag in filters {
        session.apply(Intent::ToggleFilter(*tag));
    }
    session.apply(Intent::EditProfile(args.apply_to(config.initial_profile())));

    let visible = session.visible(catalog);
    if visible.is_empty() {
        println!("No facilities match the active filters; routing is disabled.");
        return Ok(());
    }

    // Explicit selection, else the fastest destination becomes the target
    let target_id = match id {
        Some(id) => id,
        None => compute_routes(&visible, &session.profile)?.fastest.target.id,
    };
    session.apply(Intent::SelectFacility(target_id));

    if let Some(routes) = session.routes(catalog) {
        print_route(&routes.fastest);
        print_route(&routes.accessible);
    }

    // The fetch goes through the debounced trigger, as the map UI would
    let session = Arc::new(Mutex::new(session));
    let mut trigger = AdvisoryTrigger::new(config.advisory.window());
    let handle = trigger.schedule({
        let session = Arc::clone(&session);
        async move {
            let mut session = session.lock().await;
            if let Some(text) = session.fetch_advisory(catalog, &NotesAdvisor).await {
                println!();
                println!("{}", text);
            }
        }
    });

    if let Err(e) = handle.await {
        tracing::error!("Advisory task failed: {}", e);
    }
    Ok(())
}

fn cmd_validate() -> Result<()> {
    let catalog = get_default_catalog();
    let errors = catalog.validate();

    if errors.is_empty() {
        println!("Catalog OK: {} facilities", catalog.facilities.len());
        return Ok(());
    }

    for error in &errors {
        eprintln!("{}", error);
    }
    Err(Error::CatalogValidation(format!(
        "{} problem(s) found",
        errors.len()
    )))
}
