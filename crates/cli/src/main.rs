use std::{error::Error, process};

use check_in::{
    memory::FixedLocation, provider::LocationProvider, CheckInService, LocationError,
};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use evaluator::{CheckInEvaluator, CheckInPolicy};
use model::{
    decision::CheckInDecision,
    location::Coordinate,
    place::Place,
    user::{LeaderboardScope, User},
};
use serde::Serialize;
use utility::id::Id;
use wander_api::{ApiConnectionInfo, WanderApiClient};

#[derive(Debug, Parser)]
#[command(author, version, about = "Check in to places and collect points", long_about = None)]
struct Cli {
    /// Base url of the Wander API.
    #[arg(long, env = "WANDER_API_URL")]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Evaluate a check-in without recording it
    Preview {
        user_id: String,
        place_id: String,
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },
    /// Check in and collect points if eligible
    CheckIn {
        user_id: String,
        place_id: String,
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
        photo_uri: Option<String>,
    },
    /// List places around a position, closest first
    PlacesNear {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
        #[arg(default_value_t = 1.0)]
        radius_km: f64,
    },
    /// List the places a user has checked in to
    Visited { user_id: String },
    /// Show the user's most visited place
    TopPlace { user_id: String },
    /// Show level and cooldown per visited place
    Summaries { user_id: String },
    /// Show the users with the most points and the user's own rank
    Leaderboard {
        user_id: String,
        #[arg(long, value_enum, default_value_t = Scope::Global)]
        scope: Scope,
        #[arg(long, default_value_t = 5)]
        limit: u32,
    },
    /// Print the JSON schema of a check-in decision
    Schema,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Scope {
    Global,
    Friends,
}

impl From<Scope> for LeaderboardScope {
    fn from(value: Scope) -> Self {
        match value {
            Scope::Global => LeaderboardScope::Global,
            Scope::Friends => LeaderboardScope::Friends,
        }
    }
}

fn position(latitude: f64, longitude: f64) -> Result<Coordinate, LocationError> {
    let coordinate = Coordinate::new(latitude, longitude);
    if coordinate.is_valid() {
        Ok(coordinate)
    } else {
        Err(LocationError::Unavailable(format!(
            "{}, {} is not a valid position",
            latitude, longitude
        )))
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn service<L: LocationProvider>(
    client: WanderApiClient,
    location: L,
) -> CheckInService<WanderApiClient, L> {
    CheckInService::new(client, location, CheckInEvaluator::new(CheckInPolicy::from_env()))
}

fn without_location() -> FixedLocation {
    FixedLocation::failing(LocationError::Unavailable("no position given".to_owned()))
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut info = ApiConnectionInfo::from_env();
    if let Some(api_url) = cli.api_url {
        info.base_url = api_url.trim_end_matches('/').to_owned();
    }
    let client = WanderApiClient::new(info)?;

    match cli.command {
        Commands::Preview {
            user_id,
            place_id,
            latitude,
            longitude,
        } => {
            let location = FixedLocation::at(position(latitude, longitude)?);
            let decision = service(client, location)
                .preview(&Id::<User>::from(user_id), &Id::<Place>::from(place_id), Utc::now())
                .await?;
            print_json(&decision)
        }
        Commands::CheckIn {
            user_id,
            place_id,
            latitude,
            longitude,
            photo_uri,
        } => {
            let service = service(client, FixedLocation::at(position(latitude, longitude)?));
            let outcome = service
                .check_in(
                    &Id::<User>::from(user_id),
                    &Id::<Place>::from(place_id),
                    photo_uri,
                    Utc::now(),
                )
                .await?;
            if !outcome.accepted() {
                eprintln!(
                    "{}",
                    outcome.decision.reason(service.evaluator().policy().radius_km)
                );
            }
            print_json(&outcome)
        }
        Commands::PlacesNear {
            latitude,
            longitude,
            radius_km,
        } => {
            let places = client
                .places_near(position(latitude, longitude)?, radius_km)
                .await?;
            print_json(&places)
        }
        Commands::Visited { user_id } => {
            let visited = service(client, without_location())
                .visited_places(&Id::from(user_id))
                .await?;
            print_json(&visited)
        }
        Commands::TopPlace { user_id } => {
            let top = service(client, without_location())
                .top_place(&Id::from(user_id))
                .await?;
            print_json(&top)
        }
        Commands::Summaries { user_id } => {
            let summaries = service(client, without_location())
                .visit_summaries(&Id::from(user_id), Utc::now())
                .await?;
            print_json(&summaries)
        }
        Commands::Leaderboard {
            user_id,
            scope,
            limit,
        } => {
            let leaderboard = client
                .leaderboard(scope.into(), &Id::from(user_id), limit)
                .await?;
            print_json(&leaderboard)
        }
        Commands::Schema => print_json(&schemars::schema_for!(CheckInDecision)),
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        log::debug!("{:?}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
