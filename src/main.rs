use clap::Parser;
use std::{
    error::Error,
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::PathBuf,
    time::Duration,
};
use taxifare_rust::{
    sdk::app::{FareApp, Frame, Notice},
    sdk::command::Command,
    sdk::config::{AppConfig, OrsConfig},
    sdk::fare::FareServiceClient,
    sdk::routing::{LocalOrsProvider, RemoteOrsProvider, RoutingProvider},
    sdk::trip::{PassengerCount, TripDetails},
    sdk::util::{log::init_logging, rate_limit::ors_limiter},
};

/// Pick pickup and dropoff points on a map of NYC and get a taxi fare estimate
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Read commands from this file instead of stdin
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Fare prediction endpoint (overrides FARE_API_URL)
    #[arg(long)]
    fare_url: Option<String>,

    /// Fare request timeout in seconds (overrides FARE_TIMEOUT_SECS)
    #[arg(long)]
    fare_timeout: Option<u64>,

    /// Don't draw the driving route even if routing is configured
    #[arg(long, default_value_t = false)]
    no_route: bool,

    /// Initial passenger count (clamped to 1-8)
    #[arg(short, long, default_value_t = 1)]
    passengers: i64,
}

fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    init_logging("info");

    let cli = Cli::parse();

    // --- 1. Configuration ---
    let mut config = AppConfig::from_env()?;
    if let Some(url) = cli.fare_url {
        config.fare_url = url;
    }
    if let Some(secs) = cli.fare_timeout {
        config.fare_timeout = Duration::from_secs(secs.max(1));
    }
    if cli.no_route {
        config.routing = OrsConfig::Disabled;
    }

    // --- 2. Dependency Initialization ---
    let routing: Option<Box<dyn RoutingProvider>> = match config.routing {
        OrsConfig::Remote { api_key } => Some(Box::new(RemoteOrsProvider::new(
            api_key,
            ors_limiter(),
            config.route_timeout,
        )?)),
        OrsConfig::Local { base_url } => {
            log::info!("Using local routing at {}", base_url);
            Some(Box::new(LocalOrsProvider::new(base_url, config.route_timeout)?))
        }
        OrsConfig::Disabled => {
            log::info!("No ORS_API_KEY or ORS_LOCAL_URL set, route drawing disabled");
            None
        }
    };
    let predictor = FareServiceClient::new(config.fare_url, config.fare_timeout)?;
    log::info!("Fare predictions from {}", predictor.url());

    let mut trip = TripDetails::now();
    trip.passengers = PassengerCount::new(cli.passengers);
    let mut app = FareApp::new(trip, routing.as_deref(), &predictor);

    // --- 3. Session loop ---
    let interactive = cli.script.is_none();
    let input: Box<dyn BufRead> = match &cli.script {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    println!("NYC Taxi Fare Predictor. Type `help` for commands.");
    {
        let mut out = io::stdout().lock();
        write_frame(&mut out, &app.render())?;
        write_prompt(&mut out, interactive)?;
    }

    for line in input.lines() {
        let line = line?;
        let mut out = io::stdout().lock();
        match read_step(&line) {
            Step::Skip => {}
            Step::Invalid(notice) => {
                echo(&mut out, &line, interactive)?;
                writeln!(out, "{}", notice)?;
            }
            Step::Run(command) => {
                echo(&mut out, &line, interactive)?;
                let frame = app.handle(command);
                write_frame(&mut out, &frame)?;
                if frame.quit {
                    break;
                }
            }
        }
        write_prompt(&mut out, interactive)?;
    }

    Ok(())
}

/// What to do with one input line.
#[derive(Debug, PartialEq)]
enum Step {
    Skip,
    Invalid(Notice),
    Run(Command),
}

fn read_step(line: &str) -> Step {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Step::Skip;
    }
    match line.parse::<Command>() {
        Ok(command) => Step::Run(command),
        Err(e) => Step::Invalid(Notice::Error(e.to_string())),
    }
}

// Script lines are echoed so the transcript reads like a session.
fn echo(out: &mut impl Write, line: &str, interactive: bool) -> io::Result<()> {
    if !interactive {
        writeln!(out, "> {}", line.trim())?;
    }
    Ok(())
}

fn write_frame(out: &mut impl Write, frame: &Frame) -> io::Result<()> {
    writeln!(out, "{}", frame.map)?;
    for notice in &frame.notices {
        writeln!(out, "{}", notice)?;
    }
    Ok(())
}

fn write_prompt(out: &mut impl Write, interactive: bool) -> io::Result<()> {
    if interactive {
        write!(out, "> ")?;
    }
    out.flush()
}
