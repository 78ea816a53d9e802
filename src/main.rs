use std::error::Error;
use std::fs;
use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use trip_planner::cli::{Cli, Command, PlanArgs, ShellArgs};
use trip_planner::google::GoogleMapsClient;
use trip_planner::haversine::HaversineMatrix;
use trip_planner::itinerary::write_itinerary;
use trip_planner::logging::init_tracing;
use trip_planner::planner::Planner;
use trip_planner::render::render_map;
use trip_planner::session::Session;
use trip_planner::shell::Shell;
use trip_planner::traits::{DirectionsProvider, DistanceMatrixProvider, Geocoder};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("trip-planner: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), Box<dyn Error>> {
    let trip = match &command {
        Command::Plan(args) => &args.trip,
        Command::Shell(args) => &args.trip,
    };
    let client = GoogleMapsClient::new(trip.google_config()?)?;

    if trip.estimate {
        info!("estimating travel from straight-line distance");
        let planner = Planner::new(client, HaversineMatrix::default(), HaversineMatrix::default());
        dispatch(planner, command)
    } else {
        let planner = Planner::new(client.clone(), client.clone(), client);
        dispatch(planner, command)
    }
}

fn dispatch<G, M, D>(planner: Planner<G, M, D>, command: Command) -> Result<(), Box<dyn Error>>
where
    G: Geocoder,
    M: DistanceMatrixProvider,
    D: DirectionsProvider + Sync,
{
    match command {
        Command::Plan(args) => plan_once(planner, &args),
        Command::Shell(args) => run_shell(planner, args),
    }
}

fn plan_once<G, M, D>(planner: Planner<G, M, D>, args: &PlanArgs) -> Result<(), Box<dyn Error>>
where
    G: Geocoder,
    M: DistanceMatrixProvider,
    D: DirectionsProvider + Sync,
{
    let request = args.trip.request(args.names()?);
    let plan = planner.plan(&request)?;

    let mut stdout = io::stdout().lock();
    write_itinerary(&mut stdout, &plan)?;

    fs::write(&args.output, render_map(&plan)?)?;
    info!(path = %args.output.display(), "map written");
    Ok(())
}

fn run_shell<G, M, D>(planner: Planner<G, M, D>, args: ShellArgs) -> Result<(), Box<dyn Error>>
where
    G: Geocoder,
    M: DistanceMatrixProvider,
    D: DirectionsProvider + Sync,
{
    let request = args.trip.request(Vec::new());
    let mut shell = Shell::new(Session::new(planner), request, args.output);
    shell.run(io::stdin().lock(), &mut io::stdout().lock())?;
    Ok(())
}
