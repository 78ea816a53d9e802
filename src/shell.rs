//! Interactive planning session.
//!
//! The shell keeps a location list and trip settings between commands and
//! re-displays the cached plan when `plan` is run again without changes.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tracing::debug;

use crate::input::MAX_LOCATIONS;
use crate::itinerary::write_itinerary;
use crate::planner::PlanRequest;
use crate::render::render_map;
use crate::session::Session;
use crate::traits::{CostMetric, DirectionsProvider, DistanceMatrixProvider, Geocoder, TravelMode};

const HELP: &str = "\
Commands:
  add <place>          add a location (the first one is the start)
  remove <n>           remove location number n
  list                 show locations and settings
  clear                remove all locations
  mode <mode>          driving, walking, bicycling or transit
  metric <metric>      distance or duration
  roundtrip <on|off>   return to the start at the end
  country <name>       set the country
  region <name>        set the region
  city [name]          set the city, or clear it
  plan                 compute the route
  export               print the Google Maps link for the last plan
  save [path]          write the map of the last plan
  reset                forget cached plans and geocodes
  help                 show this help
  quit                 leave the shell";

enum Flow {
    Continue,
    Quit,
}

pub struct Shell<G, M, D> {
    session: Session<G, M, D>,
    request: PlanRequest,
    output: PathBuf,
}

impl<G, M, D> Shell<G, M, D>
where
    G: Geocoder,
    M: DistanceMatrixProvider,
    D: DirectionsProvider + Sync,
{
    /// Starts a shell whose settings come from `request`.
    pub fn new(session: Session<G, M, D>, request: PlanRequest, output: PathBuf) -> Self {
        Self {
            session,
            request,
            output,
        }
    }

    pub fn request(&self) -> &PlanRequest {
        &self.request
    }

    pub fn session(&self) -> &Session<G, M, D> {
        &self.session
    }

    /// Reads commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<()> {
        writeln!(out, "Trip planner. Type `help` for commands.")?;
        write!(out, "> ")?;
        out.flush()?;
        for line in input.lines() {
            if let Flow::Quit = self.execute(line?.trim(), out)? {
                break;
            }
            write!(out, "> ")?;
            out.flush()?;
        }
        writeln!(out)
    }

    fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> io::Result<Flow> {
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };
        debug!(command, "shell command");

        match command.to_ascii_lowercase().as_str() {
            "" => {}
            "add" => self.add(arg, out)?,
            "remove" | "rm" => self.remove(arg, out)?,
            "list" | "ls" => self.list(out)?,
            "clear" => {
                self.request.names.clear();
                writeln!(out, "Cleared all locations.")?;
            }
            "reset" => {
                self.session.reset();
                writeln!(out, "Forgot cached plans and geocodes.")?;
            }
            "mode" => match arg {
                "" => writeln!(out, "Mode: {}", self.request.mode)?,
                _ => match arg.parse::<TravelMode>() {
                    Ok(mode) => {
                        self.request.mode = mode;
                        writeln!(out, "Mode: {mode}")?;
                    }
                    Err(err) => writeln!(out, "error: {err}")?,
                },
            },
            "metric" => match arg.parse::<CostMetric>() {
                Ok(metric) => {
                    self.request.metric = metric;
                    writeln!(out, "Metric: {metric}")?;
                }
                Err(err) => writeln!(out, "error: {err}")?,
            },
            "roundtrip" => match arg {
                "on" | "yes" | "true" => {
                    self.request.round_trip = true;
                    writeln!(out, "Round trip: on")?;
                }
                "off" | "no" | "false" => {
                    self.request.round_trip = false;
                    writeln!(out, "Round trip: off")?;
                }
                _ => writeln!(out, "usage: roundtrip <on|off>")?,
            },
            "country" => {
                self.request.area.country = arg.to_string();
                writeln!(out, "Country: {arg}")?;
            }
            "region" => {
                self.request.area.region = arg.to_string();
                writeln!(out, "Region: {arg}")?;
            }
            "city" => {
                self.request.area.city = (!arg.is_empty()).then(|| arg.to_string());
                writeln!(out, "City: {}", self.request.area.city.as_deref().unwrap_or("(none)"))?;
            }
            "plan" => self.plan(out)?,
            "export" => match self.session.latest() {
                Some(plan) => writeln!(out, "{}", plan.share_url)?,
                None => writeln!(out, "No plan yet; run `plan` first.")?,
            },
            "save" => self.save(arg, out)?,
            "help" | "?" => writeln!(out, "{HELP}")?,
            "quit" | "exit" => return Ok(Flow::Quit),
            other => writeln!(out, "unknown command `{other}`; type `help`")?,
        }
        Ok(Flow::Continue)
    }

    fn add<W: Write>(&mut self, name: &str, out: &mut W) -> io::Result<()> {
        if name.is_empty() {
            return writeln!(out, "usage: add <place>");
        }
        if self.request.names.len() >= MAX_LOCATIONS {
            return writeln!(out, "error: at most {MAX_LOCATIONS} locations are supported");
        }
        self.request.names.push(name.to_string());
        writeln!(out, "{}. {name}", self.request.names.len())
    }

    fn remove<W: Write>(&mut self, arg: &str, out: &mut W) -> io::Result<()> {
        match arg.parse::<usize>() {
            Ok(n) if (1..=self.request.names.len()).contains(&n) => {
                let name = self.request.names.remove(n - 1);
                writeln!(out, "Removed {name}.")
            }
            _ => writeln!(out, "usage: remove <n> with n between 1 and {}", self.request.names.len()),
        }
    }

    fn list<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.request.names.is_empty() {
            writeln!(out, "No locations yet.")?;
        }
        for (i, name) in self.request.names.iter().enumerate() {
            writeln!(out, "{}. {name}", i + 1)?;
        }
        writeln!(out, "Area: {}", self.request.area.query_for(""))?;
        writeln!(
            out,
            "Mode: {}, metric: {}, round trip: {}",
            self.request.mode,
            self.request.metric,
            if self.request.round_trip { "on" } else { "off" }
        )
    }

    fn plan<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        match self.session.plan(&self.request) {
            Ok(result) => {
                if result.from_cache {
                    writeln!(out, "(cached)")?;
                }
                write_itinerary(out, &result.plan)
            }
            Err(err) => writeln!(out, "error: {err}"),
        }
    }

    fn save<W: Write>(&self, arg: &str, out: &mut W) -> io::Result<()> {
        let Some(plan) = self.session.latest() else {
            return writeln!(out, "No plan yet; run `plan` first.");
        };
        let path = if arg.is_empty() {
            self.output.clone()
        } else {
            PathBuf::from(arg)
        };
        let html = match render_map(&plan) {
            Ok(html) => html,
            Err(err) => return writeln!(out, "error: could not render map: {err}"),
        };
        match fs::write(&path, html) {
            Ok(()) => writeln!(out, "Map written to {}", path.display()),
            Err(err) => writeln!(out, "error: could not write {}: {err}", path.display()),
        }
    }
}
