//! Console demo: list everything above the horizon right now.
//!
//! ```text
//! whats_up                     # location from IP, time = now
//! whats_up 28.61 77.23         # explicit coordinates
//! whats_up 28.61 77.23 "2026-08-07 21:30"
//! whats_up --save sky.txt 28.61 77.23
//! ```

use std::process::ExitCode;

use camino::Utf8PathBuf;
use hifitime::Epoch;

use skywatch::location::detect_location;
use skywatch::presentation::{enrich, save_listing, ObjectDisplay, ReportDisplay};
use skywatch::skywatch::Skywatch;
use skywatch::skywatch_errors::SkywatchError;
use skywatch::time::parse_user_datetime;

struct Args {
    latitude: Option<f64>,
    longitude: Option<f64>,
    instant: Option<Epoch>,
    save: Option<Utf8PathBuf>,
    describe: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        latitude: None,
        longitude: None,
        instant: None,
        save: None,
        describe: false,
    };

    let mut positional: Vec<String> = Vec::new();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--save" => {
                let path = iter.next().ok_or("--save needs a file path")?;
                args.save = Some(Utf8PathBuf::from(path));
            }
            "--describe" => args.describe = true,
            "--help" | "-h" => {
                return Err("usage: whats_up [--save FILE] [--describe] [LAT LON] [\"YYYY-MM-DD HH:MM\"]".into())
            }
            other => positional.push(other.to_string()),
        }
    }

    if !positional.is_empty() {
        if positional.len() < 2 {
            return Err("need both latitude and longitude".into());
        }
        args.latitude = Some(positional[0].parse().map_err(|_| "bad latitude")?);
        args.longitude = Some(positional[1].parse().map_err(|_| "bad longitude")?);
        if positional.len() > 2 {
            let text = positional[2..].join(" ");
            let epoch = parse_user_datetime(&text).map_err(|e| e.to_string())?;
            args.instant = Some(epoch);
        }
    }

    Ok(args)
}

fn run(args: Args) -> Result<(), SkywatchError> {
    let sky = Skywatch::new();

    let (latitude, longitude) = match (args.latitude, args.longitude) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => {
            let location = detect_location(sky.env())?;
            let label = location.address.as_deref().unwrap_or("unknown place");
            println!(
                "Detected location: {label} ({:.4}, {:.4})",
                location.latitude, location.longitude
            );
            (location.latitude, location.longitude)
        }
    };

    let observer = skywatch::observers::Observer::new(latitude, longitude, 0.0, None)?;
    // Degrade to bodies-only when the catalog cannot load; the report says so.
    let report = sky
        .engine()
        .degraded_stars()
        .compute_visible(&observer, args.instant)?;

    println!("\nObjects currently above the horizon:\n");
    if args.describe {
        for object in &report.objects {
            println!("{}", ObjectDisplay(object));
            let extra = enrich(sky.resolver(), object);
            if let Some(description) = extra.description {
                println!("  Description: {description}");
            }
            if let Some(url) = extra.image_url {
                println!("  Image: {url}");
            }
            println!("{}", "-".repeat(40));
        }
        if report.is_empty() {
            println!("{}", ReportDisplay(&report));
        }
    } else {
        println!("{}", ReportDisplay(&report));
    }

    if let Some(path) = args.save {
        save_listing(&report, &path)?;
        println!("Listing saved to {path}");
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("whats_up: {err}");
            ExitCode::FAILURE
        }
    }
}
