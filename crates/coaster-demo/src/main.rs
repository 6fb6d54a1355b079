//! Rollercoaster demo CLI
//!
//! Runs the frame loop headless for a fixed number of frames and optionally
//! writes a Three.js viewer of the ride.
//!
//! # Usage
//!
//! ```bash
//! # Stock track, 600 frames at 60 fps
//! coaster-demo
//!
//! # Custom config, exported to a browser viewer
//! coaster-demo track.json --html ride.html
//! ```

use std::path::PathBuf;
use std::process;

use coaster_demo::{App, DemoConfig, InputState, ProceduralAssets};

fn print_usage() {
    eprintln!(
        r#"Rollercoaster demo

USAGE:
    coaster-demo [config.json] [OPTIONS]

ARGS:
    [config.json]   Demo configuration (defaults to the built-in track)

OPTIONS:
    --frames <N>    Number of frames to simulate (default 600)
    --dt <S>        Seconds per frame (default 1/60)
    --html <PATH>   Write a Three.js viewer of the ride
    --help          Show this help message

ENVIRONMENT:
    RUST_LOG        Log filter, e.g. RUST_LOG=debug
"#
    );
}

struct Args {
    config: Option<PathBuf>,
    frames: usize,
    dt: f64,
    html: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        config: None,
        frames: 600,
        dt: 1.0 / 60.0,
        html: None,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            "--frames" => {
                let value = iter.next().ok_or("--frames requires a value")?;
                args.frames = value
                    .parse()
                    .map_err(|_| format!("invalid frame count '{value}'"))?;
            }
            "--dt" => {
                let value = iter.next().ok_or("--dt requires a value")?;
                args.dt = value
                    .parse()
                    .map_err(|_| format!("invalid time step '{value}'"))?;
            }
            "--html" => {
                let value = iter.next().ok_or("--html requires an output path")?;
                args.html = Some(PathBuf::from(value));
            }
            flag if flag.starts_with("--") => return Err(format!("unknown option {flag}")),
            path if args.config.is_none() => args.config = Some(PathBuf::from(path)),
            extra => return Err(format!("unexpected argument '{extra}'")),
        }
    }
    Ok(args)
}

fn main() {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("Error: {}\n", msg);
            print_usage();
            process::exit(1);
        }
    };

    let config = match &args.config {
        Some(path) => match DemoConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        None => DemoConfig::default(),
    };

    let mut app = match App::new(config, &ProceduralAssets::new()) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let input = InputState::new();
    let mut draws = 0;
    for _ in 0..args.frames {
        match app.step(args.dt, &input) {
            Ok(plan) => draws += plan.draws.len(),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
    }

    let ride = app.ride();
    eprintln!("Track length:  {:.3}", ride.length());
    eprintln!("Frames:        {} ({:.2} s)", args.frames, app.time());
    eprintln!("Draw calls:    {}", draws);
    eprintln!("Distance:      {:.3}{}", ride.distance(), if ride.is_finished() { " (end of track)" } else { "" });
    if let Ok(p) = ride.position() {
        eprintln!("Car position:  ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z);
    }

    if let Some(out) = &args.html {
        if let Err(e) = app.export_html(out) {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
        eprintln!("Exported: {}", out.display());
    }
}
