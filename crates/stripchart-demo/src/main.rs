// File: crates/stripchart-demo/src/main.rs
// Summary: Demo entry point. Streams a random walk (or CSV columns) into a chart and writes
// PNG snapshots before and after scripted gestures.
//
// Usage: stripchart-demo [settings.toml] [--csv FILE] [--samples N] [--interval-ms MS]

use std::path::PathBuf;

use anyhow::{Context, Result};
use stripchart_demo::session::Session;
use stripchart_demo::settings::DemoSettings;
use stripchart_demo::source::{CsvSource, SampleSource, WalkSource};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut settings_path: Option<PathBuf> = None;
    let mut csv: Option<PathBuf> = None;
    let mut samples: Option<usize> = None;
    let mut interval_ms: Option<u64> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--csv" => csv = Some(args.next().context("--csv needs a path")?.into()),
            "--samples" => {
                let v = args.next().context("--samples needs a value")?;
                samples = Some(v.parse().with_context(|| format!("invalid --samples '{v}'"))?);
            }
            "--interval-ms" => {
                let v = args.next().context("--interval-ms needs a value")?;
                interval_ms = Some(v.parse().with_context(|| format!("invalid --interval-ms '{v}'"))?);
            }
            other if other.starts_with("--") => anyhow::bail!("unknown option {other}"),
            other => settings_path = Some(PathBuf::from(other)),
        }
    }

    let mut settings = match &settings_path {
        Some(path) => DemoSettings::load(path)?,
        None => DemoSettings::default(),
    };
    if let Some(path) = csv {
        settings.feed.csv = Some(path);
    }
    if let Some(n) = samples {
        settings.feed.samples = n;
    }
    if let Some(ms) = interval_ms {
        settings.feed.interval_ms = ms;
    }

    let mut source: Box<dyn SampleSource> = match &settings.feed.csv {
        Some(path) => {
            let src = CsvSource::load(path, settings.chart.line_count())?;
            println!("Using input file: {} ({} rows)", path.display(), src.remaining());
            Box::new(src)
        }
        None => Box::new(WalkSource::new(&settings.walk_params(), settings.feed.seed)),
    };

    let report = Session::new(settings).run(source.as_mut())?;
    println!(
        "Streamed {} points; {} frames rendered ({} incremental){}",
        report.points_fed,
        report.frames,
        report.incremental_frames,
        if report.saturated { "; sample store full" } else { "" }
    );
    Ok(())
}
