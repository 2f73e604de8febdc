//! `confetti-sim`: run an effect on a virtual clock and print its bursts.
//!
//! ```bash
//! confetti-sim fireworks --for 3000
//! confetti-sim cannon --interval 1000 --duration 5000 --repeat --json
//! confetti-sim snow --options '{"duration": 2000}' --reset instant
//! ```

mod print;

use anyhow::Context;
use clap::Parser;
use confetti_core::{
    BurstConfig, Confetti, Effect, FireworksConfig, ManualScheduler, PrideConfig, ResetConfig,
    ResetMode, Scheduler, SnowConfig,
};
use print::PrintRenderer;
use serde::Deserialize;

/// Give up waiting for loops after this much virtual time.
const IDLE_LIMIT_MS: f64 = 120_000.0;

#[derive(Parser)]
#[command(name = "confetti-sim")]
#[command(about = "Replay a confetti effect on a virtual clock")]
#[command(version)]
struct Cli {
    /// Effect name (cannon, randomDirection, realistic, fireworks, stars,
    /// circles, squares, snow, fall, pride)
    effect: Effect,

    /// Stop after this many virtual milliseconds instead of running until idle
    #[arg(long = "for", value_name = "MS")]
    run_for: Option<f64>,

    /// Re-run the effect on this interval (implies --repeat)
    #[arg(long, value_name = "MS")]
    interval: Option<f64>,

    /// Total repeat time for --repeat
    #[arg(long, value_name = "MS")]
    duration: Option<f64>,

    /// Run the effect through `infinite`
    #[arg(long)]
    repeat: bool,

    /// Reset afterwards: smooth or instant
    #[arg(long, value_name = "MODE")]
    reset: Option<String>,

    /// Seed for the random presets
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Instance defaults as a JSON options object
    #[arg(long, value_name = "JSON")]
    defaults: Option<String>,

    /// Per-call options as a JSON options object (may include `duration`)
    #[arg(long, value_name = "JSON")]
    options: Option<String>,

    /// Bind a named surface before firing
    #[arg(long, value_name = "NAME")]
    surface: Option<String>,

    /// One JSON object per line
    #[arg(long)]
    json: bool,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct CallOptions {
    #[serde(flatten)]
    burst: BurstConfig,
    duration: Option<f64>,
}

fn parse_json<T: for<'de> Deserialize<'de> + Default>(
    raw: Option<&str>,
    what: &str,
) -> anyhow::Result<T> {
    match raw {
        Some(s) => serde_json::from_str(s).with_context(|| format!("invalid {what} JSON")),
        None => Ok(T::default()),
    }
}

fn start(confetti: &Confetti<PrintRenderer, ManualScheduler>, cli: &Cli, options: CallOptions) {
    if cli.repeat || cli.interval.is_some() {
        confetti.infinite(cli.effect, cli.interval, cli.duration, options.burst);
        return;
    }
    let CallOptions { burst, duration } = options;
    match cli.effect {
        Effect::Fireworks => confetti.fireworks(FireworksConfig { burst, duration }),
        Effect::Snow => confetti.snow(SnowConfig { burst, duration }),
        Effect::Pride => confetti.pride(PrideConfig { burst, duration }),
        other => confetti.run(other, burst),
    }
}

fn drain(clock: &ManualScheduler) {
    if !clock.run_until_idle(IDLE_LIMIT_MS) {
        log::warn!("still busy after {IDLE_LIMIT_MS}ms of virtual time, stopping");
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let defaults: BurstConfig = parse_json(cli.defaults.as_deref(), "--defaults")?;
    let options: CallOptions = parse_json(cli.options.as_deref(), "--options")?;

    let clock = ManualScheduler::new();
    let out = PrintRenderer::new(clock.clone(), cli.json);
    let confetti = Confetti::with_seed(out.clone(), clock.clone(), defaults, cli.seed);
    if let Some(name) = &cli.surface {
        confetti.custom_canvas(Some(name.clone()));
    }

    log::info!("running {}", cli.effect);
    start(&confetti, &cli, options);
    match cli.run_for {
        Some(ms) => clock.advance(ms),
        None => drain(&clock),
    }

    if let Some(mode) = &cli.reset {
        confetti.reset(ResetMode::parse_or_instant(mode), ResetConfig::default());
        drain(&clock);
    }

    log::info!(
        "{} bursts over {}ms of virtual time",
        out.bursts(),
        clock.now()
    );
    Ok(())
}
