//! climplot - discrete colormaps and area-weighted metrics for climate figures
//!
//! This is the main entry point for the climplot command-line tool.

use anyhow::{bail, Context};
use tracing::{debug, error, info};

use climplot::colormaps::{
    anomaly_cmap_with, auto_levels, categorical_cmap, discrete_cmap_with, discrete_levels,
    list_colormaps, log_cmap_with, sequential_cmap_with, to_hex, CmapOptions, ColorMapping,
};
use climplot::config::{CmapKind, Command};
use climplot::metrics::{print_metrics_summary, MetricsInput};
use climplot::ticks::{format_tick, select_ticks};
use climplot::{init_tracing, log_error, log_timed_operation, Config};

fn main() -> anyhow::Result<()> {
    let (config, command) = Config::load()?;
    config.validate()?;

    init_tracing(&config.log_level);
    debug!("Starting climplot v{}", env!("CARGO_PKG_VERSION"));

    let result = log_timed_operation("climplot", || run(&config, command));
    if let Err(e) = &result {
        error!("climplot failed: {:#}", e);
    }
    result
}

fn run(config: &Config, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Levels {
            vmin,
            vmax,
            interval,
            n_levels,
        } => {
            let levels = match (interval, n_levels) {
                (Some(interval), _) => discrete_levels(vmin, vmax, interval)?,
                (None, n_levels) => {
                    let (interval, levels) = auto_levels(vmin, vmax, n_levels.unwrap_or(10))?;
                    info!(interval = interval, "Chose contour interval");
                    println!("interval: {}", format_tick(interval));
                    levels
                }
            };
            println!("levels: {}", join(levels.boundaries()));
            let ticks = select_ticks(
                levels.boundaries(),
                config.ticks.max_ticks,
                config.ticks.min_ticks,
            )?;
            println!("ticks:  {}", join(&ticks));
        }
        Command::Cmap {
            kind,
            vmin,
            vmax,
            interval,
            n,
            allow_negative,
            ..
        } => {
            let options = CmapOptions {
                palette: config.palette()?,
                extend: config.extend()?,
                allow_negative,
            };
            let center = config.colormap.center_on_white;
            let range = || -> anyhow::Result<(f64, f64)> {
                match (vmin, vmax) {
                    (Some(lo), Some(hi)) => Ok((lo, hi)),
                    _ => bail!("{:?} colormaps need --vmin and --vmax", kind),
                }
            };
            let step = || interval.context("--interval is required for this colormap");

            let mapping = match kind {
                CmapKind::Anomaly => {
                    let (lo, hi) = range()?;
                    anomaly_cmap_with(lo, hi, step()?, center, &options)
                }
                CmapKind::Discrete => {
                    let (lo, hi) = range()?;
                    discrete_cmap_with(lo, hi, step()?, center, &options)
                }
                CmapKind::Sequential => {
                    let (lo, hi) = range()?;
                    sequential_cmap_with(lo, hi, step()?, &options)
                }
                CmapKind::Log => {
                    let (lo, hi) = range()?;
                    log_cmap_with(lo, hi, n.unwrap_or(3), &options)
                }
                CmapKind::Categorical => {
                    categorical_cmap(n.context("--n is required for categorical colormaps")?)
                }
            }
            .map_err(|e| {
                log_error(&e, "building colormap");
                e
            })?;
            print_mapping(&mapping, config)?;
        }
        Command::Style { .. } => {
            let settings = &config.style;
            let mut style = match settings.width {
                Some(width) => settings.mode.config_with_width(width),
                None => settings.mode.config(),
            };
            if settings.for_pdf {
                style = style.for_pdf(settings.font_family.as_deref());
            }
            style.validate()?;
            println!("{}", serde_json::to_string_pretty(&style)?);
        }
        Command::Metrics { input } => {
            let input = MetricsInput::from_path(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let summary = input.summarize()?;
            print_metrics_summary(&summary, &summary.name);
        }
        Command::Colormaps => {
            for (variable, palette) in list_colormaps() {
                println!("{:<14} {}", variable, palette);
            }
        }
    }
    Ok(())
}

fn join(values: &[f64]) -> String {
    values
        .iter()
        .map(|&v| format_tick(v))
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_mapping(mapping: &ColorMapping, config: &Config) -> anyhow::Result<()> {
    let boundaries = mapping.levels().boundaries();
    println!("name:   {}", mapping.name());
    println!("extend: {:?}", mapping.extend());
    println!("levels: {}", join(boundaries));
    let ticks = select_ticks(boundaries, config.ticks.max_ticks, config.ticks.min_ticks)?;
    println!("ticks:  {}", join(&ticks));

    if let Some(under) = mapping.under_color() {
        println!("under   {}", to_hex(under));
    }
    for (bin, color) in boundaries.windows(2).zip(mapping.colors()) {
        println!(
            "[{}, {}) {}",
            format_tick(bin[0]),
            format_tick(bin[1]),
            to_hex(*color)
        );
    }
    if let Some(over) = mapping.over_color() {
        println!("over    {}", to_hex(over));
    }
    for diagnostic in mapping.diagnostics() {
        println!("note: {}", diagnostic);
    }
    Ok(())
}
