//! Integration tests for climplot
//!
//! These tests drive the library the way the command-line tool does: a
//! layered configuration, JSON inputs on disk, and the printed outputs.

mod common;

use clap::Parser;
use climplot::colormaps::{anomaly_cmap_with, list_colormaps, to_hex, CmapOptions, Palette};
use climplot::config::{Args, Command};
use climplot::metrics::{format_metrics_summary, MetricsInput};
use climplot::style::StyleMode;
use climplot::ticks::select_ticks;
use climplot::{config_style, panel_labels, Config, LineStyle, StyleConfig};
use common::assertions::assert_approx_eq;
use common::test_data::write_file;
use pretty_assertions::assert_eq;

fn parse(argv: &[&str]) -> Args {
    Args::try_parse_from(argv).unwrap()
}

#[test]
fn test_metrics_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "sst.json",
        r#"{
            "name": "OM5 b01",
            "dims": ["lat", "lon"],
            "shape": [2, 3],
            "model": [1.0, 2.0, 3.0, 4.0, 5.0, null],
            "obs":   [0.5, 2.0, 2.5, 4.5, 4.0, 6.0],
            "weights": [0.5, 0.5, 0.5, 1.0, 1.0, 1.0]
        }"#,
    );

    let input = MetricsInput::from_path(&path).unwrap();
    let summary = input.summarize().unwrap();

    // joint mask drops the last cell: weights 0.5 x3, 1.0 x2, differences .5 0 .5 -.5 1
    let bias = (0.5 * 0.5 + 0.0 + 0.5 * 0.5 + -0.5 + 1.0) / 3.5;
    assert_approx_eq(summary.bias, bias, None);
    assert_approx_eq(summary.model_mean, (0.5 * 6.0 + 9.0) / 3.5, None);

    let text = format_metrics_summary(&summary, &summary.name);
    assert!(text.starts_with("OM5 b01 Validation Metrics:"));
    assert_eq!(text.lines().count(), 8);
}

#[test]
fn test_config_file_drives_colormap() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_file(
        dir.path(),
        "climplot.json",
        r#"{
            "log_level": "warn",
            "ticks": {"max_ticks": 7, "min_ticks": 3},
            "colormap": {"palette": "PuOr_r", "extend": "neither", "center_on_white": true}
        }"#,
    );
    let config_arg = config_path.to_str().unwrap();

    let args = parse(&[
        "climplot", "--config", config_arg, "cmap", "anomaly", "--vmin", "-3", "--vmax", "3",
        "--interval", "0.5",
    ]);
    let config = Config::from_args(&args).unwrap();
    config.validate().unwrap();

    let options = CmapOptions {
        palette: config.palette().unwrap(),
        extend: config.extend().unwrap(),
        allow_negative: false,
    };
    let (vmin, vmax, interval) = match args.command {
        Command::Cmap {
            vmin,
            vmax,
            interval,
            ..
        } => (vmin.unwrap(), vmax.unwrap(), interval.unwrap()),
        other => panic!("unexpected command {:?}", other),
    };

    let mapping = anomaly_cmap_with(
        vmin,
        vmax,
        interval,
        config.colormap.center_on_white,
        &options,
    )
    .unwrap();
    assert_eq!(mapping.palette(), Palette::PuOrR);
    assert_eq!(mapping.name(), "PuOr_r_white_center");
    assert_eq!(mapping.under_color(), None);
    assert_eq!(mapping.n_bins(), 12);
    assert_eq!(mapping.white_bins(), &[5, 6]);
    assert_eq!(to_hex(mapping.colors()[5]), "#ffffff");

    let ticks = select_ticks(
        mapping.levels().boundaries(),
        config.ticks.max_ticks,
        config.ticks.min_ticks,
    )
    .unwrap();
    assert!(ticks.len() <= 7);
    assert!(ticks.contains(&0.0));
}

#[test]
fn test_command_line_overrides_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_file(
        dir.path(),
        "climplot.json",
        r#"{"style": {"mode": "publication", "width": 7.0}}"#,
    );
    let args = parse(&[
        "climplot",
        "--config",
        config_path.to_str().unwrap(),
        "--max-ticks",
        "11",
        "style",
        "presentation",
        "--pdf",
    ]);
    let config = Config::from_args(&args).unwrap();
    assert_eq!(config.ticks.max_ticks, 11);
    assert_eq!(config.style.mode, StyleMode::Presentation);
    assert_eq!(config.style.width, Some(7.0));
    assert!(config.style.for_pdf);
}

#[test]
fn test_style_json_output() {
    let style = StyleMode::Presentation
        .config_with_width(10.0)
        .for_pdf(None);
    let json = serde_json::to_value(&style).unwrap();
    assert_eq!(json["mode"], "presentation");
    assert_eq!(json["dpi"], 150);
    assert_eq!(json["font_family"], "Myriad Pro");
    assert_eq!(json["figsize"][0], 10.0);

    let back: StyleConfig = serde_json::from_value(json).unwrap();
    assert_eq!(back, style);
}

#[test]
fn test_invalid_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_file(dir.path(), "broken.json", "{ not json");
    let args = parse(&["climplot", "--config", config_path.to_str().unwrap(), "colormaps"]);
    assert!(matches!(
        Config::from_args(&args),
        Err(climplot::ClimplotError::Json(_))
    ));
}

#[test]
fn test_variable_colormaps_and_panel_labels() {
    let recommended = list_colormaps();
    let anomaly = recommended
        .iter()
        .find(|(name, _)| *name == "anomaly")
        .map(|(_, palette)| *palette);
    assert_eq!(anomaly, Some(Palette::RdBuR));

    assert_eq!(panel_labels(3), vec!["a.", "b.", "c."]);
}

#[test]
fn test_series_styles_for_validation_plot() {
    let names = ["obs", "model1", "model2", "model3"];
    let styles: Vec<_> = names.iter().map(|name| config_style(name)).collect();
    assert_eq!(styles[0].linestyle, LineStyle::Dashed);
    assert!(styles[1..].iter().all(|s| s.linestyle == LineStyle::Solid));

    // model lines share the categorical palette's first colors
    let categories = climplot::categorical_cmap(3).unwrap();
    let model_colors: Vec<_> = styles[1..].iter().map(|s| s.color).collect();
    assert_eq!(model_colors, categories.colors());
}
