//! CLI logic for the relgraph layout tool.
//!
//! This module contains the core CLI logic: load configuration, apply
//! command-line overrides, lay out the input forest and write the SVG.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use relgraph::{LayoutBuilder, RelgraphError, config::AppConfig};

/// Run the relgraph CLI application
///
/// This function lays out the forest document named by `args.input` and
/// writes the resulting SVG to `args.output`.
///
/// # Errors
///
/// Returns `RelgraphError` for:
/// - File I/O errors
/// - Configuration loading or validation errors
/// - Forest document errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), RelgraphError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing forest"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    apply_overrides(&mut app_config, args);
    app_config.layout().validate()?;

    let source = fs::read_to_string(&args.input)?;

    let builder = LayoutBuilder::new(app_config);
    let document = builder.parse(&source)?;
    let layout = builder.layout(document.relations(), document.viewport());
    builder.export_svg(&layout, &args.output)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}

fn apply_overrides(config: &mut AppConfig, args: &Args) {
    if let Some(seed) = args.seed {
        config.layout_mut().set_seed(Some(seed));
    }
    if let Some(iterations) = args.iterations {
        config.layout_mut().set_max_iterations(iterations);
    }
    if args.show_forces {
        config.style_mut().set_show_forces(true);
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_overrides_replace_config_values() {
        let args = Args::parse_from([
            "relgraph",
            "forest.toml",
            "--seed",
            "9",
            "--iterations",
            "12",
            "--show-forces",
        ]);
        let mut config = AppConfig::default();

        apply_overrides(&mut config, &args);

        assert_eq!(config.layout().seed(), Some(9));
        assert_eq!(config.layout().max_iterations(), 12);
        assert!(config.style().show_forces());
        assert_eq!(args.output, "out.svg");
    }

    #[test]
    fn test_absent_overrides_keep_config_values() {
        let args = Args::parse_from(["relgraph", "forest.toml"]);
        let mut config = AppConfig::default();

        apply_overrides(&mut config, &args);

        assert_eq!(config.layout().seed(), None);
        assert_eq!(config.layout().max_iterations(), 2000);
        assert!(!config.style().show_forces());
    }
}
