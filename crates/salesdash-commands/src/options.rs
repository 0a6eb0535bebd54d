//! `salesdash options`: lists the available filter choices.

use crate::report::options_listing;
use crate::{AppContext, CommandResult};
use anyhow::Context as _;
use clap::Args;
use salesdash_data::FilterOptions;
use std::io::Write;

/// Flags of the `options` command.
#[derive(Debug, Clone, Default, Args)]
pub struct OptionsArgs {
    /// Print the choices as JSON
    #[arg(long)]
    pub json: bool,
}

/// Prints the filter choices of the configured dataset.
pub fn run<W: Write>(ctx: &AppContext, args: &OptionsArgs, out: &mut W) -> CommandResult {
    let dataset = ctx.load(&ctx.data_path(None))?;
    let options = FilterOptions::from_dataset(&dataset);

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &options).context("Failed to serialize filter options")?;
        writeln!(out)?;
    } else {
        write!(out, "{}", options_listing(&options))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesdash_common::test_utils::{create_temp_dir, SAMPLE_CSV};
    use salesdash_config::Config;

    #[test]
    fn test_json_choices() {
        let dir = create_temp_dir();
        let path = dir.path().join("sales.csv");
        std::fs::write(&path, SAMPLE_CSV).unwrap();
        let mut config = Config::default();
        config.data.path = path;

        let mut out = Vec::new();
        run(&AppContext::new(config), &OptionsArgs { json: true }, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["categories"], serde_json::json!(["Books", "Clothing", "Electronics", "Sports"]));
        assert_eq!(value["min_date"], "2024-01-05");
    }
}
