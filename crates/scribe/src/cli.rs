use clap::{Parser, Subcommand};

use crate::config::check_rate;

#[derive(Parser, Debug)]
#[command(name = "scribe", version, about = "Single-page form with validation on submit")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Cmd>,

    /// Tick rate, i.e. number of ticks per second
    #[arg(short, long, value_name = "FLOAT", global = true, value_parser = parse_tick_rate)]
    pub tick_rate: Option<f64>,

    /// Frame rate, i.e. number of frames per second
    #[arg(short, long, value_name = "FLOAT", global = true, value_parser = parse_frame_rate)]
    pub frame_rate: Option<f64>,
}

fn parse_rate(name: &str, s: &str) -> Result<f64, String> {
    let rate: f64 = s.parse().map_err(|e| format!("`{s}` is not a number: {e}"))?;
    check_rate(name, rate).map_err(|e| e.to_string())
}

fn parse_tick_rate(s: &str) -> Result<f64, String> {
    parse_rate("tick rate", s)
}

fn parse_frame_rate(s: &str) -> Result<f64, String> {
    parse_rate("frame rate", s)
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Run the interactive form (default)
    Run,
    /// Validate values without a terminal and print the result as JSON
    Check {
        #[arg(long = "input-field-1", value_name = "VALUE", default_value = "")]
        input_field_1: String,
        /// Option key, e.g. `menu-item-value-2`
        #[arg(long = "select-field-1", value_name = "KEY", default_value = "")]
        select_field_1: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn no_subcommand_means_run() {
        let cli = Cli::try_parse_from(["scribe"]).unwrap();
        assert_eq!(cli.cmd, None);
        assert_eq!(cli.tick_rate, None);
    }

    #[test]
    fn check_takes_field_values() {
        let cli = Cli::try_parse_from([
            "scribe",
            "check",
            "--input-field-1",
            "42",
            "--select-field-1",
            "menu-item-value-2",
        ])
        .unwrap();
        assert_eq!(
            cli.cmd,
            Some(Cmd::Check {
                input_field_1: "42".into(),
                select_field_1: "menu-item-value-2".into(),
            })
        );
    }

    #[test]
    fn rates_are_global_flags() {
        let cli = Cli::try_parse_from(["scribe", "run", "--frame-rate", "12.5"]).unwrap();
        assert_eq!(cli.frame_rate, Some(12.5));
    }

    #[test]
    fn rates_must_be_finite_and_positive() {
        for args in [
            ["scribe", "--tick-rate", "0"],
            ["scribe", "--tick-rate=-1", "run"],
            ["scribe", "--frame-rate", "inf"],
            ["scribe", "--frame-rate", "fast"],
        ] {
            assert!(Cli::try_parse_from(args).is_err(), "accepted {args:?}");
        }
        let cli = Cli::try_parse_from(["scribe", "--tick-rate", "0.25"]).unwrap();
        assert_eq!(cli.tick_rate, Some(0.25));
    }
}
