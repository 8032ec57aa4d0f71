//! Command-line argument parsing.

use clap::{Parser, ValueEnum};

/// Where hand landmarks come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    /// Keyboard-driven synthetic hand.
    Sim,
    /// LeapMotion controller (needs the `leap` feature).
    Leap,
}

/// Thumb classification rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ThumbArg {
    /// Tip left of the IP joint (mirrored right hand).
    Tip,
    /// Tip farther from the pinky knuckle than the thumb knuckle is.
    Pinky,
}

/// Hand-gesture calculator.
#[derive(Parser, Debug, Clone)]
#[command(name = "virtual_calculator")]
#[command(about = "Two-operand calculator driven by hand gestures")]
#[command(version)]
pub struct Cli {
    /// Landmark source.
    #[arg(long, value_enum, default_value_t = SourceArg::Sim)]
    pub source: SourceArg,

    /// Width in pixels of the (virtual) camera frame landmarks live in.
    #[arg(long, default_value_t = 950)]
    pub frame_width: usize,

    /// Height in pixels of the (virtual) camera frame.
    #[arg(long, default_value_t = 550)]
    pub frame_height: usize,

    /// Size of the simulated hand, wrist to middle knuckle, in frame pixels.
    #[arg(long, default_value_t = 150.0)]
    pub hand_scale: f32,

    /// Thumb classification rule.
    #[arg(long, value_enum, default_value_t = ThumbArg::Tip)]
    pub thumb_rule: ThumbArg,

    /// Joints between each fingertip and the joint it is compared with (1–3).
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..=3))]
    pub reference_offset: u8,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["virtual_calculator"]).unwrap();
        assert_eq!(cli.source, SourceArg::Sim);
        assert_eq!(cli.frame_width, 950);
        assert_eq!(cli.frame_height, 550);
        assert_eq!(cli.thumb_rule, ThumbArg::Tip);
        assert_eq!(cli.reference_offset, 2);
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn explicit_values() {
        let cli = Cli::try_parse_from([
            "virtual_calculator",
            "--source", "leap",
            "--thumb-rule", "pinky",
            "--reference-offset", "1",
            "--hand-scale", "90",
        ])
        .unwrap();
        assert_eq!(cli.source, SourceArg::Leap);
        assert_eq!(cli.thumb_rule, ThumbArg::Pinky);
        assert_eq!(cli.reference_offset, 1);
        assert!((cli.hand_scale - 90.0).abs() < f32::EPSILON);
    }

    #[test]
    fn reference_offset_is_range_checked() {
        assert!(Cli::try_parse_from(["virtual_calculator", "--reference-offset", "4"]).is_err());
        assert!(Cli::try_parse_from(["virtual_calculator", "--reference-offset", "0"]).is_err());
    }
}
