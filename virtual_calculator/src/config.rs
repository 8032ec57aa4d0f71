//! Application configuration.

use hand_landmarks::{ClassifierConfig, HandPose, ThumbRule};

use crate::cli::{Cli, SourceArg, ThumbArg};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Sim,
    Leap,
}

/// Complete application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub source:       SourceKind,
    /// Pixel size of the frame landmarks are expressed in.
    pub frame_width:  usize,
    pub frame_height: usize,
    /// Simulated hand size in frame pixels.
    pub hand_scale:   f32,
    pub classifier:   ClassifierConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            source:       SourceKind::Sim,
            frame_width:  950,
            frame_height: 550,
            hand_scale:   150.0,
            classifier:   ClassifierConfig::default(),
        }
    }
}

impl AppConfig {
    /// Create an application configuration from CLI arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        let source = match cli.source {
            SourceArg::Sim  => SourceKind::Sim,
            SourceArg::Leap => SourceKind::Leap,
        };
        let thumb = match cli.thumb_rule {
            ThumbArg::Tip   => ThumbRule::TipLeftOfJoint,
            ThumbArg::Pinky => ThumbRule::PinkyDistance,
        };
        let frame_width  = cli.frame_width.max(64);
        let frame_height = cli.frame_height.max(64);
        // The synthetic hand has to fit in the frame.
        let max_scale = frame_width.min(frame_height) as f32;
        let hand_scale = if cli.hand_scale.is_finite() {
            cli.hand_scale.clamp(8.0, max_scale)
        } else {
            AppConfig::default().hand_scale.min(max_scale)
        };
        AppConfig {
            source,
            frame_width,
            frame_height,
            hand_scale,
            classifier:   ClassifierConfig {
                thumb,
                reference_offset: usize::from(cli.reference_offset),
            },
        }
    }

    /// Where the simulated hand sits in the frame.
    pub fn sim_pose(&self) -> HandPose {
        HandPose::centered(self.frame_width as f32, self.frame_height as f32, self.hand_scale)
    }
}
