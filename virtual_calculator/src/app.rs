//! Top-level application state.
//!
//! `AppState` owns the `FramePipeline`, the most recent hand frame and the
//! FPS counter.  Landmark sources only report *changes*; the pipeline is
//! re-run on the latest frame every render tick, so a held hand behaves the
//! same as a camera producing the same pose over and over.

use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::{Duration, Instant};

use gesture_calc::{DisplaySnapshot, FramePipeline, FrameReport, Transition};
use hand_landmarks::{FingerVector, Point2D};
use tracing::{debug, info};

use crate::config::{AppConfig, SourceKind};
use crate::error::AppError;
use crate::source::{spawn_landmark_source, HandFrame, SimInput, SimLandmarkSource};
use crate::visualizer::Visualizer;

// ════════════════════════════════════════════════════════════════════════════
// FpsCounter
// ════════════════════════════════════════════════════════════════════════════

/// Frames per second over a sliding one-second window.
#[derive(Debug, Default)]
pub struct FpsCounter {
    stamps: VecDeque<Instant>,
}

impl FpsCounter {
    const WINDOW: Duration = Duration::from_secs(1);

    pub fn record(&mut self, now: Instant) {
        self.stamps.push_back(now);
        while let Some(&front) = self.stamps.front() {
            if now.duration_since(front) > Self::WINDOW {
                self.stamps.pop_front();
            } else {
                break;
            }
        }
    }

    pub fn fps(&self) -> u32 {
        self.stamps.len() as u32
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    pipeline:    FramePipeline,
    /// Latest frame from the source; `None` means no hand in view.
    frame:       Option<Vec<Point2D>>,
    last_report: Option<FrameReport>,
    fps:         FpsCounter,
}

impl AppState {
    pub fn new(cfg: &AppConfig) -> Self {
        AppState {
            pipeline:    FramePipeline::new(cfg.classifier),
            frame:       None,
            last_report: None,
            fps:         FpsCounter::default(),
        }
    }

    /// Store a frame from the source.  Returns `false` on `Quit`.
    pub fn handle_frame(&mut self, frame: HandFrame) -> bool {
        match frame {
            HandFrame::Hand(points) => self.frame = Some(points),
            HandFrame::NoHand       => self.frame = None,
            HandFrame::Quit         => return false,
        }
        true
    }

    /// Run the latest frame through the pipeline.
    pub fn tick(&mut self, now: Instant) -> FrameReport {
        self.fps.record(now);
        let report = self.pipeline.process(self.frame.as_deref());
        if report.transition.changed_state() {
            info!(
                event = %report.event,
                mode = %self.pipeline.machine().state().mode(),
                "calculator updated",
            );
        } else if report.transition == Transition::Suppressed {
            debug!(event = %report.event, "evaluation latched");
        }
        self.last_report = Some(report);
        report
    }

    // ── Accessors for the render loop ─────────────────────────────────────

    pub fn snapshot(&self) -> DisplaySnapshot     { self.pipeline.snapshot() }
    pub fn hand(&self)     -> Option<&[Point2D]>  { self.frame.as_deref() }
    pub fn fps(&self)      -> u32                 { self.fps.fps() }
    pub fn frames(&self)   -> u64                 { self.pipeline.frames() }

    /// Finger states seen on the last tick.
    pub fn fingers(&self) -> Option<FingerVector> {
        self.last_report.and_then(|r| r.fingers)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// This is the entry point called from `main.rs`.  It creates the visualizer,
/// the landmark source (keyboard simulation by default, LeapMotion with
/// `--source leap` and the `leap` feature), and drives the frame/render loop
/// at ~60 fps.
pub fn run(cfg: AppConfig) -> Result<(), AppError> {
    // ── Sim input channel (keys are ignored by the hardware source) ───────
    let (sim_tx, sim_rx) = mpsc::channel::<SimInput>();
    let frame_rx = open_source(&cfg, sim_rx)?;

    // ── Visualizer (owns the window and the sim input sender) ────────────
    let mut vis = Visualizer::new(sim_tx, cfg.frame_width, cfg.frame_height)?;

    let mut app = AppState::new(&cfg);
    info!(source = ?cfg.source, thumb = ?cfg.classifier.thumb, "calculator running");

    // ── Main loop ─────────────────────────────────────────────────────────
    while vis.is_open() {
        // 1. Poll window input → SimInput
        if !vis.poll_input() { break; }

        // 2. Drain landmark frames; only the newest matters
        loop {
            match frame_rx.try_recv() {
                Ok(frame) => {
                    if !app.handle_frame(frame) {
                        info!(frames = app.frames(), "quit requested");
                        return Ok(());
                    }
                }
                Err(TryRecvError::Empty)        => break,
                Err(TryRecvError::Disconnected) => return Ok(()),
            }
        }

        // 3. Classify → interpret → transition
        app.tick(Instant::now());

        // 4. Render
        vis.render(&app.snapshot(), app.hand(), app.fingers(), app.fps());
    }

    info!(frames = app.frames(), "window closed");
    Ok(())
}

fn open_source(cfg: &AppConfig, sim_rx: Receiver<SimInput>) -> Result<Receiver<HandFrame>, AppError> {
    match cfg.source {
        SourceKind::Sim => Ok(spawn_landmark_source(SimLandmarkSource::new(sim_rx, cfg.sim_pose()))),
        #[cfg(feature = "leap")]
        SourceKind::Leap => {
            use crate::source::LeapLandmarkSource;
            Ok(spawn_landmark_source(LeapLandmarkSource::new(
                cfg.frame_width as f32,
                cfg.frame_height as f32,
            )))
        }
        #[cfg(not(feature = "leap"))]
        SourceKind::Leap => Err(AppError::SourceUnavailable("leap")),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use gesture_calc::{digit_gesture, Mode, Number, Operator};

    fn make_app() -> (AppState, AppConfig) {
        let cfg = AppConfig::default();
        (AppState::new(&cfg), cfg)
    }

    fn show(app: &mut AppState, cfg: &AppConfig, fingers: FingerVector, ticks: usize) {
        let pts = cfg.sim_pose().landmarks(fingers).to_vec();
        assert!(app.handle_frame(HandFrame::Hand(pts)));
        let t0 = Instant::now();
        for i in 0..ticks {
            app.tick(t0 + Duration::from_millis(16 * i as u64));
        }
    }

    #[test]
    fn quit_frame_stops_the_loop() {
        let (mut app, _) = make_app();
        assert!(app.handle_frame(HandFrame::NoHand));
        assert!(!app.handle_frame(HandFrame::Quit));
    }

    #[test]
    fn held_frame_is_resampled_every_tick() {
        let (mut app, cfg) = make_app();
        show(&mut app, &cfg, FingerVector::from_bits([0, 1, 1, 0, 0]), 10);
        assert_eq!(app.frames(), 10);
        assert_eq!(app.fingers(), digit_gesture(2));
        assert_eq!(app.snapshot().operand1, Some(2));
    }

    #[test]
    fn full_calculation_through_frames() {
        let (mut app, cfg) = make_app();
        show(&mut app, &cfg, FingerVector::from_bits([0, 1, 1, 1, 0]), 5);
        show(&mut app, &cfg, Operator::Multiply.gesture(), 5);
        show(&mut app, &cfg, FingerVector::from_bits([0, 1, 1, 0, 0]), 5);
        show(&mut app, &cfg, FingerVector::OPEN, 30);

        let snap = app.snapshot();
        assert_eq!(snap.mode, Mode::Result);
        assert_eq!(snap.gesture, "3 * 2 = 6");
        assert_eq!(snap.lines()[4], format!("Result: {}", Number::from(6)));
    }

    #[test]
    fn no_hand_keeps_state_and_clears_fingers() {
        let (mut app, cfg) = make_app();
        show(&mut app, &cfg, FingerVector::from_bits([0, 1, 0, 0, 0]), 3);
        app.handle_frame(HandFrame::NoHand);
        app.tick(Instant::now());
        assert_eq!(app.hand(), None);
        assert_eq!(app.fingers(), None);
        assert_eq!(app.snapshot().operand1, Some(1));
    }

    #[test]
    fn fps_counts_the_last_second() {
        let mut fps = FpsCounter::default();
        let t0 = Instant::now();
        for i in 0..30 {
            fps.record(t0 + Duration::from_millis(i * 20));
        }
        assert_eq!(fps.fps(), 30);
        // Two seconds later only the new stamp is in the window.
        fps.record(t0 + Duration::from_millis(2_600));
        assert_eq!(fps.fps(), 1);
    }
}
