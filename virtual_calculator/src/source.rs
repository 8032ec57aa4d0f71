//! Landmark sources — LeapMotion hardware or keyboard simulation.
//!
//! The public interface is [`HandFrame`] delivered over a `mpsc` channel.
//! The application loop doesn't need to know whether frames came from real
//! hardware or from the keyboard simulator.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use gesture_calc::{digit_gesture, Operator};
use hand_landmarks::{Finger, FingerVector, HandPose, Point2D};
use tracing::debug;

// ════════════════════════════════════════════════════════════════════════════
// HandFrame
// ════════════════════════════════════════════════════════════════════════════

/// One observation from a landmark source.
#[derive(Clone, Debug, PartialEq)]
pub enum HandFrame {
    /// Raw detector output: 21 pixel-space points when complete.
    Hand(Vec<Point2D>),
    /// Nothing tracked.
    NoHand,
    /// The source is shutting the application down.
    Quit,
}

// ════════════════════════════════════════════════════════════════════════════
// LandmarkSource trait — unified interface for hw and sim
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver [`HandFrame`]s over a channel.
pub trait LandmarkSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<HandFrame>);
}

/// Spawn a landmark source on its own thread and return the receiving end.
pub fn spawn_landmark_source<S: LandmarkSource>(source: S) -> Receiver<HandFrame> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(tx));
    rx
}

// ════════════════════════════════════════════════════════════════════════════
// LeapLandmarkSource — real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Landmark source backed by a real LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library installed.
///
/// # Projection
///
/// The first tracked hand's joints are laid out in the 21-point order
/// (wrist, then metacarpal/proximal/intermediate/distal ends of each digit)
/// and projected onto the frame: Leap x (mm, user's right) maps to frame x
/// around the centre, Leap y (mm above the device) maps upward from the
/// bottom edge.  Looking down at the device this behaves like a mirrored
/// webcam, so the thumb rule needs no special casing.
#[cfg(feature = "leap")]
pub struct LeapLandmarkSource {
    pub frame_width:  f32,
    pub frame_height: f32,
    /// Pixels per millimetre.
    pub scale:        f32,
}

#[cfg(feature = "leap")]
impl LeapLandmarkSource {
    pub fn new(frame_width: f32, frame_height: f32) -> Self {
        LeapLandmarkSource { frame_width, frame_height, scale: frame_height / 400.0 }
    }

    fn project(&self, hand: &leaprs::Hand) -> Vec<Point2D> {
        let px = |x: f32, y: f32| {
            Point2D::new(self.frame_width / 2.0 + x * self.scale, self.frame_height - y * self.scale)
        };

        let digits: Vec<_> = hand.digits().collect();
        if digits.len() < 5 {
            return Vec::new();
        }

        let mut points = Vec::with_capacity(hand_landmarks::LANDMARK_COUNT);
        // Base of the middle metacarpal stands in for the wrist.
        let wrist = digits[2].metacarpal().prev_joint();
        points.push(px(wrist.x, wrist.y));
        for digit in &digits {
            for joint in [
                digit.metacarpal().next_joint(),
                digit.proximal().next_joint(),
                digit.intermediate().next_joint(),
                digit.distal().next_joint(),
            ] {
                points.push(px(joint.x, joint.y));
            }
        }
        points
    }
}

#[cfg(feature = "leap")]
impl LandmarkSource for LeapLandmarkSource {
    fn run(self: Box<Self>, tx: Sender<HandFrame>) {
        use leaprs::*;
        use tracing::error;

        let mut connection = match Connection::create(ConnectionConfig::default()) {
            Ok(c)  => c,
            Err(e) => {
                error!(error = ?e, "failed to create LeapC connection");
                let _ = tx.send(HandFrame::Quit);
                return;
            }
        };
        if let Err(e) = connection.open() {
            error!(error = ?e, "failed to open LeapMotion device");
            let _ = tx.send(HandFrame::Quit);
            return;
        }

        loop {
            let msg = match connection.poll(100) {
                Ok(m)  => m,
                Err(_) => continue,
            };

            if let Event::Tracking(frame) = msg.event() {
                let hands: Vec<_> = frame.hands().collect();
                // One hand only: the first one tracked.
                let out = match hands.first() {
                    Some(hand) => HandFrame::Hand(self.project(hand)),
                    None       => HandFrame::NoHand,
                };
                if tx.send(out).is_err() { return; }
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SimLandmarkSource — keyboard simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw input event from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimInput {
    KeyDown(SimKey),
}

/// Simulated key codes (mapped from minifb Key).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimKey {
    /// `0`–`5`: fist or a number shape.
    Digit(u8),
    /// `A` `S` `X` `D`: add, subtract, multiply, divide shapes.
    Operator(Operator),
    /// `T` `I` `M` `R` `P`: flip one finger.
    Toggle(Finger),
    /// `H`: hand in / out of frame.
    ToggleHand,
    /// `Q`
    Quit,
}

/// The simulated hand: which fingers are up and whether it is in frame.
#[derive(Clone, Debug)]
pub struct SimHand {
    pose:    HandPose,
    fingers: FingerVector,
    present: bool,
}

impl SimHand {
    /// Starts out of frame with a fist.
    pub fn new(pose: HandPose) -> Self {
        SimHand { pose, fingers: FingerVector::CLOSED, present: false }
    }

    pub fn fingers(&self) -> FingerVector { self.fingers }
    pub fn is_present(&self) -> bool      { self.present }

    /// Apply a key press and return the frame it produces.
    pub fn press(&mut self, key: SimKey) -> HandFrame {
        match key {
            SimKey::Digit(n) => {
                if let Some(v) = digit_gesture(n) {
                    self.fingers = v;
                    self.present = true;
                }
            }
            SimKey::Operator(op) => {
                self.fingers = op.gesture();
                self.present = true;
            }
            SimKey::Toggle(finger) => {
                self.fingers.toggle(finger);
                self.present = true;
            }
            SimKey::ToggleHand => self.present = !self.present,
            SimKey::Quit => return HandFrame::Quit,
        }
        self.frame()
    }

    pub fn frame(&self) -> HandFrame {
        if self.present {
            HandFrame::Hand(self.pose.landmarks(self.fingers).to_vec())
        } else {
            HandFrame::NoHand
        }
    }
}

/// Landmark source driven by [`SimInput`] events (from the visualizer's window).
///
/// The visualizer sends `SimInput` events here; this translator turns them
/// into synthetic 21-point hands.  A frame is sent only when the hand
/// changes; the application keeps re-sampling the last one every tick.
pub struct SimLandmarkSource {
    pub rx:   Receiver<SimInput>,
    pub hand: SimHand,
}

impl SimLandmarkSource {
    pub fn new(rx: Receiver<SimInput>, pose: HandPose) -> Self {
        SimLandmarkSource { rx, hand: SimHand::new(pose) }
    }
}

impl LandmarkSource for SimLandmarkSource {
    fn run(mut self: Box<Self>, tx: Sender<HandFrame>) {
        if tx.send(self.hand.frame()).is_err() { return; }
        while let Ok(SimInput::KeyDown(key)) = self.rx.recv() {
            let frame = self.hand.press(key);
            debug!(?key, fingers = %self.hand.fingers(), present = self.hand.is_present(), "sim hand");
            let quit = frame == HandFrame::Quit;
            if tx.send(frame).is_err() || quit { return; }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_landmarks::{FingerStateClassifier, LANDMARK_COUNT};

    fn classify(frame: &HandFrame) -> Option<FingerVector> {
        match frame {
            HandFrame::Hand(pts) => FingerStateClassifier::default().classify_points(pts).ok(),
            _ => None,
        }
    }

    #[test]
    fn sim_hand_starts_out_of_frame() {
        let hand = SimHand::new(HandPose::default());
        assert_eq!(hand.frame(), HandFrame::NoHand);
    }

    #[test]
    fn digit_keys_produce_number_shapes() {
        let mut hand = SimHand::new(HandPose::default());
        for n in 0..=5 {
            let frame = hand.press(SimKey::Digit(n));
            assert_eq!(classify(&frame), digit_gesture(n));
        }
        // Out-of-range digits leave the hand alone.
        let before = hand.fingers();
        hand.press(SimKey::Digit(9));
        assert_eq!(hand.fingers(), before);
    }

    #[test]
    fn operator_keys_produce_operator_shapes() {
        let mut hand = SimHand::new(HandPose::default());
        for op in Operator::ALL {
            let frame = hand.press(SimKey::Operator(op));
            assert_eq!(classify(&frame), Some(op.gesture()));
        }
    }

    #[test]
    fn toggles_flip_single_fingers() {
        let mut hand = SimHand::new(HandPose::default());
        hand.press(SimKey::Digit(0));
        hand.press(SimKey::Toggle(Finger::Thumb));
        let frame = hand.press(SimKey::Toggle(Finger::Pinky));
        assert_eq!(classify(&frame), Some(FingerVector::from_bits([1, 0, 0, 0, 1])));
    }

    #[test]
    fn hand_toggle_hides_and_restores() {
        let mut hand = SimHand::new(HandPose::default());
        hand.press(SimKey::Digit(3));
        assert_eq!(hand.press(SimKey::ToggleHand), HandFrame::NoHand);
        match hand.press(SimKey::ToggleHand) {
            HandFrame::Hand(pts) => assert_eq!(pts.len(), LANDMARK_COUNT),
            other => panic!("expected a hand, got {other:?}"),
        }
    }

    #[test]
    fn sim_source_streams_frames_until_quit() {
        let (sim_tx, sim_rx) = mpsc::channel();
        let rx = spawn_landmark_source(SimLandmarkSource::new(sim_rx, HandPose::default()));

        sim_tx.send(SimInput::KeyDown(SimKey::Digit(2))).unwrap();
        sim_tx.send(SimInput::KeyDown(SimKey::Quit)).unwrap();

        assert_eq!(rx.recv().unwrap(), HandFrame::NoHand);
        assert_eq!(classify(&rx.recv().unwrap()), digit_gesture(2));
        assert_eq!(rx.recv().unwrap(), HandFrame::Quit);
        // The source thread has exited and dropped its sender.
        assert!(rx.recv().is_err());
    }
}
