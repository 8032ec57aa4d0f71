//! One-frame pipeline: classify → interpret → transition.

use hand_landmarks::{ClassifierConfig, FingerStateClassifier, FingerVector, Point2D};
use tracing::debug;

use crate::gesture::{interpret, GestureEvent};
use crate::machine::{CalculatorStateMachine, DisplaySnapshot, Transition};

/// Everything that happened in one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameReport {
    pub fingers:    Option<FingerVector>,
    pub event:      GestureEvent,
    pub transition: Transition,
}

/// Owns the classifier and the calculator; fed one frame at a time.
#[derive(Clone, Debug, Default)]
pub struct FramePipeline {
    classifier: FingerStateClassifier,
    machine:    CalculatorStateMachine,
    frames:     u64,
}

impl FramePipeline {
    pub fn new(config: ClassifierConfig) -> Self {
        FramePipeline {
            classifier: FingerStateClassifier::new(config),
            machine:    CalculatorStateMachine::new(),
            frames:     0,
        }
    }

    /// Process a raw detector frame.  `None` or an empty list means no hand;
    /// a partial detection is logged and treated the same way.
    pub fn process(&mut self, frame: Option<&[Point2D]>) -> FrameReport {
        let fingers = match frame {
            None | Some([]) => None,
            Some(points) => match self.classifier.classify_points(points) {
                Ok(v) => Some(v),
                Err(e) => {
                    debug!(frame = self.frames, error = %e, "skipping malformed landmark frame");
                    None
                }
            },
        };
        self.process_fingers(fingers)
    }

    /// Process an already-classified frame.
    pub fn process_fingers(&mut self, fingers: Option<FingerVector>) -> FrameReport {
        self.frames += 1;
        let event = interpret(fingers, self.machine.state());
        let transition = self.machine.apply(event);
        FrameReport { fingers, event, transition }
    }

    pub fn machine(&self) -> &CalculatorStateMachine {
        &self.machine
    }

    pub fn snapshot(&self) -> DisplaySnapshot {
        self.machine.snapshot()
    }

    /// Frames processed so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::Operator;
    use crate::machine::Mode;
    use hand_landmarks::HandPose;

    #[test]
    fn partial_frame_is_no_gesture() {
        let mut p = FramePipeline::default();
        let short = vec![Point2D::new(1.0, 1.0); 7];
        let r = p.process(Some(&short[..]));
        assert_eq!(r.fingers, None);
        assert_eq!(r.event, GestureEvent::None);
        assert_eq!(r.transition, Transition::Ignored);
        assert!(p.machine().state().is_initial());
    }

    #[test]
    fn empty_and_absent_frames_are_no_hand() {
        let mut p = FramePipeline::default();
        assert_eq!(p.process(None).event, GestureEvent::None);
        assert_eq!(p.process(Some(&[][..])).event, GestureEvent::None);
        assert_eq!(p.frames(), 2);
    }

    #[test]
    fn synthesized_pose_drives_the_calculator() {
        let pose = HandPose::default();
        let mut p = FramePipeline::default();
        let add = pose.landmarks(Operator::Add.gesture());
        let two = pose.landmarks(FingerVector::from_bits([0, 1, 1, 0, 0]));

        assert_eq!(p.process(Some(&two[..])).event, GestureEvent::SetOperand(2));
        assert_eq!(p.process(Some(&add[..])).event, GestureEvent::SetOperator(Operator::Add));
        assert_eq!(p.process(Some(&two[..])).event, GestureEvent::SetOperand(2));
        assert_eq!(p.machine().state().mode(), Mode::Operand2Set);
    }
}
