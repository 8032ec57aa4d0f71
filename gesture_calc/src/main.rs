//! Interactive, headless gesture calculator.
//!
//! Each line is one or more camera frames: a five-bit finger pattern
//! (thumb → pinky), a shortcut for a preset hand shape, or a command.

use std::io::{self, Write};

use gesture_calc::{digit_gesture, FramePipeline, FrameReport, Operator};
use hand_landmarks::FingerVector;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    println!();
    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║              Gesture Calculator (headless)               ║");
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();
    print_help();

    let mut calc = FramePipeline::default();

    loop {
        let line = read_line("Frame: ")?;
        match parse_command(&line) {
            Command::Blank => continue,
            Command::Quit => {
                println!("\nGoodbye!\n");
                break;
            }
            Command::Help => print_help(),
            Command::Status => print_status(&calc),
            Command::Invalid(msg) => println!("  ⚠  {}", msg),
            Command::Hold { fingers, repeat } => {
                let mut last = None;
                for _ in 0..repeat {
                    last = Some(calc.process_fingers(fingers));
                }
                if let Some(report) = last {
                    print_report(&report, repeat);
                }
                print_status(&calc);
                println!();
            }
        }
    }
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Line parsing
// ════════════════════════════════════════════════════════════════════════════

/// One line of menu input.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Blank,
    Quit,
    Help,
    Status,
    /// Feed `fingers` (or no hand) for `repeat` frames.
    Hold { fingers: Option<FingerVector>, repeat: usize },
    Invalid(String),
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Blank;
    }

    // "<shape> xN" holds a shape for N frames.
    let (shape, repeat) = match line.rsplit_once(" x") {
        Some((shape, n)) => match n.trim().parse::<usize>() {
            Ok(n) => (shape.trim(), n.clamp(1, 1_000)),
            Err(_) => (line, 1),
        },
        None => (line, 1),
    };

    let fingers = match shape.to_ascii_lowercase().as_str() {
        "q" | "quit"   => return Command::Quit,
        "h" | "help"   => return Command::Help,
        "s" | "status" => return Command::Status,
        "n" | "none"   => None,
        "=" => Some(FingerVector::OPEN),
        s if s.len() == 1 => {
            if let Ok(op) = s.parse::<Operator>() {
                Some(op.gesture())
            } else if let Some(v) = s.parse::<u8>().ok().and_then(digit_gesture) {
                Some(v)
            } else {
                return Command::Invalid(format!("Unknown shortcut {:?}.", s));
            }
        }
        s => match s.parse::<FingerVector>() {
            Ok(v) => Some(v),
            Err(e) => return Command::Invalid(e.to_string()),
        },
    };
    Command::Hold { fingers, repeat }
}

fn print_help() {
    println!("  ┌─────────────────────────────────────────────────────────┐");
    println!("  │  11001 … five bits T I M R P   (1 = finger up)          │");
    println!("  │  0–5     preset fist / number shape                      │");
    println!("  │  + - * / preset operator shape   =  open palm            │");
    println!("  │  n       no hand in frame                                │");
    println!("  │  … xN    hold the shape for N frames                     │");
    println!("  │  s       status   h  help   q  quit                      │");
    println!("  └─────────────────────────────────────────────────────────┘");
    println!();
}

fn print_report(report: &FrameReport, repeat: usize) {
    let fingers = report.fingers.map_or_else(|| "no hand".to_string(), |v| v.to_string());
    println!(
        "  [{}] ×{}  →  {}  ({:?})",
        fingers, repeat, report.event, report.transition
    );
}

fn print_status(calc: &FramePipeline) {
    for line in calc.snapshot().lines() {
        println!("    {}", line);
    }
}

fn read_line(prompt: &str) -> io::Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut buf = String::new();
    if io::stdin().read_line(&mut buf)? == 0 {
        // EOF behaves like quit.
        buf.push('q');
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hold(fingers: Option<FingerVector>, repeat: usize) -> Command {
        Command::Hold { fingers, repeat }
    }

    #[test]
    fn bit_patterns_and_repeats() {
        let add = FingerVector::from_bits([1, 1, 0, 0, 1]);
        assert_eq!(parse_command("11001"), hold(Some(add), 1));
        assert_eq!(parse_command("  11001 x4 "), hold(Some(add), 4));
        assert_eq!(parse_command("11111 x0"), hold(Some(FingerVector::OPEN), 1));
        assert_eq!(parse_command("11111 x99999"), hold(Some(FingerVector::OPEN), 1_000));
    }

    #[test]
    fn x_is_multiply_unless_it_is_a_repeat_suffix() {
        let times = Some(Operator::Multiply.gesture());
        assert_eq!(parse_command("x"), hold(times, 1));
        assert_eq!(parse_command("X"), hold(times, 1));
        assert_eq!(parse_command("x x3"), hold(times, 3));
        assert_eq!(parse_command("* x2"), hold(times, 2));
    }

    #[test]
    fn shortcuts() {
        assert_eq!(parse_command("0"), hold(Some(FingerVector::CLOSED), 1));
        assert_eq!(parse_command("3 x2"), hold(digit_gesture(3), 2));
        assert_eq!(parse_command("5"), hold(Some(FingerVector::OPEN), 1));
        assert_eq!(parse_command("="), hold(Some(FingerVector::OPEN), 1));
        for op in Operator::ALL {
            assert_eq!(parse_command(&op.symbol().to_string()), hold(Some(op.gesture()), 1));
        }
        assert_eq!(parse_command("n x5"), hold(None, 5));
        assert_eq!(parse_command("none"), hold(None, 1));
    }

    #[test]
    fn commands() {
        assert_eq!(parse_command(""), Command::Blank);
        assert_eq!(parse_command("   "), Command::Blank);
        assert_eq!(parse_command("q"), Command::Quit);
        assert_eq!(parse_command("QUIT"), Command::Quit);
        assert_eq!(parse_command("h"), Command::Help);
        assert_eq!(parse_command("status"), Command::Status);
    }

    #[test]
    fn rejects_unknown_input() {
        assert!(matches!(parse_command("7"), Command::Invalid(_)));
        assert!(matches!(parse_command("1100"), Command::Invalid(_)));
        assert!(matches!(parse_command("3 xabc"), Command::Invalid(_)));
    }
}
