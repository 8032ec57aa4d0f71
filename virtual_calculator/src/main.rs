//! virtual_calculator — windowed entry point.

use tracing_subscriber::EnvFilter;

use virtual_calculator::{run, AppConfig, Cli, SourceKind};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    // RUST_LOG wins over --log-level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .init();

    tracing::info!("Virtual Calculator v{}", env!("CARGO_PKG_VERSION"));

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║          Virtual Calculator — hand-gesture arithmetic        ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let cfg = AppConfig::from_cli(&cli);
    match cfg.source {
        SourceKind::Sim => {
            println!("  Mode: Keyboard simulation");
            println!("  Keys: 0-5 fingers   A S X D  + - * /   T I M R P flip finger");
            println!("        H hand in/out   Q quit");
        }
        SourceKind::Leap => println!("  Mode: LeapMotion hardware"),
    }
    println!();
    println!("  Opening visualizer window…");
    println!();

    run(cfg)?;
    Ok(())
}
