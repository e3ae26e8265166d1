use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use quirodedos::actions::ActionMapping;
use quirodedos::annotator::annotate;
use quirodedos::executor::DryRunExecutor;
use quirodedos::landmark_csv::load_recording;
use quirodedos::session::GestureSession;

/// Reproduce una grabación frame,landmark,x,y a través del pipeline sin ejecutar acciones
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct ReplayArgs {
    /// CSV grabado con `quirodedos --record`
    csv: PathBuf,

    /// Mostrar el estado de cada frame, no solo las transiciones
    #[arg(long)]
    every_frame: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = ReplayArgs::parse();
    println!("🎞️  Reproduciendo landmarks desde {:?}", args.csv);

    let frames = load_recording(&args.csv)?;
    let mut session = GestureSession::new(ActionMapping::standard(), DryRunExecutor::new());

    for (idx, observation) in frames.iter().enumerate() {
        let report = session.process(observation.as_ref());

        if let Some(err) = &report.rejected {
            println!("  {:>5}: ⚠️  {}", idx, err);
            continue;
        }

        if let Some(gesture) = report.transition {
            let action = report
                .dispatched
                .map(|a| a.label())
                .unwrap_or("sin acción");
            println!("  {:>5}: 🖐️  {} dedos → {}", idx, gesture, action);
        } else if args.every_frame {
            let line = annotate(&report)
                .first()
                .map(|o| o.text.clone())
                .unwrap_or_else(|| "sin mano".to_string());
            println!("  {:>5}:     {}", idx, line);
        }
    }

    let (stats, executor) = session.finish();
    println!(
        "\n📊 {} frames, {} con mano, {} descartados, {} transiciones, {} comandos",
        stats.frames, stats.hand_frames, stats.rejected_frames, stats.transitions, executor.executed()
    );

    Ok(())
}
