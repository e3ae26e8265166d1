/*
Control por gestos: cuenta dedos extendidos y dispara un comando por transición.

El detector de landmarks corre fuera de este proceso (por ejemplo MediaPipe sobre
el stream de la cámara) y escribe una línea JSON por frame:

    {"width": 640, "height": 480, "landmarks": [[x, y], ...]}   // normalizados
    {"landmarks": null}                                          // sin mano

Uso:
    detector | quirodedos --config quirodedos.json
    quirodedos --input frames.jsonl --dry-run --record sesion.csv
    quirodedos --list-actions
*/

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use quirodedos::actions::ActionMapping;
use quirodedos::annotator::annotate;
use quirodedos::config::{AppConfig, ExecutorKind};
use quirodedos::executor::{ActionExecutor, BackgroundExecutor, DryRunExecutor, SystemExecutor};
use quirodedos::landmark_csv::RecordingWriter;
use quirodedos::provider::{FrameReader, LandmarkProvider, ScaledLandmarkProvider};
use quirodedos::session::GestureSession;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Archivo de configuración JSON
    #[arg(short, long, default_value = AppConfig::DEFAULT_PATH)]
    config: PathBuf,

    /// Frames en JSON por línea (por defecto stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Registrar las acciones sin ejecutarlas
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Emitir en stdout los overlays de cada frame como JSON
    #[arg(long, default_value_t = false)]
    annotate: bool,

    /// Guardar los landmarks recibidos en un CSV (frame,landmark,x,y)
    #[arg(long)]
    record: Option<PathBuf>,

    /// Mostrar la tabla gesto → comando y salir
    #[arg(long)]
    list_actions: bool,

    /// Escribir la configuración efectiva en --config y salir
    #[arg(long)]
    write_config: bool,
}

fn print_action_table(mapping: &ActionMapping) {
    println!("{:<10} | {:<12} | {:<12}", "Dedos", "Acción", "Comando");
    println!("{}", "-".repeat(40));
    for (code, action) in mapping.entries() {
        println!("{:<10} | {:<12} | {:<12}", code, action.name(), action.label());
    }
}

fn build_executor(config: &AppConfig, dry_run: bool) -> Result<Box<dyn ActionExecutor>> {
    let kind = if dry_run {
        ExecutorKind::DryRun
    } else {
        config.executor.kind
    };

    let executor: Box<dyn ActionExecutor> = match kind {
        ExecutorKind::DryRun => Box::new(DryRunExecutor::new()),
        ExecutorKind::System => Box::new(BackgroundExecutor::spawn(SystemExecutor::new(
            config.mixer.clone(),
            config.remote.clone(),
        ))?),
        #[cfg(feature = "hid")]
        ExecutorKind::Hid => {
            let hid = quirodedos::hid::HidExecutor::new()
                .context("No se pudo inicializar HID (/dev/uinput)")?;
            Box::new(BackgroundExecutor::spawn(hid)?)
        }
        #[cfg(not(feature = "hid"))]
        ExecutorKind::Hid => bail!("Ejecutor HID no disponible: compilar con --features hid"),
    };

    log::info!("Ejecutor de acciones: {:?}", kind);
    Ok(executor)
}

fn open_input(input: Option<&PathBuf>) -> Result<Box<dyn BufRead>> {
    match input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("No se pudo abrir {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let mapping = ActionMapping::standard();

    if args.list_actions {
        print_action_table(&mapping);
        return Ok(());
    }

    let config = AppConfig::load(&args.config)?;
    if args.write_config {
        config.save(&args.config)?;
        println!("Configuración escrita en {}", args.config.display());
        return Ok(());
    }

    let executor = build_executor(&config, args.dry_run)?;
    let mut provider = ScaledLandmarkProvider::new(&config.frame);
    let mut session = GestureSession::new(mapping, executor);
    let mut recorder = match &args.record {
        Some(path) => Some(RecordingWriter::create(path)?),
        None => None,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    log::info!("Esperando frames...");

    for item in FrameReader::new(open_input(args.input.as_ref())?) {
        let frame = match item {
            Ok(frame) => frame,
            Err(e) => {
                log::error!("Fuente de frames interrumpida: {:#}", e);
                break;
            }
        };

        let observation = frame.and_then(|f| provider.detect(&f));
        let report = session.process(observation.as_ref());

        if args.annotate {
            let overlays = annotate(&report);
            writeln!(out, "{}", serde_json::to_string(&overlays)?)?;
        }

        let record_failed = recorder
            .as_mut()
            .and_then(|r| r.write_frame(observation.as_ref()).err());
        if let Some(e) = record_failed {
            log::error!("Grabación detenida: {:#}", e);
            recorder = None;
        }
    }

    let (stats, executor) = session.finish();
    // Al soltar el ejecutor se espera a las acciones pendientes
    drop(executor);

    if let (Some(recorder), Some(path)) = (recorder, &args.record) {
        let (frames, _) = recorder.finish()?;
        log::info!("Grabación guardada en {} ({} frames)", path.display(), frames);
    }

    log::info!(
        "{} frames procesados, {} transiciones, {} comandos",
        stats.frames,
        stats.transitions,
        stats.dispatches
    );
    Ok(())
}
