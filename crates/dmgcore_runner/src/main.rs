use anyhow::{bail, Context};
use dmgcore::{Engine, EngineConfig};

const USAGE: &str = "usage: dmgcore <image> [frames] [cycles_per_frame]";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(image_path) = args.next() else {
        bail!("no image path provided\n{USAGE}");
    };
    let frames: u64 = match args.next() {
        Some(arg) => arg
            .parse()
            .with_context(|| format!("invalid frame count '{arg}'"))?,
        None => 1,
    };
    let config = match args.next() {
        Some(arg) => {
            let cycles: u32 = arg
                .parse()
                .with_context(|| format!("invalid cycles per frame '{arg}'"))?;
            EngineConfig::builder().cycles_per_frame(cycles).build()
        }
        None => EngineConfig::default(),
    };

    let image = std::fs::read(&image_path)
        .with_context(|| format!("failed to read image '{image_path}'"))?;

    let mut engine = Engine::new(config)?;
    engine
        .load_image(&image)
        .with_context(|| format!("failed to load '{image_path}'"))?;
    log::info!(
        "running {} frame(s) of {} cycles from '{}'",
        frames,
        engine.config().cycles_per_frame,
        image_path
    );

    for _ in 0..frames {
        let report = match engine.run_frame() {
            Ok(report) => report,
            Err(err) => {
                log::info!("final registers: {}", engine.registers());
                return Err(err).context("execution stopped");
            }
        };
        log::info!("frame {}: {}", report.frame, engine.registers());
        if !report.completed {
            log::info!("halted after {} steps", report.steps);
            break;
        }
    }

    Ok(())
}
