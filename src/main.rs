// Runs the panel pipeline over a saved screenshot and writes an annotated copy.
//
// Usage: panel_vision <input_image> <output_png> [config.json]

use anyhow::{Context, bail};
use log::info;
use panel_vision::config::load_config;
use panel_vision::core_modules::utils::image_helper::image_helper;
use panel_vision::pipeline::{PanelPipeline, PipelineConfig, Report};
use std::env;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        bail!("Usage: panel_vision <input_image> <output_png> [config.json]");
    }
    let input_path = Path::new(&args[1]);
    let output_path = Path::new(&args[2]);

    let config = match args.get(3) {
        Some(path) => load_config(Path::new(path))
            .with_context(|| format!("Failed to load config {path}"))?,
        None => PipelineConfig::default(),
    };

    let mut buffer = image_helper::load(input_path)
        .with_context(|| format!("Failed to open {}", input_path.display()))?;
    info!("got {}x{} pixels", buffer.width(), buffer.height());

    let pipeline = PanelPipeline::new(config);
    let report = pipeline.analyze(&buffer);
    match &report {
        Report::NoPanel => info!("no panel in {}", input_path.display()),
        Report::PanelFound(data) => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
    }

    pipeline.annotate(&mut buffer, &report);
    image_helper::save(output_path, &buffer)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;
    buffer.destroy();

    Ok(())
}
