use randimg::{logger, registry, LoaderConfig, NodeValue};
use serde_json::json;
use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    let config = LoaderConfig::from_env();
    logger::init_with_config(logger::LoggerConfig::from_loader_config(&config))?;

    if dotenv_loaded {
        log::info!("✅ .env file loaded successfully");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }
    logger::log_config_info(&config);

    let args: Vec<String> = env::args().skip(1).collect();
    let registry = registry();

    if args.first().map(String::as_str) == Some("--schema") {
        for id in registry.identifiers() {
            if let Some(node) = registry.get(id) {
                let entry = json!({
                    "id": id,
                    "display_name": registry.display_name(id),
                    "schema": node.schema(),
                });
                println!("{}", serde_json::to_string_pretty(&entry)?);
            }
        }
        return Ok(());
    }

    let seed: u64 = match args.first() {
        Some(raw) => raw
            .parse()
            .map_err(|e| format!("Invalid seed '{}': {}", raw, e))?,
        None => 0,
    };
    let mut inputs = json!({ "seed": seed });
    if let Some(subfolder) = args.get(1) {
        inputs["subfolder"] = json!(subfolder);
    }
    if let Some(extensions) = args.get(2) {
        inputs["extensions"] = json!(extensions);
    }

    log::info!("🎲 Selecting with inputs {}", inputs);
    let outputs = registry.execute(randimg::nodes::NODE_CLASS_NAME, &inputs)?;

    for value in &outputs {
        match value {
            NodeValue::Image(image) => log::info!("🖼️  image: shape {:?}", image.shape()),
            NodeValue::String(text) => log::info!("📝 filename: {}", text),
        }
    }

    Ok(())
}
