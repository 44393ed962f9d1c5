//! Read and write a few values straight through a `ConfigFile`.
//!
//! Run with `RUST_LOG=cracon=debug` to see why values are rejected.

use cracon::ConfigFile;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let dir = std::env::temp_dir().join("cracon-basic-usage");
    let config = ConfigFile::with_options(cracon::FileOptions {
        create_dirs: true,
        ..Default::default()
    });
    if let Err(error) = config.try_init(dir.join("config.json"), dir.join("defaults.json")) {
        eprintln!("could not load configuration: {error}");
        std::process::exit(1);
    }

    let speed = config.get::<u32>("/car/speed", 120);
    let name = config.get("/car/name", "roadster".to_string());
    let curve = config.get::<[f32; 3]>("/car/motor_curve", [0.0, 0.5, 1.0]);
    println!("{name}: speed {speed}, curve {curve:?}");

    config.set("/car/speed", speed + 10);
    match config.try_write() {
        Ok(()) => println!("wrote {}", dir.display()),
        Err(error) => eprintln!("{error}"),
    }
}
