//! Ball texture generator
//!
//! Run with: `cargo run --bin generate_ball [-- --size 128 --output path.png]`

use ballthrow::generate::{BALL_TEXTURE_FILE, BallTextureConfig, run};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut config = BallTextureConfig::default();
    let mut output = BALL_TEXTURE_FILE.to_string();

    let mut i = 1;
    while i < args.len() {
        match (args[i].as_str(), args.get(i + 1)) {
            ("--size", Some(value)) => match value.parse::<u32>() {
                Ok(size) if size >= 8 => config.size = size,
                _ => {
                    eprintln!("Invalid --size: {} (need an integer >= 8)", value);
                    std::process::exit(2);
                }
            },
            ("--output", Some(value)) => output = value.clone(),
            (other, _) => {
                eprintln!("Unknown or incomplete argument: {}", other);
                std::process::exit(2);
            }
        }
        i += 2;
    }

    println!("Generating ball texture...");
    if let Err(e) = run(&output, &config) {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }
}
