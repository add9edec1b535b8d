use anyhow::Result;

use tts_batch::config::Config;

/// Validate configuration and print the resolved server pool
pub fn check(config: &Config) -> Result<()> {
    config.validate()?;
    let pool = config.server_pool()?;

    println!("Configuration OK");
    println!("================");
    println!("Input: {}", config.io.input_path.display());
    println!("Output: {}", config.io.output_dir.display());
    println!("Format: {}", config.synthesis.format);
    println!("Endpoint: {}", config.synthesis.endpoint_path);
    println!("Timeout: {}s", config.synthesis.timeout_secs);
    println!("Playback: {}", if config.playback.enabled { "on" } else { "off" });
    println!("Servers ({}):", pool.len());
    for (i, server) in pool.iter().enumerate() {
        let note = if i == 0 { "  (retry target)" } else { "" };
        println!("  [{i}] {server}{note}");
    }

    Ok(())
}
