//! Selector Session
//!
//! Drives a two-instance registry through a short session and prints the
//! JSON status of every device.
//!
//! Key concepts:
//! - Writes pick a response with their first byte
//! - Instances are independent
//!
//! Run with: RUST_LOG=selectdev=debug cargo run --example selector_session

use selectdev::device::DeviceError;
use selectdev::{DeviceConfigBuilder, DeviceRegistry, OpenFile};
use tracing_subscriber::EnvFilter;

fn read_text(registry: &DeviceRegistry, file: &mut OpenFile) -> Result<String, DeviceError> {
    let mut buf = [0u8; 32];
    let n = registry.read(file, (&mut buf).into())?;
    Ok(String::from_utf8_lossy(&buf[..n]).into_owned())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Selector Session ===\n");

    let config = DeviceConfigBuilder::new().instances(2).build()?;
    let registry = DeviceRegistry::new(config)?;

    let mut first = registry.open(0)?;
    let mut second = registry.open(1)?;

    println!("before any write: {}", read_text(&registry, &mut first)?);

    for input in ["1", "2extra", "3", "9"] {
        let accepted = registry.write(&mut first, input.into())?;
        let text = read_text(&registry, &mut first)?;
        println!("write {input:?} (accepted {accepted}) -> {text}");
    }

    println!(
        "chardevice1 was never written: {}",
        read_text(&registry, &mut second)?
    );

    println!("\n=== Status ===");
    println!("{}", serde_json::to_string_pretty(&registry.snapshot())?);

    registry.close(first)?;
    registry.close(second)?;
    registry.shutdown();

    println!("\n=== Session Complete ===");
    Ok(())
}
