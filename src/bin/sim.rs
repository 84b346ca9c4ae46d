//! Binary Sensor Simulator
//!
//! Interviews a simulated device and persists the results to a value store.

use std::process;
use std::time::Duration;

use binsensor_cc::protocol::{parse_property_name, CommandType, SensorType};
use binsensor_cc::simulator::SimulatedDevice;
use binsensor_cc::values::{FileStore, ValueDb};
use binsensor_cc::{BinarySensorCc, Config, InterviewOutcome};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

/// Binary Sensor Simulator
#[derive(Parser, Debug)]
#[command(name = "binsensor-sim")]
#[command(about = "Interview a simulated binary sensor and cache its values")]
#[command(version)]
struct Args {
    /// Value store snapshot file
    #[arg(short, long, default_value = "./binsensor_data/values.bin")]
    store: String,

    /// Node id of the simulated device
    #[arg(short, long, default_value = "5")]
    node_id: u16,

    /// Endpoint index
    #[arg(short, long, default_value = "0")]
    endpoint: u8,

    /// Command class version the device implements
    #[arg(short, long, default_value = "2")]
    device_version: u8,

    /// Sensors as NAME=on|off, e.g. "Smoke=on" (repeatable)
    #[arg(long = "sensor", value_parser = parse_sensor)]
    sensors: Vec<(SensorType, bool)>,

    /// Never answer the supported-types query
    #[arg(long)]
    drop_supported_get: bool,

    /// Response timeout in milliseconds
    #[arg(short, long, default_value = "1600")]
    timeout_ms: u64,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,binsensor_cc=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("Binary Sensor simulator v{}", binsensor_cc::VERSION);
    tracing::info!("Value store: {}", args.store);

    // Build config from args
    let config = Config::builder()
        .node_id(args.node_id)
        .endpoint_index(args.endpoint)
        .device_version(args.device_version)
        .response_timeout_ms(args.timeout_ms)
        .store_path(&args.store)
        .build();

    if let Err(e) = run(&config, &args) {
        tracing::error!("Simulation failed: {}", e);
        process::exit(1);
    }
}

fn run(config: &Config, args: &Args) -> binsensor_cc::Result<()> {
    let version = config.protocol_version()?;
    let cc = BinarySensorCc::from_config(config)?;

    let store = FileStore::open(&config.store_path, config.flush_strategy)?;
    let values = ValueDb::new(store, config.node_id);

    let mut device = SimulatedDevice::new(version);
    for &(sensor_type, state) in &args.sensors {
        device = device.with_sensor(sensor_type, state);
    }
    if args.drop_supported_get {
        device = device.unresponsive_to(CommandType::SupportedGet);
    }

    let (transport, device_handle) =
        device.connect(Duration::from_millis(config.response_timeout_ms));

    let outcome = cc.interview(&transport, &values)?;
    match outcome {
        InterviewOutcome::Complete => tracing::info!("Interview complete"),
        InterviewOutcome::Aborted => tracing::warn!("Interview aborted"),
    }

    // Disconnect so the device thread winds down
    drop(transport);
    let answered = device_handle.join().unwrap_or(0);
    tracing::debug!("Device answered {} requests", answered);

    let supported = BinarySensorCc::supported_sensor_types_cached(&values, cc.endpoint())?;
    let types = supported.unwrap_or_else(|| vec![SensorType::Any]);
    for sensor_type in types {
        match values.state(cc.endpoint(), sensor_type)? {
            Some(state) => println!("{:<16} {}", sensor_type.name(), if state { "on" } else { "off" }),
            None => println!("{:<16} unknown", sensor_type.name()),
        }
    }

    values.into_store().close()
}

/// Parse "NAME=on|off"
fn parse_sensor(arg: &str) -> Result<(SensorType, bool), String> {
    let (name, state) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=on|off, got '{}'", arg))?;
    let sensor_type =
        parse_property_name(name).ok_or_else(|| format!("unknown sensor type '{}'", name))?;
    let state = match state.to_ascii_lowercase().as_str() {
        "on" | "true" | "1" => true,
        "off" | "false" | "0" => false,
        other => return Err(format!("invalid state '{}'", other)),
    };
    Ok((sensor_type, state))
}
