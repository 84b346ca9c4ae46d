//! Binary Sensor CLI
//!
//! Inspect Binary Sensor frames from the command line.

use std::process;

use binsensor_cc::protocol::{
    decode_bitmask, parse_property_name, Command, ProtocolVersion, SensorType,
};
use binsensor_cc::registry::{self, Registry};
use clap::{Parser, Subcommand};

/// Binary Sensor CLI
#[derive(Parser, Debug)]
#[command(name = "binsensor-cli")]
#[command(about = "Encode and decode Binary Sensor frames")]
struct Args {
    /// Negotiated command class version
    #[arg(short, long, default_value = "2")]
    protocol_version: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a frame given as hex, e.g. "30 03 ff 02"
    Decode {
        /// Frame bytes (command class byte first)
        hex: String,
    },

    /// Encode a Get request
    Get {
        /// Sensor type name, e.g. "Smoke"
        sensor_type: Option<String>,
    },

    /// Encode a SupportedGet request
    SupportedGet,

    /// Encode a Report
    Report {
        /// Sensor type name
        sensor_type: String,

        /// Reported state
        #[arg(long)]
        on: bool,
    },

    /// Decode a bitmask given as hex
    Bitmask {
        hex: String,

        /// Index of bit 0 of the first byte
        #[arg(short, long, default_value = "0")]
        start: usize,
    },

    /// List the known sensor types
    Types,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), String> {
    let version = ProtocolVersion::new(args.protocol_version).map_err(|e| e.to_string())?;

    match args.command {
        Commands::Decode { hex } => {
            let frame = parse_hex(&hex)?;
            let command = Registry::global()
                .decode_frame(&frame, version)
                .map_err(|e| e.to_string())?;
            println!("{}", command);
        }
        Commands::Get { sensor_type } => {
            let sensor_type = sensor_type.as_deref().map(sensor_type_arg).transpose()?;
            print_frame(&Command::Get { sensor_type }, version)?;
        }
        Commands::SupportedGet => print_frame(&Command::SupportedGet, version)?,
        Commands::Report { sensor_type, on } => {
            let sensor_type = sensor_type_arg(&sensor_type)?;
            print_frame(&Command::Report { sensor_type, value: on }, version)?;
        }
        Commands::Bitmask { hex, start } => {
            let bytes = parse_hex(&hex)?;
            println!("{:?}", decode_bitmask(&bytes, start));
        }
        Commands::Types => {
            for sensor_type in SensorType::ALL {
                println!("0x{:02x}  {}", sensor_type.to_u8(), sensor_type);
            }
        }
    }

    Ok(())
}

fn print_frame(command: &Command, version: ProtocolVersion) -> Result<(), String> {
    let frame = registry::encode_frame(command, version).map_err(|e| e.to_string())?;
    let hex: Vec<String> = frame.iter().map(|b| format!("{:02x}", b)).collect();
    println!("{}", hex.join(" "));
    Ok(())
}

fn sensor_type_arg(name: &str) -> Result<SensorType, String> {
    parse_property_name(name).ok_or_else(|| format!("unknown sensor type '{}'", name))
}

/// Parse hex bytes, ignoring whitespace and an optional 0x prefix
fn parse_hex(input: &str) -> Result<Vec<u8>, String> {
    let digits: String = input
        .trim()
        .trim_start_matches("0x")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("invalid hex in '{}'", input));
    }
    if digits.len() % 2 != 0 {
        return Err(format!("odd number of hex digits in '{}'", input));
    }

    (0..digits.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| format!("invalid hex byte '{}'", &digits[i..i + 2]))
        })
        .collect()
}
