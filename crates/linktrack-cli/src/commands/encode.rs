use anyhow::Result;
use clap::Args;
use linktrack_core::serial::{CommandPacket, MotorCommand};

#[derive(Args)]
pub struct EncodeArgs {
    /// Speed of motor A in [-1, 1]
    #[arg(allow_hyphen_values = true)]
    pub speed_a: f64,

    /// Speed of motor B in [-1, 1]
    #[arg(allow_hyphen_values = true)]
    pub speed_b: f64,
}

pub fn run(args: &EncodeArgs) -> Result<()> {
    let command = MotorCommand::new(args.speed_a, args.speed_b);
    let packet = CommandPacket::encode(command);
    let decoded = packet.decode();
    let [sentinel, a, b] = *packet.as_bytes();

    println!("Bytes:    {:02X} {:02X} {:02X}", sentinel, a, b);
    println!("Decimal:  {} {} {}", sentinel, a, b);
    println!(
        "Decoded:  a = {:+.3}, b = {:+.3}",
        decoded.speed_a, decoded.speed_b
    );

    Ok(())
}
