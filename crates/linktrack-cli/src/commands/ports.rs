use anyhow::Result;
use linktrack_core::serial::available_ports;

pub fn run() -> Result<()> {
    let ports = available_ports()?;
    if ports.is_empty() {
        println!("No serial ports found");
    }
    for port in ports {
        println!("{}", port);
    }
    Ok(())
}
