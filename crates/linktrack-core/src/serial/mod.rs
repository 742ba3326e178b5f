pub mod channel;
pub mod link;
pub mod packet;

pub use channel::{ChannelState, ChannelStats, SerialChannel, TelemetryStream};
#[cfg(feature = "hardware")]
pub use link::{available_ports, SerialPortOpener};
pub use link::{LinkOpener, SerialLink};
pub use packet::{CommandPacket, MotorCommand, PacketDecoder};
