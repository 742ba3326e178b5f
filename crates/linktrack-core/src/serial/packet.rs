//! Motor command wire format.
//!
//! A packet is three bytes: `[0xFF, speed_a, speed_b]`. Speed bytes are in
//! `[0, 254]` so the sentinel never appears as payload; 127 is stop, 0 is full
//! reverse and 254 full forward. There is no checksum or acknowledgment.

use serde::{Deserialize, Serialize};

use crate::consts::{PACKET_LEN, PACKET_MAX_PAYLOAD, PACKET_SENTINEL, SPEED_FULL_SCALE};

/// Normalized motor speeds in `[-1.0, 1.0]`. Negative means reverse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MotorCommand {
    pub speed_a: f64,
    pub speed_b: f64,
}

impl MotorCommand {
    pub fn new(speed_a: f64, speed_b: f64) -> Self {
        Self { speed_a, speed_b }
    }

    pub const STOP: MotorCommand = MotorCommand {
        speed_a: 0.0,
        speed_b: 0.0,
    };

    /// Clamp both speeds into `[-1, 1]`; NaN becomes a stop on that motor.
    pub fn saturated(&self) -> Self {
        Self {
            speed_a: saturate(self.speed_a),
            speed_b: saturate(self.speed_b),
        }
    }
}

/// An encoded, ready-to-send command packet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandPacket([u8; PACKET_LEN]);

impl CommandPacket {
    pub fn encode(command: MotorCommand) -> Self {
        let command = command.saturated();
        Self([
            PACKET_SENTINEL,
            encode_speed(command.speed_a),
            encode_speed(command.speed_b),
        ])
    }

    /// Parse a packet from exactly three bytes.
    pub fn from_bytes(bytes: [u8; PACKET_LEN]) -> Option<Self> {
        if bytes[0] != PACKET_SENTINEL
            || bytes[1] > PACKET_MAX_PAYLOAD
            || bytes[2] > PACKET_MAX_PAYLOAD
        {
            return None;
        }
        Some(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; PACKET_LEN] {
        &self.0
    }

    /// Speeds carried by the packet. Each is within two quantization steps
    /// (`2 / 254`) of the command that produced it.
    pub fn decode(&self) -> MotorCommand {
        MotorCommand {
            speed_a: decode_speed(self.0[1]),
            speed_b: decode_speed(self.0[2]),
        }
    }
}

fn saturate(speed: f64) -> f64 {
    if speed.is_nan() {
        0.0
    } else {
        speed.clamp(-1.0, 1.0)
    }
}

/// `[-1, 1]` -> `[-255, 255]` (truncating) -> `[0, 254]`.
fn encode_speed(speed: f64) -> u8 {
    let scaled = (speed * SPEED_FULL_SCALE as f64) as i32;
    let max = PACKET_MAX_PAYLOAD as i32;
    let mapped = (scaled + SPEED_FULL_SCALE) * max / (2 * SPEED_FULL_SCALE);
    mapped.clamp(0, max) as u8
}

fn decode_speed(byte: u8) -> f64 {
    byte as f64 * 2.0 / PACKET_MAX_PAYLOAD as f64 - 1.0
}

/// Reassembles packets from a byte stream, resynchronizing on the sentinel.
#[derive(Debug, Default)]
pub struct PacketDecoder {
    buf: Vec<u8>,
}

impl PacketDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one byte; returns a packet when one completes.
    pub fn push(&mut self, byte: u8) -> Option<CommandPacket> {
        if byte == PACKET_SENTINEL {
            // A sentinel always starts a new packet, discarding any partial one.
            self.buf.clear();
            self.buf.push(byte);
            return None;
        }
        if self.buf.is_empty() {
            return None;
        }
        self.buf.push(byte);
        if self.buf.len() < PACKET_LEN {
            return None;
        }
        let packet = CommandPacket::from_bytes([self.buf[0], self.buf[1], self.buf[2]]);
        self.buf.clear();
        packet
    }

    /// Decode every complete packet in `bytes`.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<CommandPacket> {
        bytes.iter().filter_map(|&b| self.push(b)).collect()
    }
}
