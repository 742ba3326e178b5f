use std::io::{ErrorKind, Read, Write};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::error::{IoFault, LinkTrackError, Result};
use crate::pipeline::config::SerialConfig;
use crate::pipeline::ticker::sleep_while_running;

use super::link::{LinkOpener, SerialLink};
use super::packet::CommandPacket;

/// Inbound characters buffered before newly received ones are dropped.
const TELEMETRY_CAPACITY: usize = 4096;

/// Bytes read from the link per poll.
const READ_CHUNK: usize = 64;

/// Connection state of the serial channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelState {
    Closed,
    Opening,
    Open,
}

impl std::fmt::Display for ChannelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Closed => write!(f, "Closed"),
            Self::Opening => write!(f, "Opening"),
            Self::Open => write!(f, "Open"),
        }
    }
}

/// Counters describing what the channel did with the link.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChannelStats {
    pub open_attempts: u64,
    pub open_failures: u64,
    pub packets_written: u64,
    /// Packets lost to an ignorable write fault or to a dropped link.
    pub packets_dropped: u64,
    pub bytes_received: u64,
}

#[derive(Default)]
struct Counters {
    open_attempts: AtomicU64,
    open_failures: AtomicU64,
    packets_written: AtomicU64,
    packets_dropped: AtomicU64,
    bytes_received: AtomicU64,
}

struct Shared {
    running: AtomicBool,
    state: RwLock<ChannelState>,
    /// Last-writer-wins handoff from the pipeline thread.
    outbound: Mutex<Option<CommandPacket>>,
    last_fault: Mutex<Option<IoFault>>,
    counters: Counters,
}

impl Shared {
    fn set_state(&self, state: ChannelState) {
        *self.state.write() = state;
    }
}

/// Owns the serial link on a dedicated thread.
///
/// The thread opens the port (retrying while closed), writes the most recent
/// outbound packet, and turns inbound ASCII bytes into a telemetry stream.
pub struct SerialChannel {
    shared: Arc<Shared>,
    handle: Mutex<Option<JoinHandle<()>>>,
    telemetry: Mutex<Option<Receiver<char>>>,
}

impl SerialChannel {
    pub fn start(config: &SerialConfig, opener: Box<dyn LinkOpener>) -> Result<Self> {
        let shared = Arc::new(Shared {
            running: AtomicBool::new(true),
            state: RwLock::new(ChannelState::Closed),
            outbound: Mutex::new(None),
            last_fault: Mutex::new(None),
            counters: Counters::default(),
        });
        let (tx, rx) = mpsc::sync_channel(TELEMETRY_CAPACITY);

        let thread_shared = Arc::clone(&shared);
        let config = config.clone();
        let handle = std::thread::Builder::new()
            .name("linktrack-serial".into())
            .spawn(move || channel_loop(&thread_shared, &config, opener, tx))
            .map_err(|e| LinkTrackError::Spawn(e.to_string()))?;

        Ok(Self {
            shared,
            handle: Mutex::new(Some(handle)),
            telemetry: Mutex::new(Some(rx)),
        })
    }

    /// Hand a packet to the link thread, replacing any packet not yet written.
    ///
    /// Fails with [`IoFault::NotConnected`] while the link is not open; the
    /// caller should ignore it since the next cycle supersedes the command.
    pub fn send(&self, packet: CommandPacket) -> std::result::Result<(), IoFault> {
        if self.state() != ChannelState::Open {
            return Err(IoFault::NotConnected);
        }
        *self.shared.outbound.lock() = Some(packet);
        Ok(())
    }

    pub fn state(&self) -> ChannelState {
        *self.shared.state.read()
    }

    pub fn stats(&self) -> ChannelStats {
        let c = &self.shared.counters;
        ChannelStats {
            open_attempts: c.open_attempts.load(Ordering::Relaxed),
            open_failures: c.open_failures.load(Ordering::Relaxed),
            packets_written: c.packets_written.load(Ordering::Relaxed),
            packets_dropped: c.packets_dropped.load(Ordering::Relaxed),
            bytes_received: c.bytes_received.load(Ordering::Relaxed),
        }
    }

    /// Most recent ignored write fault, if any.
    pub fn last_fault(&self) -> Option<IoFault> {
        self.shared.last_fault.lock().clone()
    }

    /// Take the inbound character stream. Only the first call returns it.
    pub fn take_telemetry(&self) -> Option<TelemetryStream> {
        self.telemetry.lock().take().map(|rx| TelemetryStream { rx })
    }

    pub fn is_running(&self) -> bool {
        self.handle.lock().is_some()
    }

    /// Stop the link thread and wait for it; the link is closed on return.
    pub fn stop(&self) {
        self.shared.running.store(false, Ordering::Release);
        let handle = self.handle.lock().take();
        if let Some(handle) = handle {
            if handle.join().is_err() {
                warn!("serial thread panicked");
            }
            info!("serial channel stopped");
        }
    }
}

/// Characters decoded from the link, consumed lazily.
///
/// `next()` never blocks: it yields whatever has arrived and returns `None`
/// once caught up. Later calls pick up newly received characters.
pub struct TelemetryStream {
    rx: Receiver<char>,
}

impl TelemetryStream {
    /// Wait up to `timeout` for the next character.
    pub fn next_timeout(&mut self, timeout: Duration) -> Option<char> {
        self.rx.recv_timeout(timeout).ok()
    }

    /// Everything received so far, as a string.
    pub fn drain(&mut self) -> String {
        self.rx.try_iter().collect()
    }
}

impl Iterator for TelemetryStream {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        self.rx.try_recv().ok()
    }
}

impl Drop for SerialChannel {
    fn drop(&mut self) {
        self.stop();
    }
}

fn channel_loop(
    shared: &Shared,
    config: &SerialConfig,
    mut opener: Box<dyn LinkOpener>,
    telemetry: SyncSender<char>,
) {
    let read_timeout = Duration::from_millis(config.read_timeout_ms);
    let retry = Duration::from_millis(config.retry_interval_ms);
    let mut link: Option<Box<dyn SerialLink>> = None;
    let mut buf = [0u8; READ_CHUNK];

    while shared.running.load(Ordering::Acquire) {
        let Some(port) = link.as_mut() else {
            link = try_open(shared, config, opener.as_mut(), read_timeout);
            if link.is_none() {
                sleep_while_running(&shared.running, retry);
            }
            continue;
        };

        let pending = shared.outbound.lock().take();
        if let Some(packet) = pending {
            match write_packet(&mut **port, &packet) {
                Ok(()) => {
                    shared.counters.packets_written.fetch_add(1, Ordering::Relaxed);
                }
                Err(fault) => {
                    debug!(%fault, "command packet dropped");
                    shared.counters.packets_dropped.fetch_add(1, Ordering::Relaxed);
                    *shared.last_fault.lock() = Some(fault);
                }
            }
        }

        match port.read(&mut buf) {
            Ok(0) => {
                sleep_while_running(&shared.running, read_timeout);
            }
            Ok(n) => {
                shared
                    .counters
                    .bytes_received
                    .fetch_add(n as u64, Ordering::Relaxed);
                forward_telemetry(&buf[..n], &telemetry);
            }
            Err(e) if e.kind() == ErrorKind::WouldBlock => {
                sleep_while_running(&shared.running, read_timeout);
            }
            Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::Interrupted) => {}
            Err(e) => {
                warn!(error = %e, "serial read failed, reopening link");
                link = None;
                shared.set_state(ChannelState::Closed);
                // A command accepted before the drop is stale by the time the link returns.
                if shared.outbound.lock().take().is_some() {
                    shared.counters.packets_dropped.fetch_add(1, Ordering::Relaxed);
                }
            }
        }
    }

    drop(link);
    shared.set_state(ChannelState::Closed);
}

fn try_open(
    shared: &Shared,
    config: &SerialConfig,
    opener: &mut dyn LinkOpener,
    read_timeout: Duration,
) -> Option<Box<dyn SerialLink>> {
    let port_name = config.port.as_deref()?;

    shared.set_state(ChannelState::Opening);
    shared.counters.open_attempts.fetch_add(1, Ordering::Relaxed);
    match opener.open(port_name, config.baud_rate, read_timeout) {
        Ok(link) => {
            info!(port = port_name, baud = config.baud_rate, "serial link open");
            shared.set_state(ChannelState::Open);
            Some(link)
        }
        Err(e) => {
            debug!(port = port_name, error = %e, "serial open failed");
            shared.counters.open_failures.fetch_add(1, Ordering::Relaxed);
            shared.set_state(ChannelState::Closed);
            None
        }
    }
}

fn write_packet(link: &mut dyn SerialLink, packet: &CommandPacket) -> std::result::Result<(), IoFault> {
    let bytes = packet.as_bytes();
    let written = link
        .write(bytes)
        .map_err(|e| IoFault::WriteFailed(e.to_string()))?;
    if written < bytes.len() {
        return Err(IoFault::ShortWrite {
            written,
            expected: bytes.len(),
        });
    }
    link.flush().map_err(|e| IoFault::WriteFailed(e.to_string()))
}

/// Forward the ASCII bytes as characters; other bytes are not text and are dropped.
fn forward_telemetry(bytes: &[u8], telemetry: &SyncSender<char>) {
    for &b in bytes.iter().filter(|b| b.is_ascii()) {
        match telemetry.try_send(b as char) {
            Ok(()) | Err(TrySendError::Full(_)) => {}
            Err(TrySendError::Disconnected(_)) => return,
        }
    }
}
