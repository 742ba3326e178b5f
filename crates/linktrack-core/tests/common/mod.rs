#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::{Read, Write};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use ndarray::Array2;
use parking_lot::Mutex;

use linktrack_core::error::{LinkTrackError, Result};
use linktrack_core::frame::{Frame, FrameKind, PixelPosition};
use linktrack_core::io::{Capture, FrameSource};
use linktrack_core::serial::{LinkOpener, SerialLink};

/// Inverse of the 8-bit HSV convention used by the segmenter (hue in [0, 180)).
pub fn hsv_to_rgb(h: u8, s: u8, v: u8) -> [u8; 3] {
    let hue = h as f32 * 2.0 / 60.0;
    let s = s as f32 / 255.0;
    let v = v as f32 / 255.0;
    let c = v * s;
    let x = c * (1.0 - (hue % 2.0 - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match hue as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    [
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    ]
}

/// RGB of the default calibrated marker colors.
pub fn green_rgb() -> [u8; 3] {
    hsv_to_rgb(55, 157, 135)
}
pub fn blue_rgb() -> [u8; 3] {
    hsv_to_rgb(113, 189, 115)
}
pub fn red_rgb() -> [u8; 3] {
    hsv_to_rgb(178, 243, 175)
}

/// Frame filled with a single color.
pub fn solid_frame(width: usize, height: usize, rgb: [u8; 3]) -> Frame {
    let mut frame = Frame::blank(width, height, FrameKind::Color);
    for y in 0..height {
        for x in 0..width {
            frame.put_pixel(x, y, rgb);
        }
    }
    frame
}

/// Paint a filled disk onto a frame.
pub fn paint_disk(frame: &mut Frame, cx: i32, cy: i32, radius: i32, rgb: [u8; 3]) {
    for y in 0..frame.height() as i32 {
        for x in 0..frame.width() as i32 {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= radius * radius {
                frame.put_pixel(x as usize, y as usize, rgb);
            }
        }
    }
}

/// Black frame with the three calibrated markers at the given centers.
pub fn marker_frame(
    width: usize,
    height: usize,
    green: Option<PixelPosition>,
    blue: Option<PixelPosition>,
    red: Option<PixelPosition>,
    radius: i32,
) -> Frame {
    let mut frame = Frame::blank(width, height, FrameKind::Color);
    for (pos, rgb) in [(green, green_rgb()), (blue, blue_rgb()), (red, red_rgb())] {
        if let Some(p) = pos {
            paint_disk(&mut frame, p.x, p.y, radius, rgb);
        }
    }
    frame
}

/// Green ring and blue disk sharing the center (100, 100), red at (170, 170).
///
/// The ring covers about 5100 px after opening, so the area window has to
/// admit markers up to roughly 40 cm.
pub fn concentric_frame() -> Frame {
    let mut frame = Frame::blank(200, 200, FrameKind::Color);
    paint_disk(&mut frame, 100, 100, 45, green_rgb());
    paint_disk(&mut frame, 100, 100, 20, [0, 0, 0]);
    paint_disk(&mut frame, 100, 100, 17, blue_rgb());
    paint_disk(&mut frame, 170, 170, 17, red_rgb());
    frame
}

/// Binary mask with a filled disk.
pub fn disk_mask(width: usize, height: usize, cx: i32, cy: i32, radius: i32) -> Array2<bool> {
    let mut mask = Array2::from_elem((height, width), false);
    add_disk(&mut mask, cx, cy, radius);
    mask
}

pub fn add_disk(mask: &mut Array2<bool>, cx: i32, cy: i32, radius: i32) {
    let (h, w) = mask.dim();
    for y in 0..h as i32 {
        for x in 0..w as i32 {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= radius * radius {
                mask[[y as usize, x as usize]] = true;
            }
        }
    }
}

/// Poll `cond` until it holds or `timeout` passes.
pub fn wait_until(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    cond()
}

// ---------------------------------------------------------------------------
// Frame sources
// ---------------------------------------------------------------------------

/// Shared observations of a scripted source.
#[derive(Clone, Default)]
pub struct SourceProbe {
    pub opens: Arc<AtomicUsize>,
    pub reads: Arc<AtomicUsize>,
    pub released: Arc<AtomicBool>,
    pub read_times: Arc<Mutex<Vec<Instant>>>,
}

/// Plays the given frames in order, then repeats the last one.
/// With no frames every read fails.
pub struct ScriptedSource {
    frames: Vec<Frame>,
    probe: SourceProbe,
    fail_opens: usize,
}

impl ScriptedSource {
    pub fn new(frames: Vec<Frame>, probe: SourceProbe) -> Self {
        Self {
            frames,
            probe,
            fail_opens: 0,
        }
    }

    pub fn failing_opens(mut self, count: usize) -> Self {
        self.fail_opens = count;
        self
    }
}

impl FrameSource for ScriptedSource {
    fn open(&mut self, _identifier: &str) -> Result<Box<dyn Capture>> {
        let n = self.probe.opens.fetch_add(1, Ordering::SeqCst);
        if n < self.fail_opens {
            return Err(LinkTrackError::Source("device busy".into()));
        }
        self.probe.released.store(false, Ordering::SeqCst);
        Ok(Box::new(ScriptedCapture {
            frames: self.frames.clone().into(),
            last: None,
            probe: self.probe.clone(),
        }))
    }
}

struct ScriptedCapture {
    frames: VecDeque<Frame>,
    last: Option<Frame>,
    probe: SourceProbe,
}

impl Capture for ScriptedCapture {
    fn read(&mut self) -> Result<Frame> {
        self.probe.reads.fetch_add(1, Ordering::SeqCst);
        self.probe.read_times.lock().push(Instant::now());
        if let Some(frame) = self.frames.pop_front() {
            self.last = Some(frame.clone());
            return Ok(frame);
        }
        self.last.clone().ok_or(LinkTrackError::Source("no signal".into()))
    }
}

impl Drop for ScriptedCapture {
    fn drop(&mut self) {
        self.probe.released.store(true, Ordering::SeqCst);
    }
}

// ---------------------------------------------------------------------------
// Serial links
// ---------------------------------------------------------------------------

/// Shared buffers of an in-memory serial link.
#[derive(Clone, Default)]
pub struct LinkProbe {
    pub written: Arc<Mutex<Vec<u8>>>,
    pub inbound: Arc<Mutex<VecDeque<u8>>>,
    pub fail_writes: Arc<AtomicBool>,
    pub fail_reads: Arc<AtomicBool>,
    /// While set, reads park until it is cleared; `stalled` reports a parked read.
    pub stall_reads: Arc<AtomicBool>,
    pub stalled: Arc<AtomicBool>,
    pub opens: Arc<AtomicUsize>,
    pub dropped: Arc<AtomicUsize>,
}

impl LinkProbe {
    pub fn push_inbound(&self, bytes: &[u8]) {
        self.inbound.lock().extend(bytes.iter().copied());
    }

    pub fn written(&self) -> Vec<u8> {
        self.written.lock().clone()
    }
}

pub struct MockLink {
    probe: LinkProbe,
}

impl Read for MockLink {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        while self.probe.stall_reads.load(Ordering::SeqCst) {
            self.probe.stalled.store(true, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(1));
        }
        if self.probe.fail_reads.load(Ordering::SeqCst) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "device unplugged",
            ));
        }
        let mut inbound = self.probe.inbound.lock();
        let n = buf.len().min(inbound.len());
        for slot in buf.iter_mut().take(n) {
            *slot = inbound.pop_front().unwrap_or(0);
        }
        Ok(n)
    }
}

impl Write for MockLink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if self.probe.fail_writes.load(Ordering::SeqCst) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "device unplugged",
            ));
        }
        self.probe.written.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Drop for MockLink {
    fn drop(&mut self) {
        self.probe.dropped.fetch_add(1, Ordering::SeqCst);
    }
}

/// Opens [`MockLink`]s, failing the first `fail_first` attempts.
pub struct MockOpener {
    pub probe: LinkProbe,
    pub fail_first: usize,
}

impl MockOpener {
    pub fn new(probe: LinkProbe) -> Self {
        Self {
            probe,
            fail_first: 0,
        }
    }
}

impl LinkOpener for MockOpener {
    fn open(&mut self, port: &str, _baud: u32, _timeout: Duration) -> Result<Box<dyn SerialLink>> {
        let n = self.probe.opens.fetch_add(1, Ordering::SeqCst);
        if n < self.fail_first {
            return Err(LinkTrackError::Serial(format!("{port}: no such device")));
        }
        Ok(Box::new(MockLink {
            probe: self.probe.clone(),
        }))
    }
}
