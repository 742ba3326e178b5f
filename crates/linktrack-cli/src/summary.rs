use console::Style;
use linktrack_core::frame::{JointPositions, Marker, PhysicalPosition};
use linktrack_core::pipeline::{FrameOutput, PipelineSnapshot, SessionStats, TrackerConfig};
use linktrack_core::serial::ChannelStats;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    ok: Style,
    missing: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            ok: Style::new().green(),
            missing: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_session_summary(config: &TrackerConfig) {
    let s = Styles::new();
    let cal = &config.calibration;

    println!();
    println!("  {}", s.title.apply_to("LinkTrack Session"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(17)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Source"),
        s.path.apply_to(&config.capture.source)
    );
    match config.serial.port {
        Some(ref port) => println!(
            "  {:<14}{} @ {} baud",
            s.label.apply_to("Serial"),
            s.value.apply_to(port),
            config.serial.baud_rate
        ),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Serial"),
            s.missing.apply_to("disabled")
        ),
    }
    println!(
        "  {:<14}{} ms",
        s.label.apply_to("Interval"),
        s.value.apply_to(config.capture.interval_ms)
    );
    println!();

    println!("  {}", s.header.apply_to("Calibration"));
    for (marker, band) in [
        (Marker::Green, &cal.green),
        (Marker::Blue, &cal.blue),
        (Marker::Red, &cal.red),
    ] {
        println!(
            "  {:<14}H {:>3} \u{b1}{:<3} S {:>3} \u{b1}{:<3} V {:>3} \u{b1}{}",
            s.label.apply_to(marker),
            band.hue,
            band.hue_tolerance,
            band.saturation,
            band.saturation_tolerance,
            band.value,
            band.value_tolerance
        );
    }
    println!(
        "  {:<14}{:.2} px/cm, markers {}-{} cm, link {} cm",
        s.label.apply_to("Geometry"),
        cal.pixels_per_cm(),
        cal.min_diameter_cm,
        cal.max_diameter_cm,
        cal.link_length_cm
    );
    println!();
}

fn format_position(p: PhysicalPosition) -> String {
    format!("({:>6.1}, {:>6.1})", p.x, p.y)
}

fn format_positions(positions: &JointPositions) -> String {
    format!(
        "blue {}  red {}",
        format_position(positions.blue),
        format_position(positions.red)
    )
}

pub fn print_snapshot(snapshot: &PipelineSnapshot) {
    let s = Styles::new();
    let status = if snapshot.success {
        s.ok.apply_to("tracked")
    } else {
        s.missing.apply_to("stale  ")
    };
    let command = snapshot
        .command
        .map(|c| format!("  cmd ({:+.2}, {:+.2})", c.speed_a, c.speed_b))
        .unwrap_or_default();
    println!(
        "  #{:<6} {}  {}{}",
        snapshot.cycle,
        status,
        format_positions(&snapshot.positions),
        command
    );
}

pub fn print_detection(output: &FrameOutput) {
    let s = Styles::new();
    let pixels = &output.detection.pixels;

    println!();
    println!("  {}", s.header.apply_to("Markers"));
    for marker in Marker::ALL {
        match pixels.get(marker) {
            Some(p) => println!(
                "  {:<14}{}",
                s.label.apply_to(marker),
                s.ok.apply_to(format!("({}, {}) px", p.x, p.y))
            ),
            None => println!(
                "  {:<14}{}",
                s.label.apply_to(marker),
                s.missing.apply_to("not found")
            ),
        }
    }

    println!();
    match output.positions {
        Some(ref positions) => {
            println!("  {}", s.header.apply_to("Positions (cm)"));
            for (marker, p) in [
                (Marker::Green, positions.green),
                (Marker::Blue, positions.blue),
                (Marker::Red, positions.red),
            ] {
                println!(
                    "  {:<14}{}",
                    s.label.apply_to(marker),
                    s.value.apply_to(format_position(p))
                );
            }
        }
        None => println!("  {}", s.missing.apply_to("No positions: not all markers usable")),
    }
    println!();
}

pub fn print_stats(session: &SessionStats, serial: &ChannelStats) {
    let s = Styles::new();
    println!("  {}", s.header.apply_to("Session"));
    let rows = [
        ("Frames", session.frames_processed),
        ("Commands", session.commands_issued),
        ("Pull fails", session.pull_failures),
        ("Open fails", session.open_failures),
        ("Written", serial.packets_written),
        ("Dropped", serial.packets_dropped),
        ("Received", serial.bytes_received),
    ];
    for (label, value) in rows {
        println!("  {:<14}{}", s.label.apply_to(label), s.value.apply_to(value));
    }
}
