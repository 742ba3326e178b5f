/// Minimum pixel count (h*w) to convert colors in parallel with Rayon.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Upper bound of the 8-bit hue channel (OpenCV convention, degrees / 2).
pub const HUE_MAX: i32 = 180;

/// Upper bound of the saturation and value channels.
pub const CHANNEL_MAX: i32 = 255;

/// Default hue tolerance applied around each calibrated base hue.
pub const DEFAULT_HUE_TOLERANCE: i32 = 20;

/// Default saturation tolerance applied around each calibrated base saturation.
pub const DEFAULT_SATURATION_TOLERANCE: i32 = 120;

/// Default value tolerance applied around each calibrated base value.
pub const DEFAULT_VALUE_TOLERANCE: i32 = 120;

/// Calibrated HSV of the green marker (hue, saturation, value).
pub const CALIBRATED_HSV_GREEN: (i32, i32, i32) = (55, 157, 135);

/// Calibrated HSV of the blue marker.
pub const CALIBRATED_HSV_BLUE: (i32, i32, i32) = (113, 189, 115);

/// Calibrated HSV of the red marker. Sits on the hue wrap boundary.
pub const CALIBRATED_HSV_RED: (i32, i32, i32) = (178, 243, 175);

/// Width of the processed image in pixels used to derive the pixel/cm ratio.
pub const DEFAULT_IMAGE_WIDTH_PX: f64 = 640.0;

/// Real-world width covered by the camera frame, in centimeters.
pub const DEFAULT_FRAME_WIDTH_CM: f64 = 215.0;

/// Smallest physical marker diameter accepted, in centimeters.
pub const DEFAULT_MIN_DIAMETER_CM: f64 = 7.0;

/// Largest physical marker diameter accepted, in centimeters.
pub const DEFAULT_MAX_DIAMETER_CM: f64 = 15.0;

/// Physical distance between the green and blue marker centers.
pub const DEFAULT_GREEN_BLUE_LINK_CM: f64 = 30.0;

/// Side of the square structuring element used to denoise color masks.
pub const DEFAULT_MORPH_KERNEL_SIZE: usize = 5;

/// Erosion and dilation passes applied to each color mask.
pub const DEFAULT_MORPH_ITERATIONS: usize = 3;

/// Thickness of the link segments drawn on the annotated frame.
pub const DEFAULT_LINE_THICKNESS: u32 = 5;

/// Target width/height ratio frames are cropped to.
pub const DEFAULT_ASPECT_RATIO: f64 = 1.0;

/// Minimum spacing between pipeline cycles (25 fps).
pub const DEFAULT_INTERVAL_MS: u64 = 40;

/// Serial baud rate expected by the motor controller firmware.
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// Bounded read timeout of the serial loop.
pub const DEFAULT_SERIAL_READ_TIMEOUT_MS: u64 = 10;

/// Delay between failed attempts to open the serial port.
pub const DEFAULT_SERIAL_RETRY_MS: u64 = 500;

/// Longest single sleep of the pipeline ticker, so stop requests are seen quickly.
pub const MAX_SLEEP_SLICE_MS: u64 = 20;

/// Start-of-packet byte. Never used as a payload value.
pub const PACKET_SENTINEL: u8 = 0xFF;

/// Largest payload byte value of a command packet.
pub const PACKET_MAX_PAYLOAD: u8 = 254;

/// Size in bytes of a command packet.
pub const PACKET_LEN: usize = 3;

/// Full-scale magnitude of the intermediate integer speed.
pub const SPEED_FULL_SCALE: i32 = 255;

/// Display color of the green marker on the annotated frame (RGB).
pub const RGB_GREEN: [u8; 3] = [0, 255, 0];

/// Display color of the blue marker on the annotated frame (RGB).
pub const RGB_BLUE: [u8; 3] = [0, 0, 255];

/// Display color of the red marker on the annotated frame (RGB).
pub const RGB_RED: [u8; 3] = [255, 0, 0];

/// Color of the link segments on the annotated frame.
pub const RGB_WHITE: [u8; 3] = [255, 255, 255];
