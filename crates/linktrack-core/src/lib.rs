pub mod color;
pub mod consts;
pub mod detection;
pub mod error;
pub mod frame;
pub mod io;
pub mod pipeline;
pub mod serial;
pub mod transform;
