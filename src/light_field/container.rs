//! Binary image container module
//!
//! The `IMGB` container: a 16-byte header carrying geometry and sample encoding,
//! followed by a row-major, channel-interleaved payload.

mod codec;
pub mod types;


pub use codec::{make, parse, payload_view, HEADER_LEN, MAGIC};
pub use types::{ImageBlob, SampleEncoding};
