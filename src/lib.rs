//! # pixel_ink 库
//!
//! 本库包含位深度隐写工具的核心逻辑：容量计算与帧格式 (`framing`)、
//! 数据块编解码与像素遍历 (`codec`)，以及命令行相关的外围模块。

// 声明库包含的所有模块。

pub mod carrier;
pub mod cli;
pub mod codec;
pub mod constants;
pub mod error;
pub mod framing;
pub mod handler;
pub mod pixels;

pub use carrier::{Carrier, CarrierError};
pub use codec::{Alignment, Codec, EncodeSummary};
pub use error::CodecError;
pub use framing::capacity_bits;
pub use pixels::PixelGrid;
