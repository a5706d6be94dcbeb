//! # 错误类型模块
//!
//! 隐写核心 (`codec` 与 `framing`) 在修改任何像素之前完成全部校验，
//! 所有失败都通过 [`CodecError`] 报告给调用方。

use thiserror::Error;

/// 编解码过程中可能出现的错误。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// 隐写深度不在 `[1, 8]` 范围内。
    #[error("Codec config argument error: invalid depth value {depth}. Depth must be between 1 and 8 bits.")]
    InvalidDepth { depth: u8 },

    /// 负载加上长度头部后超出了图像的容量。
    #[error(
        "Unable to encode {requested} bits of data in an image with dimensions {width}x{height}, \
         {channels} channels, and depth {depth}. Maximum encodable data size is {capacity} bits."
    )]
    DataBounds {
        width: u32,
        height: u32,
        channels: usize,
        depth: u8,
        requested: u64,
        capacity: u64,
    },

    /// 负载的比特数无法用 32 位长度头部表示。
    #[error("Payload of {bytes} bytes is too large: its bit length does not fit in the 32-bit header.")]
    PayloadTooLarge { bytes: usize },

    /// 图像容量不足以容纳 32 位长度头部。
    #[error("The image holds only {available} bits, not enough for the 32-bit length header.")]
    MissingHeader { available: u64 },
}
