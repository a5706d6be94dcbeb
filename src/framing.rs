//! # 容量与帧格式模块
//!
//! 定义嵌入图像中的比特流格式：一个 32 位大端序的长度头部 (记录负载的比特数)，
//! 紧跟负载本身的比特，每个字节按最高位优先展开。
//!
//! 编码端通过 [`FramedBits`] 按块读取该比特流，解码端通过 [`Reassembler`]
//! 逐比特重组负载。比特流本身从不整体物化。

use crate::constants::{HEADER_BITS, MAX_PAYLOAD_BYTES, SAMPLE_BITS};
use crate::error::CodecError;
use log::warn;

/// 计算图像在给定深度下能容纳的比特数。
///
/// 结果为 `width * height * channels * depth`。乘积在 `u128` 中计算，
/// 超出 `u64` 范围时饱和为 `u64::MAX`。
pub fn capacity_bits(width: u32, height: u32, channels: usize, depth: u8) -> u64 {
    let bits = u128::from(width) * u128::from(height) * channels as u128 * u128::from(depth);
    u64::try_from(bits).unwrap_or(u64::MAX)
}

/// 负载加上长度头部后的总比特数。
pub fn framed_bit_len(payload_len: usize) -> u64 {
    HEADER_BITS + payload_len as u64 * u64::from(SAMPLE_BITS)
}

/// 比特流中的一个数据块。
///
/// `value` 的低 `width` 位按最高位优先的顺序保存了比特流中的连续比特。
/// 除最后一块外，`width` 总是等于隐写深度。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub value: u8,
    pub width: u8,
}

/// 带长度头部的负载比特流，按 `depth` 比特一块依次产出。
#[derive(Debug, Clone)]
pub struct FramedBits<'a> {
    header: [u8; 4],
    payload: &'a [u8],
    depth: u8,
    cursor: u64,
    total: u64,
}

impl<'a> FramedBits<'a> {
    /// 为 `payload` 构建比特流。
    ///
    /// # Errors
    ///
    /// 负载的比特数超出 `u32` 范围时返回 [`CodecError::PayloadTooLarge`]。
    pub fn new(payload: &'a [u8], depth: u8) -> Result<Self, CodecError> {
        if payload.len() > MAX_PAYLOAD_BYTES {
            return Err(CodecError::PayloadTooLarge {
                bytes: payload.len(),
            });
        }

        let data_bits = (payload.len() as u64 * u64::from(SAMPLE_BITS)) as u32;

        Ok(Self {
            header: data_bits.to_be_bytes(),
            payload,
            depth,
            cursor: 0,
            total: framed_bit_len(payload.len()),
        })
    }

    /// 比特流的总长度 (包括头部)。
    pub fn total_bits(&self) -> u64 {
        self.total
    }

    /// 尚未产出的比特数。
    pub fn remaining(&self) -> u64 {
        self.total - self.cursor
    }

    fn bit(&self, index: u64) -> u8 {
        let byte_index = (index / 8) as usize;
        let byte = match byte_index.checked_sub(self.header.len()) {
            None => self.header[byte_index],
            Some(offset) => self.payload[offset],
        };
        (byte >> (7 - index % 8)) & 1
    }
}

impl Iterator for FramedBits<'_> {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        let width = self.remaining().min(u64::from(self.depth)) as u8;
        if width == 0 {
            return None;
        }

        let value = (self.cursor..self.cursor + u64::from(width))
            .fold(0u8, |acc, index| (acc << 1) | self.bit(index));
        self.cursor += u64::from(width);

        Some(Chunk { value, width })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let chunks = self.remaining().div_ceil(u64::from(self.depth.max(1))) as usize;
        (chunks, Some(chunks))
    }
}

/// 解码端的比特重组器。
///
/// 先收集 32 位长度头部 `L`，再收集 `L` 个数据比特并每 8 位拼成一个字节。
/// 超出 `L` 的比特被忽略；`L` 不是 8 的倍数时，最后不完整的字节被丢弃。
#[derive(Debug, Default, Clone)]
pub struct Reassembler {
    header: u32,
    header_bits: u8,
    expected: Option<u32>,
    received: u64,
    bytes: Vec<u8>,
    current: u8,
    current_bits: u8,
}

impl Reassembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// 头部读取完成后记录的数据比特数。
    pub fn expected_bits(&self) -> Option<u32> {
        self.expected
    }

    /// 头部与全部数据比特都已收到。
    pub fn is_complete(&self) -> bool {
        self.expected
            .is_some_and(|expected| self.received == u64::from(expected))
    }

    /// 追加一个比特 (取最低位)。
    pub fn push_bit(&mut self, bit: u8) {
        let bit = bit & 1;
        match self.expected {
            None => {
                self.header = (self.header << 1) | u32::from(bit);
                self.header_bits += 1;
                if u64::from(self.header_bits) == HEADER_BITS {
                    self.expected = Some(self.header);
                }
            }
            Some(expected) if self.received < u64::from(expected) => {
                self.current = (self.current << 1) | bit;
                self.current_bits += 1;
                self.received += 1;
                if self.current_bits == SAMPLE_BITS {
                    self.bytes.push(self.current);
                    self.current = 0;
                    self.current_bits = 0;
                }
            }
            Some(_) => {}
        }
    }

    /// 追加一个 `width` 位宽的数据块，最高位先入。
    pub fn push_chunk(&mut self, value: u8, width: u8) {
        for shift in (0..width).rev() {
            self.push_bit(value >> shift);
        }
    }

    /// 结束重组并返回负载。
    ///
    /// 若图像中的比特少于头部声明的长度，返回已收到的部分。
    pub fn finish(self) -> Vec<u8> {
        if let Some(expected) = self.expected {
            if self.received < u64::from(expected) {
                warn!(
                    "Length header claims {} data bits but only {} were available; payload is truncated",
                    expected, self.received
                );
            }
        }
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_multiplies_all_dimensions() {
        assert_eq!(capacity_bits(2, 2, 3, 1), 12);
        assert_eq!(capacity_bits(4, 4, 3, 8), 384);
        assert_eq!(capacity_bits(0, 100, 4, 8), 0);
    }

    #[test]
    fn capacity_exceeds_u32_without_wrapping() {
        assert_eq!(
            capacity_bits(u32::MAX, u32::MAX, 1, 1),
            u64::from(u32::MAX) * u64::from(u32::MAX)
        );
        assert_eq!(capacity_bits(u32::MAX, 2, 4, 8), u64::from(u32::MAX) * 64);
    }

    #[test]
    fn capacity_saturates_beyond_u64() {
        assert_eq!(capacity_bits(u32::MAX, u32::MAX, 4, 8), u64::MAX);
        assert_eq!(capacity_bits(u32::MAX, u32::MAX, 3, 2), u64::MAX);
    }

    #[test]
    fn header_is_big_endian_bit_count() {
        let bits: Vec<Chunk> = FramedBits::new(&[0xA3], 8).unwrap().collect();
        let values: Vec<u8> = bits.iter().map(|chunk| chunk.value).collect();

        assert_eq!(values, vec![0x00, 0x00, 0x00, 0x08, 0xA3]);
        assert!(bits.iter().all(|chunk| chunk.width == 8));
    }

    #[test]
    fn payload_bits_are_msb_first() {
        let bits: Vec<u8> = FramedBits::new(&[0xA3], 1)
            .unwrap()
            .skip(32)
            .map(|chunk| chunk.value)
            .collect();

        assert_eq!(bits, vec![1, 0, 1, 0, 0, 0, 1, 1]);
    }

    #[test]
    fn final_chunk_carries_only_remaining_bits() {
        // 40 个比特，深度 3：13 个完整块加一个 1 位的尾块
        let chunks: Vec<Chunk> = FramedBits::new(&[0xFF], 3).unwrap().collect();

        assert_eq!(chunks.len(), 14);
        assert_eq!(chunks[13], Chunk { value: 1, width: 1 });
        assert_eq!(chunks[12], Chunk { value: 0b111, width: 3 });
    }

    #[test]
    fn empty_payload_is_header_only() {
        let bits = FramedBits::new(&[], 4).unwrap();

        assert_eq!(bits.total_bits(), 32);
        assert_eq!(bits.size_hint(), (8, Some(8)));
        assert!(bits.map(|chunk| chunk.value).all(|value| value == 0));
    }

    #[test]
    fn reassembler_regroups_bytes() {
        let mut reassembler = Reassembler::new();
        for chunk in FramedBits::new(b"ink", 5).unwrap() {
            reassembler.push_chunk(chunk.value, chunk.width);
        }

        assert!(reassembler.is_complete());
        assert_eq!(reassembler.expected_bits(), Some(24));
        assert_eq!(reassembler.finish(), b"ink");
    }

    #[test]
    fn reassembler_ignores_trailing_bits() {
        let mut reassembler = Reassembler::new();
        reassembler.push_chunk(0, 8);
        reassembler.push_chunk(0, 8);
        reassembler.push_chunk(0, 8);
        reassembler.push_chunk(8, 8);
        reassembler.push_chunk(0x5A, 8);
        reassembler.push_chunk(0xFF, 8);

        assert_eq!(reassembler.finish(), vec![0x5A]);
    }

    #[test]
    fn reassembler_drops_partial_final_byte() {
        // 头部声明 12 个比特：一个完整字节加 4 个被丢弃的比特
        let mut reassembler = Reassembler::new();
        for byte in 12u32.to_be_bytes() {
            reassembler.push_chunk(byte, 8);
        }
        reassembler.push_chunk(0xC3, 8);
        reassembler.push_chunk(0xF0, 8);

        assert!(reassembler.is_complete());
        assert_eq!(reassembler.finish(), vec![0xC3]);
    }

    #[test]
    fn reassembler_returns_what_was_available() {
        let mut reassembler = Reassembler::new();
        for byte in 32u32.to_be_bytes() {
            reassembler.push_chunk(byte, 8);
        }
        reassembler.push_chunk(0x11, 8);
        reassembler.push_chunk(0x22, 8);

        assert!(!reassembler.is_complete());
        assert_eq!(reassembler.finish(), vec![0x11, 0x22]);
    }
}
