use crate::constants::{HEADER_BITS, MAX_DEPTH, MIN_DEPTH, SAMPLE_BITS};
use crate::error::CodecError;
use crate::framing::{FramedBits, Reassembler, capacity_bits};
use crate::pixels::PixelGrid;
use log::debug;

/// 数据块在通道采样中的对齐方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// 占用采样的低位。
    Lsb,
    /// 占用采样的高位。
    Msb,
}

impl Alignment {
    fn shift(self, depth: u8) -> u8 {
        match self {
            Self::Lsb => 0,
            Self::Msb => SAMPLE_BITS - depth,
        }
    }
}

/// 一次成功编码的统计信息。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeSummary {
    /// 写入的比特数，包括 32 位长度头部。
    pub bits_written: u64,
    /// 被改写的通道采样数。
    pub samples_touched: usize,
    /// 图像在当前深度下的总容量 (比特)。
    pub capacity: u64,
}

/// 按固定深度与对齐方式在通道采样中读写数据块的编解码器。
///
/// 构造后不可变。深度必须在 `[1, 8]` 内。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codec {
    alignment: Alignment,
    depth: u8,
    mask: u8,
    shift: u8,
}

impl Codec {
    /// # Errors
    ///
    /// 深度不在 `[1, 8]` 内时返回 [`CodecError::InvalidDepth`]。
    pub fn new(alignment: Alignment, depth: u8) -> Result<Self, CodecError> {
        if !(MIN_DEPTH..=MAX_DEPTH).contains(&depth) {
            return Err(CodecError::InvalidDepth { depth });
        }

        let shift = alignment.shift(depth);
        let mask = (u8::MAX >> (SAMPLE_BITS - depth)) << shift;

        Ok(Self {
            alignment,
            depth,
            mask,
            shift,
        })
    }

    pub fn lsb(depth: u8) -> Result<Self, CodecError> {
        Self::new(Alignment::Lsb, depth)
    }

    pub fn msb(depth: u8) -> Result<Self, CodecError> {
        Self::new(Alignment::Msb, depth)
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// 数据块在采样中占用的比特位。
    pub fn mask(&self) -> u8 {
        self.mask
    }

    pub fn capacity<G: PixelGrid + ?Sized>(&self, image: &G) -> u64 {
        capacity_bits(image.width(), image.height(), image.channels(), self.depth)
    }

    /// 将 `chunk` 写入 `sample` 的数据块位置，其余比特保持不变。
    #[inline]
    pub fn write_chunk(&self, sample: u8, chunk: u8) -> u8 {
        (sample & !self.mask) | ((chunk << self.shift) & self.mask)
    }

    /// 读取 `sample` 中的数据块。
    #[inline]
    pub fn read_chunk(&self, sample: u8) -> u8 {
        (sample & self.mask) >> self.shift
    }

    /// 只写入数据块最高的 `width` 位，剩余的低位保留原采样的比特。
    ///
    /// 尾块的比特放在数据块的前导位置，解码按最高位优先读出时顺序不变。
    fn write_leading(&self, sample: u8, value: u8, width: u8) -> u8 {
        let pad = self.depth - width;
        let field = (u8::MAX >> (SAMPLE_BITS - width)) << pad << self.shift;
        (sample & !field) | ((value << pad << self.shift) & field)
    }

    /// 将 `payload` 嵌入 `image`，原地修改像素。
    ///
    /// 按行优先遍历像素，像素内按固定通道顺序，每个通道写入一个数据块，
    /// 直到带头部的比特流耗尽。之后的采样保持原样。
    ///
    /// # Errors
    ///
    /// * 负载超出头部可表示的范围：[`CodecError::PayloadTooLarge`]。
    /// * 负载加头部超出图像容量：[`CodecError::DataBounds`]。
    ///
    /// 两种错误都在修改任何像素之前返回。
    pub fn encode<G: PixelGrid + ?Sized>(
        &self,
        image: &mut G,
        payload: &[u8],
    ) -> Result<EncodeSummary, CodecError> {
        let capacity = self.capacity(image);
        let mut bits = FramedBits::new(payload, self.depth)?;
        let requested = bits.total_bits();

        if requested > capacity {
            return Err(CodecError::DataBounds {
                width: image.width(),
                height: image.height(),
                channels: image.channels(),
                depth: self.depth,
                requested,
                capacity,
            });
        }

        debug!(
            "{:?} encode: {} of {} bits at depth {}",
            self.alignment, requested, capacity, self.depth
        );

        let mut samples_touched = 0;
        for (sample, chunk) in image.samples_mut().iter_mut().zip(&mut bits) {
            *sample = if chunk.width == self.depth {
                self.write_chunk(*sample, chunk.value)
            } else {
                self.write_leading(*sample, chunk.value, chunk.width)
            };
            samples_touched += 1;
        }

        Ok(EncodeSummary {
            bits_written: requested,
            samples_touched,
            capacity,
        })
    }

    /// 从 `image` 中恢复负载。
    ///
    /// 与编码相同的顺序读取数据块，收到头部声明的全部比特后提前结束。
    ///
    /// # Errors
    ///
    /// 图像容量不足 32 比特时返回 [`CodecError::MissingHeader`]。
    pub fn decode<G: PixelGrid + ?Sized>(&self, image: &G) -> Result<Vec<u8>, CodecError> {
        let available = self.capacity(image);
        if available < HEADER_BITS {
            return Err(CodecError::MissingHeader { available });
        }

        let mut reassembler = Reassembler::new();
        for &sample in image.samples() {
            reassembler.push_chunk(self.read_chunk(sample), self.depth);
            if reassembler.is_complete() {
                break;
            }
        }

        debug!(
            "{:?} decode: header announced {:?} data bits, image holds {} bits at depth {}",
            self.alignment,
            reassembler.expected_bits(),
            available,
            self.depth
        );

        Ok(reassembler.finish())
    }
}
