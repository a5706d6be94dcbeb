//! # 像素网格抽象
//!
//! 隐写核心只需要图像的宽、高、每像素通道数，以及按行优先顺序排列的扁平采样序列。
//! 同一像素内的通道按固定顺序连续存放，这正是编码与解码的遍历顺序。

use image::{ImageBuffer, Pixel};

/// 可被隐写核心读写的 8 位像素网格。
///
/// 实现者必须保证 `samples().len() == width * height * channels`。
pub trait PixelGrid {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// 每个像素的通道数 (例如 RGB 为 3，RGBA 为 4)。
    fn channels(&self) -> usize;

    /// 行优先、通道连续的全部采样。
    fn samples(&self) -> &[u8];

    fn samples_mut(&mut self) -> &mut [u8];

    fn pixel_count(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }
}

impl<P> PixelGrid for ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8>,
{
    fn width(&self) -> u32 {
        ImageBuffer::width(self)
    }

    fn height(&self) -> u32 {
        ImageBuffer::height(self)
    }

    fn channels(&self) -> usize {
        usize::from(P::CHANNEL_COUNT)
    }

    fn samples(&self) -> &[u8] {
        self.as_raw()
    }

    fn samples_mut(&mut self) -> &mut [u8] {
        &mut **self
    }
}
