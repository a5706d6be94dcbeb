//! # 载体图像模块
//!
//! 将 `image` 库读取到的 [`DynamicImage`] 收窄为隐写核心能处理的四种 8 位格式，
//! 并负责载体图像文件的读取与保存。

use crate::pixels::PixelGrid;
use image::{ColorType, DynamicImage, GrayAlphaImage, GrayImage, RgbImage, RgbaImage};
use std::path::Path;
use thiserror::Error;

/// 载体图像读写过程中可能出现的错误。
#[derive(Error, Debug)]
pub enum CarrierError {
    #[error(
        "Unsupported pixel format {0:?}: only 8-bit Luma, LumaA, RGB and RGBA images can carry data."
    )]
    UnsupportedColorType(ColorType),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// 可承载隐写数据的 8 位图像。
#[derive(Debug, Clone, PartialEq)]
pub enum Carrier {
    Luma(GrayImage),
    LumaA(GrayAlphaImage),
    Rgb(RgbImage),
    Rgba(RgbaImage),
}

impl Carrier {
    /// 从文件读取载体图像，格式由文件内容推断。
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CarrierError> {
        Self::try_from(image::open(path)?)
    }

    /// 保存载体图像，格式由扩展名决定。
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CarrierError> {
        let path = path.as_ref();
        match self {
            Self::Luma(buf) => buf.save(path)?,
            Self::LumaA(buf) => buf.save(path)?,
            Self::Rgb(buf) => buf.save(path)?,
            Self::Rgba(buf) => buf.save(path)?,
        }
        Ok(())
    }

    pub fn color_type(&self) -> ColorType {
        match self {
            Self::Luma(_) => ColorType::L8,
            Self::LumaA(_) => ColorType::La8,
            Self::Rgb(_) => ColorType::Rgb8,
            Self::Rgba(_) => ColorType::Rgba8,
        }
    }

    /// 每个像素内通道的固定顺序，也就是隐写的通道遍历顺序。
    pub fn channel_names(&self) -> &'static [&'static str] {
        match self {
            Self::Luma(_) => &["L"],
            Self::LumaA(_) => &["L", "A"],
            Self::Rgb(_) => &["R", "G", "B"],
            Self::Rgba(_) => &["R", "G", "B", "A"],
        }
    }

    fn grid(&self) -> &dyn PixelGrid {
        match self {
            Self::Luma(buf) => buf,
            Self::LumaA(buf) => buf,
            Self::Rgb(buf) => buf,
            Self::Rgba(buf) => buf,
        }
    }

    fn grid_mut(&mut self) -> &mut dyn PixelGrid {
        match self {
            Self::Luma(buf) => buf,
            Self::LumaA(buf) => buf,
            Self::Rgb(buf) => buf,
            Self::Rgba(buf) => buf,
        }
    }
}

impl TryFrom<DynamicImage> for Carrier {
    type Error = CarrierError;

    fn try_from(image: DynamicImage) -> Result<Self, Self::Error> {
        match image {
            DynamicImage::ImageLuma8(buf) => Ok(Self::Luma(buf)),
            DynamicImage::ImageLumaA8(buf) => Ok(Self::LumaA(buf)),
            DynamicImage::ImageRgb8(buf) => Ok(Self::Rgb(buf)),
            DynamicImage::ImageRgba8(buf) => Ok(Self::Rgba(buf)),
            other => Err(CarrierError::UnsupportedColorType(other.color())),
        }
    }
}

impl From<Carrier> for DynamicImage {
    fn from(carrier: Carrier) -> Self {
        match carrier {
            Carrier::Luma(buf) => DynamicImage::ImageLuma8(buf),
            Carrier::LumaA(buf) => DynamicImage::ImageLumaA8(buf),
            Carrier::Rgb(buf) => DynamicImage::ImageRgb8(buf),
            Carrier::Rgba(buf) => DynamicImage::ImageRgba8(buf),
        }
    }
}

impl PixelGrid for Carrier {
    fn width(&self) -> u32 {
        self.grid().width()
    }

    fn height(&self) -> u32 {
        self.grid().height()
    }

    fn channels(&self) -> usize {
        self.grid().channels()
    }

    fn samples(&self) -> &[u8] {
        self.grid().samples()
    }

    fn samples_mut(&mut self) -> &mut [u8] {
        self.grid_mut().samples_mut()
    }
}
