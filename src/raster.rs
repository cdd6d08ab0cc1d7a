//! # 栅格图像模块
//!
//! 定义内存中的 8 位灰度图像 [`Raster`] 以及解码时使用的期望尺寸 [`Dimensions`]。

use crate::constants::MAX_VALUE;
use crate::error::{RasterError, Result};

/// 图像的宽和高，二者都必须为正数。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    /// 创建尺寸，宽或高为 0 时返回 `Format` 错误。
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RasterError::format(format!(
                "image dimensions must be positive, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// 像素总数 `width * height`，溢出 `usize` 时返回 `Format` 错误。
    pub fn sample_count(&self) -> Result<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .ok_or_else(|| {
                RasterError::format(format!(
                    "image dimensions {}x{} are too large",
                    self.width, self.height
                ))
            })
    }
}

/// 行优先存储的 8 位灰度图像。
///
/// 像素缓冲区长度始终等于 `width * height`；像素类型为 `u8`，
/// 因此不会超过最大灰度值 255。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    dimensions: Dimensions,
    samples: Vec<u8>,
}

impl Raster {
    /// 分配一幅全黑 (全 0) 图像。
    pub fn new(dimensions: Dimensions) -> Result<Self> {
        let count = dimensions.sample_count()?;
        Ok(Self {
            dimensions,
            samples: vec![0; count],
        })
    }

    /// 使用已有像素构造图像，长度与尺寸不符时返回 `LengthMismatch`。
    pub fn from_samples(dimensions: Dimensions, samples: Vec<u8>) -> Result<Self> {
        let count = dimensions.sample_count()?;
        if samples.len() != count {
            return Err(RasterError::LengthMismatch {
                left: count,
                right: samples.len(),
            });
        }
        Ok(Self {
            dimensions,
            samples,
        })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn width(&self) -> u32 {
        self.dimensions.width
    }

    pub fn height(&self) -> u32 {
        self.dimensions.height
    }

    /// 最大灰度值，本格式固定为 255。
    pub fn max_value(&self) -> u32 {
        MAX_VALUE
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// 可变像素切片。只暴露切片而不是 `Vec`，长度因此无法被改变。
    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }
}
