//! # 错误类型模块
//!
//! 编解码器与隐写变换共用的错误枚举。调用方可以按失败种类分支处理，
//! 而不是只得到一个成功/失败的布尔值。

use std::io;
use std::path::PathBuf;

/// 读取、写入或变换栅格图像时可能出现的错误。
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    /// 源文件或目标文件无法打开。
    #[error("unable to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 格式标记错误、尺寸不符或不支持的最大灰度值。
    #[error("invalid PGM data: {0}")]
    Format(String),

    /// 数据流在读满声明的像素数量之前结束。
    #[error("truncated pixel data (expected {expected} samples, found {found})")]
    TruncatedData { expected: usize, found: usize },

    /// 两个像素缓冲区长度不一致。
    #[error("pixel buffer length mismatch ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },

    /// 封面图像与秘密图像的宽高不一致。
    #[error("image dimensions do not match ({left_width}x{left_height} vs {right_width}x{right_height})")]
    DimensionMismatch {
        left_width: u32,
        left_height: u32,
        right_width: u32,
        right_height: u32,
    },

    /// 打开文件之后的读写失败。
    #[error("raster I/O error: {0}")]
    Io(#[from] io::Error),
}

impl RasterError {
    pub(crate) fn format(message: impl Into<String>) -> Self {
        RasterError::Format(message.into())
    }
}

pub type Result<T> = std::result::Result<T, RasterError>;
