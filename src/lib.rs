//! # pgm_hide 库
//!
//! 本库包含 PGM 灰度图半字节隐写工具的核心逻辑：
//! `codec` 负责 P2/P5 文件的读写，`steganography` 负责嵌入与提取。

// 声明库包含的所有模块。

pub mod cli;
pub mod codec;
pub mod constants;
pub mod error;
pub mod handler;
pub mod logging;
pub mod raster;
pub mod steganography;

pub use error::{RasterError, Result};
pub use raster::{Dimensions, Raster};
