/// 文本格式 PGM (ASCII 灰度图) 的格式标记。
pub const TEXT_MAGIC: &str = "P2";

/// 二进制格式 PGM (紧凑字节灰度图) 的格式标记。
pub const BINARY_MAGIC: &str = "P5";

/// 写入文件头部的署名注释行 (不含换行符)。
pub const ATTRIBUTION_COMMENT: &str = "# Created by pgm_hide";

/// 本工具唯一支持的最大灰度值。
/// 每个像素占 8 位，因此最大值固定为 255。
pub const MAX_VALUE: u32 = 255;

/// 保留封面像素高 4 位的掩码。
pub const HIGH_NIBBLE_MASK: u8 = 0xF0;

/// 取出像素低 4 位的掩码。
pub const LOW_NIBBLE_MASK: u8 = 0x0F;

/// 每个封面像素承载的秘密位数。
/// 秘密像素的高 4 位被写入封面像素的低 4 位。
pub const NIBBLE_BITS: u32 = 4;

/// 未指定尺寸时使用的默认图像宽度。
pub const DEFAULT_WIDTH: u32 = 512;

/// 未指定尺寸时使用的默认图像高度。
pub const DEFAULT_HEIGHT: u32 = 512;

/// 默认隐写图像文件名前缀。
pub const STEGO_PREFIX: &str = "stego_";

/// 默认提取结果文件名前缀。
pub const EXTRACTED_PREFIX: &str = "extracted_";

/// 输出文件的扩展名。
pub const PGM_EXTENSION: &str = "pgm";
