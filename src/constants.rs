/// 长度头部占用的比特数。
/// 头部是一个大端序 `u32`，记录的是负载的比特数 (而非字节数)。
pub const HEADER_BITS: u64 = 32;

/// 单个通道采样的比特宽度。
/// 本工具只处理每通道 8 位的整数像素格式。
pub const SAMPLE_BITS: u8 = 8;

/// 允许的最小隐写深度 (每个通道使用的比特数)。
pub const MIN_DEPTH: u8 = 1;

/// 允许的最大隐写深度，等于整个采样宽度。
pub const MAX_DEPTH: u8 = SAMPLE_BITS;

/// 头部能表示的最大负载字节数。
/// 头部记录的是比特数，因此上限为 `u32::MAX / 8` 字节。
pub const MAX_PAYLOAD_BYTES: usize = (u32::MAX / 8) as usize;

/// `encode` 未指定输出路径时，默认输出文件名的前缀。
pub const ENCODED_PREFIX: &str = "doctored_";

/// `decode` 未指定输出路径时，默认输出文件名的前缀。
pub const RECOVERED_PREFIX: &str = "recovered_";

/// `decode` 默认输出文件的扩展名。
pub const RECOVERED_EXTENSION: &str = "bin";
