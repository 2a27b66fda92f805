/// Side length of the square bit grid every fingerprint encodes (8x8)
pub const HASH_SIZE: usize = 8;
/// Size of the generated hash in bits
pub const HASH_BITS: u32 = (HASH_SIZE * HASH_SIZE) as u32;
/// Width of the grid dHash reduces to, one column wider than the bit grid
pub const DHASH_WIDTH: usize = HASH_SIZE + 1;

/// Similarity at or above which two images are reported as duplicates
pub const DEFAULT_DUPLICATE_THRESHOLD: f64 = 0.85;

/// Base name of the optional config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "image-hash";
/// Prefix of environment variables overriding the config file
pub const CONFIG_ENV_PREFIX: &str = "IMAGE_HASH";
