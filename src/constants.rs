//! Grammar constants and default decoder limits.
//!
//! Bencode tags are single ASCII bytes. The limits below are the defaults used
//! by [`DecodeConfig`](crate::bencode::DecodeConfig) and can be overridden per
//! decode call.

// ============================================================================
// Grammar tags
// ============================================================================

/// Opens an integer (`i42e`).
pub const TAG_INTEGER: u8 = b'i';

/// Opens a list (`l...e`).
pub const TAG_LIST: u8 = b'l';

/// Opens a dictionary (`d...e`).
pub const TAG_DICT: u8 = b'd';

/// Closes integers, lists and dictionaries.
pub const TAG_END: u8 = b'e';

/// Separates a byte string length from its payload (`4:spam`).
pub const STRING_SEPARATOR: u8 = b':';

/// Sign prefix for negative integers.
pub const MINUS: u8 = b'-';

// ============================================================================
// Decoder limits
// ============================================================================

/// Default maximum container nesting depth.
///
/// Real torrent files rarely nest deeper than 4 or 5 levels (`info` ->
/// `file tree` -> path components in v2 torrents), so 64 leaves ample room
/// while keeping the recursion well inside any thread's stack.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Length of a v1 (SHA-1) info hash in bytes.
pub const INFO_HASH_V1_LEN: usize = 20;

/// Length of a v2 (SHA-256) info hash in bytes.
pub const INFO_HASH_V2_LEN: usize = 32;

/// Top-level key of the dictionary hashed to produce an info hash.
pub const INFO_KEY: &[u8] = b"info";
