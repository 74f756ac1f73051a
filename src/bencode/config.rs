use crate::constants::DEFAULT_MAX_DEPTH;

/// How strictly the decoder enforces canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CanonicalMode {
    /// Reject leading zeros, `-0` and unsorted dictionary keys.
    ///
    /// Use this whenever the decoded bytes will be hashed, since only
    /// canonical input re-encodes to the same bytes.
    #[default]
    Strict,
    /// Accept non-canonical documents and normalize them.
    ///
    /// Re-encoding a leniently decoded value may produce different bytes
    /// than the input, but the result is always canonical.
    Lenient,
}

/// What to do when a dictionary repeats a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateKeyPolicy {
    /// Fail with [`BencodeError::DuplicateKey`](super::BencodeError::DuplicateKey).
    #[default]
    Reject,
    /// Keep the value of the first occurrence.
    KeepFirst,
    /// Keep the value of the last occurrence.
    KeepLast,
}

/// Decoder policy.
///
/// The default configuration is strict: canonical input only, duplicate keys
/// rejected, no trailing data, nesting limited to
/// [`DEFAULT_MAX_DEPTH`](crate::constants::DEFAULT_MAX_DEPTH).
///
/// # Examples
///
/// ```
/// use rbit_bencode::bencode::{decode, CanonicalMode, DecodeConfig, DuplicateKeyPolicy};
///
/// let config = DecodeConfig::lenient()
///     .with_duplicate_key_policy(DuplicateKeyPolicy::KeepFirst)
///     .with_max_depth(8);
/// assert_eq!(config.canonical_mode, CanonicalMode::Lenient);
///
/// let value = decode(b"d1:ai1e1:ai2ee", &config).unwrap();
/// assert_eq!(value.get(b"a").and_then(|v| v.as_integer()), Some(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeConfig {
    /// Maximum number of nested containers. Scalars are not counted.
    pub max_depth: usize,
    pub canonical_mode: CanonicalMode,
    pub duplicate_key_policy: DuplicateKeyPolicy,
    /// Ignore bytes left over after the top-level value.
    pub allow_trailing_data: bool,
}

impl DecodeConfig {
    /// Hash-safe configuration. Same as [`DecodeConfig::default`].
    pub fn strict() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            canonical_mode: CanonicalMode::Strict,
            duplicate_key_policy: DuplicateKeyPolicy::Reject,
            allow_trailing_data: false,
        }
    }

    /// Tolerant configuration for real-world documents.
    ///
    /// Duplicate keys resolve to the last occurrence.
    pub fn lenient() -> Self {
        Self {
            canonical_mode: CanonicalMode::Lenient,
            duplicate_key_policy: DuplicateKeyPolicy::KeepLast,
            ..Self::strict()
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_canonical_mode(mut self, mode: CanonicalMode) -> Self {
        self.canonical_mode = mode;
        self
    }

    pub fn with_duplicate_key_policy(mut self, policy: DuplicateKeyPolicy) -> Self {
        self.duplicate_key_policy = policy;
        self
    }

    pub fn with_trailing_data(mut self, allow: bool) -> Self {
        self.allow_trailing_data = allow;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.canonical_mode == CanonicalMode::Strict
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self::strict()
    }
}
