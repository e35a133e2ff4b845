//! Fixture configuration parameters.

use crate::error::ConfigError;

/// Sizes and contents of the heap fixtures.
///
/// The default reproduces the fixed layout the external harness expects:
/// a 128-byte greeting buffer holding `"test 123"` and a 256-byte empty
/// buffer. Validated before use; all values are immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixtureConfig {
    /// Capacity of the greeting buffer in bytes.
    ///
    /// Default: 128. Must hold the text plus its NUL terminator.
    pub greeting_capacity: usize,

    /// Text written at offset 0 of the greeting buffer.
    ///
    /// Default: `"test 123"`. Must not contain NUL bytes.
    pub greeting_text: String,

    /// Capacity of the empty buffer in bytes.
    ///
    /// Default: 256. Must be non-zero.
    pub empty_capacity: usize,
}

impl FixtureConfig {
    /// Default greeting buffer capacity.
    pub const DEFAULT_GREETING_CAPACITY: usize = 128;

    /// Default greeting text.
    pub const DEFAULT_GREETING_TEXT: &'static str = "test 123";

    /// Default empty buffer capacity.
    pub const DEFAULT_EMPTY_CAPACITY: usize = 256;

    /// Create a config holding the default fixture layout.
    pub fn new() -> Self {
        Self {
            greeting_capacity: Self::DEFAULT_GREETING_CAPACITY,
            greeting_text: Self::DEFAULT_GREETING_TEXT.to_owned(),
            empty_capacity: Self::DEFAULT_EMPTY_CAPACITY,
        }
    }

    /// Check that every fixture described by this config can be built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.greeting_capacity == 0 {
            return Err(ConfigError::ZeroCapacity {
                field: "greeting_capacity",
            });
        }
        if self.empty_capacity == 0 {
            return Err(ConfigError::ZeroCapacity {
                field: "empty_capacity",
            });
        }
        let text = self.greeting_text.as_bytes();
        if let Some(position) = text.iter().position(|&b| b == 0) {
            return Err(ConfigError::InteriorNul { position });
        }
        if text.len() >= self.greeting_capacity {
            return Err(ConfigError::TextTooLong {
                len: text.len(),
                capacity: self.greeting_capacity,
            });
        }
        Ok(())
    }
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self::new()
    }
}

// The default layout must always validate.
const _: () = assert!(
    FixtureConfig::DEFAULT_GREETING_TEXT.len() < FixtureConfig::DEFAULT_GREETING_CAPACITY
);
const _: () = assert!(FixtureConfig::DEFAULT_EMPTY_CAPACITY > 0);
