//! The heap fixtures: greeting buffer, pair record, empty buffer.
//!
//! Each operation is a single allocate, initialise, return path. An
//! allocation failure is returned to the caller as-is; nothing is retried
//! and nothing is written through a failed allocation.

use crate::block::{HeapBlock, HeapBox};
use crate::config::FixtureConfig;
use crate::error::{AllocError, FixtureError};
use crate::record::PairRecord;

/// Allocate the default greeting buffer.
///
/// Returns a 128-byte zeroed region with `"test 123"` and its terminator
/// written at offset 0.
pub fn allocate_greeting_string() -> Result<HeapBlock, AllocError> {
    greeting(
        FixtureConfig::DEFAULT_GREETING_CAPACITY,
        FixtureConfig::DEFAULT_GREETING_TEXT.as_bytes(),
    )
}

/// Allocate a greeting buffer described by `config`.
pub fn allocate_greeting_string_with(config: &FixtureConfig) -> Result<HeapBlock, FixtureError> {
    config.validate()?;
    Ok(greeting(
        config.greeting_capacity,
        config.greeting_text.as_bytes(),
    )?)
}

/// Allocate the fixture [`PairRecord`] and store it in `slot`.
///
/// On failure `slot` is left exactly as it was.
pub fn allocate_pair_record(slot: &mut Option<HeapBox<PairRecord>>) -> Result<(), AllocError> {
    store(slot, new_pair_record())
}

/// Allocate the fixture [`PairRecord`] and return it by value.
pub fn new_pair_record() -> Result<HeapBox<PairRecord>, AllocError> {
    HeapBox::new(PairRecord::fixture())
}

/// Allocate the default empty buffer: 256 zero bytes.
pub fn allocate_empty_buffer() -> Result<HeapBlock, AllocError> {
    HeapBlock::zeroed(FixtureConfig::DEFAULT_EMPTY_CAPACITY)
}

/// Allocate an empty buffer described by `config`.
pub fn allocate_empty_buffer_with(config: &FixtureConfig) -> Result<HeapBlock, FixtureError> {
    config.validate()?;
    Ok(HeapBlock::zeroed(config.empty_capacity)?)
}

// The slot is only assigned once the allocation has succeeded.
fn store<T>(slot: &mut Option<T>, allocated: Result<T, AllocError>) -> Result<(), AllocError> {
    *slot = Some(allocated?);
    Ok(())
}

// Caller guarantees text.len() < capacity and text holds no NUL.
fn greeting(capacity: usize, text: &[u8]) -> Result<HeapBlock, AllocError> {
    let mut block = HeapBlock::zeroed(capacity)?;
    // The terminator is already there: the block is zeroed.
    block.as_bytes_mut()[..text.len()].copy_from_slice(text);
    Ok(block)
}
