//! Mock implementations for testing.

pub mod mock_shard_source;

pub use mock_shard_source::MockShardSource;
