//! Index host tests
//!
//! Tests for `DeclarationIndex`:
//! - Full builds (idempotence, guard behaviour, queries)
//! - Incremental reindexing (dependents, deletions, deltas)

pub mod tests_reindex;
