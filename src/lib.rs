//! bucket-table: a fixed-capacity chained hash table from string keys to
//! `u32` values, built to be filled by many writer threads at once.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: correct bucket-level locking. Inserts of the same key
//!   linearize; inserts into different buckets run in parallel.
//! - Layers:
//!   - `hash`: the pure `&str -> u32` mapping (`KeyHash`), Bernstein's
//!     djb2 by default. The bucket index is `hash(key) % capacity`.
//!   - `chain`: the entries of one bucket, newest first. Plain owned
//!     data with no synchronization of its own.
//!   - `Table`: a boxed slice of `RwLock<Chain>`, one lock per bucket,
//!     created with the table and dropped with it.
//!
//! Constraints
//! - Capacity is fixed for the table's lifetime; there is no resizing.
//! - No deletion and no iteration. Entries leave only when the table is
//!   destroyed.
//! - Keys are immutable once stored; values are updated in place.
//!
//! Locking protocol
//! - Bucket resolution runs the hash outside any lock.
//! - `add_entry` takes the bucket lock once and holds it across the scan
//!   and the resulting update or insert. Releasing it between the two
//!   would let two writers both see a key as absent and both link it.
//! - A writer only ever waits on the lock of its own bucket.
//!
//! Read consistency
//! - `contains`/`get`/`get_value` lock the bucket only for the scan.
//!   Results are weakly consistent: an answer may be stale as soon as it
//!   is returned if a writer for the same key is in flight.
//!
//! Failure semantics
//! - `get_value` on an absent key panics; `try_get_value` reports
//!   `Error::KeyNotFound` instead.
//! - Allocation failure aborts the process.
//!
//! Teardown
//! - `Table::destroy` consumes the table, so no worker can still be
//!   using it. Dropping the table has the same effect.

mod chain;
pub mod config;
mod error;
pub mod hash;
mod table;
mod table_proptest;

// Public surface
pub use config::{Config, DEFAULT_CAPACITY};
pub use error::{Error, Result};
pub use hash::{Bernstein, KeyHash};
pub use table::Table;
