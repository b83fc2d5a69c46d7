//! Pipeline stages for a parse request.
//!
//! Each submodule implements exactly one step. Keeping stages separate makes
//! each independently testable and lets the client swap the I/O-bound ones
//! (file loading, transport) for test doubles.
//!
//! ## Data Flow
//!
//! ```text
//!              ┌─▶ url ─────────────────┐
//! input ───────┤                        ├─▶ option ──▶ form ──▶ (transport) ──▶ decode
//!              └─▶ path ──▶ load ───────┘
//!  (crawler? URL : files)
//! ```
//!
//! 1. [`url`]    check the crawl start URL (crawler model only)
//! 2. [`path`]   normalise the input to a list and check every path exists
//! 3. [`load`]   lock and read every file concurrently; all-or-nothing
//! 4. [`option`] validate the merged options in a fixed order
//! 5. [`form`]   encode the request as multipart/form-data
//! 6. [`decode`] map the response status and body to text or typed results
//!
//! The input validators share the [`validation::ValidationResult`] wrapper.

pub mod decode;
pub mod form;
pub mod load;
pub mod option;
pub mod path;
pub mod url;
pub mod validation;
