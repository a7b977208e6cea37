//! The conversion request pipeline.
//!
//! Each submodule implements exactly one stage. Keeping stages separate makes
//! each independently testable and keeps the ordering guarantee visible:
//! validation runs before anything touches disk, and staged files outlive
//! every conversion outcome only long enough to be read back.
//!
//! ## Data Flow
//!
//! ```text
//! upload ──▶ validate ──▶ stage ──▶ dispatch ──▶ response
//! (multipart) (400s)      (tempdir)  (collaborator, 500s)
//! ```
//!
//! 1. [`validate`] — reject missing/empty/mistyped/oversized uploads before
//!    any temporary file exists
//! 2. [`stage`]    — write the upload under a scoped temp directory whose
//!    removal is guaranteed on every exit path
//! 3. [`dispatch`] — drive the external Document Converter and translate its
//!    outcome; cleanup runs unconditionally on leaving this stage

pub mod dispatch;
pub mod stage;
pub mod validate;
