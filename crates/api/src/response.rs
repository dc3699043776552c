//! The `{ "data": ... }` envelope every JSON endpoint answers with.
//!
//! The dashboard front end and the checker's `HttpBackend` both unwrap this
//! envelope, so handlers return [`DataResponse`] rather than building the
//! wrapper by hand. The export endpoint is the one deliberate exception:
//! it emits its versioned document bare so the payload can be saved to a
//! file unchanged.

use serde::Serialize;

/// Typed `{ "data": T }` wrapper for successful responses.
///
/// Errors never pass through here; they serialize to `{ "error", "code" }`
/// via `AppError`.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
