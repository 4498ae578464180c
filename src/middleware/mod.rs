//! Middleware and extractors for request authentication and authorization.
//!
//! # Modules
//!
//! - [`auth`]: bearer-token authentication and the [`AuthUser`](auth::AuthUser) extractor
//! - [`role`]: professor-only gating
//!
//! # Authentication Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. `authenticate` validates the token, loads the user and stores an
//!    `AuthUser` in the request extensions
//! 3. `require_professor` (where layered) reads that `AuthUser` and refuses
//!    students with 403
//! 4. The handler extracts `AuthUser` and runs

pub mod auth;
pub mod role;
