// SPDX-FileCopyrightText: 2026 Pickup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP API for the Pickup order service.
//!
//! Public routes: `/health`, `/auth/login`. Everything else sits behind
//! bearer-token middleware and is scoped to the authenticated user.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod password;
pub mod server;

pub use auth::JwtAuth;
pub use error::ApiError;
pub use password::{hash_password, verify_password};
pub use server::{build_router, start_server, AppState};
