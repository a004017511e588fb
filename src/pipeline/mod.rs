//! Pipeline stages for a single document submission.
//!
//! Each submodule implements exactly one step, so each can be tested without
//! a network or a UI.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ encode ──▶ (transport) ──▶ response ──▶ render
//! (pick/drop) (base64)   (POST JSON)     (fields)     (escaped HTML)
//! ```
//!
//! 1. [`input`]    — the one active file, chosen by browse or drop
//! 2. [`encode`]   — single-shot async read, base64, JSON payload
//! 3. [`response`] — status + body → fields or a submission error
//! 4. [`render`]   — file info and result markup, with HTML escaping

pub mod encode;
pub mod input;
pub mod render;
pub mod response;
