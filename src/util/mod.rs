//! Cross-cutting helpers: route guards, theme handling, storage glue, and
//! form validation.

pub mod guard;
pub mod storage;
pub mod theme;
pub mod validate;
