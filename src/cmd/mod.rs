pub mod classify;
pub mod columns;
pub mod validate;
