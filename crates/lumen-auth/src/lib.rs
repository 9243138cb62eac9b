//! # lumen-auth
//!
//! Authentication primitives (JWT, Argon2 password hashing) and the
//! identity & approval gate that decides what each request may see.

pub mod gate;
pub mod jwt;
pub mod password;
