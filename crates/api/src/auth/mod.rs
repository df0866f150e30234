//! Session token machinery (JWT access tokens, hashed refresh tokens).

pub mod jwt;
