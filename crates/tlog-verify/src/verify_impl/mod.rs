//! Individual verification steps behind the API in `verify`

pub mod hashedrekord;
pub mod tlog;
