#![allow(dead_code)]

mod session;

pub use session::*;
