//! Wire types shared between the POS frontend and the external backend API.

pub mod domain;
pub mod system;
