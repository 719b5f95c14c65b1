// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
pub mod Utils;
pub mod error;
pub mod plotting;
pub mod symbolic;

pub use error::{ErrorKind, PlotError};
pub use plotting::session::PlotSession;
