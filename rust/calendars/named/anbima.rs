//! Brazilian national holidays as published by ANBIMA, used to count business days for
//! fixed income instruments.

pub const WEEKMASK: &[u8] = &[5, 6]; // Saturday and Sunday weekend

pub const HOLIDAYS: &str = include_str!("anbima.cal");
