//! Trading holidays of the B3 exchange in Sao Paulo: the national holidays plus the city
//! holidays and the exchange closures of the 24th and 31st of December.

pub const WEEKMASK: &[u8] = &[5, 6]; // Saturday and Sunday weekend

pub const HOLIDAYS: &str = include_str!("b3.cal");
