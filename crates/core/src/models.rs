pub mod reservation;
pub mod timeblock;
