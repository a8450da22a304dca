pub mod analysis;
pub mod capture;
pub mod monitor;
pub mod notify;
pub mod road;
pub mod room;
