pub mod check;
pub mod diagnose;
pub mod info;
pub mod limits;
pub mod run;
