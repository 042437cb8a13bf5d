pub mod env;
pub mod info;
pub mod run;
