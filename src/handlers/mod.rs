// handlers/mod.rs - one module per route
//
// GET /        -> root::hello
// GET /select  -> select::select
// GET /load    -> load::load

pub mod load;
pub mod root;
pub mod select;

pub use load::load;
pub use root::hello;
pub use select::select;
