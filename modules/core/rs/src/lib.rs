pub mod anchor;
pub mod loc;
pub mod num;
pub mod seq;
