pub mod protocol;
pub mod req;
pub mod res;
