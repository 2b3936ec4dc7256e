pub mod fanout;
pub mod quantity;
