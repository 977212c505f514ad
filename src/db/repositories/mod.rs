pub mod gym;
