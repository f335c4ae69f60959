pub mod linkedlist;
pub mod song;
