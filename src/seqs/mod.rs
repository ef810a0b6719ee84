//! 有序序列容器

pub mod map;

pub use map::SeqMap;
