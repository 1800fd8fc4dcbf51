pub mod cache;
pub mod show;
pub mod speak;
pub mod words;
