pub mod list;
pub mod savings;
pub mod upload;
