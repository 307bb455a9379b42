pub mod archive;
pub mod assure_entry;
pub mod dispatch;
pub mod projects;
pub mod report;
pub mod tasks;
