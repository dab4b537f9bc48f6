pub mod announcements;
pub mod functions;
pub mod root;
