pub mod config_io;
pub mod event_log;
pub mod storage;
pub mod task_io;
