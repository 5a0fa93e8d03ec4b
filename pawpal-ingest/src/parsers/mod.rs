pub mod duration;
pub mod task_csv;
