pub mod item_expiry;

pub use item_expiry::start_item_expiry_task;
