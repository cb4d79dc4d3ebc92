pub mod edit_lock;
pub mod health;
