pub mod binding;
mod guard;
pub mod history;
