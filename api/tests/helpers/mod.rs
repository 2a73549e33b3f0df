pub mod app;

pub use app::{get_json, make_test_app};
