pub mod hit_testing;

pub use hit_testing::{HIT_BUFFER, HitOrder, hit_box, hit_test, text_box};
