mod handle;
mod hit_testing;

pub use handle::HandleKind;
pub use hit_testing::{DEFAULT_HANDLE_RADIUS, hit_test_handle};
