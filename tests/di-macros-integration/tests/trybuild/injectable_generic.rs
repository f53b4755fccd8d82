use di_macros::Injectable;
use std::sync::Arc;

#[derive(Injectable)]
struct Wrapper<T> {
    inner: Arc<T>,
}

fn main() {
    let _ = Wrapper { inner: Arc::new(0_u8) };
}
