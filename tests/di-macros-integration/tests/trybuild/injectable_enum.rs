use di_macros::Injectable;

#[derive(Injectable)]
enum Mode {
    Fast,
}

fn main() {
    let _ = Mode::Fast;
}
