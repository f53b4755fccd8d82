use di_macros::Injectable;

#[derive(Injectable)]
#[injectable(invokable)]
struct NotInvokable;

fn main() {
    let _ = NotInvokable;
}
