//! di_macros 的编译期测试

#[test]
fn trybuild_injectable() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/injectable_ok.rs");
    t.compile_fail("tests/trybuild/injectable_generic.rs");
    t.compile_fail("tests/trybuild/injectable_enum.rs");
}

#[test]
fn trybuild_invokable() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/invokable_ok.rs");
    t.compile_fail("tests/trybuild/invokable_missing_impl.rs");
}
