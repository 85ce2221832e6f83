// File: crates/trend-render-skia/build.rs
// Summary: Link the Windows system libraries Skia/ICU expect when targeting Windows.

fn main() {
    // build scripts run on the host; ask cargo for the target instead of cfg!()
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("windows") {
        // RegOpenKeyExW, RegQueryInfoKeyW, ...
        println!("cargo:rustc-link-lib=advapi32");
    }
}
