use std::env;
use std::path::PathBuf;

// The deploy tests need the fund contract compiled to wasm. They are only
// built when `lp_fund.wasm` is found, either at `FUND_WASM` or under the
// workspace target directory.
fn main() {
    println!("cargo:rustc-check-cfg=cfg(fund_wasm)");
    println!("cargo:rerun-if-env-changed=FUND_WASM");

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_default();
    let target_dir = PathBuf::from(manifest_dir).join("..").join("target");
    let mut candidates: Vec<PathBuf> = env::var_os("FUND_WASM")
        .map(PathBuf::from)
        .into_iter()
        .collect();
    for target in ["wasm32v1-none", "wasm32-unknown-unknown"] {
        candidates.push(target_dir.join(target).join("release").join("lp_fund.wasm"));
    }

    for candidate in &candidates {
        println!("cargo:rerun-if-changed={}", candidate.display());
    }
    if let Some(wasm) = candidates.iter().find(|path| path.is_file()) {
        println!("cargo:rustc-cfg=fund_wasm");
        println!("cargo:rustc-env=FUND_WASM={}", wasm.display());
    }
}
