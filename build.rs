fn main() {
    // Stamp the build time; the footer shows its year
    let build_time = chrono::Utc::now().to_rfc3339();
    println!("cargo:rustc-env=BUILD_TIME={}", build_time);

    println!("cargo:rerun-if-changed=build.rs");
    // assets::PublicAssets embeds this directory
    println!("cargo:rerun-if-changed=public");
}
