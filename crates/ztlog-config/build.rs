fn main() {
    // option_env!() values are baked in at compile time; rebuild when they change.
    println!("cargo:rerun-if-env-changed=ZTLOG_DEFAULT_API_BASE_URL");
}
