fn main() {
    // Extension modules resolve libpython symbols at import time (needed on macOS).
    pyo3_build_config::add_extension_module_link_args();
}
