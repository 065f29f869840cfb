//! Example: Raise and drop the fingerprint mask once.
//!
//! Run with: `cargo run --example mask_cycle [ROOT]`
//!
//! `ROOT` re-roots the panel endpoints, e.g. a scratch copy of sysfs.

use udfps_mask::{MaskConfig, MaskController, OpticalMask, PanelEndpoints, SysfsFiles};

fn main() {
    // Initialize logging (optional)
    env_logger::init();

    let endpoints = match std::env::args().nth(1) {
        Some(root) => PanelEndpoints::with_root_path(root),
        None => PanelEndpoints::new(),
    };
    let mask = OpticalMask::with_parts(SysfsFiles::new(), endpoints, MaskConfig::new());

    println!("Display brightness: {}", mask.read_display_brightness());

    mask.enable_mask();
    println!("Mask brightness applied: {}", mask.actual_mask_brightness());

    mask.disable_mask();
    println!("Mask disabled");
}
