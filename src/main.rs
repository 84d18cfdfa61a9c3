//! WASM entry point: mounts the app to the document body.

// The library owns every dependency; the binary only mounts it.
#![allow(unused_crate_dependencies)]

use graph_sketch::{App, init_logging};
use leptos::prelude::*;

fn main() {
	init_logging();
	mount_to_body(App)
}
