//! msgbridge-fixtures - Generated sample bindings under test
//!
//! `build.rs` runs the generator over `srv/*.srv`. The generated Rust is
//! compiled here, and [`native_double`] defines every native symbol it
//! declares, so the full marshalling path runs without a C toolchain.

pub mod ledger;
pub mod native_double;

/// `fixtures/srv/Add`
pub mod add {
    include!(concat!(env!("OUT_DIR"), "/rust/add.rs"));
}

/// `fixtures/srv/Greet`
pub mod greet {
    include!(concat!(env!("OUT_DIR"), "/rust/greet.rs"));
}

/// `fixtures/srv/Primitives`
pub mod primitives {
    include!(concat!(env!("OUT_DIR"), "/rust/primitives.rs"));
}

/// `fixtures/srv/Label`
pub mod label {
    include!(concat!(env!("OUT_DIR"), "/rust/label.rs"));
}
