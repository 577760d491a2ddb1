//! # Binding Module
//!
//! Calling-convention declaration and method binding.
//!
//! A [`Service`] publishes a [`MethodTable`] naming each method it
//! exposes together with a [`MethodSpec`] describing how to call it.
//! [`bind`] resolves one (service, method name) pair into an immutable
//! [`BoundHandler`], validating the declared [`Signature`] as it goes.
//!
//! Conventions are declared, not discovered: the typed constructors on
//! [`MethodSpec`] record the request and response types at registration
//! time, so an unsupported shape is rejected before any traffic is
//! served. Binding failures are fatal configuration errors — the host
//! checks the result at startup and aborts on `Err`.

mod core;

pub use core::{
    bind, BoundHandler, CallShape, Empty, Invoker, MethodSpec, MethodTable, Service, Signature,
};
