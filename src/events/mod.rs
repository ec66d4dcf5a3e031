//! Event types flowing from the pointer adapter to node callbacks.
//!
//! - [`pointer`] – raw [`PointerInput`](pointer::PointerInput) from the host and
//!   the [`PointerEvent`](pointer::PointerEvent)s dispatched to handlers

pub mod pointer;
