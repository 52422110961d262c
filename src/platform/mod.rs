//! Native backends
//!
//! Only Win32 provides the global hotkey primitive this crate relies on.
//! Elsewhere [`Win32Backend`] exists so callers compile, but attaching a
//! controller to it stops the process.

#[cfg(windows)]
mod win32;

#[cfg(windows)]
pub use win32::{pump_pending, NativeWindow, Win32Backend};

#[cfg(not(windows))]
mod unsupported;

#[cfg(not(windows))]
pub use unsupported::Win32Backend;
