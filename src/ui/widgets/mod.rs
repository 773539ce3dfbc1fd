// SPDX-License-Identifier: MPL-2.0
pub mod scroll_lock;
pub mod spinner;

pub use scroll_lock::ScrollLock;
pub use spinner::Spinner;
