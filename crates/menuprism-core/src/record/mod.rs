//! Menu record model and the fixed-width binary codec.
//!
//! A menu file is one header record followed by zero or more item records,
//! each exactly [`RECORD_LEN`] bytes:
//! - Header: entry policy for the whole menu (levels, flag masks, password,
//!   help/logging policy, entry script).
//! - Items: one command each, addressed by its key token.
//!
//! Decoding is panic-free: short or misaligned input, unknown enum bytes, and
//! unsupported versions are reported as `MenuError` instead of panicking.

pub mod codec;
pub mod model;

pub use codec::{decode_header, decode_item, decode_menu_file, encode_menu_file, RECORD_LEN};
pub use model::{
    HelpPolicy, LogMode, MenuFile, MenuHeader, MenuItem, NumericMode, Visibility,
    SYSTEM_PASSWORD_SENTINEL,
};
