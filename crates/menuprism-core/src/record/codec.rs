//! Fixed-width record codec (panic-free).
//!
//! Parsing rules:
//! - Never index raw buffers; always go through `Buf` with `remaining()` checks.
//! - Never `unwrap()` / `expect()` / `panic!()` in production paths.
//!
//! Integers are little-endian. Strings are NUL-padded to their field width and
//! must leave room for at least one terminating NUL.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{MenuError, Result};
use crate::record::model::{
    HelpPolicy, LogMode, MenuFile, MenuHeader, MenuItem, NumericMode, Visibility,
};

/// Size of every record (header and item) in bytes.
pub const RECORD_LEN: usize = 200;

/// Only supported header version.
pub const RECORD_VERSION: u16 = 1;

const KEY_LEN: usize = 15;
const LABEL_LEN: usize = 40;
const EXECUTE_LEN: usize = 100;
const PASSWORD_LEN: usize = 20;
const SCRIPT_LEN: usize = 100;

const HEADER_USED: usize = 2 + 6 + 10 + PASSWORD_LEN + SCRIPT_LEN;
const ITEM_USED: usize = KEY_LEN + LABEL_LEN + EXECUTE_LEN + 14 + 2 + PASSWORD_LEN + 2;

const FLAG_DELETED: u8 = 0x01;

/// Decode a whole menu file: header, then items until the buffer is empty.
pub fn decode_menu_file(mut buf: Bytes) -> Result<MenuFile> {
    let header = decode_header(&mut buf)?;

    if buf.remaining() % RECORD_LEN != 0 {
        return Err(MenuError::Malformed(format!(
            "{} trailing bytes are not a multiple of the {RECORD_LEN}-byte item record",
            buf.remaining()
        )));
    }

    let mut items = Vec::with_capacity(buf.remaining() / RECORD_LEN);
    while buf.has_remaining() {
        items.push(decode_item(&mut buf)?);
    }
    tracing::trace!(items = items.len(), "decoded menu file");

    Ok(MenuFile { header, items })
}

/// Decode one header record, consuming exactly [`RECORD_LEN`] bytes.
pub fn decode_header<B: Buf>(buf: &mut B) -> Result<MenuHeader> {
    if buf.remaining() < RECORD_LEN {
        return Err(MenuError::Malformed("header record too short".into()));
    }

    let version = buf.get_u16_le();
    if version != RECORD_VERSION {
        return Err(MenuError::UnsupportedVersion(version));
    }

    let numeric_mode = NumericMode::from_u8(buf.get_u8())?;
    let logging = LogMode::from_u8(buf.get_u8())?;
    let help_policy = HelpPolicy::from_u8(buf.get_u8())?;
    let flags = buf.get_u8();
    let operator_only = buf.get_u8() != 0;
    let co_operator_only = buf.get_u8() != 0;
    let min_sl = buf.get_u16_le();
    let min_dsl = buf.get_u16_le();
    let required = buf.get_u16_le();
    let conditional = buf.get_u16_le();
    let restricted = buf.get_u16_le();
    let password = get_fixed_str(buf, PASSWORD_LEN);
    let entry_script = get_fixed_str(buf, SCRIPT_LEN);
    buf.advance(RECORD_LEN - HEADER_USED);

    Ok(MenuHeader {
        numeric_mode,
        logging,
        help_policy,
        min_sl,
        min_dsl,
        required,
        conditional,
        restricted,
        operator_only,
        co_operator_only,
        password,
        deleted: flags & FLAG_DELETED != 0,
        entry_script,
    })
}

/// Decode one item record, consuming exactly [`RECORD_LEN`] bytes.
pub fn decode_item<B: Buf>(buf: &mut B) -> Result<MenuItem> {
    if buf.remaining() < RECORD_LEN {
        return Err(MenuError::Malformed("item record too short".into()));
    }

    let key = get_fixed_str(buf, KEY_LEN);
    let label = get_fixed_str(buf, LABEL_LEN);
    let execute = get_fixed_str(buf, EXECUTE_LEN);
    let min_sl = buf.get_u16_le();
    let max_sl = buf.get_u16_le();
    let min_dsl = buf.get_u16_le();
    let max_dsl = buf.get_u16_le();
    let required = buf.get_u16_le();
    let conditional = buf.get_u16_le();
    let restricted = buf.get_u16_le();
    let operator_only = buf.get_u8() != 0;
    let co_operator_only = buf.get_u8() != 0;
    let password = get_fixed_str(buf, PASSWORD_LEN);
    let visibility = Visibility::from_u8(buf.get_u8())?;
    let flags = buf.get_u8();
    buf.advance(RECORD_LEN - ITEM_USED);

    Ok(MenuItem {
        key,
        label,
        execute,
        min_sl,
        max_sl,
        min_dsl,
        max_dsl,
        required,
        conditional,
        restricted,
        operator_only,
        co_operator_only,
        password,
        visibility,
        deleted: flags & FLAG_DELETED != 0,
    })
}

/// Encode a menu file. Fails if any string does not fit its field.
pub fn encode_menu_file(file: &MenuFile) -> Result<Bytes> {
    let mut out = BytesMut::with_capacity(RECORD_LEN * (file.items.len() + 1));
    encode_header(&file.header, &mut out)?;
    for item in &file.items {
        encode_item(item, &mut out)?;
    }
    Ok(out.freeze())
}

pub fn encode_header(h: &MenuHeader, out: &mut BytesMut) -> Result<()> {
    out.put_u16_le(RECORD_VERSION);
    out.put_u8(h.numeric_mode.as_u8());
    out.put_u8(h.logging.as_u8());
    out.put_u8(h.help_policy.as_u8());
    out.put_u8(if h.deleted { FLAG_DELETED } else { 0 });
    out.put_u8(u8::from(h.operator_only));
    out.put_u8(u8::from(h.co_operator_only));
    out.put_u16_le(h.min_sl);
    out.put_u16_le(h.min_dsl);
    out.put_u16_le(h.required);
    out.put_u16_le(h.conditional);
    out.put_u16_le(h.restricted);
    put_fixed_str(out, "password", &h.password, PASSWORD_LEN)?;
    put_fixed_str(out, "entry_script", &h.entry_script, SCRIPT_LEN)?;
    out.put_bytes(0, RECORD_LEN - HEADER_USED);
    Ok(())
}

pub fn encode_item(item: &MenuItem, out: &mut BytesMut) -> Result<()> {
    put_fixed_str(out, "key", &item.key, KEY_LEN)?;
    put_fixed_str(out, "label", &item.label, LABEL_LEN)?;
    put_fixed_str(out, "execute", &item.execute, EXECUTE_LEN)?;
    out.put_u16_le(item.min_sl);
    out.put_u16_le(item.max_sl);
    out.put_u16_le(item.min_dsl);
    out.put_u16_le(item.max_dsl);
    out.put_u16_le(item.required);
    out.put_u16_le(item.conditional);
    out.put_u16_le(item.restricted);
    out.put_u8(u8::from(item.operator_only));
    out.put_u8(u8::from(item.co_operator_only));
    put_fixed_str(out, "password", &item.password, PASSWORD_LEN)?;
    out.put_u8(item.visibility.as_u8());
    out.put_u8(if item.deleted { FLAG_DELETED } else { 0 });
    out.put_bytes(0, RECORD_LEN - ITEM_USED);
    Ok(())
}

fn get_fixed_str<B: Buf>(buf: &mut B, width: usize) -> String {
    let raw = buf.copy_to_bytes(width);
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end]).into_owned()
}

fn put_fixed_str(out: &mut BytesMut, field: &str, s: &str, width: usize) -> Result<()> {
    // one byte is reserved for the terminator
    if s.len() >= width {
        return Err(MenuError::Malformed(format!(
            "{field} is {} bytes, limit is {}",
            s.len(),
            width - 1
        )));
    }
    if s.as_bytes().contains(&0) {
        return Err(MenuError::Malformed(format!("{field} contains a NUL byte")));
    }
    out.put_slice(s.as_bytes());
    out.put_bytes(0, width - s.len());
    Ok(())
}
