//! On-disk menu sets.
//!
//! Layout under the storage root:
//! - `<root>/<set>/<menu>.mnu`: binary menu records
//! - `<root>/<set>/<menu>.pro`: optional prompt sidecar
//! - `<root>/<set>/<menu>.{ans,b&w,msg}`: optional static help screens
//! - `<root>/descript.ion`: menu-set descriptions

pub mod menu_store;
pub mod registry;

pub use menu_store::{LoadedMenu, MenuStore};
pub use registry::MenuSetRegistry;
