//! Filesystem locations for config and history.

pub mod xdg_root;
