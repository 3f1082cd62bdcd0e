pub mod apply;
pub mod create;
pub mod export_crds;
pub mod install;
pub mod list;
pub mod set_condition;
pub mod uninstall;
pub mod validate;
pub mod version;
