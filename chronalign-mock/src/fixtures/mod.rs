pub mod archive;
pub mod values;
