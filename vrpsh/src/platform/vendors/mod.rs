//! Built-in vendor platform implementations.

pub mod huawei;
