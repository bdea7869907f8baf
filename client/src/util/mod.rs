//! Small shared helpers with no component or state dependencies.

pub mod markdown;
