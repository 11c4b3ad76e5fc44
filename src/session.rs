pub mod countdown;
pub mod dispatcher;
pub mod format;
pub mod machine;
