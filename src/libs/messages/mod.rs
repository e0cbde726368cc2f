pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;

// Plain-string forms, used where the text is stored rather than printed (store notices)
pub fn success(msg: Message) -> String {
    format!("✅ {}", msg)
}

pub fn error(msg: Message) -> String {
    format!("❌ {}", msg)
}
