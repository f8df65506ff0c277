mod structured_reference;

pub use structured_reference::normalize_structured_reference;
