pub mod builder;

pub use builder::RequestBuilder;
