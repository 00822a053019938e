pub mod connection;
pub mod layer;

pub use connection::Connection;
pub use layer::Layer;
