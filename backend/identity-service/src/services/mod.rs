pub mod directory;
pub mod session;

pub use directory::UserDirectory;
pub use session::SessionStore;
