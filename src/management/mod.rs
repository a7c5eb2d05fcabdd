mod session;

pub use session::SESSION_TOKEN_KEY;
pub use session::SessionError;
pub use session::SessionManager;
