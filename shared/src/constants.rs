//! Constants shared by the client and the auth server.

/// Route name for account registration.
pub const ROUTE_REGISTER: &str = "/register";

/// Route name for login.
pub const ROUTE_LOGIN: &str = "/login";

/// Currency shown on stake buttons and balances.
pub const CURRENCY: &str = "KES";
