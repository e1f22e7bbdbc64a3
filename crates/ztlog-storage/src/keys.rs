//! Storage key constants.

/// Storage keys used by the admin client.
pub struct StorageKeys;

impl StorageKeys {
    /// Bearer token issued by `POST /v1/user/login`.
    ///
    /// The only durable client state; its absence means "not logged in".
    pub const ACCESS_TOKEN: &'static str = "accessToken";
}
