mod credentials;

pub use credentials::FlashCredentialStore;
