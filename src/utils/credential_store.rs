use keyring::Entry;

const SERVICE_NAME: &str = "sqlcell";

fn entry_for(credential_key: &str) -> Result<Entry, keyring::Error> {
    Entry::new(SERVICE_NAME, credential_key)
}

/// Store a password in the OS keyring under the given connection key.
pub fn store_password(credential_key: &str, password: &str) -> Result<(), keyring::Error> {
    entry_for(credential_key)?.set_password(password)
}

/// Retrieve a password from the OS keyring.
/// Returns Ok(None) if no credential is found (not an error).
pub fn get_password(credential_key: &str) -> Result<Option<String>, keyring::Error> {
    match entry_for(credential_key)?.get_password() {
        Ok(password) => Ok(Some(password)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Delete a password from the OS keyring.
/// Silently succeeds if no credential exists.
pub fn delete_password(credential_key: &str) -> Result<(), keyring::Error> {
    match entry_for(credential_key)?.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(e),
    }
}
