use super::*;

struct MapSecretStore(HashMap<String, String>);

impl SecretStore for MapSecretStore {
    fn get(&self, name: &str) -> Option<String> {
        self.0.get(name).cloned()
    }
}

#[test]
fn missing_key_returns_none() {
    let store = MapSecretStore(HashMap::new());
    assert!(store.get("CRNWATCH_SMS_API_KEY").is_none());
}

#[test]
fn present_key_returns_value() {
    let mut values = HashMap::new();
    values.insert("CRNWATCH_SMS_API_KEY".to_string(), "test-key".to_string());
    let store = MapSecretStore(values);
    assert_eq!(store.get("CRNWATCH_SMS_API_KEY").as_deref(), Some("test-key"));
}

#[test]
fn from_env_does_not_panic_when_unset() {
    let store = EnvSecretStore::from_env();
    let _ = store.get("CRNWATCH_DOES_NOT_EXIST");
}
