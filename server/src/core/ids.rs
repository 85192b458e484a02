//! Ids - Generazione e validazione degli identificativi dei documenti
//!
//! Gli id generati dal server sono UUID v4 in forma compatta (32 caratteri esadecimali).
//! Gli id che arrivano dai client sono stringhe opache, controllate solo nel formato.

use lazy_static::lazy_static;
use regex::Regex;
use uuid::Uuid;

lazy_static! {
    static ref ID_FORMAT: Regex = Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("id regex is valid");
}

/// Genera un nuovo id univoco
pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Verifica che un id fornito dal client abbia un formato accettabile
pub fn is_valid_id(id: &str) -> bool {
    ID_FORMAT.is_match(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_new_id_shape() {
        let id = new_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(Uuid::parse_str(&id).is_ok());
        assert!(is_valid_id(&id));
    }

    #[test]
    fn test_new_id_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| new_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_is_valid_id() {
        assert!(is_valid_id("U1"));
        assert!(is_valid_id("65f1a2b3c4d5e6f708192a3b"));
        assert!(!is_valid_id(""));
        assert!(!is_valid_id("not an id"));
        assert!(!is_valid_id("../etc/passwd"));
        assert!(!is_valid_id(&"a".repeat(65)));
    }
}
