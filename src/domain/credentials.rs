//! Secret verification capability used by sign-in.

/// Compares a secret supplied at sign-in with the one held for the account.
pub trait SecretVerifier: Send + Sync {
    fn verify(&self, supplied: &str, stored: &str) -> bool;
}

/// Plain equality on the stored string.
///
/// Secrets are currently persisted unhashed, so this is the only verifier that
/// matches what `AccountRepository::create` writes. Replacing it with a one-way
/// scheme means hashing on registration too; the repository contract stays as is.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaintextSecretVerifier;

impl SecretVerifier for PlaintextSecretVerifier {
    fn verify(&self, supplied: &str, stored: &str) -> bool {
        supplied == stored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plaintext_verifier_is_exact_match() {
        let verifier = PlaintextSecretVerifier;
        assert!(verifier.verify("hunter2", "hunter2"));
        assert!(!verifier.verify("Hunter2", "hunter2"));
        assert!(!verifier.verify("", "hunter2"));
    }
}
