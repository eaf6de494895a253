use std::collections::HashSet;

/// Decides which callers may publish services and slots.
pub trait AccessPolicy: Send + Sync {
    fn is_privileged(&self, email: &str) -> bool;
}

/// Grants the administrative capability to a fixed set of emails (exact match).
#[derive(Clone, Debug, Default)]
pub struct AdminEmailPolicy {
    admins: HashSet<String>,
}

impl AdminEmailPolicy {
    pub fn new<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { admins: emails.into_iter().map(Into::into).collect() }
    }
}

impl AccessPolicy for AdminEmailPolicy {
    fn is_privileged(&self, email: &str) -> bool {
        !email.is_empty() && self.admins.contains(email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_only() {
        let policy = AdminEmailPolicy::new(["admin@example.com"]);
        assert!(policy.is_privileged("admin@example.com"));
        assert!(!policy.is_privileged("Admin@example.com"));
        assert!(!policy.is_privileged(""));
        assert!(!AdminEmailPolicy::default().is_privileged("admin@example.com"));
    }
}
