/// Answers whether an account exists on the host.
///
/// Implementations must fail open: when the answer cannot be determined they
/// return `true`, so an unavailable probe never turns into a finding.
pub trait UserLookup {
    fn exists(&self, name: &str) -> bool;
}

/// Lookup that trusts every name. Used when host checks are disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeUsersExist;

impl UserLookup for AssumeUsersExist {
    fn exists(&self, _name: &str) -> bool {
        true
    }
}

impl<F> UserLookup for F
where
    F: Fn(&str) -> bool,
{
    fn exists(&self, name: &str) -> bool {
        self(name)
    }
}
