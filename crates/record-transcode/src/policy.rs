//! Union resolution policy.
//!
//! Values carry no discriminant telling which union branch they belong to, so
//! the transcoder picks a branch by trial conversion. The policy decides what
//! happens when several branches, or none, accept a value.

/// How a union resolves a value that is not simply null.
///
/// A null value always resolves to the `null` branch when the union has one,
/// whatever the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnionPolicy {
    /// When every non-null branch rejects the value and the union is nullable,
    /// resolve to null instead of failing.
    pub null_fallback: bool,
    /// Try every branch and fail if more than one accepts the value, instead
    /// of taking the first that does.
    pub reject_ambiguous: bool,
}

impl UnionPolicy {
    /// First successful branch in declaration order wins; unmatched values in
    /// a nullable union degrade to null.
    pub const FIRST_MATCH: UnionPolicy = UnionPolicy {
        null_fallback: true,
        reject_ambiguous: false,
    };

    /// Exactly one branch must accept the value; no null fallback.
    pub const STRICT: UnionPolicy = UnionPolicy {
        null_fallback: false,
        reject_ambiguous: true,
    };
}

impl Default for UnionPolicy {
    fn default() -> Self {
        UnionPolicy::FIRST_MATCH
    }
}
