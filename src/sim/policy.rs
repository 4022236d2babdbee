use crate::model::Domain;

/// Optional collaborator that can mute whole domains for a cycle
/// (e.g. an editor pausing HEALTH texture during a recovery stretch).
pub trait DomainPolicy {
    fn is_suppressed(&self, domain: Domain) -> bool;
}

/// Default policy: nothing is suppressed.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl DomainPolicy for AllowAll {
    fn is_suppressed(&self, _domain: Domain) -> bool {
        false
    }
}

impl<F> DomainPolicy for F
where
    F: Fn(Domain) -> bool,
{
    fn is_suppressed(&self, domain: Domain) -> bool {
        self(domain)
    }
}

/// Suppress a fixed list of domains.
#[derive(Debug, Clone, Default)]
pub struct SuppressDomains(pub Vec<Domain>);

impl DomainPolicy for SuppressDomains {
    fn is_suppressed(&self, domain: Domain) -> bool {
        self.0.contains(&domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_all_suppresses_nothing() {
        assert!(Domain::ALL.iter().all(|d| !AllowAll.is_suppressed(*d)));
    }

    #[test]
    fn closures_act_as_policies() {
        let policy = |d: Domain| d == Domain::Health;
        assert!(policy.is_suppressed(Domain::Health));
        assert!(!policy.is_suppressed(Domain::Arts));
    }

    #[test]
    fn suppress_list() {
        let policy = SuppressDomains(vec![Domain::Crime, Domain::Safety]);
        assert!(policy.is_suppressed(Domain::Safety));
        assert!(!policy.is_suppressed(Domain::General));
    }
}
